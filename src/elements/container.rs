use watercard_core::{
    Color, Element,
    element::{Column, ColumnSet, Container, ContainerStyle},
};

use super::mismatch;
use crate::{
    context::RenderContext,
    error::RenderError,
    registry::ElementRenderer,
    tree::{NodeId, Visual},
};

/// Renders [`Container`] as a vertical stack of its items.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerRenderer;

impl ElementRenderer for ContainerRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::Container(container) = element else {
            return Err(mismatch(Container::TYPE, element));
        };
        let (style, background) = styled(ctx, parent, container.style);
        let node = ctx.insert(
            parent,
            Visual::Stack {
                style,
                background,
                alignment: container.vertical_content_alignment,
            },
        )?;
        ctx.render_children(&container.items, node)?;
        Ok(node)
    }
}

/// Renders [`ColumnSet`] as a horizontal row.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnSetRenderer;

impl ElementRenderer for ColumnSetRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::ColumnSet(set) = element else {
            return Err(mismatch(ColumnSet::TYPE, element));
        };
        let (style, background) = styled(ctx, parent, set.style);
        let node = ctx.insert(parent, Visual::Columns { style, background })?;
        ctx.render_children(&set.columns, node)?;
        Ok(node)
    }
}

/// Renders one [`Column`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnRenderer;

impl ElementRenderer for ColumnRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::Column(column) = element else {
            return Err(mismatch(Column::TYPE, element));
        };
        let (style, background) = styled(ctx, parent, column.style);
        let node = ctx.insert(
            parent,
            Visual::Column {
                style,
                width: column.width,
                background,
            },
        )?;
        ctx.render_children(&column.items, node)?;
        Ok(node)
    }
}

// An explicit style that differs from the inherited one gets its own background.
fn styled(
    ctx: &mut RenderContext<'_>,
    parent: Option<NodeId>,
    declared: Option<ContainerStyle>,
) -> (ContainerStyle, Option<Color>) {
    let inherited = ctx.container_style(parent);
    match declared {
        Some(style) if style != inherited => (style, Some(ctx.background(style))),
        _ => (inherited, None),
    }
}
