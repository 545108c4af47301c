use watercard_core::{
    Element,
    element::{
        ContainerStyle, FactSet, ForegroundColor, HorizontalAlignment, TextBlock, TextSize,
        TextWeight,
    },
    host_config::FactTextConfig,
};

use super::mismatch;
use crate::{
    context::RenderContext,
    error::RenderError,
    registry::ElementRenderer,
    tree::{NodeId, TextVisual, Visual},
};

/// Renders [`TextBlock`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TextBlockRenderer;

impl ElementRenderer for TextBlockRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::TextBlock(block) = element else {
            return Err(mismatch(TextBlock::TYPE, element));
        };

        let style = ctx.container_style(parent);
        let mut text = styled_text(
            ctx,
            style,
            &block.text,
            TextStyle {
                size: block.size,
                weight: block.weight,
                color: block.color,
                subtle: block.is_subtle,
                wrap: block.wrap,
            },
        );
        text.max_lines = block.max_lines.filter(|_| block.wrap);
        text.alignment = block.horizontal_alignment;
        ctx.insert(parent, Visual::Text(text))
    }
}

/// Renders [`FactSet`] as a two-column table.
#[derive(Debug, Default, Clone, Copy)]
pub struct FactSetRenderer;

impl ElementRenderer for FactSetRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::FactSet(set) = element else {
            return Err(mismatch(FactSet::TYPE, element));
        };

        let style = ctx.container_style(parent);
        let config = ctx.host_config().fact_set;
        let rows = set
            .facts
            .iter()
            .map(|fact| {
                (
                    styled_text(ctx, style, &fact.title, config.title.into()),
                    styled_text(ctx, style, &fact.value, config.value.into()),
                )
            })
            .collect();

        ctx.insert(
            parent,
            Visual::FactTable {
                rows,
                spacing: config.spacing,
            },
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    size: TextSize,
    weight: TextWeight,
    color: ForegroundColor,
    subtle: bool,
    wrap: bool,
}

impl From<FactTextConfig> for TextStyle {
    fn from(config: FactTextConfig) -> Self {
        Self {
            size: config.size,
            weight: config.weight,
            color: config.color,
            subtle: config.is_subtle,
            wrap: config.wrap,
        }
    }
}

fn styled_text(
    ctx: &mut RenderContext<'_>,
    container: ContainerStyle,
    text: &str,
    style: TextStyle,
) -> TextVisual {
    let host_config = ctx.host_config();
    TextVisual {
        text: text.to_owned(),
        font_family: host_config.font_family.clone(),
        font_size: host_config.font_sizes.resolve(style.size),
        font_weight: host_config.font_weights.resolve(style.weight),
        color: ctx.foreground(style.color, container, style.subtle),
        wrap: style.wrap,
        max_lines: None,
        alignment: HorizontalAlignment::Left,
    }
}
