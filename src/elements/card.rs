use watercard_core::{Action, ActionStyle, Element, StatusCode, element::AdaptiveCard};

use super::mismatch;
use crate::{
    context::RenderContext,
    error::RenderError,
    registry::ElementRenderer,
    resources::{Resource, keys},
    tree::{ButtonVisual, NodeId, Visual},
};

/// Renders the card surface, its body and its action bar.
///
/// The body is dispatched before the action bar so the bar ends up last.
#[derive(Debug, Default, Clone, Copy)]
pub struct CardElementRenderer;

impl ElementRenderer for CardElementRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::Card(card) = element else {
            return Err(mismatch(AdaptiveCard::TYPE, element));
        };

        let background = ctx.background(card.style);
        let node = ctx.insert(
            parent,
            Visual::Card {
                style: card.style,
                background,
                padding: ctx.host_config().spacing.padding,
                size: ctx.fixed_dimensions(),
                speak: card.speak.clone(),
            },
        )?;

        ctx.render_children(&card.body, node)?;
        render_actions(&card.actions, ctx, node)?;
        Ok(node)
    }
}

fn render_actions(
    actions: &[Action],
    ctx: &mut RenderContext<'_>,
    card: NodeId,
) -> Result<(), RenderError> {
    if actions.is_empty() {
        return Ok(());
    }

    let host_config = ctx.host_config();
    if !host_config.supports_interactivity {
        ctx.add_warning(
            StatusCode::InteractivityNotSupported,
            "actions were not rendered because the host does not support interactivity",
        );
        return Ok(());
    }

    let max_actions = usize::try_from(host_config.actions.max_actions).unwrap_or(usize::MAX);
    if actions.len() > max_actions {
        ctx.add_warning(
            StatusCode::MaxActionsExceeded,
            format!(
                "card declares {} actions but the host allows {max_actions}; the rest were dropped",
                actions.len()
            ),
        );
    }
    if max_actions == 0 {
        return Ok(());
    }

    let bar = ctx.insert(
        Some(card),
        Visual::ActionBar {
            button_spacing: host_config.actions.button_spacing,
        },
    )?;
    let spacing = host_config.spacing.resolve(host_config.actions.spacing);
    ctx.stamp(bar, None, spacing, None);

    for action in actions.iter().take(max_actions) {
        let button = button(action, ctx);
        ctx.insert(Some(bar), Visual::Button(button))?;
    }
    Ok(())
}

fn button(action: &Action, ctx: &RenderContext<'_>) -> ButtonVisual {
    let sentiment = |key| ctx.action_sentiment().get(key).and_then(Resource::as_brush);
    let styles = ctx.style_resources();

    let (background, hover_background, foreground, hover_foreground) = match action.style {
        ActionStyle::Positive => (
            sentiment(keys::POSITIVE_BACKGROUND),
            sentiment(keys::POSITIVE_HOVER_BACKGROUND),
            None,
            None,
        ),
        ActionStyle::Destructive => (
            styles.brush(keys::BUTTON_BACKGROUND),
            None,
            sentiment(keys::DESTRUCTIVE_FOREGROUND),
            sentiment(keys::DESTRUCTIVE_HOVER_FOREGROUND),
        ),
        ActionStyle::Default => (
            styles.brush(keys::BUTTON_BACKGROUND),
            None,
            styles.brush(keys::BUTTON_FOREGROUND),
            None,
        ),
    };

    ButtonVisual {
        id: action.id.clone(),
        title: action.title.clone(),
        style: action.style,
        icon_url: action.icon_url.clone(),
        kind: action.kind.clone(),
        background,
        hover_background,
        foreground,
        hover_foreground,
    }
}
