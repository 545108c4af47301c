//! Built-in element renderers.
//!
//! One renderer per built-in element type. [`register_builtins`] installs all
//! of them; hosts can replace any entry afterwards.

mod card;
mod container;
mod image;
mod input;
mod media;
mod text;

pub use card::CardElementRenderer;
pub use container::{ColumnRenderer, ColumnSetRenderer, ContainerRenderer};
pub use image::{ImageRenderer, ImageSetRenderer};
pub use input::{
    ChoiceSetInputRenderer, DateInputRenderer, NumberInputRenderer, TextInputRenderer,
    TimeInputRenderer, ToggleInputRenderer,
};
pub use media::{MediaRenderer, SUPPORTED_MIME_TYPES};
pub use text::{FactSetRenderer, TextBlockRenderer};

use watercard_core::{
    Element, StatusCode,
    element::{
        AdaptiveCard, ChoiceSetInput, Column, ColumnSet, Container, DateInput, FactSet, Image,
        ImageSet, Media, NumberInput, TextBlock, TextInput, TimeInput, ToggleInput,
    },
};

use crate::{
    context::RenderContext,
    error::RenderError,
    registry::{ElementRenderer, ElementRendererRegistration},
    tree::{NodeId, Visual},
};

/// Registers a renderer for every built-in element type.
pub fn register_builtins(registry: &mut ElementRendererRegistration) {
    registry.set(AdaptiveCard::TYPE, CardElementRenderer);
    registry.set(Column::TYPE, ColumnRenderer);
    registry.set(ColumnSet::TYPE, ColumnSetRenderer);
    registry.set(Container::TYPE, ContainerRenderer);
    registry.set(FactSet::TYPE, FactSetRenderer);
    registry.set(Image::TYPE, ImageRenderer);
    registry.set(ImageSet::TYPE, ImageSetRenderer);
    registry.set(ChoiceSetInput::TYPE, ChoiceSetInputRenderer);
    registry.set(DateInput::TYPE, DateInputRenderer);
    registry.set(NumberInput::TYPE, NumberInputRenderer);
    registry.set(TextInput::TYPE, TextInputRenderer);
    registry.set(TimeInput::TYPE, TimeInputRenderer);
    registry.set(ToggleInput::TYPE, ToggleInputRenderer);
    registry.set(Media::TYPE, MediaRenderer);
    registry.set(TextBlock::TYPE, TextBlockRenderer);
}

/// Renders any element as [`Visual::Custom`], keeping its raw properties.
///
/// Not registered by default; hosts register it for custom types they draw
/// themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughRenderer;

impl ElementRenderer for PassthroughRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let properties = match element {
            Element::Custom(custom) => custom.properties.clone(),
            _ => serde_json::Map::new(),
        };
        ctx.insert(
            parent,
            Visual::Custom {
                type_id: element.type_id().to_owned(),
                properties,
            },
        )
    }
}

/// Failure for a renderer registered under a type it cannot handle.
fn mismatch(renderer: &str, element: &Element) -> RenderError {
    RenderError::element(
        StatusCode::RenderFailed,
        format!(
            "{renderer} renderer cannot render element of type '{}'",
            element.type_id()
        ),
    )
}
