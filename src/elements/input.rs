//! Input renderers.
//!
//! Every input needs an `id` and a host that supports interactivity. A
//! rendered input registers its id with the context so it is listed in the
//! render result.

use watercard_core::{
    Element, StatusCode,
    element::{ChoiceSetInput, DateInput, NumberInput, TextInput, TimeInput, ToggleInput},
};

use super::mismatch;
use crate::{
    context::RenderContext,
    error::RenderError,
    registry::ElementRenderer,
    tree::{InputVisual, NodeId, Visual},
};

fn insert_input(
    ctx: &mut RenderContext<'_>,
    parent: Option<NodeId>,
    element: &Element,
    input: InputVisual,
) -> Result<NodeId, RenderError> {
    let type_id = element.type_id();
    if !ctx.host_config().supports_interactivity {
        return Err(RenderError::element(
            StatusCode::InteractivityNotSupported,
            format!("{type_id} was not rendered because the host does not support interactivity"),
        ));
    }
    let id = element
        .id()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| RenderError::missing_property(type_id, "id"))?
        .to_owned();

    ctx.register_input(id.clone());
    ctx.insert(parent, Visual::Input { id, input })
}

macro_rules! input_renderer {
    ($(#[$meta:meta])* $name:ident, $variant:ident, |$input:ident| $visual:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl ElementRenderer for $name {
            fn render(
                &self,
                element: &Element,
                ctx: &mut RenderContext<'_>,
                parent: Option<NodeId>,
            ) -> Result<NodeId, RenderError> {
                let Element::$variant($input) = element else {
                    return Err(mismatch($variant::TYPE, element));
                };
                insert_input(ctx, parent, element, $visual)
            }
        }
    };
}

input_renderer!(
    /// Renders [`TextInput`].
    TextInputRenderer,
    TextInput,
    |input| InputVisual::Text {
        placeholder: input.placeholder.clone(),
        value: input.value.clone(),
        multiline: input.is_multiline,
        max_length: input.max_length,
        style: input.style,
    }
);

input_renderer!(
    /// Renders [`NumberInput`].
    NumberInputRenderer,
    NumberInput,
    |input| InputVisual::Number {
        placeholder: input.placeholder.clone(),
        value: input.value,
        min: input.min,
        max: input.max,
    }
);

input_renderer!(
    /// Renders [`DateInput`].
    DateInputRenderer,
    DateInput,
    |input| InputVisual::Date {
        placeholder: input.placeholder.clone(),
        value: input.value.clone(),
        min: input.min.clone(),
        max: input.max.clone(),
    }
);

input_renderer!(
    /// Renders [`TimeInput`].
    TimeInputRenderer,
    TimeInput,
    |input| InputVisual::Time {
        placeholder: input.placeholder.clone(),
        value: input.value.clone(),
        min: input.min.clone(),
        max: input.max.clone(),
    }
);

input_renderer!(
    /// Renders [`ToggleInput`] as a check box.
    ToggleInputRenderer,
    ToggleInput,
    |input| InputVisual::Toggle {
        title: input.title.clone(),
        checked: input.value.as_deref() == Some(input.value_on.as_str()),
        value_on: input.value_on.clone(),
        value_off: input.value_off.clone(),
    }
);

input_renderer!(
    /// Renders [`ChoiceSetInput`].
    ChoiceSetInputRenderer,
    ChoiceSetInput,
    |input| InputVisual::ChoiceSet {
        choices: input
            .choices
            .iter()
            .map(|choice| (choice.title.clone(), choice.value.clone()))
            .collect(),
        selected: selected_values(input),
        multi_select: input.is_multi_select,
        style: input.style,
    }
);

fn selected_values(input: &ChoiceSetInput) -> Vec<String> {
    let Some(value) = input.value.as_deref() else {
        return Vec::new();
    };
    let values = value
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned);
    if input.is_multi_select {
        values.collect()
    } else {
        values.take(1).collect()
    }
}
