//! JSON payload parsing.
//!
//! [`JsonCardParser`] turns card JSON into a [`Document`]. A payload that is
//! not JSON, or whose root cannot be read as an element, yields no document.
//! Problems below the root are reported as warnings and the offending element
//! or action is dropped, so the rest of the card still renders.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    action::{Action, ActionFields, ActionKind},
    diagnostic::{Diagnostic, ErrorSink, Severity, StatusCode},
    element::{
        AdaptiveCard, ChoiceSetInput, Column, ColumnSet, Container, CustomElement, DateInput,
        Document, Element, FactSet, Image, ImageSet, Media, NumberInput, TextBlock, TextInput,
        TimeInput, ToggleInput,
    },
};

/// Turns raw payload text into a document.
pub trait CardParser: Send + Sync {
    /// Parses `text`. Never fails; problems are reported in the result.
    fn parse(&self, text: &str) -> ParseResult;
}

impl<F> CardParser for F
where
    F: Fn(&str) -> ParseResult + Send + Sync,
{
    fn parse(&self, text: &str) -> ParseResult {
        self(text)
    }
}

/// Outcome of parsing a payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    document: Option<Document>,
    errors: ErrorSink,
}

impl ParseResult {
    /// Creates a result from its parts.
    #[must_use]
    pub const fn new(document: Option<Document>, errors: ErrorSink) -> Self {
        Self { document, errors }
    }

    /// Returns the parsed document, if the payload was usable.
    #[must_use]
    pub const fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Returns every error and warning reported while parsing.
    #[must_use]
    pub const fn errors(&self) -> &ErrorSink {
        &self.errors
    }

    /// Splits the result into document and diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (Option<Document>, ErrorSink) {
        (self.document, self.errors)
    }
}

/// The default parser for Adaptive Card JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCardParser;

impl JsonCardParser {
    /// Creates a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses an already decoded JSON value.
    #[must_use]
    pub fn parse_value(&self, value: &Value) -> ParseResult {
        let mut reader = Reader::default();
        let document = match reader.element(value, None) {
            Ok(root) => Some(Document::new(root)),
            Err(failure) => {
                reader
                    .sink
                    .push(Diagnostic::new(Severity::Error, failure.code, failure.message));
                None
            }
        };
        ParseResult::new(document, reader.sink)
    }
}

impl CardParser for JsonCardParser {
    fn parse(&self, text: &str) -> ParseResult {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.parse_value(&value),
            Err(error) => {
                let mut sink = ErrorSink::new();
                sink.add_error(StatusCode::InvalidJson, format!("Invalid JSON: {error}"));
                ParseResult::new(None, sink)
            }
        }
    }
}

impl Document {
    /// Parses card JSON with [`JsonCardParser`].
    #[must_use]
    pub fn from_json(text: &str) -> ParseResult {
        JsonCardParser.parse(text)
    }
}

struct Failure {
    code: StatusCode,
    message: String,
}

impl Failure {
    fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Default)]
struct Reader {
    sink: ErrorSink,
}

impl Reader {
    fn element(&mut self, value: &Value, default_type: Option<&str>) -> Result<Element, Failure> {
        let Some(object) = value.as_object() else {
            return Err(Failure::new(
                StatusCode::InvalidPropertyValue,
                "Expected an element object",
            ));
        };

        let type_id = match object.get("type") {
            Some(Value::String(type_id)) => type_id.as_str(),
            Some(_) => {
                return Err(Failure::new(
                    StatusCode::InvalidPropertyValue,
                    "Property 'type' must be a string",
                ));
            }
            None => default_type.ok_or_else(|| {
                Failure::new(
                    StatusCode::RequiredPropertyMissing,
                    "Property 'type' is required",
                )
            })?,
        };

        let element = match type_id {
            AdaptiveCard::TYPE => Element::Card(self.card(value, object)?),
            Container::TYPE => {
                let mut container: Container = typed(value, type_id)?;
                container.items = self.children(object, "items", None);
                Element::Container(container)
            }
            ColumnSet::TYPE => {
                let mut set: ColumnSet = typed(value, type_id)?;
                set.columns = self.children(object, "columns", Some(Column::TYPE));
                Element::ColumnSet(set)
            }
            Column::TYPE => {
                let mut column: Column = typed(value, type_id)?;
                column.items = self.children(object, "items", None);
                Element::Column(column)
            }
            ImageSet::TYPE => {
                let mut set: ImageSet = typed(value, type_id)?;
                set.images = self.children(object, "images", Some(Image::TYPE));
                Element::ImageSet(set)
            }
            TextBlock::TYPE => Element::TextBlock(typed(value, type_id)?),
            Image::TYPE => Element::Image(typed(value, type_id)?),
            FactSet::TYPE => Element::FactSet(typed(value, type_id)?),
            Media::TYPE => Element::Media(typed(value, type_id)?),
            TextInput::TYPE => Element::TextInput(typed(value, type_id)?),
            NumberInput::TYPE => Element::NumberInput(typed(value, type_id)?),
            DateInput::TYPE => Element::DateInput(typed(value, type_id)?),
            TimeInput::TYPE => Element::TimeInput(typed(value, type_id)?),
            ToggleInput::TYPE => Element::ToggleInput(typed(value, type_id)?),
            ChoiceSetInput::TYPE => Element::ChoiceSetInput(typed(value, type_id)?),
            _ => Element::Custom(CustomElement {
                type_id: type_id.to_owned(),
                common: typed(value, type_id)?,
                properties: object.clone(),
            }),
        };
        Ok(element)
    }

    fn card(
        &mut self,
        value: &Value,
        object: &Map<String, Value>,
    ) -> Result<AdaptiveCard, Failure> {
        let mut card: AdaptiveCard = typed(value, AdaptiveCard::TYPE)?;
        card.body = self.children(object, "body", None);
        card.actions = self.actions(object);
        Ok(card)
    }

    fn children(
        &mut self,
        object: &Map<String, Value>,
        property: &str,
        default_type: Option<&str>,
    ) -> Vec<Element> {
        let Some(value) = object.get(property) else {
            return Vec::new();
        };
        let Some(items) = value.as_array() else {
            self.sink.add_warning(
                StatusCode::InvalidPropertyValue,
                format!("Property '{property}' must be an array; ignoring it"),
            );
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match self.element(item, default_type) {
                Ok(element) => Some(element),
                Err(failure) => {
                    self.sink.add_warning(
                        failure.code,
                        format!("{}; element dropped from '{property}'", failure.message),
                    );
                    None
                }
            })
            .collect()
    }

    fn actions(&mut self, object: &Map<String, Value>) -> Vec<Action> {
        let Some(value) = object.get("actions") else {
            return Vec::new();
        };
        let Some(items) = value.as_array() else {
            self.sink.add_warning(
                StatusCode::InvalidPropertyValue,
                "Property 'actions' must be an array; ignoring it",
            );
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match self.action(item) {
                Ok(action) => Some(action),
                Err(failure) => {
                    self.sink
                        .add_warning(failure.code, format!("{}; action dropped", failure.message));
                    None
                }
            })
            .collect()
    }

    fn action(&mut self, value: &Value) -> Result<Action, Failure> {
        let type_id = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Failure::new(
                    StatusCode::RequiredPropertyMissing,
                    "Action property 'type' is required",
                )
            })?;
        let fields: ActionFields = typed(value, type_id)?;

        let kind = match type_id {
            Action::OPEN_URL => ActionKind::OpenUrl {
                url: fields.url.ok_or_else(|| {
                    Failure::new(
                        StatusCode::RequiredPropertyMissing,
                        "Action.OpenUrl requires property 'url'",
                    )
                })?,
            },
            Action::SUBMIT => ActionKind::Submit { data: fields.data },
            Action::SHOW_CARD => {
                let card = value.get("card").ok_or_else(|| {
                    Failure::new(
                        StatusCode::RequiredPropertyMissing,
                        "Action.ShowCard requires property 'card'",
                    )
                })?;
                match self.element(card, Some(AdaptiveCard::TYPE))? {
                    Element::Card(card) => ActionKind::ShowCard {
                        card: Box::new(card),
                    },
                    other => {
                        return Err(Failure::new(
                            StatusCode::InvalidPropertyValue,
                            format!(
                                "Action.ShowCard expects an AdaptiveCard, found '{}'",
                                other.type_id()
                            ),
                        ));
                    }
                }
            }
            unknown => {
                return Err(Failure::new(
                    StatusCode::UnknownActionElementType,
                    format!("Unknown action type '{unknown}'"),
                ));
            }
        };

        Ok(Action {
            id: fields.id,
            title: fields.title,
            style: fields.style,
            icon_url: fields.icon_url,
            kind,
        })
    }
}

fn typed<'de, T: Deserialize<'de>>(value: &'de Value, type_id: &str) -> Result<T, Failure> {
    T::deserialize(value).map_err(|error| {
        let message = error.to_string();
        let code = if message.starts_with("missing field") {
            StatusCode::RequiredPropertyMissing
        } else {
            StatusCode::InvalidPropertyValue
        };
        Failure::new(code, format!("{type_id}: {message}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ColumnWidth;

    #[test]
    fn invalid_json_is_fatal() {
        let result = Document::from_json("{ not json");
        assert!(result.document().is_none());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors().as_slice()[0].code(), StatusCode::InvalidJson);
    }

    #[test]
    fn root_without_type_is_fatal() {
        let result = Document::from_json(r#"{ "body": [] }"#);
        assert!(result.document().is_none());
        assert_eq!(
            result.errors().as_slice()[0].code(),
            StatusCode::RequiredPropertyMissing
        );
        assert!(result.errors().has_errors());
    }

    #[test]
    fn parses_a_card_tree() {
        let result = Document::from_json(
            r#"{
                "type": "AdaptiveCard",
                "version": "1.2",
                "body": [
                    { "type": "TextBlock", "text": "Title", "size": "large", "separator": true },
                    {
                        "type": "ColumnSet",
                        "columns": [
                            { "width": "stretch", "items": [ { "type": "Image", "url": "https://example.com/a.png" } ] },
                            { "type": "Column", "width": 2 }
                        ]
                    },
                    { "type": "Input.Text", "id": "name", "placeholder": "Name" }
                ],
                "actions": [
                    { "type": "Action.Submit", "title": "Send", "style": "positive" },
                    { "type": "Action.OpenUrl", "title": "Docs", "url": "https://example.com" }
                ]
            }"#,
        );

        assert!(result.errors().is_empty(), "{:?}", result.errors());
        let document = result.document().unwrap();
        let Element::Card(card) = document.root() else {
            panic!("expected card root");
        };
        assert_eq!(card.version.as_deref(), Some("1.2"));
        assert_eq!(card.body.len(), 3);
        assert!(card.body[0].common().separator);

        let Element::ColumnSet(set) = &card.body[1] else {
            panic!("expected column set");
        };
        let Element::Column(first) = &set.columns[0] else {
            panic!("columns default to Column");
        };
        assert_eq!(first.width, ColumnWidth::Stretch);
        assert_eq!(first.items[0].type_id(), Image::TYPE);

        assert_eq!(card.actions.len(), 2);
        assert_eq!(card.actions[0].type_id(), Action::SUBMIT);
    }

    #[test]
    fn bad_children_become_warnings() {
        let result = Document::from_json(
            r#"{
                "type": "Container",
                "items": [
                    { "type": "TextBlock" },
                    { "type": "TextBlock", "text": "kept" },
                    42
                ]
            }"#,
        );

        let document = result.document().expect("container still parses");
        assert_eq!(document.root().children().len(), 1);
        let codes: Vec<_> = result.errors().iter().map(Diagnostic::code).collect();
        assert_eq!(
            codes,
            [
                StatusCode::RequiredPropertyMissing,
                StatusCode::InvalidPropertyValue
            ]
        );
        assert!(!result.errors().has_errors());
    }

    #[test]
    fn unknown_types_are_kept_as_custom_elements() {
        let result = Document::from_json(r#"{ "type": "Rating", "id": "stars", "max": 5 }"#);
        let Element::Custom(custom) = result.document().unwrap().root() else {
            panic!("expected custom element");
        };
        assert_eq!(custom.type_id, "Rating");
        assert_eq!(custom.common.id.as_deref(), Some("stars"));
        assert_eq!(custom.properties["max"], 5);
    }

    #[test]
    fn unknown_actions_are_dropped_with_warning() {
        let result = Document::from_json(
            r#"{
                "type": "AdaptiveCard",
                "actions": [ { "type": "Action.Execute", "title": "Go" } ]
            }"#,
        );
        let Element::Card(card) = result.document().unwrap().root() else {
            panic!("expected card root");
        };
        assert!(card.actions.is_empty());
        assert_eq!(
            result.errors().as_slice()[0].code(),
            StatusCode::UnknownActionElementType
        );
    }
}
