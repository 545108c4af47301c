//! The card document model.
//!
//! A [`Document`] owns a tree of [`Element`]s. The set of built-in variants is
//! closed; anything else a payload declares is kept as a [`CustomElement`] so
//! hosts can register renderers for their own types.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::action::Action;

keyword_enum! {
    /// Vertical gap inserted before an element.
    pub enum Spacing {
        /// No gap.
        None => "none",
        /// Small gap.
        Small => "small",
        /// Default gap.
        Default => "default",
        /// Medium gap.
        Medium => "medium",
        /// Large gap.
        Large => "large",
        /// Extra large gap.
        ExtraLarge => "extraLarge",
        /// Same as the card padding.
        Padding => "padding",
    }
    default Default
}

keyword_enum! {
    /// Semantic text color role.
    pub enum ForegroundColor {
        /// Regular text.
        Default => "default",
        /// Forced dark text.
        Dark => "dark",
        /// Forced light text.
        Light => "light",
        /// Accent color.
        Accent => "accent",
        /// Positive outcome.
        Good => "good",
        /// Caution.
        Warning => "warning",
        /// Needs attention / destructive.
        Attention => "attention",
    }
    default Default
}

keyword_enum! {
    /// Visual style of a container.
    pub enum ContainerStyle {
        /// Plain container.
        Default => "default",
        /// Highlighted container.
        Emphasis => "emphasis",
    }
    default Default
}

keyword_enum! {
    /// Relative text size.
    pub enum TextSize {
        /// Small text.
        Small => "small",
        /// Body text.
        Default => "default",
        /// Medium text.
        Medium => "medium",
        /// Large text.
        Large => "large",
        /// Extra large text.
        ExtraLarge => "extraLarge",
    }
    default Default
}

keyword_enum! {
    /// Relative font weight.
    pub enum TextWeight {
        /// Thin text.
        Lighter => "lighter",
        /// Regular text.
        Default => "default",
        /// Bold text.
        Bolder => "bolder",
    }
    default Default
}

keyword_enum! {
    /// Horizontal alignment inside the parent.
    pub enum HorizontalAlignment {
        /// Leading edge.
        Left => "left",
        /// Centered.
        Center => "center",
        /// Trailing edge.
        Right => "right",
    }
    default Left
}

keyword_enum! {
    /// Vertical alignment of a container's content.
    pub enum VerticalAlignment {
        /// Top edge.
        Top => "top",
        /// Centered.
        Center => "center",
        /// Bottom edge.
        Bottom => "bottom",
    }
    default Top
}

keyword_enum! {
    /// Image size class.
    pub enum ImageSize {
        /// Natural size, shrunk to fit.
        Auto => "auto",
        /// Fill the available width.
        Stretch => "stretch",
        /// Host small size.
        Small => "small",
        /// Host medium size.
        Medium => "medium",
        /// Host large size.
        Large => "large",
    }
    default Auto
}

keyword_enum! {
    /// Image cropping style.
    pub enum ImageStyle {
        /// Rectangular.
        Default => "default",
        /// Cropped to a circle.
        Person => "person",
    }
    default Default
}

keyword_enum! {
    /// Keyboard hint for text inputs.
    pub enum TextInputStyle {
        /// Plain text.
        Text => "text",
        /// Telephone number.
        Tel => "tel",
        /// URL.
        Url => "url",
        /// E-mail address.
        Email => "email",
    }
    default Text
}

keyword_enum! {
    /// Presentation of a choice set.
    pub enum ChoiceSetStyle {
        /// Drop-down list.
        Compact => "compact",
        /// Radio buttons or check boxes.
        Expanded => "expanded",
    }
    default Compact
}

/// Type identifiers of every built-in element, in registration order.
pub const BUILTIN_TYPES: [&str; 15] = [
    AdaptiveCard::TYPE,
    Column::TYPE,
    ColumnSet::TYPE,
    Container::TYPE,
    FactSet::TYPE,
    Image::TYPE,
    ImageSet::TYPE,
    ChoiceSetInput::TYPE,
    DateInput::TYPE,
    NumberInput::TYPE,
    TextInput::TYPE,
    TimeInput::TYPE,
    ToggleInput::TYPE,
    Media::TYPE,
    TextBlock::TYPE,
];

/// Properties shared by every element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementCommon {
    /// Host-visible identifier.
    pub id: Option<String>,
    /// Gap before this element.
    pub spacing: Spacing,
    /// Whether a separator line is drawn before this element.
    pub separator: bool,
}

/// A parsed card document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wraps a root element.
    #[must_use]
    pub const fn new(root: Element) -> Self {
        Self { root }
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Consumes the document, returning the root element.
    #[must_use]
    pub fn into_root(self) -> Element {
        self.root
    }
}

impl From<Element> for Document {
    fn from(root: Element) -> Self {
        Self::new(root)
    }
}

impl From<AdaptiveCard> for Document {
    fn from(card: AdaptiveCard) -> Self {
        Self::new(Element::Card(card))
    }
}

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Element {
    Card(AdaptiveCard),
    Container(Container),
    ColumnSet(ColumnSet),
    Column(Column),
    TextBlock(TextBlock),
    Image(Image),
    ImageSet(ImageSet),
    FactSet(FactSet),
    Media(Media),
    TextInput(TextInput),
    NumberInput(NumberInput),
    DateInput(DateInput),
    TimeInput(TimeInput),
    ToggleInput(ToggleInput),
    ChoiceSetInput(ChoiceSetInput),
    Custom(CustomElement),
}

impl Element {
    /// Returns the type identifier used for renderer lookup.
    #[must_use]
    pub fn type_id(&self) -> &str {
        match self {
            Self::Card(_) => AdaptiveCard::TYPE,
            Self::Container(_) => Container::TYPE,
            Self::ColumnSet(_) => ColumnSet::TYPE,
            Self::Column(_) => Column::TYPE,
            Self::TextBlock(_) => TextBlock::TYPE,
            Self::Image(_) => Image::TYPE,
            Self::ImageSet(_) => ImageSet::TYPE,
            Self::FactSet(_) => FactSet::TYPE,
            Self::Media(_) => Media::TYPE,
            Self::TextInput(_) => TextInput::TYPE,
            Self::NumberInput(_) => NumberInput::TYPE,
            Self::DateInput(_) => DateInput::TYPE,
            Self::TimeInput(_) => TimeInput::TYPE,
            Self::ToggleInput(_) => ToggleInput::TYPE,
            Self::ChoiceSetInput(_) => ChoiceSetInput::TYPE,
            Self::Custom(custom) => &custom.type_id,
        }
    }

    /// Returns the properties shared by every element.
    #[must_use]
    pub const fn common(&self) -> &ElementCommon {
        match self {
            Self::Card(card) => &card.common,
            Self::Container(element) => &element.common,
            Self::ColumnSet(element) => &element.common,
            Self::Column(element) => &element.common,
            Self::TextBlock(element) => &element.common,
            Self::Image(element) => &element.common,
            Self::ImageSet(element) => &element.common,
            Self::FactSet(element) => &element.common,
            Self::Media(element) => &element.common,
            Self::TextInput(element) => &element.common,
            Self::NumberInput(element) => &element.common,
            Self::DateInput(element) => &element.common,
            Self::TimeInput(element) => &element.common,
            Self::ToggleInput(element) => &element.common,
            Self::ChoiceSetInput(element) => &element.common,
            Self::Custom(element) => &element.common,
        }
    }

    /// Returns the element's id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.common().id.as_deref()
    }

    /// Returns the child elements of container-like variants.
    ///
    /// Everything else, custom elements included, returns an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Card(card) => &card.body,
            Self::Container(container) => &container.items,
            Self::ColumnSet(set) => &set.columns,
            Self::Column(column) => &column.items,
            Self::ImageSet(set) => &set.images,
            _ => &[],
        }
    }

    /// Returns `true` for variants that hold child elements.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Card(_)
                | Self::Container(_)
                | Self::ColumnSet(_)
                | Self::Column(_)
                | Self::ImageSet(_)
        )
    }
}

/// Card root: a body of elements plus card-level actions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdaptiveCard {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Schema version declared by the payload.
    pub version: Option<String>,
    /// Text shown by hosts that cannot render the card.
    pub fallback_text: Option<String>,
    /// Spoken summary.
    pub speak: Option<String>,
    /// Container style of the card surface.
    pub style: ContainerStyle,
    /// Body elements.
    #[serde(skip)]
    pub body: Vec<Element>,
    /// Card-level actions.
    #[serde(skip)]
    pub actions: Vec<Action>,
}

impl AdaptiveCard {
    /// Type identifier.
    pub const TYPE: &'static str = "AdaptiveCard";

    /// Creates a card with the given body.
    #[must_use]
    pub fn new(body: Vec<Element>) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }
}

/// Vertical stack of elements.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Background style; `None` inherits the parent's.
    pub style: Option<ContainerStyle>,
    /// Alignment of the items.
    pub vertical_content_alignment: VerticalAlignment,
    /// Child elements.
    #[serde(skip)]
    pub items: Vec<Element>,
}

impl Container {
    /// Type identifier.
    pub const TYPE: &'static str = "Container";

    /// Creates a container with the given items.
    #[must_use]
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

/// Horizontal row of columns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnSet {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Background style.
    pub style: Option<ContainerStyle>,
    /// Columns, normally [`Element::Column`]s.
    #[serde(skip)]
    pub columns: Vec<Element>,
}

impl ColumnSet {
    /// Type identifier.
    pub const TYPE: &'static str = "ColumnSet";

    /// Creates a column set with the given columns.
    #[must_use]
    pub fn new(columns: Vec<Element>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }
}

/// Width of a column inside a column set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ColumnWidth {
    /// Sized to content.
    #[default]
    Auto,
    /// Takes the remaining space.
    Stretch,
    /// Proportional share of the remaining space.
    Weight(f64),
    /// Fixed width in pixels.
    Pixels(u32),
}

impl<'de> Deserialize<'de> for ColumnWidth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(weight) if weight > 0.0 => Self::Weight(weight),
            Raw::Number(_) => Self::Auto,
            Raw::Text(text) => parse_column_width(&text),
        })
    }
}

fn parse_column_width(text: &str) -> ColumnWidth {
    let text = text.trim();
    if text.eq_ignore_ascii_case("stretch") {
        return ColumnWidth::Stretch;
    }
    if let Some(pixels) = text.strip_suffix("px") {
        return pixels
            .trim()
            .parse()
            .map_or(ColumnWidth::Auto, ColumnWidth::Pixels);
    }
    match text.parse::<f64>() {
        Ok(weight) if weight > 0.0 => ColumnWidth::Weight(weight),
        _ => ColumnWidth::Auto,
    }
}

/// One column of a column set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Width rule.
    pub width: ColumnWidth,
    /// Background style.
    pub style: Option<ContainerStyle>,
    /// Child elements.
    #[serde(skip)]
    pub items: Vec<Element>,
}

impl Column {
    /// Type identifier.
    pub const TYPE: &'static str = "Column";

    /// Creates a column with the given items.
    #[must_use]
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

/// A run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// The text to display.
    pub text: String,
    /// Semantic color.
    #[serde(default)]
    pub color: ForegroundColor,
    /// Relative size.
    #[serde(default)]
    pub size: TextSize,
    /// Relative weight.
    #[serde(default)]
    pub weight: TextWeight,
    /// Uses the subtle variant of the color.
    #[serde(default)]
    pub is_subtle: bool,
    /// Allows wrapping onto multiple lines.
    #[serde(default)]
    pub wrap: bool,
    /// Line limit when wrapping.
    #[serde(default)]
    pub max_lines: Option<u32>,
    /// Alignment inside the parent.
    #[serde(default)]
    pub horizontal_alignment: HorizontalAlignment,
}

impl TextBlock {
    /// Type identifier.
    pub const TYPE: &'static str = "TextBlock";

    /// Creates a text block with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A single image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Image URI.
    pub url: String,
    /// Size class; `None` defers to the parent (image sets) or `auto`.
    #[serde(default)]
    pub size: Option<ImageSize>,
    /// Cropping style.
    #[serde(default)]
    pub style: ImageStyle,
    /// Accessible description.
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Alignment inside the parent.
    #[serde(default)]
    pub horizontal_alignment: HorizontalAlignment,
}

impl Image {
    /// Type identifier.
    pub const TYPE: &'static str = "Image";

    /// Creates an image with default styling.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// A gallery of images sharing one size.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSet {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Size applied to every image that does not set one.
    pub image_size: Option<ImageSize>,
    /// Images, normally [`Element::Image`]s.
    #[serde(skip)]
    pub images: Vec<Element>,
}

impl ImageSet {
    /// Type identifier.
    pub const TYPE: &'static str = "ImageSet";
}

/// Title/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactSet {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// The facts, in display order.
    pub facts: Vec<Fact>,
}

impl FactSet {
    /// Type identifier.
    pub const TYPE: &'static str = "FactSet";
}

/// One row of a fact set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fact {
    /// Left column.
    pub title: String,
    /// Right column.
    pub value: String,
}

/// Audio or video content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Media {
    /// Common properties.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Candidate sources, first playable wins.
    pub sources: Vec<MediaSource>,
    /// Poster image URI.
    pub poster: Option<String>,
    /// Accessible description.
    pub alt_text: Option<String>,
}

impl Media {
    /// Type identifier.
    pub const TYPE: &'static str = "Media";
}

/// One candidate source of a media element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaSource {
    /// MIME type, e.g. `video/mp4`.
    pub mime_type: String,
    /// Source URI.
    pub url: String,
}

/// Free text input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextInput {
    /// Common properties; `id` is required for inputs.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Hint shown when empty.
    pub placeholder: Option<String>,
    /// Initial value.
    pub value: Option<String>,
    /// Allows multiple lines.
    pub is_multiline: bool,
    /// Maximum length in characters.
    pub max_length: Option<u32>,
    /// Keyboard hint.
    pub style: TextInputStyle,
}

impl TextInput {
    /// Type identifier.
    pub const TYPE: &'static str = "Input.Text";
}

/// Numeric input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberInput {
    /// Common properties; `id` is required for inputs.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Hint shown when empty.
    pub placeholder: Option<String>,
    /// Initial value.
    pub value: Option<f64>,
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
}

impl NumberInput {
    /// Type identifier.
    pub const TYPE: &'static str = "Input.Number";
}

/// Date picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateInput {
    /// Common properties; `id` is required for inputs.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Hint shown when empty.
    pub placeholder: Option<String>,
    /// Initial value, `YYYY-MM-DD`.
    pub value: Option<String>,
    /// Earliest selectable date.
    pub min: Option<String>,
    /// Latest selectable date.
    pub max: Option<String>,
}

impl DateInput {
    /// Type identifier.
    pub const TYPE: &'static str = "Input.Date";
}

/// Time picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeInput {
    /// Common properties; `id` is required for inputs.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Hint shown when empty.
    pub placeholder: Option<String>,
    /// Initial value, `HH:MM`.
    pub value: Option<String>,
    /// Earliest selectable time.
    pub min: Option<String>,
    /// Latest selectable time.
    pub max: Option<String>,
}

impl TimeInput {
    /// Type identifier.
    pub const TYPE: &'static str = "Input.Time";
}

/// Check box.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToggleInput {
    /// Common properties; `id` is required for inputs.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Label next to the box.
    pub title: String,
    /// Initial value, compared against `value_on`.
    pub value: Option<String>,
    /// Value submitted when checked.
    pub value_on: String,
    /// Value submitted when unchecked.
    pub value_off: String,
}

impl Default for ToggleInput {
    fn default() -> Self {
        Self {
            common: ElementCommon::default(),
            title: String::new(),
            value: None,
            value_on: "true".to_owned(),
            value_off: "false".to_owned(),
        }
    }
}

impl ToggleInput {
    /// Type identifier.
    pub const TYPE: &'static str = "Input.Toggle";
}

/// Selection from a fixed list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoiceSetInput {
    /// Common properties; `id` is required for inputs.
    #[serde(flatten)]
    pub common: ElementCommon,
    /// Available choices.
    pub choices: Vec<Choice>,
    /// Allows selecting more than one choice.
    pub is_multi_select: bool,
    /// Presentation.
    pub style: ChoiceSetStyle,
    /// Initially selected values, comma separated.
    pub value: Option<String>,
}

impl ChoiceSetInput {
    /// Type identifier.
    pub const TYPE: &'static str = "Input.ChoiceSet";
}

/// One entry of a choice set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Choice {
    /// Display text.
    pub title: String,
    /// Submitted value.
    pub value: String,
}

/// An element whose type is not built in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomElement {
    /// Type identifier as written in the payload.
    pub type_id: String,
    /// Common properties.
    pub common: ElementCommon,
    /// Every property of the payload object, `type` included.
    pub properties: Map<String, Value>,
}

impl CustomElement {
    /// Creates a custom element with no properties.
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_width_forms() {
        let parse = |json: &str| serde_json::from_str::<ColumnWidth>(json).unwrap();
        assert_eq!(parse(r#""auto""#), ColumnWidth::Auto);
        assert_eq!(parse(r#""Stretch""#), ColumnWidth::Stretch);
        assert_eq!(parse(r#""50px""#), ColumnWidth::Pixels(50));
        assert_eq!(parse("2"), ColumnWidth::Weight(2.0));
        assert_eq!(parse(r#""3""#), ColumnWidth::Weight(3.0));
        assert_eq!(parse(r#""wide""#), ColumnWidth::Auto);
    }

    #[test]
    fn keywords_are_case_insensitive_with_fallback() {
        assert_eq!(Spacing::from_keyword("EXTRALARGE"), Some(Spacing::ExtraLarge));
        let size: TextSize = serde_json::from_str(r#""gigantic""#).unwrap();
        assert_eq!(size, TextSize::Default);
    }

    #[test]
    fn only_containers_expose_children() {
        let container = Element::Container(Container::new(vec![
            Element::TextBlock(TextBlock::new("a")),
            Element::TextBlock(TextBlock::new("b")),
        ]));
        assert!(container.is_container());
        assert_eq!(container.children().len(), 2);

        let custom = Element::Custom(CustomElement::new("Rating"));
        assert_eq!(custom.type_id(), "Rating");
        assert!(custom.children().is_empty());
    }
}
