//! End-to-end render behavior.
//!
//! These tests drive [`CardRenderer`] the way a host does: configure once,
//! render documents or JSON, then inspect the tree and the error sink.

use alloc::sync::Arc;
use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use futures::{
    executor::block_on,
    future::{BoxFuture, FutureExt},
};
use watercard_core::{
    Color, Document, Element, ErrorSink, HostConfig, Severity, StatusCode,
    element::{
        AdaptiveCard, Container, ContainerStyle, CustomElement, ElementCommon, TextBlock,
        TextInput, VerticalAlignment,
    },
    parse::{CardParser, ParseResult},
};

use crate::{
    CardRenderer, ElementRenderer, NodeId, RenderCancelled, RenderContext, RenderError,
    ResourceContent, ResourceResolver, Visual, VisualTree,
    elements::PassthroughRenderer,
    renderer::UNRECOVERABLE_MESSAGE,
    resolver::ResolveError,
    resources::{Resource, ResourceDictionary, keys},
    tree::ImageSource,
};

// ============================================================================
// Test Infrastructure
// ============================================================================

fn renderer() -> CardRenderer {
    CardRenderer::new(HostConfig::default()).unwrap()
}

fn text(value: &str) -> Element {
    Element::TextBlock(TextBlock::new(value))
}

fn container(items: Vec<Element>) -> Document {
    Document::from(Element::Container(Container::new(items)))
}

fn kind(visual: &Visual) -> &'static str {
    match visual {
        Visual::Card { .. } => "Card",
        Visual::Stack { .. } => "Stack",
        Visual::Columns { .. } => "Columns",
        Visual::Column { .. } => "Column",
        Visual::Text(_) => "Text",
        Visual::Image(_) => "Image",
        Visual::ImageGallery { .. } => "ImageGallery",
        Visual::FactTable { .. } => "FactTable",
        Visual::Media { .. } => "Media",
        Visual::Input { .. } => "Input",
        Visual::ActionBar { .. } => "ActionBar",
        Visual::Button(_) => "Button",
        Visual::Custom { .. } => "Custom",
    }
}

/// Visual kinds in depth-first order.
fn kinds(tree: &VisualTree) -> Vec<&'static str> {
    tree.walk().map(|(_, node)| kind(node.visual())).collect()
}

fn codes(errors: &ErrorSink) -> Vec<StatusCode> {
    errors.iter().map(|entry| entry.code()).collect()
}

fn images(tree: &VisualTree) -> Vec<&crate::tree::ImageVisual> {
    tree.walk()
        .filter_map(|(_, node)| match node.visual() {
            Visual::Image(image) => Some(image),
            _ => None,
        })
        .collect()
}

/// Forwards to another renderer, logging what it was asked to render.
struct Recording {
    inner: Arc<dyn ElementRenderer>,
    log: Arc<Mutex<Vec<String>>>,
}

impl ElementRenderer for Recording {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let entry = match element {
            Element::TextBlock(block) => block.text.clone(),
            other => other.type_id().to_owned(),
        };
        self.log.lock().unwrap().push(entry);
        self.inner.render(element, ctx, parent)
    }
}

struct Panicking;

impl ElementRenderer for Panicking {
    fn render(
        &self,
        _element: &Element,
        _ctx: &mut RenderContext<'_>,
        _parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        panic!("renderer exploded")
    }
}

struct Broken;

impl ElementRenderer for Broken {
    fn render(
        &self,
        _element: &Element,
        _ctx: &mut RenderContext<'_>,
        _parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        Err(RenderError::unexpected("invariant violated"))
    }
}

/// Inserts nodes and registers an input, then gives up.
struct HalfDone;

impl ElementRenderer for HalfDone {
    fn render(
        &self,
        _element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let node = ctx.insert(parent, Visual::ActionBar { button_spacing: 0 })?;
        ctx.register_input("ghost");
        ctx.insert(Some(node), Visual::ActionBar { button_spacing: 0 })?;
        Err(RenderError::element(StatusCode::CustomError, "half done"))
    }
}

/// Never finishes; flags when its future is dropped.
struct Stalled {
    dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl ResourceResolver for Stalled {
    fn try_resolve<'a>(
        &'a self,
        _uri: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceContent>, ResolveError>> {
        let flag = DropFlag(Arc::clone(&self.dropped));
        async move {
            let _flag = flag;
            futures::future::pending::<()>().await;
            Ok(None)
        }
        .boxed()
    }
}

/// Tries to start a second tree from inside a nested element.
struct SecondRoot;

impl ElementRenderer for SecondRoot {
    fn render(
        &self,
        _element: &Element,
        ctx: &mut RenderContext<'_>,
        _parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        ctx.insert(None, Visual::ActionBar { button_spacing: 0 })
    }
}

struct NothingParser;

impl CardParser for NothingParser {
    fn parse(&self, _text: &str) -> ParseResult {
        ParseResult::new(None, ErrorSink::new())
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn unsupported_element_is_skipped_and_reported_once() {
    let document = container(vec![
        text("before"),
        Element::Custom(CustomElement::new("Rating")),
        text("after"),
    ]);

    let card = renderer().render(document);
    let tree = card.tree().unwrap();
    assert_eq!(kinds(tree), ["Stack", "Text", "Text"]);

    assert_eq!(card.errors().len(), 1);
    let entry = &card.errors().as_slice()[0];
    assert_eq!(entry.code(), StatusCode::NoRendererForType);
    assert_eq!(entry.severity(), Severity::Warning);
    assert_eq!(entry.message(), "unsupported element type: Rating");
}

#[test]
fn registered_custom_renderer_handles_custom_type() {
    let mut renderer = renderer();
    renderer
        .element_renderers_mut()
        .set("Rating", PassthroughRenderer);

    let card = renderer.render_json(r#"{ "type": "Rating", "max": 5 }"#);
    let tree = card.tree().unwrap();
    let root = tree.get(tree.root().unwrap()).unwrap();
    let Visual::Custom { type_id, properties } = root.visual() else {
        panic!("expected custom visual");
    };
    assert_eq!(type_id, "Rating");
    assert_eq!(properties["max"], 5);
    assert!(card.errors().is_empty());
}

#[test]
fn container_and_children_dispatch_once_in_order() {
    let mut renderer = renderer();
    let log = Arc::new(Mutex::new(Vec::new()));
    for type_id in [Container::TYPE, TextBlock::TYPE] {
        let inner = Arc::clone(renderer.element_renderers().get(type_id).unwrap());
        renderer.element_renderers_mut().set(
            type_id,
            Recording {
                inner,
                log: Arc::clone(&log),
            },
        );
    }

    let card = renderer.render(container(vec![text("first"), text("second")]));

    assert_eq!(*log.lock().unwrap(), ["Container", "first", "second"]);
    let tree = card.tree().unwrap();
    let root = tree.root().unwrap();
    assert_eq!(tree.children(root).len(), 2);
}

#[test]
fn closure_container_renderer_dispatches_children_once() {
    let mut renderer = renderer();
    let log = Arc::new(Mutex::new(Vec::new()));
    let inner = Arc::clone(renderer.element_renderers().get(TextBlock::TYPE).unwrap());
    renderer.element_renderers_mut().set(
        TextBlock::TYPE,
        Recording {
            inner,
            log: Arc::clone(&log),
        },
    );
    renderer.element_renderers_mut().set(
        Container::TYPE,
        |element: &Element,
         ctx: &mut RenderContext<'_>,
         parent: Option<NodeId>|
         -> Result<NodeId, RenderError> {
            let node = ctx.insert(
                parent,
                Visual::Stack {
                    style: ContainerStyle::Default,
                    background: None,
                    alignment: VerticalAlignment::Top,
                },
            )?;
            ctx.render_children(element.children(), node)?;
            Ok(node)
        },
    );

    let card = renderer.render(container(vec![text("first"), text("second")]));

    assert_eq!(*log.lock().unwrap(), ["first", "second"]);
    let tree = card.tree().unwrap();
    assert_eq!(kinds(tree), ["Stack", "Text", "Text"]);
    assert_eq!(tree.children(tree.root().unwrap()).len(), 2);
    assert!(card.errors().is_empty());
}

#[test]
fn wrapped_card_renderer_renders_body_once() {
    let mut renderer = renderer();
    let log = Arc::new(Mutex::new(Vec::new()));
    for type_id in [AdaptiveCard::TYPE, TextBlock::TYPE] {
        let inner = Arc::clone(renderer.element_renderers().get(type_id).unwrap());
        renderer.element_renderers_mut().set(
            type_id,
            Recording {
                inner,
                log: Arc::clone(&log),
            },
        );
    }

    let card = renderer.render_json(
        r#"{
            "type": "AdaptiveCard",
            "body": [ { "type": "TextBlock", "text": "a" } ],
            "actions": [ { "type": "Action.Submit", "title": "Go" } ]
        }"#,
    );

    assert_eq!(*log.lock().unwrap(), ["AdaptiveCard", "a"]);
    assert_eq!(
        kinds(card.tree().unwrap()),
        ["Card", "Text", "ActionBar", "Button"]
    );
}

#[test]
fn nested_renderer_cannot_replace_the_root() {
    let mut renderer = renderer();
    renderer.element_renderers_mut().set("Rogue", SecondRoot);

    let card = renderer.render(container(vec![
        text("kept"),
        Element::Custom(CustomElement::new("Rogue")),
    ]));

    assert!(card.tree().is_none());
    assert_eq!(codes(card.errors()), [StatusCode::RenderFailed]);
}

#[test]
fn renderer_failure_drops_only_its_subtree() {
    let mut renderer = renderer();
    renderer.element_renderers_mut().set("Half", HalfDone);

    let input = Element::TextInput(TextInput {
        common: ElementCommon {
            id: Some("name".to_owned()),
            ..ElementCommon::default()
        },
        ..TextInput::default()
    });
    let card = renderer.render(container(vec![
        Element::Custom(CustomElement::new("Half")),
        input,
    ]));

    let tree = card.tree().unwrap();
    assert_eq!(kinds(tree), ["Stack", "Input"]);
    assert_eq!(tree.len(), 2);
    assert_eq!(card.inputs(), ["name"]);

    assert_eq!(codes(card.errors()), [StatusCode::CustomError]);
    assert_eq!(card.errors().as_slice()[0].severity(), Severity::Error);
}

#[test]
fn missing_required_property_is_a_recoverable_error() {
    let card = renderer().render_json(
        r#"{
            "type": "Container",
            "items": [
                { "type": "Media", "sources": [] },
                { "type": "TextBlock", "text": "still here" }
            ]
        }"#,
    );

    assert_eq!(kinds(card.tree().unwrap()), ["Stack", "Text"]);
    assert_eq!(codes(card.errors()), [StatusCode::RequiredPropertyMissing]);
    assert!(card.errors().has_errors());
}

#[test]
fn unsupported_media_is_a_warning() {
    let card = renderer().render_json(
        r#"{
            "type": "Media",
            "sources": [ { "mimeType": "video/webm", "url": "https://example.com/a.webm" } ]
        }"#,
    );

    let tree = card.tree().unwrap();
    assert!(tree.root().is_none());
    assert_eq!(codes(card.errors()), [StatusCode::UnsupportedMediaType]);
    assert!(!card.errors().has_errors());
}

#[test]
fn media_picks_first_supported_source() {
    let card = renderer().render_json(
        r#"{
            "type": "Media",
            "poster": "https://example.com/poster.png",
            "sources": [
                { "mimeType": "video/webm", "url": "https://example.com/a.webm" },
                { "mimeType": "Video/MP4", "url": "https://example.com/a.mp4" }
            ]
        }"#,
    );

    let tree = card.tree().unwrap();
    let Visual::Media { mime_type, url, poster, inline } =
        tree.get(tree.root().unwrap()).unwrap().visual()
    else {
        panic!("expected media");
    };
    assert_eq!(mime_type, "video/mp4");
    assert_eq!(url, "https://example.com/a.mp4");
    assert_eq!(poster.as_deref(), Some("https://example.com/poster.png"));
    assert!(*inline);
}

// ============================================================================
// Fatal failures
// ============================================================================

#[test]
fn panicking_renderer_yields_null_tree_and_one_error() {
    let mut renderer = renderer();
    renderer.element_renderers_mut().set(TextBlock::TYPE, Panicking);

    let card = renderer.render(container(vec![text("boom")]));

    assert!(card.tree().is_none());
    assert_eq!(card.errors().len(), 1);
    let entry = &card.errors().as_slice()[0];
    assert_eq!(entry.code(), StatusCode::RenderFailed);
    assert_eq!(entry.message(), UNRECOVERABLE_MESSAGE);
    assert!(card.originating_card().is_some());
}

#[test]
fn unexpected_error_aborts_deferred_render() {
    let mut renderer = renderer();
    renderer.element_renderers_mut().set("Broken", Broken);

    let card = block_on(renderer.render_json_async(
        r#"{ "type": "Container", "items": [ { "type": "Broken" } ] }"#,
    ))
    .unwrap();

    assert!(card.tree().is_none());
    assert_eq!(codes(card.errors()), [StatusCode::RenderFailed]);
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn invalid_json_yields_null_tree_with_parser_errors() {
    let card = renderer().render_json("{ \"type\": ");
    assert!(card.tree().is_none());
    assert!(!card.errors().is_empty());
    assert_eq!(card.errors().as_slice()[0].code(), StatusCode::InvalidJson);
    assert!(card.originating_card().is_none());
}

#[test]
fn single_text_block_renders_one_node_cleanly() {
    let card = renderer().render_json(r#"{ "type": "TextBlock", "text": "Hello" }"#);

    let tree = card.tree().unwrap();
    assert_eq!(tree.len(), 1);
    assert!(card.errors().is_empty());

    let Visual::Text(visual) = tree.get(tree.root().unwrap()).unwrap().visual() else {
        panic!("expected text");
    };
    assert_eq!(visual.text, "Hello");
    assert_eq!(visual.font_size, 14);
    assert_eq!(visual.color, Color::from_hex("#FF000000"));
}

#[test]
fn parse_warnings_precede_render_diagnostics() {
    let card = renderer().render_json(
        r#"{
            "type": "Container",
            "items": [
                { "type": "TextBlock" },
                { "type": "TextBlock", "text": "ok" },
                { "type": "Rating" }
            ]
        }"#,
    );

    assert_eq!(kinds(card.tree().unwrap()), ["Stack", "Text"]);
    assert_eq!(
        codes(card.errors()),
        [
            StatusCode::RequiredPropertyMissing,
            StatusCode::NoRendererForType
        ]
    );
}

#[test]
fn json_value_entry_point() {
    let value = serde_json::json!({ "type": "TextBlock", "text": "from value" });
    let card = renderer().render_json_value(&value);
    assert_eq!(card.tree().unwrap().len(), 1);
    assert!(card.errors().is_empty());
}

#[test]
fn parser_without_document_still_reports_an_error() {
    let mut renderer = renderer();
    renderer.set_parser(NothingParser);

    let card = renderer.render_json(r#"{ "type": "TextBlock", "text": "ignored" }"#);
    assert!(card.tree().is_none());
    assert_eq!(codes(card.errors()), [StatusCode::InvalidJson]);
}

// ============================================================================
// Determinism and isolation
// ============================================================================

#[test]
fn rendering_twice_is_idempotent() {
    let renderer = renderer();
    let document = Arc::new(
        Document::from_json(
            r#"{
                "type": "AdaptiveCard",
                "body": [
                    { "type": "TextBlock", "text": "a", "separator": true },
                    { "type": "Rating" },
                    { "type": "Image", "url": "https://example.com/a.png" }
                ],
                "actions": [ { "type": "Action.Submit", "title": "Send" } ]
            }"#,
        )
        .document()
        .cloned()
        .unwrap(),
    );

    let first = renderer.render(Arc::clone(&document));
    let second = renderer.render(document);

    assert_eq!(first.tree(), second.tree());
    assert_eq!(first.errors(), second.errors());
    assert_eq!(first.errors().len(), 1);
}

#[test]
fn in_flight_render_keeps_its_registry() {
    let mut renderer = renderer();
    let task = renderer.render_async(container(vec![text("kept")]));
    renderer.element_renderers_mut().remove(TextBlock::TYPE);

    let card = block_on(task).unwrap();
    assert_eq!(kinds(card.tree().unwrap()), ["Stack", "Text"]);

    let later = renderer.render(container(vec![text("gone")]));
    assert_eq!(kinds(later.tree().unwrap()), ["Stack"]);
    assert_eq!(codes(later.errors()), [StatusCode::NoRendererForType]);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn host_config_replacement_recomputes_sentiment() {
    let mut renderer = renderer();
    let mut config = HostConfig::default();
    config.container_styles.default.foreground_colors.accent.default = "#FF112233".to_owned();
    config.container_styles.default.foreground_colors.attention.default = "#FF445566".to_owned();
    renderer.set_host_config(config).unwrap();

    let sentiment = renderer.action_sentiment();
    for key in [
        keys::POSITIVE_BACKGROUND,
        keys::POSITIVE_HOVER_BACKGROUND,
        keys::DESTRUCTIVE_FOREGROUND,
        keys::DESTRUCTIVE_HOVER_FOREGROUND,
    ] {
        assert!(sentiment.get(key).and_then(Resource::as_brush).is_some(), "{key}");
    }
    let brush = |key| sentiment.get(key).and_then(Resource::as_brush);
    assert_eq!(brush(keys::POSITIVE_BACKGROUND), Some(Color::from_hex("#FF112233")));
    assert_eq!(
        brush(keys::DESTRUCTIVE_HOVER_FOREGROUND),
        Some(Color::from_hex("#FF445566").lighter())
    );
}

#[test]
fn invalid_host_config_is_rejected_and_previous_kept() {
    let mut renderer = renderer();
    let mut config = HostConfig::default();
    config.container_styles.default.foreground_colors.attention.default = "not-a-color".to_owned();

    assert!(renderer.set_host_config(config.clone()).is_err());
    assert_eq!(
        renderer
            .host_config()
            .container_styles
            .default
            .foreground_colors
            .attention
            .default,
        "#FF8B0000"
    );
    assert!(CardRenderer::new(config).is_err());
}

#[test]
fn override_styles_chain_in_front_of_defaults() {
    let mut renderer = renderer();
    let red = Color::from_hex("#FFFF0000");
    renderer.set_override_styles(Some(
        ResourceDictionary::new().with(keys::BUTTON_BACKGROUND, Resource::Brush(red)),
    ));

    let styles = renderer.style_resources();
    assert_eq!(styles.brush(keys::BUTTON_BACKGROUND), Some(red));
    assert_eq!(
        styles.get(keys::CARD_CORNER_RADIUS).and_then(Resource::as_number),
        Some(4.0)
    );
    assert!(renderer.override_styles().is_some());

    let card = renderer.render_json(
        r#"{ "type": "AdaptiveCard", "actions": [ { "type": "Action.Submit", "title": "Go" } ] }"#,
    );
    let button = card
        .tree()
        .unwrap()
        .walk()
        .find_map(|(_, node)| match node.visual() {
            Visual::Button(button) => Some(button.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(button.background, Some(red));

    renderer.set_override_styles(None);
    assert_ne!(renderer.style_resources().brush(keys::BUTTON_BACKGROUND), Some(red));
}

#[test]
fn fixed_dimensions_apply_to_sync_renders_only() {
    let mut renderer = renderer();
    assert_eq!(renderer.fixed_dimensions(), None);

    renderer.set_fixed_dimensions(320, 200);
    assert_eq!(renderer.fixed_dimensions(), Some((320, 200)));

    let card_size = |card: &crate::RenderedCard| {
        let tree = card.tree().unwrap();
        match tree.get(tree.root().unwrap()).unwrap().visual() {
            Visual::Card { size, .. } => *size,
            _ => panic!("expected card"),
        }
    };
    let json = r#"{ "type": "AdaptiveCard", "body": [] }"#;
    assert_eq!(card_size(&renderer.render_json(json)), Some((320, 200)));
    assert_eq!(
        card_size(&block_on(renderer.render_json_async(json)).unwrap()),
        None
    );

    renderer.reset_fixed_dimensions();
    assert_eq!(renderer.fixed_dimensions(), None);
    assert_eq!(card_size(&renderer.render_json(json)), None);
}

// ============================================================================
// Card features
// ============================================================================

#[test]
fn actions_use_sentiment_brushes_and_respect_max_actions() {
    let mut config = HostConfig::default();
    config.actions.max_actions = 2;
    let renderer = CardRenderer::new(config).unwrap();

    let card = renderer.render_json(
        r#"{
            "type": "AdaptiveCard",
            "body": [ { "type": "TextBlock", "text": "Delete?" } ],
            "actions": [
                { "type": "Action.Submit", "title": "Yes", "style": "positive" },
                { "type": "Action.OpenUrl", "title": "Help", "url": "https://example.com", "style": "destructive" },
                { "type": "Action.Submit", "title": "Later" }
            ]
        }"#,
    );

    let tree = card.tree().unwrap();
    assert_eq!(kinds(tree), ["Card", "Text", "ActionBar", "Button", "Button"]);
    assert_eq!(codes(card.errors()), [StatusCode::MaxActionsExceeded]);

    let buttons: Vec<_> = tree
        .walk()
        .filter_map(|(_, node)| match node.visual() {
            Visual::Button(button) => Some(button),
            _ => None,
        })
        .collect();
    let accent = Color::from_hex("#FF0000FF");
    assert_eq!(buttons[0].background, Some(accent));
    assert_eq!(buttons[0].hover_background, Some(accent.lighter()));
    assert_eq!(buttons[1].foreground, Some(Color::from_hex("#FF8B0000")));
}

#[test]
fn non_interactive_host_skips_actions_and_inputs() {
    let mut config = HostConfig::default();
    config.supports_interactivity = false;
    let renderer = CardRenderer::new(config).unwrap();

    let card = renderer.render_json(
        r#"{
            "type": "AdaptiveCard",
            "body": [
                { "type": "Input.Text", "id": "name" },
                { "type": "TextBlock", "text": "hi" }
            ],
            "actions": [ { "type": "Action.Submit", "title": "Go" } ]
        }"#,
    );

    assert_eq!(kinds(card.tree().unwrap()), ["Card", "Text"]);
    assert_eq!(
        codes(card.errors()),
        [
            StatusCode::InteractivityNotSupported,
            StatusCode::InteractivityNotSupported
        ]
    );
    assert!(card.inputs().is_empty());
}

#[test]
fn inputs_are_listed_in_document_order() {
    let card = renderer().render_json(
        r#"{
            "type": "AdaptiveCard",
            "body": [
                { "type": "Input.Text", "id": "name" },
                { "type": "Input.Toggle", "id": "subscribe", "title": "Subscribe", "value": "true" },
                { "type": "Input.Number" },
                { "type": "Input.ChoiceSet", "id": "color", "value": "red, blue",
                  "choices": [ { "title": "Red", "value": "red" }, { "title": "Blue", "value": "blue" } ] }
            ]
        }"#,
    );

    assert_eq!(card.inputs(), ["name", "subscribe", "color"]);
    assert_eq!(codes(card.errors()), [StatusCode::RequiredPropertyMissing]);

    let toggle_checked = card.tree().unwrap().walk().any(|(_, node)| {
        matches!(
            node.visual(),
            Visual::Input {
                input: crate::tree::InputVisual::Toggle { checked: true, .. },
                ..
            }
        )
    });
    assert!(toggle_checked);
}

#[test]
fn spacing_and_separator_are_stamped() {
    let card = renderer().render_json(
        r#"{
            "type": "Container",
            "items": [
                { "type": "TextBlock", "text": "a", "id": "first" },
                { "type": "TextBlock", "text": "b", "separator": true, "spacing": "large" }
            ]
        }"#,
    );

    let tree = card.tree().unwrap();
    let children = tree.children(tree.root().unwrap());
    let first = tree.get(children[0]).unwrap();
    let second = tree.get(children[1]).unwrap();

    assert_eq!(first.element_id(), Some("first"));
    assert_eq!(first.spacing(), 8);
    assert!(first.separator().is_none());

    assert_eq!(second.spacing(), 30);
    let separator = second.separator().unwrap();
    assert_eq!(separator.thickness, 1);
    assert_eq!(separator.color, Color::from_hex("#B2000000"));
}

#[test]
fn emphasis_container_gets_its_own_background() {
    let card = renderer().render_json(
        r#"{
            "type": "Container",
            "style": "emphasis",
            "items": [ { "type": "Container", "items": [] } ]
        }"#,
    );

    let tree = card.tree().unwrap();
    let backgrounds: Vec<_> = tree
        .walk()
        .map(|(_, node)| match node.visual() {
            Visual::Stack { style, background, .. } => (style.as_str(), *background),
            _ => panic!("expected stacks"),
        })
        .collect();
    assert_eq!(
        backgrounds,
        [
            ("emphasis", Some(Color::from_hex("#08000000"))),
            ("emphasis", None)
        ]
    );
}

#[test]
fn image_set_sizes_are_inherited() {
    let card = renderer().render_json(
        r#"{
            "type": "ImageSet",
            "images": [
                { "url": "https://example.com/a.png" },
                { "url": "https://example.com/b.png", "size": "small" }
            ]
        }"#,
    );

    let tree = card.tree().unwrap();
    let widths: Vec<_> = images(tree).iter().map(|image| image.width).collect();
    assert_eq!(widths, [Some(80), Some(40)]);
    assert!(images(tree).iter().all(|image| !image.source.is_resolved()));
}

// ============================================================================
// Deferred rendering
// ============================================================================

const DATA_IMAGE_CARD: &str = r#"{
    "type": "AdaptiveCard",
    "body": [
        { "type": "Image", "url": "data:image/png;base64,aGVsbG8=" },
        { "type": "Image", "url": "data:image/png;base64,@@@" },
        { "type": "Image", "url": "https://example.com/remote.png" }
    ]
}"#;

#[test]
fn deferred_render_resolves_images() {
    let card = block_on(renderer().render_json_async(DATA_IMAGE_CARD)).unwrap();
    let tree = card.tree().unwrap();
    let images = images(tree);

    let ImageSource::Resolved { content, .. } = &images[0].source else {
        panic!("data image should be resolved");
    };
    assert_eq!(content.data(), b"hello");
    assert_eq!(content.mime_type(), Some("image/png"));

    assert_eq!(images[1].source, ImageSource::Uri("data:image/png;base64,@@@".to_owned()));
    assert_eq!(images[2].source.uri(), "https://example.com/remote.png");
    assert!(!images[2].source.is_resolved());

    assert_eq!(codes(card.errors()), [StatusCode::AssetLoadFailed]);
    assert!(card.originating_card().is_some());
}

#[test]
fn sync_render_leaves_images_to_the_host() {
    let card = renderer().render_json(DATA_IMAGE_CARD);
    let tree = card.tree().unwrap();
    assert!(images(tree).iter().all(|image| !image.source.is_resolved()));
    assert!(card.errors().is_empty());
}

#[test]
fn cancelled_render_drops_pending_resolution() {
    let mut renderer = renderer();
    let dropped = Arc::new(AtomicBool::new(false));
    renderer.resource_resolvers_mut().set(
        "stalled",
        Stalled {
            dropped: Arc::clone(&dropped),
        },
    );

    let result = block_on(async {
        let mut task = renderer.render_json_async(
            r#"{ "type": "Image", "url": "https://example.com/slow.png" }"#,
        );
        assert!(futures::poll!(&mut task).is_pending());
        task.cancel();
        task.await
    });

    assert_eq!(result.unwrap_err(), RenderCancelled);
    assert!(dropped.load(Ordering::SeqCst));
}

#[test]
fn cancel_before_start_never_renders() {
    let renderer = renderer();
    let task = renderer.render_async(container(vec![text("never")]));
    let handle = task.abort_handle();
    handle.abort();
    assert_eq!(block_on(task).unwrap_err(), RenderCancelled);
}
