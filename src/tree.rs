//! The output visual tree.
//!
//! Renderers do not talk to a widget toolkit directly. They append
//! [`Visual`]s to a [`VisualTree`], an arena indexed by [`NodeId`], and the
//! host walks the finished tree to create its own widgets.

use watercard_core::{
    Color,
    action::{ActionKind, ActionStyle},
    element::{
        ChoiceSetStyle, ColumnWidth, ContainerStyle, HorizontalAlignment, ImageSize, TextInputStyle,
        VerticalAlignment,
    },
};

use crate::resolver::ResourceContent;

/// Identifier for a node stored inside the [`VisualTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a new [`NodeId`] from the raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index backing this identifier.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Separator line drawn above a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    /// Thickness in pixels.
    pub thickness: u32,
    /// Line color.
    pub color: Color,
}

/// Where an image's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// The host loads the URI itself.
    Uri(String),
    /// A resolver already produced the content.
    Resolved {
        /// The URI the content was resolved from.
        uri: String,
        /// The loaded content.
        content: ResourceContent,
    },
}

impl ImageSource {
    /// Returns the URI regardless of how the image is loaded.
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Uri(uri) | Self::Resolved { uri, .. } => uri,
        }
    }

    /// Returns `true` if the content was resolved during rendering.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Fully styled text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextVisual {
    /// Text content.
    pub text: String,
    /// Font family.
    pub font_family: String,
    /// Point size.
    pub font_size: u32,
    /// Font weight.
    pub font_weight: u16,
    /// Foreground color.
    pub color: Color,
    /// Whether the text may wrap.
    pub wrap: bool,
    /// Line limit when wrapping.
    pub max_lines: Option<u32>,
    /// Horizontal alignment.
    pub alignment: HorizontalAlignment,
}

/// An image and its layout hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageVisual {
    /// Pixel source.
    pub source: ImageSource,
    /// Size class after inheritance from image sets.
    pub size: ImageSize,
    /// Fixed pixel width for sized classes.
    pub width: Option<u32>,
    /// Crop to a circle.
    pub person: bool,
    /// Accessible description.
    pub alt_text: Option<String>,
    /// Horizontal alignment.
    pub alignment: HorizontalAlignment,
}

/// An action button with its sentiment brushes.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonVisual {
    /// Host-visible identifier.
    pub id: Option<String>,
    /// Label.
    pub title: String,
    /// Sentiment.
    pub style: ActionStyle,
    /// Icon URI.
    pub icon_url: Option<String>,
    /// What pressing the button does.
    pub kind: ActionKind,
    /// Background brush, if the sentiment defines one.
    pub background: Option<Color>,
    /// Background brush on hover.
    pub hover_background: Option<Color>,
    /// Foreground brush, if the sentiment defines one.
    pub foreground: Option<Color>,
    /// Foreground brush on hover.
    pub hover_foreground: Option<Color>,
}

/// Input-specific state.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum InputVisual {
    Text {
        placeholder: Option<String>,
        value: Option<String>,
        multiline: bool,
        max_length: Option<u32>,
        style: TextInputStyle,
    },
    Number {
        placeholder: Option<String>,
        value: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    Date {
        placeholder: Option<String>,
        value: Option<String>,
        min: Option<String>,
        max: Option<String>,
    },
    Time {
        placeholder: Option<String>,
        value: Option<String>,
        min: Option<String>,
        max: Option<String>,
    },
    Toggle {
        title: String,
        checked: bool,
        value_on: String,
        value_off: String,
    },
    ChoiceSet {
        choices: Vec<(String, String)>,
        selected: Vec<String>,
        multi_select: bool,
        style: ChoiceSetStyle,
    },
}

/// What a node displays.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Card surface.
    Card {
        /// Container style of the surface.
        style: ContainerStyle,
        /// Surface color.
        background: Color,
        /// Inner padding.
        padding: u32,
        /// Fixed output size, if the host requested one.
        size: Option<(u32, u32)>,
        /// Spoken summary.
        speak: Option<String>,
    },
    /// Vertical stack.
    Stack {
        /// Effective container style.
        style: ContainerStyle,
        /// Background, when the style differs from the parent's.
        background: Option<Color>,
        /// Alignment of the children.
        alignment: VerticalAlignment,
    },
    /// Horizontal row of columns.
    Columns {
        /// Effective container style.
        style: ContainerStyle,
        /// Background, when the style differs from the parent's.
        background: Option<Color>,
    },
    /// One column.
    Column {
        /// Effective container style.
        style: ContainerStyle,
        /// Width rule.
        width: ColumnWidth,
        /// Background, when the style differs from the parent's.
        background: Option<Color>,
    },
    /// Styled text.
    Text(TextVisual),
    /// An image.
    Image(ImageVisual),
    /// Gallery of images sharing one size.
    ImageGallery {
        /// Size applied to images without their own.
        image_size: ImageSize,
        /// Upper bound for image height.
        max_height: u32,
    },
    /// Two-column table of facts.
    FactTable {
        /// `(title, value)` rows.
        rows: Vec<(TextVisual, TextVisual)>,
        /// Gap between the columns.
        spacing: u32,
    },
    /// Playable media.
    Media {
        /// MIME type of the chosen source.
        mime_type: String,
        /// URI of the chosen source.
        url: String,
        /// Poster image URI.
        poster: Option<String>,
        /// Whether playback happens inside the card.
        inline: bool,
    },
    /// User input bound to `id`.
    Input {
        /// Input identifier.
        id: String,
        /// Input state.
        input: InputVisual,
    },
    /// Row of action buttons.
    ActionBar {
        /// Gap between buttons.
        button_spacing: u32,
    },
    /// One action button.
    Button(ButtonVisual),
    /// Host-defined content.
    Custom {
        /// Type identifier of the source element.
        type_id: String,
        /// Raw properties of the source element.
        properties: serde_json::Map<String, serde_json::Value>,
    },
}

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visual: Visual,
    element_id: Option<String>,
    spacing: u32,
    separator: Option<Separator>,
}

impl VisualNode {
    fn new(visual: Visual, parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            visual,
            element_id: None,
            spacing: 0,
            separator: None,
        }
    }

    /// Returns what this node displays.
    #[must_use]
    pub const fn visual(&self) -> &Visual {
        &self.visual
    }

    /// Returns what this node displays, mutably.
    pub fn visual_mut(&mut self) -> &mut Visual {
        &mut self.visual
    }

    /// Returns the parent node.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the `id` of the element this node was rendered from.
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    /// Returns the gap before this node in pixels.
    #[must_use]
    pub const fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Returns the separator drawn before this node.
    #[must_use]
    pub const fn separator(&self) -> Option<Separator> {
        self.separator
    }

    pub(crate) fn stamp(
        &mut self,
        element_id: Option<String>,
        spacing: u32,
        separator: Option<Separator>,
    ) {
        self.element_id = element_id;
        self.spacing = spacing;
        self.separator = separator;
    }
}

/// Arena storing the rendered nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualTree {
    nodes: Vec<VisualNode>,
    root: Option<NodeId>,
}

impl VisualTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Replaces the root node of the tree, clearing any existing nodes.
    pub fn replace_root(&mut self, visual: Visual) -> NodeId {
        self.nodes.clear();
        let id = self.push(VisualNode::new(visual, None));
        self.root = Some(id);
        id
    }

    /// Adds a child under `parent`, or makes `visual` the root when `parent`
    /// is `None`.
    ///
    /// Returns `None` if `parent` does not exist, or if `parent` is `None`
    /// and the tree already has a root. Use [`replace_root`](Self::replace_root)
    /// to start over.
    pub fn insert(&mut self, parent: Option<NodeId>, visual: Visual) -> Option<NodeId> {
        let Some(parent) = parent else {
            if self.root.is_some() {
                return None;
            }
            return Some(self.replace_root(visual));
        };
        let index = parent.index();
        if index >= self.nodes.len() {
            return None;
        }
        let id = self.push(VisualNode::new(visual, Some(parent)));
        self.nodes[index].children.push(id);
        Some(id)
    }

    /// Returns the root node identifier, if one exists.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id.index())
    }

    /// Returns a node mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut VisualNode> {
        self.nodes.get_mut(id.index())
    }

    /// Returns the child identifiers for the provided node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map_or(&[], |node| node.children.as_slice())
    }

    /// Iterates over nodes depth-first, parents before children.
    pub fn walk(&self) -> impl Iterator<Item = (NodeId, &VisualNode)> + '_ {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        core::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id.index()];
            stack.extend(node.children.iter().rev().copied());
            Some((id, node))
        })
    }

    /// Returns the total number of nodes stored in this tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node created at or after `len`.
    ///
    /// Nodes are only ever appended, so this undoes everything inserted since
    /// the tree had `len` nodes.
    pub(crate) fn truncate(&mut self, len: usize) {
        if len >= self.nodes.len() {
            return;
        }
        self.nodes.truncate(len);
        for node in &mut self.nodes {
            node.children.retain(|child| child.index() < len);
        }
        if self.root.is_some_and(|root| root.index() >= len) {
            self.root = None;
        }
    }

    fn push(&mut self, node: VisualNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }
}
