//! Per-render state shared by every renderer invoked during one render call.

use alloc::sync::Arc;

use watercard_core::{
    Color, Diagnostic, ErrorSink, HostConfig, StatusCode,
    element::{ContainerStyle, ForegroundColor},
};

use crate::{
    error::RenderError,
    registry::ElementRendererRegistration,
    resolver::ResourceResolvers,
    resources::{ResourceDictionary, StyleResources},
    tree::{NodeId, Separator, Visual, VisualNode, VisualTree},
};

/// How image content is loaded during a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoading {
    /// Image nodes carry the URI; the host loads it after the render returns.
    Host,
    /// The render resolves images through the resolver chain before it
    /// completes.
    Deferred,
}

/// Long-lived configuration captured by value at the start of each render.
#[derive(Debug, Clone)]
pub(crate) struct RenderSettings {
    pub host_config: Arc<HostConfig>,
    pub renderers: Arc<ElementRendererRegistration>,
    pub resolvers: Arc<ResourceResolvers>,
    pub resources: StyleResources,
    pub action_sentiment: Arc<ResourceDictionary>,
    pub fixed_dimensions: Option<(u32, u32)>,
}

/// An image whose content is resolved after the tree is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingImage {
    pub node: NodeId,
    pub uri: String,
}

/// Everything a finished render produced.
#[derive(Debug)]
pub(crate) struct RenderParts {
    pub tree: VisualTree,
    pub errors: ErrorSink,
    pub pending_images: Vec<PendingImage>,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    nodes: usize,
    pending_images: usize,
    inputs: usize,
}

/// State threaded through one render call.
///
/// A context is created for every top-level render and dropped when it
/// finishes, so diagnostics and nodes never leak from one render into the
/// next. Configuration is borrowed from the renderer that started the render
/// and cannot change while the context is alive.
#[derive(Debug)]
pub struct RenderContext<'a> {
    settings: &'a RenderSettings,
    image_loading: ImageLoading,
    errors: ErrorSink,
    tree: VisualTree,
    pending_images: Vec<PendingImage>,
    inputs: Vec<String>,
}

impl<'a> RenderContext<'a> {
    pub(crate) const fn new(settings: &'a RenderSettings, image_loading: ImageLoading) -> Self {
        Self {
            settings,
            image_loading,
            errors: ErrorSink::new(),
            tree: VisualTree::new(),
            pending_images: Vec::new(),
            inputs: Vec::new(),
        }
    }

    /// Returns the host configuration.
    #[must_use]
    pub fn host_config(&self) -> &'a HostConfig {
        &self.settings.host_config
    }

    /// Returns the renderer registry.
    #[must_use]
    pub fn element_renderers(&self) -> &'a ElementRendererRegistration {
        &self.settings.renderers
    }

    /// Returns the resolver chain.
    #[must_use]
    pub fn resource_resolvers(&self) -> &'a ResourceResolvers {
        &self.settings.resolvers
    }

    /// Returns the effective style resources.
    #[must_use]
    pub const fn style_resources(&self) -> &'a StyleResources {
        &self.settings.resources
    }

    /// Returns the action sentiment brushes.
    #[must_use]
    pub fn action_sentiment(&self) -> &'a ResourceDictionary {
        &self.settings.action_sentiment
    }

    /// Returns the fixed output size requested by the host, if any.
    #[must_use]
    pub const fn fixed_dimensions(&self) -> Option<(u32, u32)> {
        self.settings.fixed_dimensions
    }

    /// Returns how images are loaded in this render.
    #[must_use]
    pub const fn image_loading(&self) -> ImageLoading {
        self.image_loading
    }

    /// Records an error. Rendering continues.
    pub fn add_error(&mut self, code: StatusCode, message: impl Into<String>) {
        self.errors.add_error(code, message);
    }

    /// Records a warning. Rendering continues.
    pub fn add_warning(&mut self, code: StatusCode, message: impl Into<String>) {
        self.errors.add_warning(code, message);
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    /// Returns everything recorded so far.
    #[must_use]
    pub const fn errors(&self) -> &ErrorSink {
        &self.errors
    }

    /// Returns the tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &VisualTree {
        &self.tree
    }

    /// Appends `visual` under `parent`, or as the root when `parent` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Unexpected`] if `parent` is not a node of this
    /// render's tree, or if `parent` is `None` and the tree already has a
    /// root.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        visual: Visual,
    ) -> Result<NodeId, RenderError> {
        self.tree.insert(parent, visual).ok_or_else(|| match parent {
            Some(parent) => {
                RenderError::unexpected(format!("parent node {parent:?} does not exist"))
            }
            None => RenderError::unexpected("the tree already has a root"),
        })
    }

    /// Returns a node of the tree built so far.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut VisualNode> {
        self.tree.get_mut(id)
    }

    /// Returns the visual of `node`, if it exists.
    #[must_use]
    pub fn visual(&self, node: Option<NodeId>) -> Option<&Visual> {
        node.and_then(|id| self.tree.get(id)).map(VisualNode::visual)
    }

    /// Returns the container style in effect for children of `node`.
    #[must_use]
    pub fn container_style(&self, mut node: Option<NodeId>) -> ContainerStyle {
        while let Some(entry) = node.and_then(|id| self.tree.get(id)) {
            match entry.visual() {
                Visual::Card { style, .. }
                | Visual::Stack { style, .. }
                | Visual::Columns { style, .. }
                | Visual::Column { style, .. } => return *style,
                _ => node = entry.parent(),
            }
        }
        ContainerStyle::Default
    }

    /// Resolves a semantic foreground color.
    ///
    /// An unparsable configured color is recorded as a warning and replaced by
    /// black.
    pub fn foreground(
        &mut self,
        color: ForegroundColor,
        style: ContainerStyle,
        subtle: bool,
    ) -> Color {
        self.host_config()
            .foreground_color(color, style, subtle)
            .unwrap_or_else(|error| {
                self.add_warning(StatusCode::InvalidValue, error.to_string());
                Color::BLACK
            })
    }

    /// Resolves the background of a container style.
    ///
    /// An unparsable configured color is recorded as a warning and replaced by
    /// white.
    pub fn background(&mut self, style: ContainerStyle) -> Color {
        self.host_config()
            .background_color(style)
            .unwrap_or_else(|error| {
                self.add_warning(StatusCode::InvalidValue, error.to_string());
                Color::WHITE
            })
    }

    /// Schedules `uri` to be resolved into the image at `node`.
    ///
    /// Does nothing when the host loads images itself.
    pub fn request_image(&mut self, node: NodeId, uri: impl Into<String>) {
        if self.image_loading == ImageLoading::Deferred {
            self.pending_images.push(PendingImage {
                node,
                uri: uri.into(),
            });
        }
    }

    /// Records an input id so it shows up in the render result.
    pub fn register_input(&mut self, id: impl Into<String>) {
        self.inputs.push(id.into());
    }

    pub(crate) fn stamp(
        &mut self,
        node: NodeId,
        element_id: Option<String>,
        spacing: u32,
        separator: Option<Separator>,
    ) {
        if let Some(entry) = self.tree.get_mut(node) {
            entry.stamp(element_id, spacing, separator);
        }
    }

    pub(crate) const fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            nodes: self.tree.len(),
            pending_images: self.pending_images.len(),
            inputs: self.inputs.len(),
        }
    }

    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.tree.truncate(checkpoint.nodes);
        self.pending_images.truncate(checkpoint.pending_images);
        self.inputs.truncate(checkpoint.inputs);
    }

    pub(crate) fn into_parts(self) -> RenderParts {
        RenderParts {
            tree: self.tree,
            errors: self.errors,
            pending_images: self.pending_images,
            inputs: self.inputs,
        }
    }
}
