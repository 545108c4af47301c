//! The tree builder: depth-first dispatch of document elements to their
//! registered renderers.

use futures::future::join_all;
use tracing::{debug, warn};
use watercard_core::{Diagnostic, Document, Element, StatusCode};

use crate::{
    context::{RenderContext, RenderParts},
    error::RenderError,
    resolver::ResourceResolvers,
    tree::{ImageSource, NodeId, Separator, Visual},
};

/// Renders the whole document into `ctx`.
pub(crate) fn build(ctx: &mut RenderContext<'_>, document: &Document) -> Result<(), RenderError> {
    ctx.render_element(document.root(), None).map(drop)
}

impl RenderContext<'_> {
    /// Dispatches `element` to its renderer and attaches the result under
    /// `parent`.
    ///
    /// Children are the renderer's business: container renderers call
    /// [`render_children`](Self::render_children) for their own items.
    ///
    /// Returns `Ok(None)` when the element was skipped: no renderer is
    /// registered for its type, or its renderer reported a failure. Both are
    /// recorded in the error sink and leave siblings untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError::Unexpected`], which aborts the render.
    pub fn render_element(
        &mut self,
        element: &Element,
        parent: Option<NodeId>,
    ) -> Result<Option<NodeId>, RenderError> {
        let type_id = element.type_id();
        let Some(renderer) = self.element_renderers().get(type_id) else {
            debug!(type_id, "no renderer registered");
            self.add_warning(
                StatusCode::NoRendererForType,
                format!("unsupported element type: {type_id}"),
            );
            return Ok(None);
        };

        let checkpoint = self.checkpoint();
        match renderer.render(element, self, parent) {
            Ok(node) => {
                self.stamp_common(node, element);
                Ok(Some(node))
            }
            Err(RenderError::Element { code, message }) => {
                warn!(type_id, %code, %message, "element renderer failed");
                self.rollback(checkpoint);
                self.push_diagnostic(Diagnostic::new(code.severity(), code, message));
                Ok(None)
            }
            Err(fatal) => Err(fatal),
        }
    }

    /// Renders `children` in order under `parent`.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError::Unexpected`].
    pub fn render_children(
        &mut self,
        children: &[Element],
        parent: NodeId,
    ) -> Result<(), RenderError> {
        for child in children {
            self.render_element(child, Some(parent))?;
        }
        Ok(())
    }

    fn stamp_common(&mut self, node: NodeId, element: &Element) {
        let common = element.common();
        let host_config = self.host_config();
        let spacing = host_config.spacing.resolve(common.spacing);
        let separator = if common.separator {
            match host_config.separator_color() {
                Ok(color) => Some(Separator {
                    thickness: host_config.separator.line_thickness,
                    color,
                }),
                Err(error) => {
                    self.add_warning(StatusCode::InvalidValue, error.to_string());
                    None
                }
            }
        } else {
            None
        };
        self.stamp(node, common.id.clone(), spacing, separator);
    }
}

/// Resolves every image scheduled during a deferred build, concurrently.
///
/// Images no resolver handles keep their URI for the host to load. Failures
/// are recorded as [`StatusCode::AssetLoadFailed`] warnings.
pub(crate) async fn resolve_images(parts: &mut RenderParts, resolvers: &ResourceResolvers) {
    let pending = core::mem::take(&mut parts.pending_images);
    if pending.is_empty() {
        return;
    }
    debug!(count = pending.len(), "resolving images");

    let results = join_all(pending.iter().map(|image| resolvers.resolve(&image.uri))).await;

    for (image, result) in pending.into_iter().zip(results) {
        match result {
            Ok(Some(content)) => {
                let node = parts.tree.get_mut(image.node);
                if let Some(Visual::Image(visual)) = node.map(|node| node.visual_mut()) {
                    visual.source = ImageSource::Resolved {
                        uri: image.uri,
                        content,
                    };
                }
            }
            Ok(None) => debug!(uri = %image.uri, "no resolver handled image; host will load it"),
            Err(error) => {
                warn!(uri = %image.uri, %error, "image failed to load");
                parts.errors.add_warning(
                    StatusCode::AssetLoadFailed,
                    format!("failed to load image '{}': {error}", image.uri),
                );
            }
        }
    }
}
