//! Element renderer registration.
//!
//! The registry maps element type identifiers to [`ElementRenderer`]s. It is
//! the only dispatch table the tree builder consults: there is no implicit
//! fallback, so an element whose type is not registered is reported and
//! skipped.

use alloc::sync::Arc;
use core::fmt::{self, Debug};
use std::collections::HashMap;

use watercard_core::Element;

use crate::{context::RenderContext, error::RenderError, tree::NodeId};

/// Converts one element into output nodes.
pub trait ElementRenderer: Send + Sync {
    /// Renders `element` under `parent` and returns the node it created.
    ///
    /// A renderer inserts its node with
    /// [`RenderContext::insert`](crate::RenderContext::insert) and returns its
    /// id. Renderers of container elements dispatch the children themselves,
    /// usually with [`RenderContext::render_children`] under the node they
    /// just created. The tree builder never descends on their behalf.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Element`] if this element cannot be rendered, in
    /// which case any nodes it inserted are discarded.
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError>;
}

impl<F> ElementRenderer for F
where
    F: Fn(&Element, &mut RenderContext<'_>, Option<NodeId>) -> Result<NodeId, RenderError>
        + Send
        + Sync,
{
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        self(element, ctx, parent)
    }
}

/// Mapping from element type identifier to renderer.
#[derive(Clone, Default)]
pub struct ElementRendererRegistration {
    map: HashMap<String, Arc<dyn ElementRenderer>>,
}

impl Debug for ElementRendererRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.map.keys().collect();
        types.sort();
        f.debug_tuple("ElementRendererRegistration")
            .field(&types)
            .finish()
    }
}

impl ElementRendererRegistration {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `renderer` for `type_id`, replacing any previous entry.
    pub fn set(&mut self, type_id: impl Into<String>, renderer: impl ElementRenderer + 'static) {
        self.set_arc(type_id, Arc::new(renderer));
    }

    /// Registers an already shared renderer for `type_id`.
    pub fn set_arc(&mut self, type_id: impl Into<String>, renderer: Arc<dyn ElementRenderer>) {
        self.map.insert(type_id.into(), renderer);
    }

    /// Returns the renderer registered for `type_id`.
    ///
    /// Type identifiers are case-sensitive.
    #[must_use]
    pub fn get(&self, type_id: &str) -> Option<&Arc<dyn ElementRenderer>> {
        self.map.get(type_id)
    }

    /// Removes the renderer registered for `type_id`.
    pub fn remove(&mut self, type_id: &str) -> Option<Arc<dyn ElementRenderer>> {
        self.map.remove(type_id)
    }

    /// Returns `true` if a renderer is registered for `type_id`.
    #[must_use]
    pub fn contains(&self, type_id: &str) -> bool {
        self.map.contains_key(type_id)
    }

    /// Iterates over registered type identifiers in arbitrary order.
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Returns the number of registered renderers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
