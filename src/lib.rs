#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

mod builder;
pub mod context;
pub mod elements;
/// Errors reported by element renderers.
pub mod error;
pub mod logging;
pub mod registry;
pub mod renderer;
pub mod resolver;
pub mod resources;
pub mod tree;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use context::{ImageLoading, RenderContext};
#[doc(inline)]
pub use error::RenderError;
#[doc(inline)]
pub use registry::{ElementRenderer, ElementRendererRegistration};
#[doc(inline)]
pub use renderer::{CardRenderer, RenderCancelled, RenderTask, RenderedCard};
#[doc(inline)]
pub use resolver::{ResourceContent, ResourceResolver, ResourceResolvers};
#[doc(inline)]
pub use resources::{Resource, ResourceDictionary, StyleResources};
#[doc(inline)]
pub use tree::{NodeId, Visual, VisualNode, VisualTree};
pub use watercard_color;
pub use watercard_core;

pub mod prelude {
    //! Commonly used types in one import.
    //!
    //! ```rust
    //! use watercard::prelude::*;
    //!
    //! let renderer = CardRenderer::new(HostConfig::default()).unwrap();
    //! let card = renderer.render_json(r#"{ "type": "TextBlock", "text": "Hi" }"#);
    //! assert!(card.errors().is_empty());
    //! ```
    pub use super::{
        CardRenderer, ElementRenderer, ImageLoading, NodeId, RenderContext, RenderError,
        RenderedCard, ResourceResolver, Visual, VisualTree,
    };
    pub use watercard_core::{
        Action, AdaptiveCard, Color, Document, Element, ErrorSink, HostConfig, StatusCode,
    };
}
