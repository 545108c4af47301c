//! The public entry point: [`CardRenderer`].

use alloc::sync::Arc;
use core::{
    fmt::{self, Debug},
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    task::{Context, Poll},
};
use std::panic;

use futures::future::{AbortHandle, Abortable, BoxFuture, FutureExt};
use tracing::{Instrument, debug, error, info, info_span, warn};
use watercard_core::{
    CardParser, ConfigError, Document, ErrorSink, HostConfig, JsonCardParser, StatusCode,
};

use crate::{
    builder,
    context::{ImageLoading, RenderContext, RenderParts, RenderSettings},
    elements,
    error::RenderError,
    logging::panic_message,
    registry::ElementRendererRegistration,
    resolver::ResourceResolvers,
    resources::{self, ResourceDictionary, StyleResources},
    tree::VisualTree,
};

/// Message recorded when a render is aborted by an unexpected fault.
pub const UNRECOVERABLE_MESSAGE: &str =
    "An unrecoverable error was encountered while rendering the card";

/// Renders card documents into [`VisualTree`]s.
///
/// A renderer is long-lived: configure it once, then render any number of
/// cards. Every render captures the configuration current at the moment it
/// starts, so changing settings never affects a render already in flight.
pub struct CardRenderer {
    settings: RenderSettings,
    override_styles: Option<Arc<ResourceDictionary>>,
    parser: Arc<dyn CardParser>,
}

impl Debug for CardRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRenderer")
            .field("settings", &self.settings)
            .field("override_styles", &self.override_styles)
            .finish_non_exhaustive()
    }
}

impl CardRenderer {
    /// Creates a renderer with every built-in element renderer and the
    /// built-in resource resolvers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the action sentiment colors cannot be
    /// derived from `host_config`.
    pub fn new(host_config: HostConfig) -> Result<Self, ConfigError> {
        let action_sentiment = resources::action_sentiment(&host_config)?;
        let mut renderers = ElementRendererRegistration::new();
        elements::register_builtins(&mut renderers);

        Ok(Self {
            settings: RenderSettings {
                host_config: Arc::new(host_config),
                renderers: Arc::new(renderers),
                resolvers: Arc::new(ResourceResolvers::with_builtins()),
                resources: StyleResources::default(),
                action_sentiment: Arc::new(action_sentiment),
                fixed_dimensions: None,
            },
            override_styles: None,
            parser: Arc::new(JsonCardParser::new()),
        })
    }

    /// Returns the host configuration.
    #[must_use]
    pub fn host_config(&self) -> &HostConfig {
        &self.settings.host_config
    }

    /// Replaces the host configuration and recomputes the action sentiment
    /// resources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the sentiment colors cannot be derived. The
    /// previous configuration stays in effect.
    pub fn set_host_config(&mut self, host_config: HostConfig) -> Result<(), ConfigError> {
        let action_sentiment = resources::action_sentiment(&host_config).inspect_err(|error| {
            warn!(%error, "rejected host config");
        })?;
        self.settings.host_config = Arc::new(host_config);
        self.settings.action_sentiment = Arc::new(action_sentiment);
        info!("host config replaced");
        Ok(())
    }

    /// Returns the action sentiment brushes derived from the host config.
    #[must_use]
    pub fn action_sentiment(&self) -> &ResourceDictionary {
        &self.settings.action_sentiment
    }

    /// Returns the effective style resources.
    #[must_use]
    pub const fn style_resources(&self) -> &StyleResources {
        &self.settings.resources
    }

    /// Returns the override style resources, if any.
    #[must_use]
    pub fn override_styles(&self) -> Option<&ResourceDictionary> {
        self.override_styles.as_deref()
    }

    /// Sets the override style resources, chained in front of the defaults.
    pub fn set_override_styles(&mut self, overrides: Option<ResourceDictionary>) {
        self.override_styles = overrides.map(Arc::new);
        self.settings.resources = self
            .settings
            .resources
            .with_overrides(self.override_styles.clone());
        debug!(
            overrides = self.override_styles.as_ref().map_or(0, |o| o.len()),
            "style overrides replaced"
        );
    }

    /// Fixes the output size of subsequent synchronous renders.
    pub const fn set_fixed_dimensions(&mut self, width: u32, height: u32) {
        self.settings.fixed_dimensions = Some((width, height));
    }

    /// Clears the fixed output size.
    pub const fn reset_fixed_dimensions(&mut self) {
        self.settings.fixed_dimensions = None;
    }

    /// Returns the fixed output size, if one is set.
    #[must_use]
    pub const fn fixed_dimensions(&self) -> Option<(u32, u32)> {
        self.settings.fixed_dimensions
    }

    /// Returns the renderer registry.
    #[must_use]
    pub fn element_renderers(&self) -> &ElementRendererRegistration {
        &self.settings.renderers
    }

    /// Returns the renderer registry for modification.
    ///
    /// Renders already in flight keep the registry they started with.
    pub fn element_renderers_mut(&mut self) -> &mut ElementRendererRegistration {
        Arc::make_mut(&mut self.settings.renderers)
    }

    /// Returns the resolver chain.
    #[must_use]
    pub fn resource_resolvers(&self) -> &ResourceResolvers {
        &self.settings.resolvers
    }

    /// Returns the resolver chain for modification.
    ///
    /// Renders already in flight keep the chain they started with.
    pub fn resource_resolvers_mut(&mut self) -> &mut ResourceResolvers {
        Arc::make_mut(&mut self.settings.resolvers)
    }

    /// Replaces the parser used by the `render_json*` entry points.
    pub fn set_parser(&mut self, parser: impl CardParser + 'static) {
        self.parser = Arc::new(parser);
    }

    /// Renders a document, leaving image loading to the host.
    ///
    /// Never panics: failures are reported in the returned card's errors.
    pub fn render(&self, document: impl Into<Arc<Document>>) -> RenderedCard {
        self.render_with(document.into(), ErrorSink::new())
    }

    /// Renders a document, resolving images through the resolver chain before
    /// completing.
    ///
    /// The returned task can be cancelled; see [`RenderTask::cancel`]. Fixed
    /// dimensions do not apply to deferred renders.
    pub fn render_async(&self, document: impl Into<Arc<Document>>) -> RenderTask {
        self.render_deferred(document.into(), ErrorSink::new())
    }

    /// Parses `text` with the configured parser and renders the result.
    ///
    /// If the payload yields no document the card has no tree and its errors
    /// are the parser's. Otherwise parser warnings precede render diagnostics.
    pub fn render_json(&self, text: &str) -> RenderedCard {
        match self.parse(text) {
            Ok((document, warnings)) => self.render_with(document, warnings),
            Err(errors) => RenderedCard::failed(errors),
        }
    }

    /// Deferred variant of [`render_json`](Self::render_json).
    pub fn render_json_async(&self, text: &str) -> RenderTask {
        match self.parse(text) {
            Ok((document, warnings)) => self.render_deferred(document, warnings),
            Err(errors) => RenderTask::new(futures::future::ready(RenderedCard::failed(errors))),
        }
    }

    /// Renders an already decoded JSON payload.
    pub fn render_json_value(&self, value: &serde_json::Value) -> RenderedCard {
        match serde_json::to_string(value) {
            Ok(text) => self.render_json(&text),
            Err(error) => {
                let mut errors = ErrorSink::new();
                errors.add_error(StatusCode::InvalidJson, format!("Invalid JSON: {error}"));
                RenderedCard::failed(errors)
            }
        }
    }

    fn parse(&self, text: &str) -> Result<(Arc<Document>, ErrorSink), ErrorSink> {
        let (document, mut errors) = self.parser.parse(text).into_parts();
        match document {
            Some(document) => Ok((Arc::new(document), errors)),
            None => {
                if errors.is_empty() {
                    errors.add_error(StatusCode::InvalidJson, "payload did not produce a card");
                }
                warn!(errors = errors.len(), "card payload could not be parsed");
                Err(errors)
            }
        }
    }

    fn render_with(&self, document: Arc<Document>, preceding: ErrorSink) -> RenderedCard {
        let span = info_span!("render", mode = "sync", root = document.root().type_id());
        let _guard = span.enter();
        let outcome = build(&self.settings, &document, ImageLoading::Host);
        finish(outcome, preceding, document)
    }

    fn render_deferred(&self, document: Arc<Document>, preceding: ErrorSink) -> RenderTask {
        let mut settings = self.settings.clone();
        settings.fixed_dimensions = None;
        let span = info_span!("render", mode = "deferred", root = document.root().type_id());

        let render = async move {
            let outcome = AssertUnwindSafe(async {
                let mut parts = build(&settings, &document, ImageLoading::Deferred)?;
                builder::resolve_images(&mut parts, &settings.resolvers).await;
                Ok::<_, String>(parts)
            })
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(panic_message(&*payload)));
            finish(outcome, preceding, document)
        };
        RenderTask::new(render.instrument(span))
    }
}

/// Runs the tree builder, converting an unexpected fault or a panic into the
/// fault's message.
fn build(
    settings: &RenderSettings,
    document: &Document,
    image_loading: ImageLoading,
) -> Result<RenderParts, String> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let mut ctx = RenderContext::new(settings, image_loading);
        builder::build(&mut ctx, document)?;
        Ok::<_, RenderError>(ctx.into_parts())
    }))
    .unwrap_or_else(|payload| Err(RenderError::unexpected(panic_message(&*payload))))
    .map_err(|error| error.to_string())
}

fn finish(
    outcome: Result<RenderParts, String>,
    mut errors: ErrorSink,
    document: Arc<Document>,
) -> RenderedCard {
    match outcome {
        Ok(parts) => {
            errors.extend(parts.errors);
            debug!(
                nodes = parts.tree.len(),
                diagnostics = errors.len(),
                "render finished"
            );
            RenderedCard {
                tree: Some(parts.tree),
                errors,
                inputs: parts.inputs,
                originating_card: Some(document),
            }
        }
        Err(fault) => {
            error!(%fault, "render aborted");
            let mut errors = ErrorSink::new();
            errors.add_error(StatusCode::RenderFailed, UNRECOVERABLE_MESSAGE);
            RenderedCard {
                tree: None,
                errors,
                inputs: Vec::new(),
                originating_card: Some(document),
            }
        }
    }
}

/// The outcome of one render.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    tree: Option<VisualTree>,
    errors: ErrorSink,
    inputs: Vec<String>,
    originating_card: Option<Arc<Document>>,
}

impl RenderedCard {
    fn failed(errors: ErrorSink) -> Self {
        Self {
            tree: None,
            errors,
            inputs: Vec::new(),
            originating_card: None,
        }
    }

    /// Returns the rendered tree, or `None` if the render failed outright.
    #[must_use]
    pub const fn tree(&self) -> Option<&VisualTree> {
        self.tree.as_ref()
    }

    /// Consumes the result, returning the tree.
    #[must_use]
    pub fn into_tree(self) -> Option<VisualTree> {
        self.tree
    }

    /// Returns every error and warning of this render, in order.
    #[must_use]
    pub const fn errors(&self) -> &ErrorSink {
        &self.errors
    }

    /// Returns the ids of rendered inputs in document order.
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Returns the document that was rendered, if one was produced.
    #[must_use]
    pub fn originating_card(&self) -> Option<&Document> {
        self.originating_card.as_deref()
    }
}

/// The render was cancelled before it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("render was cancelled")]
pub struct RenderCancelled;

/// A deferred render.
///
/// Resolves to the [`RenderedCard`] once every image has been resolved.
/// Dropping the task or calling [`cancel`](Self::cancel) stops the render and
/// drops outstanding resolver futures.
#[must_use = "a render task does nothing unless polled"]
pub struct RenderTask {
    inner: Abortable<BoxFuture<'static, RenderedCard>>,
    handle: AbortHandle,
}

impl Debug for RenderTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTask")
            .field("cancelled", &self.inner.is_aborted())
            .finish_non_exhaustive()
    }
}

impl RenderTask {
    fn new(future: impl Future<Output = RenderedCard> + Send + 'static) -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        Self {
            inner: Abortable::new(future.boxed(), registration),
            handle,
        }
    }

    /// Cancels the render. The task then resolves to [`RenderCancelled`].
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Returns a handle that cancels this render from elsewhere.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.clone()
    }
}

impl Future for RenderTask {
    type Output = Result<RenderedCard, RenderCancelled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner)
            .poll(cx)
            .map(|result| result.map_err(|_| RenderCancelled))
    }
}
