//! Resource resolvers.
//!
//! Element renderers that reference external content (images, mostly) ask the
//! [`ResourceResolvers`] chain to turn a URI into bytes. Resolvers are tried in
//! registration order; the first one that handles a URI wins.

use alloc::sync::Arc;
use core::fmt::{self, Debug};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use futures::future::{BoxFuture, FutureExt};

/// Loaded resource bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ResourceContent {
    mime_type: Option<String>,
    data: Vec<u8>,
}

impl ResourceContent {
    /// Creates content from raw bytes.
    pub fn new(mime_type: Option<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type,
            data: data.into(),
        }
    }

    /// Returns the MIME type, if known.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Debug for ResourceContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceContent")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Errors produced by a resolver that accepted a URI but could not load it.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The URI is malformed for the resolver's scheme.
    #[error("malformed resource uri `{0}`")]
    MalformedUri(String),
    /// The payload of a `data:` URI is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Resolver-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Turns a resource URI into loadable content.
pub trait ResourceResolver: Send + Sync {
    /// Attempts to load `uri`.
    ///
    /// Resolves to `Ok(None)` if this resolver does not handle the URI, so the
    /// next resolver in the chain gets a chance.
    fn try_resolve<'a>(
        &'a self,
        uri: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceContent>, ResolveError>>;
}

/// Ordered, named collection of resolvers.
#[derive(Clone, Default)]
pub struct ResourceResolvers {
    entries: Vec<(String, Arc<dyn ResourceResolver>)>,
}

impl Debug for ResourceResolvers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

impl ResourceResolvers {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a chain holding the built-in `data` resolver.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut resolvers = Self::new();
        resolvers.set(DataUriResolver::NAME, DataUriResolver);
        resolvers
    }

    /// Registers `resolver` under `name`.
    ///
    /// A resolver already registered under `name` is replaced in place and
    /// keeps its position; otherwise the resolver is appended.
    pub fn set(&mut self, name: impl Into<String>, resolver: impl ResourceResolver + 'static) {
        self.set_arc(name, Arc::new(resolver));
    }

    /// Registers an already shared resolver.
    pub fn set_arc(&mut self, name: impl Into<String>, resolver: Arc<dyn ResourceResolver>) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = resolver;
        } else {
            self.entries.push((name, resolver));
        }
    }

    /// Returns the resolver registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ResourceResolver>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, resolver)| resolver)
    }

    /// Removes the resolver registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn ResourceResolver>> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over resolver names in chain order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves `uri` with the first resolver that handles it.
    ///
    /// # Errors
    ///
    /// Returns the error of the first resolver that accepted the URI but
    /// failed to load it.
    pub async fn resolve(&self, uri: &str) -> Result<Option<ResourceContent>, ResolveError> {
        for (_, resolver) in &self.entries {
            if let Some(content) = resolver.try_resolve(uri).await? {
                return Ok(Some(content));
            }
        }
        Ok(None)
    }
}

/// Resolves `data:` URIs inline.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUriResolver;

impl DataUriResolver {
    /// Name the resolver is registered under by default.
    pub const NAME: &'static str = "data";

    fn decode(uri: &str) -> Result<Option<ResourceContent>, ResolveError> {
        let Some(rest) = strip_scheme(uri, "data:") else {
            return Ok(None);
        };
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ResolveError::MalformedUri(uri.to_owned()))?;

        let (mime_type, base64) = header
            .strip_suffix(";base64")
            .map_or((header, false), |mime| (mime, true));
        let mime_type = (!mime_type.is_empty()).then(|| mime_type.to_owned());

        let data = if base64 {
            STANDARD.decode(payload.trim())?
        } else {
            payload.as_bytes().to_vec()
        };
        Ok(Some(ResourceContent::new(mime_type, data)))
    }
}

impl ResourceResolver for DataUriResolver {
    fn try_resolve<'a>(
        &'a self,
        uri: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceContent>, ResolveError>> {
        futures::future::ready(Self::decode(uri)).boxed()
    }
}

fn strip_scheme<'a>(uri: &'a str, scheme: &str) -> Option<&'a str> {
    let head = uri.get(..scheme.len())?;
    head.eq_ignore_ascii_case(scheme)
        .then(|| &uri[scheme.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Fixed(&'static str, &'static [u8]);

    impl ResourceResolver for Fixed {
        fn try_resolve<'a>(
            &'a self,
            uri: &'a str,
        ) -> BoxFuture<'a, Result<Option<ResourceContent>, ResolveError>> {
            let content = uri
                .starts_with(self.0)
                .then(|| ResourceContent::new(None, self.1));
            async move { Ok(content) }.boxed()
        }
    }

    #[test]
    fn data_uri_base64_and_plain() {
        let content = block_on(DataUriResolver.try_resolve("data:text/plain;base64,aGVsbG8="))
            .unwrap()
            .unwrap();
        assert_eq!(content.mime_type(), Some("text/plain"));
        assert_eq!(content.data(), b"hello");

        let plain = block_on(DataUriResolver.try_resolve("DATA:,hi")).unwrap().unwrap();
        assert_eq!(plain.mime_type(), None);
        assert_eq!(plain.data(), b"hi");

        assert!(
            block_on(DataUriResolver.try_resolve("https://example.com/a.png"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn data_uri_errors() {
        assert!(matches!(
            block_on(DataUriResolver.try_resolve("data:image/png;base64")),
            Err(ResolveError::MalformedUri(_))
        ));
        assert!(matches!(
            block_on(DataUriResolver.try_resolve("data:image/png;base64,***")),
            Err(ResolveError::Base64(_))
        ));
    }

    #[test]
    fn first_handler_wins_and_set_keeps_position() {
        let mut chain = ResourceResolvers::new();
        chain.set("a", Fixed("mem:", b"first"));
        chain.set("b", Fixed("mem:", b"second"));
        let resolved = block_on(chain.resolve("mem:x")).unwrap().unwrap();
        assert_eq!(resolved.data(), b"first");

        chain.set("a", Fixed("other:", b"replaced"));
        assert_eq!(chain.names().collect::<Vec<_>>(), ["a", "b"]);
        let resolved = block_on(chain.resolve("mem:x")).unwrap().unwrap();
        assert_eq!(resolved.data(), b"second");

        assert!(block_on(chain.resolve("nope:x")).unwrap().is_none());
        assert!(chain.remove("a").is_some());
        assert_eq!(chain.len(), 1);
    }
}
