use watercard_core::{Element, StatusCode, element::Media};

use super::mismatch;
use crate::{
    context::RenderContext,
    error::RenderError,
    registry::ElementRenderer,
    tree::{NodeId, Visual},
};

/// MIME types the media renderer accepts.
pub const SUPPORTED_MIME_TYPES: [&str; 4] = ["video/mp4", "audio/mp4", "audio/aac", "audio/mpeg"];

/// Renders [`Media`] using its first playable source.
#[derive(Debug, Default, Clone, Copy)]
pub struct MediaRenderer;

impl ElementRenderer for MediaRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::Media(media) = element else {
            return Err(mismatch(Media::TYPE, element));
        };
        if media.sources.is_empty() {
            return Err(RenderError::missing_property(Media::TYPE, "sources"));
        }

        let source = media
            .sources
            .iter()
            .find(|source| {
                SUPPORTED_MIME_TYPES
                    .iter()
                    .any(|mime| source.mime_type.trim().eq_ignore_ascii_case(mime))
            })
            .ok_or_else(|| {
                RenderError::element(
                    StatusCode::UnsupportedMediaType,
                    "media element has no source with a supported MIME type",
                )
            })?;

        let config = &ctx.host_config().media;
        ctx.insert(
            parent,
            Visual::Media {
                mime_type: source.mime_type.trim().to_ascii_lowercase(),
                url: source.url.clone(),
                poster: media.poster.clone().or_else(|| config.default_poster.clone()),
                inline: config.allow_inline_playback,
            },
        )
    }
}
