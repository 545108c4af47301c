use watercard_core::{
    Element, StatusCode,
    element::{Image, ImageSet, ImageSize, ImageStyle},
};

use super::mismatch;
use crate::{
    context::RenderContext,
    error::RenderError,
    registry::ElementRenderer,
    tree::{ImageSource, ImageVisual, NodeId, Visual},
};

/// Renders [`Image`].
///
/// The node is created with [`ImageSource::Uri`]. In deferred renders the
/// URI is also scheduled for resolution, and the source is replaced once the
/// resolver chain produces content.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRenderer;

impl ElementRenderer for ImageRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::Image(image) = element else {
            return Err(mismatch(Image::TYPE, element));
        };
        let url = image.url.trim();
        if url.is_empty() {
            return Err(RenderError::missing_property(Image::TYPE, "url"));
        }

        let inherited = match ctx.visual(parent) {
            Some(Visual::ImageGallery { image_size, .. }) => Some(*image_size),
            _ => None,
        };
        let size = image.size.or(inherited).unwrap_or(ImageSize::Auto);
        let width = ctx.host_config().image_sizes.resolve(size);

        let node = ctx.insert(
            parent,
            Visual::Image(ImageVisual {
                source: ImageSource::Uri(url.to_owned()),
                size,
                width,
                person: image.style == ImageStyle::Person,
                alt_text: image.alt_text.clone(),
                alignment: image.horizontal_alignment,
            }),
        )?;
        ctx.request_image(node, url);
        Ok(node)
    }
}

/// Renders [`ImageSet`] as a gallery and dispatches its images into it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageSetRenderer;

impl ElementRenderer for ImageSetRenderer {
    fn render(
        &self,
        element: &Element,
        ctx: &mut RenderContext<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        let Element::ImageSet(set) = element else {
            return Err(mismatch(ImageSet::TYPE, element));
        };
        if set.images.is_empty() {
            ctx.add_warning(StatusCode::InvalidValue, "ImageSet has no images");
        }

        let config = ctx.host_config().image_set;
        let node = ctx.insert(
            parent,
            Visual::ImageGallery {
                image_size: set.image_size.unwrap_or(config.image_size),
                max_height: config.max_image_height,
            },
        )?;
        ctx.render_children(&set.images, node)?;
        Ok(node)
    }
}
