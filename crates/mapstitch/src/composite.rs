//! Raster decoding and canvas compositing.
//!
//! The [`Compositor`] trait is the seam between the geometry pipeline
//! and the raster stack: it creates the stitched canvas, decodes each
//! document's image, draws it at its placement, and encodes the
//! result. [`ImageCompositor`] is the in-process implementation; an
//! embedder with its own raster backend can supply another.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage, imageops};
use log::{debug, info};

use mapstitch_core::document::MapDocument;
use mapstitch_core::raster::{RasterData, RasterFormat};

use crate::error::MergeError;
use crate::layout::LayoutPlan;

/// Raster operations needed to build the stitched map image.
pub trait Compositor {
    type Image;
    type Canvas;

    /// Creates an empty canvas of the given pixel size.
    fn create_canvas(&self, width: u32, height: u32) -> Self::Canvas;

    /// Decodes one document's image payload.
    fn decode(&self, raster: &RasterData) -> Result<Self::Image, MergeError>;

    /// Draws `image` onto the canvas at `(x, y)`, scaled to the given
    /// pixel size.
    fn draw(
        &self,
        canvas: &mut Self::Canvas,
        image: &Self::Image,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    );

    /// Encodes the finished canvas.
    fn encode(&self, canvas: &Self::Canvas, format: RasterFormat) -> Result<Vec<u8>, MergeError>;
}

/// Draws every document onto a fresh canvas in placement order.
///
/// Each image is scaled to its slot, so documents exported at a
/// different grid density than the merged map still land on their
/// grid cells.
pub(crate) fn compose<C: Compositor>(
    compositor: &C,
    documents: &[MapDocument],
    plan: &LayoutPlan,
) -> Result<C::Canvas, MergeError> {
    let (width, height) = plan.pixel_dimensions();
    info!(width = width, height = height; "Compositing stitched raster");
    let mut canvas = compositor.create_canvas(width, height);

    for (index, (document, placement)) in documents.iter().zip(plan.placements()).enumerate() {
        let slot = document
            .resolution()
            .map_size()
            .scale(plan.pixels_per_grid());
        let offset = placement.pixel_offset();
        debug!(
            document = index,
            x = offset.x(),
            y = offset.y();
            "Drawing source image"
        );
        let image = compositor.decode(document.image())?;
        compositor.draw(
            &mut canvas,
            &image,
            offset.x() as i64,
            offset.y() as i64,
            slot.width() as u32,
            slot.height() as u32,
        );
    }
    Ok(canvas)
}

/// In-process compositor backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCompositor;

impl Compositor for ImageCompositor {
    type Image = DynamicImage;
    type Canvas = RgbaImage;

    fn create_canvas(&self, width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }

    fn decode(&self, raster: &RasterData) -> Result<DynamicImage, MergeError> {
        image::load_from_memory_with_format(raster.bytes(), image_format(raster.format()))
            .map_err(MergeError::raster)
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        image: &DynamicImage,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    ) {
        if image.width() == width && image.height() == height {
            imageops::replace(canvas, &image.to_rgba8(), x, y);
        } else {
            let resized = image.resize_exact(width, height, FilterType::Triangle);
            imageops::replace(canvas, &resized.to_rgba8(), x, y);
        }
    }

    fn encode(&self, canvas: &RgbaImage, format: RasterFormat) -> Result<Vec<u8>, MergeError> {
        let mut buffer = Cursor::new(Vec::new());
        match format {
            RasterFormat::Png => canvas
                .write_to(&mut buffer, ImageFormat::Png)
                .map_err(MergeError::raster)?,
            RasterFormat::Webp => canvas
                .write_to(&mut buffer, ImageFormat::WebP)
                .map_err(MergeError::raster)?,
            // JPEG output has no alpha channel.
            RasterFormat::Jpeg => DynamicImage::ImageRgba8(canvas.clone())
                .into_rgb8()
                .write_to(&mut buffer, ImageFormat::Jpeg)
                .map_err(MergeError::raster)?,
        }
        Ok(buffer.into_inner())
    }
}

fn image_format(format: RasterFormat) -> ImageFormat {
    match format {
        RasterFormat::Png => ImageFormat::Png,
        RasterFormat::Webp => ImageFormat::WebP,
        RasterFormat::Jpeg => ImageFormat::Jpeg,
    }
}
