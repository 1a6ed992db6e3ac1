use crate::resize::errors::{LimitUnit, ResizeError};
use image::error::{LimitError, LimitErrorKind};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, Limits};
use std::io::Cursor;

/// Decodes `source` (any format `image` can sniff), stretches it to exactly `width` x `height`
/// with a Lanczos filter and encodes the result as a default-quality JPEG.
pub fn resize_to_jpeg(
    source: &[u8],
    width: u32,
    height: u32,
    max_source_pixels: Option<u64>,
) -> Result<Vec<u8>, ResizeError> {
    let image = decode(source, max_source_pixels)?;
    tracing::debug!(
        source_width = image.width(),
        source_height = image.height(),
        width,
        height,
        "Resizing image."
    );

    check_resize_allocation(&image, width, height)?;
    let resized_image = image.resize_exact(width, height, FilterType::Lanczos3);

    encode_jpeg(resized_image)
}

/// Resampling allocates an RGBA `f32` buffer of `source width x height` for the vertical pass
/// and the output buffer itself. Both are held to the same allocation limit the decoder uses, so a
/// huge target fails with an error instead of aborting the process.
fn check_resize_allocation(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<(), ResizeError> {
    let max_alloc = Limits::default().max_alloc.unwrap_or(u64::MAX);
    let color = image.color();
    let output_bytes =
        u64::from(width) * u64::from(height) * u64::from(color.bytes_per_pixel());
    let intermediate_bytes = u64::from(image.width())
        * u64::from(height)
        * 4
        * std::mem::size_of::<f32>() as u64;

    if output_bytes.max(intermediate_bytes) > max_alloc {
        return Err(ResizeError::Resize(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::InsufficientMemory,
        ))));
    }
    Ok(())
}

fn decode(source: &[u8], max_pixels: Option<u64>) -> Result<DynamicImage, ResizeError> {
    if let Some(max_pixels) = max_pixels {
        let (width, height) = reader(source)?
            .into_dimensions()
            .map_err(ResizeError::Decode)?;
        if u64::from(width) * u64::from(height) > max_pixels {
            return Err(ResizeError::SourceTooLarge {
                limit: max_pixels,
                unit: LimitUnit::Pixels,
            });
        }
    }

    // The default limits cap every decoder allocation, whatever the header claims.
    reader(source)?.decode().map_err(ResizeError::Decode)
}

fn reader(source: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, ResizeError> {
    ImageReader::new(Cursor::new(source))
        .with_guessed_format()
        .map_err(|err| ResizeError::Decode(ImageError::IoError(err)))
}

fn encode_jpeg(image: DynamicImage) -> Result<Vec<u8>, ResizeError> {
    // Rough estimate: a tenth of the raw pixel data.
    let estimated_size = (image.width() as usize) * (image.height() as usize) * 3 / 10;

    // JPEG has no alpha channel.
    let flattened_image = if image.color().has_color() {
        DynamicImage::ImageRgb8(image.into_rgb8())
    } else {
        DynamicImage::ImageLuma8(image.into_luma8())
    };

    let mut jpeg_bytes_buffer = Cursor::new(Vec::with_capacity(estimated_size));
    flattened_image
        .write_to(&mut jpeg_bytes_buffer, ImageFormat::Jpeg)
        .map_err(ResizeError::Encode)?;

    Ok(jpeg_bytes_buffer.into_inner())
}
