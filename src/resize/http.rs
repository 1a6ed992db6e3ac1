use crate::app_context::AppContext;
use crate::resize::errors::ResizeError;
use crate::resize::requests::ResizeRequest;
use crate::resize::{fetch, img};
use tokio::task;

pub struct ResizeHttpHandler {
    app_context: AppContext,
}

impl ResizeHttpHandler {
    pub fn new(app_context: AppContext) -> Self {
        Self { app_context }
    }

    /// Runs the whole pipeline for one request and returns the encoded JPEG.
    pub async fn resize(&self, request: ResizeRequest) -> Result<Vec<u8>, ResizeError> {
        let limits = self.app_context.limits;
        if let Some(max_target_pixels) = limits.max_target_pixels {
            if request.pixel_count() > max_target_pixels {
                return Err(ResizeError::TargetTooLarge {
                    width: request.width,
                    height: request.height,
                    limit: max_target_pixels,
                });
            }
        }

        let source_bytes = fetch::fetch_image(
            &self.app_context.http_client,
            &request.url,
            limits.max_source_bytes,
        )
        .await?;
        tracing::debug!(url = %request.url, size = source_bytes.len(), "Downloaded source image.");

        // Decoding, resampling and encoding are CPU-bound.
        let ResizeRequest { width, height, .. } = request;
        let jpeg_bytes = task::spawn_blocking(move || {
            img::resize_to_jpeg(&source_bytes, width, height, limits.max_source_pixels)
        })
        .await??;
        tracing::debug!(width, height, size = jpeg_bytes.len(), "Encoded resized image.");

        Ok(jpeg_bytes)
    }
}
