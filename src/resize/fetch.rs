use crate::resize::errors::{LimitUnit, ResizeError};
use axum::body::Bytes;
use reqwest::Client;
use url::Url;

/// Downloads the source image. The remote status code isn't inspected: whatever body comes
/// back is handed to the decoder.
///
/// With `max_bytes` set, the body is read chunk by chunk and the download is abandoned as soon
/// as it grows past the limit.
pub async fn fetch_image(
    client: &Client,
    url: &Url,
    max_bytes: Option<u64>,
) -> Result<Bytes, ResizeError> {
    let mut response = client.get(url.clone()).send().await?;
    tracing::debug!(
        url = %url,
        status = response.status().as_u16(),
        content_length = ?response.content_length(),
        "Fetched source image headers."
    );

    let Some(max_bytes) = max_bytes else {
        return Ok(response.bytes().await?);
    };

    let too_large = ResizeError::SourceTooLarge {
        limit: max_bytes,
        unit: LimitUnit::Bytes,
    };
    if response
        .content_length()
        .is_some_and(|content_length| content_length > max_bytes)
    {
        return Err(too_large);
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if (body.len() + chunk.len()) as u64 > max_bytes {
            return Err(too_large);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(body))
}
