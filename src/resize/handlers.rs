use crate::app_context::AppContext;
use crate::resize::errors::ResizeError;
use crate::resize::extractors::ResizeParams;
use crate::resize::http::ResizeHttpHandler;
use crate::resize::requests::ResizeRequest;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

#[axum::debug_handler]
pub async fn resize(
    State(app_context): State<AppContext>,
    ResizeParams(params): ResizeParams,
) -> Result<Response, ResizeError> {
    let request = ResizeRequest::bind(&params)?;
    let jpeg_bytes = ResizeHttpHandler::new(app_context).resize(request).await?;
    Ok(([(CONTENT_TYPE, JPEG_CONTENT_TYPE)], jpeg_bytes).into_response())
}
