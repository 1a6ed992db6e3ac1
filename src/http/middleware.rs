use crate::logging::consts::{DEFAULT_CLIENT_IP, HTTP_REQUEST_TASK};
use axum::response::IntoResponse;
use axum::{extract::Request, middleware::Next, response::Response};
use http::StatusCode;
use std::any::Any;
use std::time::Instant;

pub async fn tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CLIENT_IP)
        .to_string();

    let start_time = Instant::now();
    let response = next.run(request).await;
    let elapsed_time = start_time.elapsed();

    tracing::info!(
        task = HTTP_REQUEST_TASK,
        http_method = %method,
        endpoint = %path,
        status = response.status().as_u16(),
        client_ip = %client_ip,
        processing_time_us = elapsed_time.as_micros(),
    );

    response
}

/// Turns a panic that escaped a handler into a plain 500 so the connection gets an answer.
pub fn recover_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = details, "Request handler panicked.");

    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}
