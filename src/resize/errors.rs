use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use image::ImageError;
use std::error::Error;
use std::fmt;
use tokio::task::JoinError;

/// Everything that can end a resize request early. The response body is always the
/// `Display` text of the variant.
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    #[error("{0}")]
    Binding(String),
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{}", error_chain(.0))]
    Fetch(#[from] reqwest::Error),
    #[error("source image exceeds the limit of {limit} {unit}")]
    SourceTooLarge { limit: u64, unit: LimitUnit },
    #[error("requested size {width}x{height} exceeds the limit of {limit} pixels")]
    TargetTooLarge { width: u32, height: u32, limit: u64 },
    #[error("{0}")]
    Decode(#[source] ImageError),
    #[error("{0}")]
    Resize(#[source] ImageError),
    #[error("{0}")]
    Encode(#[source] ImageError),
    #[error("image processing task failed: {0}")]
    Internal(#[from] JoinError),
}

impl ResizeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResizeError::Binding(_) | ResizeError::Validation(_) | ResizeError::Fetch(_) => {
                StatusCode::BAD_REQUEST
            }
            ResizeError::SourceTooLarge { .. } | ResizeError::TargetTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ResizeError::Decode(_)
            | ResizeError::Resize(_)
            | ResizeError::Encode(_)
            | ResizeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ResizeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %message, "Resize failed.");
        } else {
            tracing::debug!(
                status = status.as_u16(),
                error = %message,
                "Rejected resize request."
            );
        }
        (status, message).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitUnit {
    Bytes,
    Pixels,
}

impl fmt::Display for LimitUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitUnit::Bytes => f.write_str("bytes"),
            LimitUnit::Pixels => f.write_str("pixels"),
        }
    }
}

/// Every field that failed validation, in the order the fields were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(FieldError::field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid request: ")?;
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("`{0}` is required")]
    Missing(&'static str),
    #[error("`{0}` must be greater than zero")]
    NotPositive(&'static str),
    #[error("`{field}` must not exceed {max}")]
    TooLarge { field: &'static str, max: u32 },
    #[error("`url` is not a valid URI: {0}")]
    InvalidUrl(url::ParseError),
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing(field) | FieldError::NotPositive(field) => *field,
            FieldError::TooLarge { field, .. } => *field,
            FieldError::InvalidUrl(_) => "url",
        }
    }
}

// reqwest keeps the interesting part (DNS failure, connection refused) in the source chain.
fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_list_every_field() {
        let errors = ValidationErrors(vec![
            FieldError::Missing("url"),
            FieldError::NotPositive("width"),
            FieldError::TooLarge {
                field: "height",
                max: u32::MAX,
            },
        ]);

        assert_eq!(
            errors.to_string(),
            "invalid request: `url` is required; `width` must be greater than zero; \
            `height` must not exceed 4294967295"
        );
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["url", "width", "height"]);
    }

    #[test]
    fn input_errors_are_client_errors() {
        let binding = ResizeError::Binding(String::from("`width` must be an integer"));
        let validation =
            ResizeError::Validation(ValidationErrors(vec![FieldError::Missing("url")]));

        assert_eq!(binding.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn limit_errors_are_payload_too_large() {
        let source = ResizeError::SourceTooLarge {
            limit: 1024,
            unit: LimitUnit::Bytes,
        };
        let target = ResizeError::TargetTooLarge {
            width: 5000,
            height: 5000,
            limit: 1_000_000,
        };

        assert_eq!(source.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(source.to_string(), "source image exceeds the limit of 1024 bytes");
        assert_eq!(target.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            target.to_string(),
            "requested size 5000x5000 exceeds the limit of 1000000 pixels"
        );
    }
}
