use crate::resize::errors::{FieldError, ResizeError, ValidationErrors};
use std::collections::HashMap;
use url::Url;

pub const URL_FIELD: &str = "url";
pub const WIDTH_FIELD: &str = "width";
pub const HEIGHT_FIELD: &str = "height";

/// A validated resize request: where to fetch the source and the exact output size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    pub url: Url,
    pub width: u32,
    pub height: u32,
}

impl ResizeRequest {
    /// Builds a request out of raw named parameters. Fields other than `url`, `width` and
    /// `height` are ignored. Empty values count as missing.
    ///
    /// A dimension that isn't an integer fails immediately with [`ResizeError::Binding`];
    /// everything else is collected into a single [`ResizeError::Validation`].
    pub fn bind(params: &HashMap<String, String>) -> Result<Self, ResizeError> {
        let raw_url = non_empty(params, URL_FIELD);
        let raw_width = parse_integer(params, WIDTH_FIELD)?;
        let raw_height = parse_integer(params, HEIGHT_FIELD)?;

        let mut errors = Vec::new();
        let url = match raw_url {
            Some(raw_url) => Url::parse(raw_url)
                .map_err(|err| errors.push(FieldError::InvalidUrl(err)))
                .ok(),
            None => {
                errors.push(FieldError::Missing(URL_FIELD));
                None
            }
        };
        let width = validate_dimension(WIDTH_FIELD, raw_width, &mut errors);
        let height = validate_dimension(HEIGHT_FIELD, raw_height, &mut errors);

        match (url, width, height) {
            (Some(url), Some(width), Some(height)) => Ok(Self { url, width, height }),
            _ => Err(ResizeError::Validation(ValidationErrors(errors))),
        }
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

fn non_empty<'p>(params: &'p HashMap<String, String>, field: &str) -> Option<&'p str> {
    params
        .get(field)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn parse_integer(params: &HashMap<String, String>, field: &str) -> Result<Option<i64>, ResizeError> {
    match non_empty(params, field) {
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|err| {
            ResizeError::Binding(format!("`{field}` must be an integer, got {raw:?}: {err}"))
        }),
        None => Ok(None),
    }
}

fn validate_dimension(
    field: &'static str,
    value: Option<i64>,
    errors: &mut Vec<FieldError>,
) -> Option<u32> {
    match value {
        None => {
            errors.push(FieldError::Missing(field));
            None
        }
        Some(value) if value <= 0 => {
            errors.push(FieldError::NotPositive(field));
            None
        }
        Some(value) => match u32::try_from(value) {
            Ok(value) => Some(value),
            Err(_) => {
                errors.push(FieldError::TooLarge {
                    field,
                    max: u32::MAX,
                });
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn failed_fields(result: Result<ResizeRequest, ResizeError>) -> Vec<&'static str> {
        match result {
            Err(ResizeError::Validation(errors)) => errors.fields().collect(),
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn binds_complete_request() {
        let request = ResizeRequest::bind(&params(&[
            ("url", "http://images.test/cat.png"),
            ("width", "100"),
            ("height", "50"),
        ]))
        .expect("Failed to bind a complete request.");

        assert_eq!(request.url.as_str(), "http://images.test/cat.png");
        assert_eq!(request.width, 100);
        assert_eq!(request.height, 50);
        assert_eq!(request.pixel_count(), 5000);
    }

    #[test]
    fn ignores_unknown_fields() {
        let request = ResizeRequest::bind(&params(&[
            ("url", "http://images.test/cat.png"),
            ("width", "1"),
            ("height", "1"),
            ("quality", "95"),
            ("format", "webp"),
        ]));

        assert!(request.is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        assert_eq!(failed_fields(ResizeRequest::bind(&params(&[]))), ["url", "width", "height"]);
    }

    #[test]
    fn treats_empty_values_as_missing() {
        let result = ResizeRequest::bind(&params(&[
            ("url", ""),
            ("width", "10"),
            ("height", ""),
        ]));

        assert_eq!(failed_fields(result), ["url", "height"]);
    }

    #[test]
    fn rejects_zero_and_negative_dimensions() {
        let result = ResizeRequest::bind(&params(&[
            ("url", "http://images.test/cat.png"),
            ("width", "0"),
            ("height", "-20"),
        ]));

        match result {
            Err(ResizeError::Validation(ValidationErrors(errors))) => assert_eq!(
                errors,
                [
                    FieldError::NotPositive("width"),
                    FieldError::NotPositive("height")
                ]
            ),
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_dimensions_wider_than_u32() {
        let result = ResizeRequest::bind(&params(&[
            ("url", "http://images.test/cat.png"),
            ("width", "4294967296"),
            ("height", "10"),
        ]));

        assert_eq!(failed_fields(result), ["width"]);
    }

    #[test]
    fn rejects_relative_url() {
        let result = ResizeRequest::bind(&params(&[
            ("url", "images/cat.png"),
            ("width", "10"),
            ("height", "10"),
        ]));

        match result {
            Err(ResizeError::Validation(ValidationErrors(errors))) => {
                assert!(matches!(errors.as_slice(), [FieldError::InvalidUrl(_)]))
            }
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_dimension_is_a_binding_error() {
        let result = ResizeRequest::bind(&params(&[
            ("url", "http://images.test/cat.png"),
            ("width", "wide"),
            ("height", "10"),
        ]));

        match result {
            Err(ResizeError::Binding(message)) => assert!(message.contains("`width`")),
            other => panic!("Expected a binding error, got {other:?}"),
        }
    }
}
