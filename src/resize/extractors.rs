use crate::resize::errors::ResizeError;
use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Raw named parameters of a resize call, gathered from the query string and the body.
/// Body values win over query values with the same name.
#[derive(Debug, Default)]
pub struct ResizeParams(pub HashMap<String, String>);

#[async_trait]
impl<S> FromRequest<S> for ResizeParams
where
    S: Send + Sync,
{
    type Rejection = ResizeError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(request.uri())
            .map_err(|rejection| ResizeError::Binding(rejection.body_text()))?;

        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body_params = if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(request, state)
                .await
                .map_err(|rejection| ResizeError::Binding(rejection.body_text()))?;
            fields
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|rejection| ResizeError::Binding(rejection.body_text()))?;
            multipart_fields(multipart).await?
        } else if content_type.starts_with("application/json") {
            let Json(object) = Json::<Map<String, Value>>::from_request(request, state)
                .await
                .map_err(|rejection| ResizeError::Binding(rejection.body_text()))?;
            json_fields(object)
        } else {
            HashMap::new()
        };

        params.extend(body_params);
        Ok(Self(params))
    }
}

async fn multipart_fields(mut multipart: Multipart) -> Result<HashMap<String, String>, ResizeError> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ResizeError::Binding(err.body_text()))?
    {
        // File parts can't carry any of the resize parameters.
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|err| ResizeError::Binding(err.body_text()))?;
        fields.insert(name, value);
    }
    Ok(fields)
}

fn json_fields(object: Map<String, Value>) -> HashMap<String, String> {
    object
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((name, text)),
            other => Some((name, other.to_string())),
        })
        .collect()
}
