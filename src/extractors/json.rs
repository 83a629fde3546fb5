//! Extract the request body as a JSON object, rejecting with `AppError::BadRequest`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::{Map, Value};

/// JSON object body. Content-Type is not enforced; an empty, malformed or non-object body is a bad request.
#[derive(Clone, Debug)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(e.body_text())
                } else {
                    AppError::BadRequest(e.body_text())
                }
            })?;
        parse_object(&bytes).map(JsonObject)
    }
}

fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("request body is required".into()));
    }
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("malformed JSON: {}", e)))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_objects() {
        let m = parse_object(br#"{"name": "Rex"}"#).unwrap();
        assert_eq!(m.get("name"), Some(&Value::String("Rex".into())));
        assert!(parse_object(b"{}").unwrap().is_empty());
    }

    #[test]
    fn rejects_empty_malformed_and_non_objects() {
        let bodies: [&[u8]; 6] = [b"", b"  \n", b"{name:", b"[1, 2]", b"\"Rex\"", b"null"];
        for body in bodies {
            assert!(matches!(parse_object(body), Err(AppError::BadRequest(_))));
        }
    }
}
