use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// Request bodies above this size are rejected before parsing.
pub const MAX_JSON_BODY: usize = 256 * 1024;

/// JSON body extractor with problem-details errors.
///
/// Unparseable JSON is `400 BAD_REQUEST`; well-formed JSON of the wrong shape
/// (missing field, wrong type) is `422 VALIDATION_ERROR`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_JSON_BODY {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(
                        error = %Redacted(&e.to_string()),
                        content_type = %content_type,
                        body_size = body.len(),
                        "JSON parsing failed"
                    );
                    json_error_to_app_error(&e)
                })
        })
    }
}

fn json_error_to_app_error(error: &JsonError) -> AppError {
    match error.classify() {
        serde_json::error::Category::Data => AppError::invalid(classify_json_error(error)),
        _ => AppError::bad_request(ErrorCode::BadRequest, classify_json_error(error)),
    }
}

/// Sanitized, client-facing description of a JSON failure.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            // serde's message names the field but never echoes values
            let msg = error.to_string();
            let msg = msg.split(" at line ").next().unwrap_or("wrong types");
            format!("Invalid request body: {msg}")
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
