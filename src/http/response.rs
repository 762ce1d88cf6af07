//! JSON response encoding and API errors.
//!
//! # Responsibilities
//! - Serialize payloads as JSON followed by a newline
//! - Escape `<`, `>`, `&`, U+2028 and U+2029 inside strings
//! - Map lookup failures to 404 and everything else to 500
//!
//! # Design Decisions
//! - Payloads are serialized eagerly, so handlers can answer straight from
//!   the borrowed model without cloning it
//! - Error bodies share the `{"message": ...}` shape for every status

use std::io;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::Formatter;
use thiserror::Error;

use crate::model::LookupError;

const APPLICATION_JSON: &str = "application/json";

/// Compact JSON formatter that also escapes HTML-significant characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Encode a payload as a response body: compact JSON plus a trailing newline.
pub fn encode_json<T: Serialize + ?Sized>(payload: &T) -> serde_json::Result<Vec<u8>> {
    let mut body = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, HtmlSafeFormatter);
    payload.serialize(&mut serializer)?;
    body.push(b'\n');
    Ok(body)
}

/// Build a JSON response with the given status.
pub fn serve_json<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Response {
    match encode_json(payload) {
        Ok(body) => json_response(status, body),
        Err(e) => {
            tracing::error!(error = %e, "could not encode JSON");
            ApiError::Internal("could not encode JSON".to_string()).into_response()
        }
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))],
        body,
    )
        .into_response()
}

/// Error body shared by every failure response.
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    message: &'a str,
}

/// Failures surfaced by API handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        ApiError::NotFound(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        }

        // A struct of one string always serializes.
        let body = encode_json(&ErrorResponse { message: &message }).unwrap_or_default();
        json_response(status, body)
    }
}
