//! The streaming validation endpoint.
//!
//! Structural faults (wrong file name, non-UTF-8 bytes, unparseable
//! header) are rejected with a 400 before any row processing begins. Once
//! streaming has started the response status is already committed, so
//! every later fault is absorbed by the orchestrator and surfaces as the
//! terminal `{"error", "detail"}` object inside the array. The emitted
//! byte stream is a syntactically complete JSON array no matter how
//! processing ends.

use std::convert::Infallible;
use std::io::Cursor;
use std::sync::Arc;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use tabval_core::{Delimiter, StreamItem};
use tabval_validator::ValidationStream;

use crate::AppState;

/// Query parameters of `POST /validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    /// CSV delimiter; defaults to comma
    #[serde(default)]
    pub delimiter: Delimiter,
}

/// Rejection body for structural faults.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// What was rejected
    pub error: String,
    /// HTTP status code, mirrored into the body
    pub code: u16,
}

type Rejection = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, message: impl Into<String>) -> Rejection {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: status.as_u16(),
        }),
    )
}

/// `POST /validate`: validate an uploaded CSV against the configured
/// model, streaming errors back as a JSON array.
pub async fn validate_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ValidateParams>,
    multipart: Multipart,
) -> Result<Response, Rejection> {
    let (filename, data) = read_upload(multipart).await?;

    if !filename.to_lowercase().ends_with(".csv") {
        error!("Rejected non-CSV upload: {filename}");
        return Err(reject(StatusCode::BAD_REQUEST, "Please upload a CSV file."));
    }

    let text = String::from_utf8(data.to_vec()).map_err(|e| {
        error!("CSV decoding failed: {e}");
        reject(
            StatusCode::BAD_REQUEST,
            format!("File must be UTF-8 encoded: {e}"),
        )
    })?;

    let model = state
        .registry
        .get(&state.settings.data.model_name)
        .map_err(|e| {
            error!("Model resolution failed: {e}");
            reject(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    // Constructing the stream performs the zero-row structural parse:
    // an unparseable header fails here, before the response commits.
    let stream = ValidationStream::new(
        Cursor::new(text.into_bytes()),
        params.delimiter,
        model,
        state.settings.data.chunk_size,
        state.settings.data.max_errors,
    )
    .map_err(|e| {
        error!("CSV header parse failed: {e}");
        reject(StatusCode::BAD_REQUEST, format!("CSV parse error: {e}"))
    })?;

    info!(
        "Validating upload '{filename}' against model '{}'",
        state.settings.data.model_name
    );

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        json_array_body(stream),
    )
        .into_response())
}

/// Pulls the uploaded file out of the multipart form.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), Rejection> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if let Some(name) = field.file_name() {
            let name = name.to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| reject(StatusCode::BAD_REQUEST, e.to_string()))?;
            return Ok((name, data));
        }
    }
    Err(reject(StatusCode::BAD_REQUEST, "No file provided"))
}

/// Frames the orchestrator's output as an incrementally emitted JSON
/// array. The opening bracket, each element, and the closing bracket are
/// produced lazily as the consumer polls, so a disconnected client drops
/// the stream (and its reader) without further work.
fn json_array_body<R>(stream: ValidationStream<R>) -> Body
where
    R: std::io::Read + Send + 'static,
{
    let mut first = true;
    let elements = stream.map(move |item| {
        let json = to_json(&item);
        if first {
            first = false;
            Bytes::from(json)
        } else {
            Bytes::from(format!(",{json}"))
        }
    });

    let framed = std::iter::once(Bytes::from_static(b"["))
        .chain(elements)
        .chain(std::iter::once(Bytes::from_static(b"]")))
        .map(Ok::<_, Infallible>);

    Body::from_stream(futures_util::stream::iter(framed))
}

fn to_json(item: &StreamItem) -> String {
    // Serialization of these records cannot realistically fail; the
    // fallback keeps the array well-formed if it ever does.
    serde_json::to_string(item).unwrap_or_else(|_| {
        r#"{"error":"Validation stream failed","detail":"serialization error"}"#.to_string()
    })
}
