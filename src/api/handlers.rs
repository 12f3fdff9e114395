use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::StatusCode,
    Json,
};
use tracing::{debug, instrument};

use crate::{error::ApiError, types::Envelope, utils};

#[instrument]
pub async fn health_check() -> Json<Envelope> {
    Json(Envelope::ok())
}

#[instrument(skip_all)]
pub async fn encode_url(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let text = read_text(body)?;
    let encoded = utils::encode(&text);
    debug!(input_len = text.len(), output_len = encoded.len(), "Encoded body");
    Ok(Json(Envelope::data(encoded)))
}

#[instrument(skip_all)]
pub async fn decode_url(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let text = read_text(body)?;
    let decoded = utils::decode(&text).inspect_err(|e| {
        debug!(error = %e, "Rejected malformed percent encoding");
    })?;
    debug!(input_len = text.len(), output_len = decoded.len(), "Decoded body");
    Ok(Json(Envelope::data(decoded)))
}

// unknown paths and known paths hit with the wrong method look the same
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

// invalid UTF-8 in the body is replaced, never rejected
fn read_text(body: Result<Bytes, BytesRejection>) -> Result<String, ApiError> {
    let bytes = body?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
