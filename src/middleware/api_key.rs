use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::app::AppState;
use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "api-key";

/// Rejects any request whose `api-key` header does not match the configured
/// secret. Runs before extraction, so neither validation nor the store is
/// reached on failure.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    match check_api_key(&headers, &state.api_key) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request: {}",
                err
            );
            err.into_response()
        }
    }
}

/// Byte-for-byte, constant-time comparison against `expected`
pub fn check_api_key(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    if expected.is_empty() {
        return Err(ApiError::unauthorized("Invalid API Key"));
    }

    let presented = headers
        .get(API_KEY_HEADER)
        .ok_or_else(|| ApiError::unauthorized("Invalid API Key"))?;

    if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(ApiError::unauthorized("Invalid API Key"))
    }
}
