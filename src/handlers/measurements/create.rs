use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::api::parse_create;
use crate::app::AppState;
use crate::database::Measurement;
use crate::middleware::{ApiResponse, ApiResult};

use super::json_rejection;

/// POST /measurements/ - Validate and store a new reading
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Measurement> {
    let Json(body) = body.map_err(json_rejection)?;
    let new = parse_create(body)?;

    let row = state.store.insert(new).await?;
    tracing::info!(id = row.id, co2_value = row.co2_value, "Created measurement");

    Ok(ApiResponse::created(row))
}
