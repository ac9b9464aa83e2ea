use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Path, State,
};
use axum::Json;
use serde_json::Value;

use crate::api::parse_update;
use crate::app::AppState;
use crate::database::Measurement;
use crate::middleware::{ApiResponse, ApiResult};

use super::{json_rejection, not_found, path_rejection};

/// PUT /measurements/:id - Partial update; only supplied fields change
///
/// The body is validated before the store is consulted, so an invalid body
/// is a 422 whether or not the id exists.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Measurement> {
    let Path(id) = id.map_err(path_rejection)?;
    let Json(body) = body.map_err(json_rejection)?;
    let changes = parse_update(body)?;

    match state.store.update(id, changes).await? {
        Some(row) => {
            tracing::info!(id, "Updated measurement");
            Ok(ApiResponse::success(row))
        }
        None => Err(not_found(id)),
    }
}
