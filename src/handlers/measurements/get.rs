use axum::extract::{rejection::PathRejection, Path, State};

use crate::app::AppState;
use crate::database::Measurement;
use crate::middleware::{ApiResponse, ApiResult};

use super::{not_found, path_rejection};

/// GET /measurements/:id
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Measurement> {
    let Path(id) = id.map_err(path_rejection)?;

    match state.store.find(id).await? {
        Some(row) => Ok(ApiResponse::success(row)),
        None => Err(not_found(id)),
    }
}
