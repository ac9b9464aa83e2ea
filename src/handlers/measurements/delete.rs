use axum::extract::{rejection::PathRejection, Path, State};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};

use super::{not_found, path_rejection};

/// DELETE /measurements/:id - Remove the row; 204 with no body
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id.map_err(path_rejection)?;

    if state.store.delete(id).await? {
        tracing::info!(id, "Deleted measurement");
        Ok(ApiResponse::no_content())
    } else {
        Err(not_found(id))
    }
}
