use axum::extract::{rejection::QueryRejection, Query, State};

use crate::app::AppState;
use crate::database::Measurement;
use crate::filter::{ListParams, MeasurementQuery};
use crate::middleware::{ApiResponse, ApiResult};

use super::query_rejection;

/// GET /measurements/ - Filtered, ordered, paged listing
///
/// Query: `skip`, `limit`, `source`, `unit`, `order_by` (`co2_value` |
/// `created_at`), `order` (`asc` | `desc`). An empty match is an empty array.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Measurement>> {
    let Query(params) = params.map_err(query_rejection)?;
    let query = MeasurementQuery::from_params(params, &state.filter)?;

    let rows = state.store.list(&query).await?;
    Ok(ApiResponse::success(rows))
}
