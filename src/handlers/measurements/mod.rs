// handlers/measurements - CRUD endpoints under /measurements
//
// Every route here sits behind the api-key middleware. Extractor rejections
// are taken as `Result` so they come back in the same error shape as
// everything else.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::create;
pub use delete::delete;
pub use get::get;
pub use list::list;
pub use update::update;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::error::ApiError;

pub(crate) fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::unprocessable_field("body", rejection.body_text())
}

pub(crate) fn path_rejection(rejection: PathRejection) -> ApiError {
    tracing::debug!("Rejected path parameter: {}", rejection.body_text());
    ApiError::unprocessable_field("id", "value is not a valid integer")
}

pub(crate) fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}

pub(crate) fn not_found(id: i64) -> ApiError {
    tracing::debug!("Measurement {} not found", id);
    ApiError::not_found("Measurement not found")
}
