use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Measurement, MeasurementChanges, NewMeasurement};
use crate::filter::MeasurementQuery;

/// Persistence seam used by the request handlers.
///
/// Every mutating call is atomic: it either commits completely or leaves the
/// store unchanged. "Not found" is reported through the return value, never
/// as an error.
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// Insert a row; the store assigns `id` and `created_at`
    async fn insert(&self, new: NewMeasurement) -> Result<Measurement, DatabaseError>;

    async fn find(&self, id: i64) -> Result<Option<Measurement>, DatabaseError>;

    /// Filter, order, then page
    async fn list(&self, query: &MeasurementQuery) -> Result<Vec<Measurement>, DatabaseError>;

    /// Apply `changes` to an existing row. `None` when `id` does not resolve.
    async fn update(&self, id: i64, changes: MeasurementChanges) -> Result<Option<Measurement>, DatabaseError>;

    /// `false` when `id` does not resolve
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
