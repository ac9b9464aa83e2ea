use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Measurement, MeasurementChanges, NewMeasurement};
use crate::database::store::MeasurementStore;
use crate::filter::{MeasurementQuery, OrderColumn, SortDirection};

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Measurement>,
    last_id: i64,
    last_created_at: Option<DateTime<Utc>>,
}

/// Process-local store with the same observable semantics as the
/// PostgreSQL repository. Ids are never reused and `created_at` never
/// goes backwards, even if the wall clock does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn compare(a: &Measurement, b: &Measurement, column: OrderColumn) -> Ordering {
    match column {
        OrderColumn::Co2Value => a.co2_value.total_cmp(&b.co2_value),
        OrderColumn::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

#[async_trait]
impl MeasurementStore for MemoryStore {
    async fn insert(&self, new: NewMeasurement) -> Result<Measurement, DatabaseError> {
        let mut state = self.state.write().await;

        let now = Utc::now();
        let created_at = match state.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        state.last_id += 1;
        state.last_created_at = Some(created_at);

        let row = Measurement {
            id: state.last_id,
            co2_value: new.co2_value,
            unit: new.unit,
            source: new.source,
            description: new.description,
            created_at,
        };
        state.rows.insert(row.id, row.clone());
        tracing::debug!("Inserted measurement {}", row.id);
        Ok(row)
    }

    async fn find(&self, id: i64) -> Result<Option<Measurement>, DatabaseError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn list(&self, query: &MeasurementQuery) -> Result<Vec<Measurement>, DatabaseError> {
        let state = self.state.read().await;

        // BTreeMap iteration is id order, which the stable sort keeps for ties
        let mut rows: Vec<Measurement> = state
            .rows
            .values()
            .filter(|row| query.source.is_none() || row.source == query.source)
            .filter(|row| query.unit.is_none() || row.unit == query.unit)
            .cloned()
            .collect();

        if let Some(order) = query.order {
            rows.sort_by(|a, b| {
                let ordering = compare(a, b, order.column);
                match order.sort {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(0);
        Ok(rows.into_iter().skip(skip).take(limit).collect())
    }

    async fn update(&self, id: i64, changes: MeasurementChanges) -> Result<Option<Measurement>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(row) = state.rows.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(row);
        tracing::debug!("Updated measurement {}", id);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let removed = self.state.write().await.rows.remove(&id).is_some();
        if removed {
            tracing::debug!("Deleted measurement {}", id);
        }
        Ok(removed)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
