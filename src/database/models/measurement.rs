use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored CO2 reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Measurement {
    pub id: i64,
    pub co2_value: f64,
    pub unit: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new row; `id` and `created_at` come from the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
    pub co2_value: f64,
    pub unit: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
}

/// Sparse set of changes for a partial update.
///
/// The outer `Option` says whether a field was supplied at all. For the text
/// columns the inner `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementChanges {
    pub co2_value: Option<f64>,
    pub unit: Option<Option<String>>,
    pub source: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl MeasurementChanges {
    pub fn is_empty(&self) -> bool {
        self.co2_value.is_none() && self.unit.is_none() && self.source.is_none() && self.description.is_none()
    }

    /// Merge supplied fields into `row`, leaving everything else untouched
    pub fn apply_to(&self, row: &mut Measurement) {
        if let Some(co2_value) = self.co2_value {
            row.co2_value = co2_value;
        }
        if let Some(unit) = &self.unit {
            row.unit = unit.clone();
        }
        if let Some(source) = &self.source {
            row.source = source.clone();
        }
        if let Some(description) = &self.description {
            row.description = description.clone();
        }
    }
}
