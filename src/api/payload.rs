//! Request body contracts for creating and updating measurements.
//!
//! Bodies arrive as untyped JSON so every offending field can be reported in
//! one response. Fields are type-checked first, then deserialized into the
//! typed payloads below, then checked against their numeric constraints.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::database::models::{MeasurementChanges, NewMeasurement};
use crate::error::FieldErrors;

const TEXT_FIELDS: &[&str] = &["unit", "source", "description"];

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("invalid fields: {0:?}")]
    Fields(FieldErrors),
}

#[derive(Debug, Deserialize)]
pub struct MeasurementCreate {
    pub co2_value: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MeasurementUpdate {
    #[serde(default)]
    pub co2_value: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

/// Marks a field as supplied even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl MeasurementCreate {
    pub fn validate(&self) -> Result<(), PayloadError> {
        let mut errors = FieldErrors::new();
        check_co2_value(self.co2_value, &mut errors);
        into_result(errors)
    }
}

impl MeasurementUpdate {
    pub fn validate(&self) -> Result<(), PayloadError> {
        let mut errors = FieldErrors::new();
        if let Some(co2_value) = self.co2_value {
            check_co2_value(co2_value, &mut errors);
        }
        into_result(errors)
    }
}

impl From<MeasurementCreate> for NewMeasurement {
    fn from(payload: MeasurementCreate) -> Self {
        Self {
            co2_value: payload.co2_value,
            unit: payload.unit,
            source: payload.source,
            description: payload.description,
        }
    }
}

impl From<MeasurementUpdate> for MeasurementChanges {
    fn from(payload: MeasurementUpdate) -> Self {
        Self {
            co2_value: payload.co2_value,
            unit: payload.unit,
            source: payload.source,
            description: payload.description,
        }
    }
}

/// Validate a create body. Unknown keys, including `id` and `created_at`, are ignored.
pub fn parse_create(body: Value) -> Result<NewMeasurement, PayloadError> {
    let object = as_object(&body)?;

    let mut errors = FieldErrors::new();
    match object.get("co2_value") {
        None | Some(Value::Null) => {
            errors.insert("co2_value".to_string(), "field required".to_string());
        }
        Some(value) => check_number_type("co2_value", value, &mut errors),
    }
    check_text_types(object, &mut errors);
    into_result(errors)?;

    let payload: MeasurementCreate = deserialize(body)?;
    payload.validate()?;
    Ok(payload.into())
}

/// Validate a partial update body. Absent fields stay unchanged; `null`
/// clears a text field but is rejected for `co2_value`.
pub fn parse_update(body: Value) -> Result<MeasurementChanges, PayloadError> {
    let object = as_object(&body)?;

    let mut errors = FieldErrors::new();
    match object.get("co2_value") {
        None => {}
        Some(Value::Null) => {
            errors.insert("co2_value".to_string(), "may not be null".to_string());
        }
        Some(value) => check_number_type("co2_value", value, &mut errors),
    }
    check_text_types(object, &mut errors);
    into_result(errors)?;

    let payload: MeasurementUpdate = deserialize(body)?;
    payload.validate()?;
    Ok(payload.into())
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, PayloadError> {
    body.as_object().ok_or(PayloadError::NotAnObject)
}

fn deserialize<T: for<'de> Deserialize<'de>>(body: Value) -> Result<T, PayloadError> {
    serde_json::from_value(body).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.insert("body".to_string(), e.to_string());
        PayloadError::Fields(errors)
    })
}

fn check_number_type(field: &str, value: &Value, errors: &mut FieldErrors) {
    if !value.is_number() {
        errors.insert(field.to_string(), "value is not a valid number".to_string());
    }
}

fn check_text_types(object: &Map<String, Value>, errors: &mut FieldErrors) {
    for field in TEXT_FIELDS {
        match object.get(*field) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => {
                errors.insert(field.to_string(), "value is not a valid string".to_string());
            }
        }
    }
}

fn check_co2_value(co2_value: f64, errors: &mut FieldErrors) {
    if !co2_value.is_finite() {
        errors.insert("co2_value".to_string(), "value must be a finite number".to_string());
    } else if co2_value <= 0.0 {
        errors.insert("co2_value".to_string(), "value must be greater than 0".to_string());
    }
}

fn into_result(errors: FieldErrors) -> Result<(), PayloadError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(PayloadError::Fields(errors))
    }
}
