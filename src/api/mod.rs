pub mod payload;

pub use payload::{parse_create, parse_update, MeasurementCreate, MeasurementUpdate, PayloadError};
