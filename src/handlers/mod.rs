// handlers/mod.rs - two tiers of access
//
// Public (no credential) → Measurements (api-key header required)
pub mod measurements;
pub mod public;
