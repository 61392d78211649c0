//! Entity structs for all HealthGuard domain objects.
//!
//! Each entity is owned by exactly one registry in `hg-engine` and persists as
//! one entry of a keyed collection in the state file. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod alert;
mod health_record;
mod observation;
mod sensor;

pub use alert::{Alert, NewAlert};
pub use health_record::HealthRecord;
pub use observation::HouseholdObservation;
pub use sensor::{SensorReading, SensorRecord, Threshold};
