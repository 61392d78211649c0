//! ID prefixes and generation.
//!
//! Engine-created entities get `{prefix}-{8 hex chars}` identifiers, e.g.
//! `hd-a3f8b2c1`. Sensor IDs are assigned by whoever registers the sensor.

pub const PREFIX_HEALTH_RECORD: &str = "hd";
pub const PREFIX_ALERT: &str = "al";
pub const PREFIX_IOT_HOUSEHOLD: &str = "hh-iot";

/// Generate a prefixed random ID.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{:08x}", rand::random::<u32>())
}

/// Generate a prefixed random ID that `taken` does not already claim.
///
/// Callers pass a lookup over the registry they hold locked, so the returned
/// id stays unique until they insert it.
#[must_use]
pub fn generate_unique_id(prefix: &str, mut taken: impl FnMut(&str) -> bool) -> String {
    loop {
        let id = generate_id(prefix);
        if !taken(&id) {
            return id;
        }
    }
}

/// Household ID for a synthesized case, e.g. `hh-iot-042`.
#[must_use]
pub fn iot_household_id() -> String {
    format!(
        "{PREFIX_IOT_HOUSEHOLD}-{:03}",
        rand::random::<u16>() % 1000
    )
}
