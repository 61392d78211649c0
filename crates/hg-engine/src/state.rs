//! Whole-engine snapshot and its JSON state file.
//!
//! Each collection is stored as an object mapping id to entity:
//!
//! ```json
//! { "healthRecords": { "hd-…": {…} }, "sensors": { "wq-001": {…} }, "alerts": { "al-…": {…} } }
//! ```
//!
//! Entries load back in document order, which is the registries' insertion
//! order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use hg_core::entities::{Alert, HealthRecord, SensorRecord};

use crate::error::EngineError;

/// Entities stored in a keyed collection.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for HealthRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for SensorRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Alert {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    #[serde(default, with = "keyed")]
    pub health_records: Vec<HealthRecord>,
    #[serde(default, with = "keyed")]
    pub sensors: Vec<SensorRecord>,
    #[serde(default, with = "keyed")]
    pub alerts: Vec<Alert>,
}

impl EngineState {
    /// # Errors
    ///
    /// Returns `EngineError::State` if the file does not exist,
    /// `EngineError::Io` if it cannot be read, or `EngineError::Json` if it
    /// is malformed.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EngineError::State(format!("no state file at {}", path.display()))
            } else {
                EngineError::Io(e)
            }
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the snapshot to a temporary sibling, then rename it over `path`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::State` if a collection repeats an id, since
    /// such a file could not be loaded back, or `EngineError::Io` /
    /// `EngineError::Json` if the write fails. The existing file is left
    /// untouched on error.
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        check_unique("healthRecords", &self.health_records)?;
        check_unique("sensors", &self.sensors)?;
        check_unique("alerts", &self.alerts)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = temp_sibling(path);
        std::fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn check_unique<T: Keyed>(collection: &str, items: &[T]) -> Result<(), EngineError> {
    let mut seen = HashSet::with_capacity(items.len());
    match items.iter().map(|item| item.key()).find(|key| !seen.insert(*key)) {
        Some(key) => Err(EngineError::State(format!(
            "duplicate id '{key}' in {collection}"
        ))),
        None => Ok(()),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// `serde(with)` adapter between `Vec<T>` and an id-keyed JSON object.
mod keyed {
    use std::collections::HashSet;
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{Error as _, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Keyed;

    pub fn serialize<S, T>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize + Keyed,
    {
        let mut map = serializer.serialize_map(Some(items.len()))?;
        for item in items {
            map.serialize_entry(item.key(), item)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Keyed,
    {
        deserializer.deserialize_map(KeyedVisitor(PhantomData))
    }

    struct KeyedVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for KeyedVisitor<T>
    where
        T: Deserialize<'de> + Keyed,
    {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping ids to entities")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
            let mut seen = HashSet::new();
            while let Some((key, item)) = access.next_entry::<String, T>()? {
                if key != item.key() {
                    return Err(A::Error::custom(format!(
                        "entry '{key}' holds entity '{}'",
                        item.key()
                    )));
                }
                if !seen.insert(key.clone()) {
                    return Err(A::Error::custom(format!("duplicate id '{key}'")));
                }
                items.push(item);
            }
            Ok(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::enums::{Channel, SensorKind, Symptom, WaterSource};
    use pretty_assertions::assert_eq;

    use crate::test_support::{record_with, sample_alert, sensor};

    fn state() -> EngineState {
        let mut second = record_with(&[Symptom::Diarrhea], WaterSource::Pond, Some(45));
        second.id = "hd-00000001".into();
        let mut first = record_with(&[Symptom::Fever], WaterSource::Well, Some(25));
        first.id = "hd-ffffffff".into();
        EngineState {
            // Deliberately not in id order.
            health_records: vec![first, second],
            sensors: vec![
                sensor("wq-004", SensorKind::WaterQuality, 0.0, 100.0),
                sensor("aq-001", SensorKind::AirQuality, 0.0, 100.0),
            ],
            alerts: vec![sample_alert(&[Channel::Sms])],
        }
    }

    #[test]
    fn collections_are_keyed_by_id_in_camel_case() {
        let json = serde_json::to_value(state()).unwrap();
        assert!(json["healthRecords"]["hd-ffffffff"].is_object());
        assert_eq!(json["sensors"]["wq-004"]["kind"], "water_quality");
        assert_eq!(json["alerts"]["al-0000beef"]["channels"][0], "SMS");
    }

    #[test]
    fn save_and_load_preserve_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.json");
        let original = state();

        original.save(&path).unwrap();
        let loaded = EngineState::load(&path).unwrap();

        assert_eq!(loaded, original);
        assert_eq!(loaded.health_records[0].id, "hd-ffffffff");
        assert_eq!(loaded.sensors[1].id, "aq-001");
        assert!(!path.with_file_name("state.json.tmp").exists());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let loaded: EngineState = serde_json::from_str(r#"{"alerts":{}}"#).unwrap();
        assert_eq!(loaded, EngineState::default());
    }

    #[test]
    fn mismatched_key_is_rejected() {
        let mut json = serde_json::to_value(state()).unwrap();
        let sensors = json["sensors"].as_object_mut().unwrap();
        let entry = sensors.remove("wq-004").unwrap();
        sensors.insert("wq-999".into(), entry);

        let err = serde_json::from_value::<EngineState>(json).expect_err("key mismatch");
        assert!(err.to_string().contains("wq-999"));
    }

    #[test]
    fn duplicate_ids_are_never_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let original = state();
        original.save(&path).unwrap();

        let mut broken = original.clone();
        broken.alerts.push(sample_alert(&[Channel::WhatsApp]));
        let err = broken.save(&path).expect_err("duplicate alert id");

        assert!(matches!(err, EngineError::State(ref m) if m.contains("al-0000beef")));
        assert_eq!(EngineState::load(&path).unwrap(), original);
    }

    #[test]
    fn missing_file_is_state_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineState::load(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, EngineError::State(_)));
    }
}
