//! Reference sensor fleet seeded by `hgd init`.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use hg_core::entities::{SensorReading, SensorRecord, Threshold};
use hg_core::enums::{SensorKind, SensorStatus};

struct FleetEntry {
    id: &'static str,
    name: &'static str,
    kind: SensorKind,
    location: &'static str,
    status: SensorStatus,
    unit: &'static str,
    min: f64,
    max: f64,
    /// Readings four hours apart, oldest first; the last is the current value.
    history: [f64; 7],
    /// How long ago the last reading arrived.
    stale_hours: i64,
}

const FLEET: [FleetEntry; 7] = [
    FleetEntry {
        id: "wq-001",
        name: "Borbari Well Water Quality - pH",
        kind: SensorKind::WaterQuality,
        location: "Borbari Village, Jorhat",
        status: SensorStatus::Online,
        unit: "pH",
        min: 6.5,
        max: 8.5,
        history: [7.1, 7.0, 7.2, 7.4, 7.2, 7.1, 7.2],
        stale_hours: 0,
    },
    FleetEntry {
        id: "wq-002",
        name: "Borbari Well Water Quality - Turbidity",
        kind: SensorKind::WaterQuality,
        location: "Borbari Village, Jorhat",
        status: SensorStatus::Online,
        unit: "NTU",
        min: 0.0,
        max: 5.0,
        history: [3.2, 3.0, 3.5, 4.1, 3.5, 3.3, 3.5],
        stale_hours: 0,
    },
    FleetEntry {
        id: "wq-003",
        name: "Borbari Well Water Quality - Dissolved Oxygen",
        kind: SensorKind::WaterQuality,
        location: "Borbari Village, Jorhat",
        status: SensorStatus::Online,
        unit: "mg/L",
        min: 5.0,
        max: 9.0,
        history: [7.5, 7.3, 7.8, 8.1, 7.8, 7.6, 7.8],
        stale_hours: 0,
    },
    FleetEntry {
        id: "wq-004",
        name: "Borbari Well Water Quality - Coliform Count",
        kind: SensorKind::WaterQuality,
        location: "Borbari Village, Jorhat",
        status: SensorStatus::Warning,
        unit: "CFU/100mL",
        min: 0.0,
        max: 100.0,
        history: [150.0, 180.0, 200.0, 210.0, 200.0, 190.0, 200.0],
        stale_hours: 0,
    },
    FleetEntry {
        id: "wt-001",
        name: "Majuli Weather Station",
        kind: SensorKind::Weather,
        location: "Majuli District",
        status: SensorStatus::Online,
        unit: "°C",
        min: 15.0,
        max: 40.0,
        history: [26.1, 24.5, 27.2, 30.1, 28.5, 27.8, 26.9],
        stale_hours: 0,
    },
    FleetEntry {
        id: "aq-001",
        name: "Jorhat Air Quality Monitor",
        kind: SensorKind::AirQuality,
        location: "Jorhat Town",
        status: SensorStatus::Online,
        unit: "AQI",
        min: 0.0,
        max: 100.0,
        history: [42.0, 38.0, 45.0, 52.0, 48.0, 44.0, 45.0],
        stale_hours: 0,
    },
    FleetEntry {
        id: "fr-001",
        name: "River Flow Sensor",
        kind: SensorKind::FlowRate,
        location: "Brahmaputra River",
        status: SensorStatus::Offline,
        unit: "L/min",
        min: 500.0,
        max: 2000.0,
        history: [1180.0, 1220.0, 1250.0, 1300.0, 1250.0, 1200.0, 1250.0],
        stale_hours: 2,
    },
];

/// The seven reference sensors, with history ending at `now`.
#[must_use]
pub fn default_fleet(now: DateTime<Utc>) -> Vec<SensorRecord> {
    FLEET.iter().map(|entry| build(entry, now)).collect()
}

fn build(entry: &FleetEntry, now: DateTime<Utc>) -> SensorRecord {
    let last = now - Duration::hours(entry.stale_hours);
    let oldest = last - Duration::hours(4 * 6);
    let readings: VecDeque<SensorReading> = (0_i64..)
        .zip(entry.history)
        .map(|(i, value)| SensorReading {
            timestamp: oldest + Duration::hours(4 * i),
            value,
        })
        .collect();

    SensorRecord {
        id: entry.id.to_string(),
        name: entry.name.to_string(),
        kind: entry.kind,
        location: entry.location.to_string(),
        status: entry.status,
        value: entry.history[entry.history.len() - 1],
        unit: entry.unit.to_string(),
        threshold: Threshold {
            min: entry.min,
            max: entry.max,
        },
        last_reading_at: last,
        readings,
    }
}
