//! End-to-end flows through `HealthService` with in-memory notification
//! capture and a fixed synthesis trigger.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pretty_assertions::assert_eq;

use hg_core::entities::{HouseholdObservation, NewAlert, SensorRecord, Threshold};
use hg_core::enums::{
    AlertSource, AlertStatus, Channel, DataSource, EntityKind, JournalOp, SanitationAccess,
    SensorKind, SensorStatus, Severity, Symptom, WaterSource,
};
use hg_core::responses::SymptomCount;
use hg_engine::journal::JournalWriter;
use hg_engine::notify::{DeliveryKind, MemorySink};
use hg_engine::state::EngineState;
use hg_engine::trigger::FixedTrigger;
use hg_engine::{EngineError, EngineOptions, HealthService};

const DRAIN: Duration = Duration::from_secs(5);

fn options(sink: Arc<MemorySink>, fires: bool) -> EngineOptions {
    EngineOptions {
        sink,
        trigger: Arc::new(FixedTrigger(fires)),
        ..EngineOptions::default()
    }
}

fn borbari_coliform() -> SensorRecord {
    SensorRecord {
        id: "wq-104".into(),
        name: "Borbari Coliform".into(),
        kind: SensorKind::WaterQuality,
        location: "Borbari Village, Jorhat".into(),
        status: SensorStatus::Online,
        value: 40.0,
        unit: "CFU/100mL".into(),
        threshold: Threshold { min: 0.0, max: 100.0 },
        last_reading_at: Utc::now(),
        readings: VecDeque::new(),
    }
}

fn household(symptoms: &[Symptom], water: WaterSource, sanitation: SanitationAccess) -> HouseholdObservation {
    HouseholdObservation {
        household_id: "HH-042".into(),
        location: "Majuli District".into(),
        asha_worker: "Mousumi Gogoi".into(),
        symptoms: symptoms.iter().copied().collect(),
        water_source: water,
        sanitation_access: sanitation,
        notes: "Reported at weekly visit".into(),
    }
}

#[tokio::test]
async fn coliform_spike_with_synthesis() {
    let sink = Arc::new(MemorySink::new());
    let service = HealthService::new(options(Arc::clone(&sink), true));
    service.register_sensor(borbari_coliform()).await.unwrap();

    let sensor = service.submit_sensor_reading("wq-104", 200.0, None).await.unwrap();
    assert_eq!(sensor.status, SensorStatus::Warning);

    let alerts = service.list_alerts(None).await;
    assert_eq!(alerts.len(), 2);
    let range = &alerts[0];
    assert!(range.title.contains("Borbari Coliform Alert"));
    assert!(range.message.contains("200"));
    assert!(range.message.contains("CFU/100mL"));
    assert_eq!(range.severity, Severity::High);
    assert_eq!(range.source, AlertSource::Iot);

    let records = service.list_records().await;
    assert_eq!(records.len(), 1);
    let case = &records[0];
    assert_eq!(
        case.symptoms,
        BTreeSet::from([Symptom::Diarrhea, Symptom::Nausea, Symptom::AbdominalPain])
    );
    assert_eq!(case.data_source, DataSource::Iot);
    assert_eq!(case.water_source, WaterSource::MonitoredSource);
    assert_eq!(case.risk_score, Some(50));
    assert_eq!(case.asha_worker, "IoT System");

    let synthesis = &alerts[1];
    assert_eq!(synthesis.source, AlertSource::Iot);
    assert_eq!(synthesis.title, "IoT Health Alert - Case 1");
    assert_eq!(
        synthesis.message,
        "Poor water quality detected in Borbari Village, Jorhat. Automated case generated."
    );

    let report = service.drain_notifications(DRAIN).await;
    assert_eq!(report.abandoned, 0);
    let deliveries = sink.deliveries();
    assert_eq!(deliveries.len(), 2);
    assert!(deliveries.iter().all(|d| d.kind == DeliveryKind::Sms));
}

#[tokio::test]
async fn coliform_spike_without_synthesis() {
    let sink = Arc::new(MemorySink::new());
    let service = HealthService::new(options(sink, false));
    service.register_sensor(borbari_coliform()).await.unwrap();

    service.submit_sensor_reading("wq-104", 200.0, None).await.unwrap();

    assert_eq!(service.list_alerts(None).await.len(), 1);
    assert!(service.list_records().await.is_empty());
}

#[tokio::test]
async fn synthesized_case_numbers_follow_manual_records() {
    let service = HealthService::new(options(Arc::new(MemorySink::new()), true));
    service.register_sensor(borbari_coliform()).await.unwrap();
    service
        .submit_household(household(&[Symptom::Fever], WaterSource::Piped, SanitationAccess::PrivateToilet))
        .await
        .unwrap();

    service.submit_sensor_reading("wq-104", 150.0, None).await.unwrap();

    let records = service.list_records().await;
    assert_eq!(records.len(), 2);
    assert!(records[1].notes.starts_with("Case 2: IoT-detected case"));
    let titles: Vec<_> = service.list_alerts(None).await.into_iter().map(|a| a.title).collect();
    assert_eq!(titles.last().map(String::as_str), Some("IoT Health Alert - Case 2"));
}

#[tokio::test]
async fn high_risk_household_notifies_sms_and_whatsapp() {
    let sink = Arc::new(MemorySink::new());
    let service = HealthService::new(options(Arc::clone(&sink), false));

    let record = service
        .submit_household(household(
            &[Symptom::Diarrhea, Symptom::Vomiting, Symptom::Dehydration],
            WaterSource::Pond,
            SanitationAccess::OpenDefecation,
        ))
        .await
        .unwrap();
    assert_eq!(record.risk_score, Some(100));

    let alerts = service.list_alerts(Some(AlertStatus::Active)).await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Critical);

    service.drain_notifications(DRAIN).await;
    let kinds: BTreeSet<_> = sink.deliveries().into_iter().map(|d| d.kind).collect();
    assert_eq!(kinds, BTreeSet::from([DeliveryKind::Sms, DeliveryKind::WhatsApp]));
    let text = &sink.deliveries()[0].text;
    assert!(text.contains("High Risk Health Alert - Case 1"));
    assert!(text.contains("Severity: CRITICAL"));
    assert!(text.ends_with("- HealthGuard System"));
}

#[tokio::test]
async fn analytics_rank_tied_symptoms_by_vocabulary() {
    let service = HealthService::new(options(Arc::new(MemorySink::new()), false));
    for symptoms in [
        vec![Symptom::Fever],
        vec![Symptom::Fever, Symptom::Diarrhea],
        vec![Symptom::Diarrhea],
    ] {
        service
            .submit_household(household(&symptoms, WaterSource::Well, SanitationAccess::SharedToilet))
            .await
            .unwrap();
    }

    let analytics = service.get_analytics().await;

    assert_eq!(analytics.total_records, 3);
    assert_eq!(
        analytics.common_symptoms,
        vec![
            SymptomCount { name: Symptom::Diarrhea, count: 2 },
            SymptomCount { name: Symptom::Fever, count: 2 },
        ]
    );
}

#[tokio::test]
async fn resolving_twice_never_reactivates() {
    let service = HealthService::new(options(Arc::new(MemorySink::new()), false));
    let alert = service
        .create_alert(NewAlert {
            title: "Boil water advisory".into(),
            message: "Boil drinking water until further notice.".into(),
            severity: Severity::Medium,
            location: "Jorhat Town".into(),
            channels: BTreeSet::from([Channel::Dashboard]),
            source: AlertSource::Manual,
        })
        .await
        .unwrap();

    service.resolve_alert(&alert.id).await.unwrap();
    assert!(service.resolve_alert(&alert.id).await.is_err());

    assert!(service.list_alerts(Some(AlertStatus::Active)).await.is_empty());
    assert_eq!(service.list_alerts(Some(AlertStatus::Resolved)).await.len(), 1);
}

#[tokio::test]
async fn snapshot_roundtrips_through_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let service = HealthService::new(options(Arc::new(MemorySink::new()), true));
    service.register_sensor(borbari_coliform()).await.unwrap();
    service.submit_sensor_reading("wq-104", 250.0, None).await.unwrap();
    service
        .submit_household(household(&[Symptom::Fever], WaterSource::River, SanitationAccess::CommunityToilet))
        .await
        .unwrap();

    let before = service.snapshot().await;
    before.save(&path).unwrap();
    let resumed = HealthService::from_snapshot(
        EngineState::load(&path).unwrap(),
        options(Arc::new(MemorySink::new()), false),
    );

    assert_eq!(resumed.snapshot().await, before);

    // Case numbering continues from the restored records.
    let next = resumed
        .submit_household(household(
            &[Symptom::Diarrhea, Symptom::Vomiting],
            WaterSource::Pond,
            SanitationAccess::OpenDefecation,
        ))
        .await
        .unwrap();
    assert_eq!(next.risk_score, Some(95));
    let last_alert = resumed.list_alerts(None).await.pop().unwrap();
    assert_eq!(last_alert.title, "High Risk Health Alert - Case 3");
}

#[tokio::test]
async fn stuck_sensor_state_always_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let service = HealthService::new(options(Arc::new(MemorySink::new()), true));
    service.register_sensor(borbari_coliform()).await.unwrap();

    for _ in 0..250 {
        service.submit_sensor_reading("wq-104", 300.0, None).await.unwrap();
    }
    assert_eq!(service.drain_notifications(DRAIN).await.abandoned, 0);

    let before = service.snapshot().await;
    let alert_ids: HashSet<_> = before.alerts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(before.alerts.len(), 500);
    assert_eq!(alert_ids.len(), before.alerts.len());
    let record_ids: HashSet<_> = before.health_records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(record_ids.len(), 250);

    before.save(&path).unwrap();
    assert_eq!(EngineState::load(&path).unwrap(), before);
}

#[tokio::test]
async fn reading_survives_failed_alert_journal() {
    let dir = tempfile::tempdir().unwrap();
    let journal = JournalWriter::new(dir.path().join("journal")).unwrap();
    // A directory squatting on today's journal file makes every append for
    // today fail, while yesterday's file stays writable.
    std::fs::create_dir_all(journal.path_for(Utc::now().date_naive())).unwrap();
    let state = EngineState {
        sensors: vec![borbari_coliform()],
        ..EngineState::default()
    };
    let service = HealthService::from_snapshot(
        state,
        EngineOptions {
            journal,
            ..options(Arc::new(MemorySink::new()), false)
        },
    );
    let yesterday = Utc::now() - chrono::Duration::days(1);

    let sensor = service
        .submit_sensor_reading("wq-104", 200.0, Some(yesterday))
        .await
        .expect("reading committed despite the alert failing");

    assert_eq!(sensor.status, SensorStatus::Warning);
    assert_eq!(service.list_sensors().await[0], sensor);
    assert!(service.list_alerts(None).await.is_empty());
}

#[tokio::test]
async fn every_mutation_is_journaled() {
    let dir = tempfile::tempdir().unwrap();
    let journal = JournalWriter::new(dir.path().join("journal")).unwrap();
    let service = HealthService::new(EngineOptions {
        journal,
        ..options(Arc::new(MemorySink::new()), false)
    });

    service.register_sensor(borbari_coliform()).await.unwrap();
    service.submit_sensor_reading("wq-104", 20.0, None).await.unwrap();
    let alert = service
        .create_alert(NewAlert {
            title: "Drill".into(),
            message: "Test message".into(),
            severity: Severity::Low,
            location: "Jorhat".into(),
            channels: BTreeSet::new(),
            source: AlertSource::Manual,
        })
        .await
        .unwrap();
    service.resolve_alert(&alert.id).await.unwrap();
    service
        .submit_household(household(&[], WaterSource::Piped, SanitationAccess::PrivateToilet))
        .await
        .unwrap();

    let reader = JournalWriter::new(dir.path().join("journal")).unwrap();
    let entries = reader.read_day(Utc::now().date_naive()).unwrap();
    let ops: Vec<_> = entries.iter().map(|e| (e.op, e.entity)).collect();
    assert_eq!(
        ops,
        vec![
            (JournalOp::Create, EntityKind::Sensor),
            (JournalOp::Reading, EntityKind::Sensor),
            (JournalOp::Create, EntityKind::Alert),
            (JournalOp::Resolve, EntityKind::Alert),
            (JournalOp::Create, EntityKind::HealthRecord),
        ]
    );
    assert_eq!(entries[1].data["value"], 20.0);
    assert_eq!(entries[3].id, alert.id);
}

#[tokio::test]
async fn journal_failure_leaves_registries_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let journal_dir = dir.path().join("journal");
    let journal = JournalWriter::new(journal_dir.clone()).unwrap();
    let sink = Arc::new(MemorySink::new());
    let service = HealthService::from_snapshot(
        EngineState {
            sensors: vec![borbari_coliform()],
            ..EngineState::default()
        },
        EngineOptions {
            journal,
            ..options(Arc::clone(&sink), true)
        },
    );
    std::fs::remove_dir_all(&journal_dir).unwrap();

    let err = service
        .submit_household(household(
            &[Symptom::Diarrhea, Symptom::Vomiting, Symptom::Dehydration],
            WaterSource::Pond,
            SanitationAccess::OpenDefecation,
        ))
        .await
        .expect_err("journal is gone");
    assert!(matches!(err, EngineError::Journal(_)));

    assert!(service.submit_sensor_reading("wq-104", 500.0, None).await.is_err());

    let after = service.snapshot().await;
    assert!(after.health_records.is_empty());
    assert!(after.alerts.is_empty());
    assert!((after.sensors[0].value - 40.0).abs() < f64::EPSILON);
    service.drain_notifications(DRAIN).await;
    assert!(sink.deliveries().is_empty());
}

#[tokio::test]
async fn concurrent_submissions_get_distinct_case_numbers() {
    let service = Arc::new(HealthService::new(options(Arc::new(MemorySink::new()), false)));
    let mut handles = Vec::new();
    for _ in 0..20 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .submit_household(household(
                    &[Symptom::Diarrhea, Symptom::Vomiting],
                    WaterSource::Pond,
                    SanitationAccess::CommunityToilet,
                ))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let records = service.list_records().await;
    assert_eq!(records.len(), 20);
    let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), 20);

    // 25 + 25 + 20 + 15 = 85 -> one critical alert per record.
    let titles: HashSet<_> = service
        .list_alerts(None)
        .await
        .into_iter()
        .map(|a| a.title)
        .collect();
    let expected: HashSet<_> = (1..=20)
        .map(|n| format!("High Risk Health Alert - Case {n}"))
        .collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let service = HealthService::new(options(Arc::new(MemorySink::new()), false));
    assert!(service.resolve_alert("al-00000000").await.unwrap_err().is_not_found());
    assert!(
        service
            .submit_sensor_reading("nope", 1.0, None)
            .await
            .unwrap_err()
            .is_not_found()
    );
}
