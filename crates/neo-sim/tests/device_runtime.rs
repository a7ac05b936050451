use std::sync::Arc;

use chrono::NaiveDate;

use neo_sim::physics::{FixedClock, Noise};
use neo_sim::points::{BinaryPv, ObjectType, PointId, PointValue};
use neo_sim::runtime::{DeviceRuntime, MemorySink, RuntimeHandle};
use neo_sim::{Error, RuntimeState, SimConfig};

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 3, 12)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap(),
    ))
}

fn start(selector: &str, noise: Noise) -> (RuntimeHandle, tokio::task::JoinHandle<()>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let runtime = DeviceRuntime::new(&SimConfig::for_equipment(selector), sink.clone())
        .unwrap()
        .with_noise(noise)
        .with_clock(clock())
        .manual_ticks();
    let (handle, join) = runtime.spawn();
    (handle, join, sink)
}

#[tokio::test]
async fn test_zone_setpoint_round_trip_through_handle() {
    let (handle, join, _sink) = start("vav3", Noise::disabled());
    let sp = PointId::new(ObjectType::AnalogValue, 31);

    handle.write(sp, PointValue::Real(69.5)).await.unwrap();
    // Not applied until the next sync
    assert_eq!(handle.building().await.unwrap().zones[3].setpoint, 72.0);

    handle.tick().await.unwrap();
    let building = handle.building().await.unwrap();
    assert_eq!(building.zones[3].setpoint, 69.5);

    let points = handle.points().await.unwrap();
    let sp_point = points.iter().find(|p| p.id == sp).unwrap();
    assert_eq!(sp_point.present_value, PointValue::Real(69.5));

    handle.shutdown().await.unwrap();
    join.await.unwrap();
}

#[tokio::test]
async fn test_sensor_writes_are_rejected() {
    let (handle, join, _sink) = start("ahu", Noise::disabled());

    let result = handle
        .write(PointId::new(ObjectType::AnalogInput, 1), PointValue::Real(40.0))
        .await;
    assert!(matches!(result, Err(Error::NotWritable(_))));

    let result = handle
        .write(
            PointId::new(ObjectType::BinaryOutput, 1),
            PointValue::Real(1.0),
        )
        .await;
    assert!(matches!(result, Err(Error::ValueType { .. })));

    handle
        .write(
            PointId::new(ObjectType::BinaryOutput, 1),
            PointValue::Binary(BinaryPv::Inactive),
        )
        .await
        .unwrap();

    handle.shutdown().await.unwrap();
    join.await.unwrap();
}

#[tokio::test]
async fn test_energy_never_decreases() {
    let (handle, join, sink) = start("meter", Noise::seeded(2024));

    let mut last = 0.0;
    for _ in 0..200 {
        let report = handle.tick().await.unwrap();
        assert!(report.is_ok(), "{:?}", report.error);

        let points = handle.points().await.unwrap();
        let energy = points[1].present_value.as_real().unwrap();
        assert!(energy >= last);
        last = energy;
    }
    assert_eq!(sink.status_lines().len(), 200);

    handle.shutdown().await.unwrap();
    join.await.unwrap();
    assert_eq!(handle.state(), RuntimeState::Stopped);
}

#[tokio::test]
async fn test_air_handler_points_in_order() {
    let (handle, join, _sink) = start("ahu", Noise::disabled());

    let ids: Vec<String> = handle
        .points()
        .await
        .unwrap()
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(
        ids,
        vec!["AI:1", "AI:2", "AI:3", "AI:4", "AV:1", "AO:1", "AO:2", "BI:1", "BO:1"]
    );

    handle.shutdown().await.unwrap();
    join.await.unwrap();
}

#[test]
fn test_unknown_selector_creates_nothing() {
    let sink = Arc::new(MemorySink::new());
    let result = DeviceRuntime::new(&SimConfig::for_equipment("furnace"), sink.clone());
    assert!(matches!(result, Err(Error::UnknownEquipment(_))));
    assert!(sink.records().is_empty());
}
