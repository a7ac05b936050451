//! VAV terminal unit for one zone

use super::{Binding, EquipmentProfile, PointSpec};
use crate::config::Equipment;
use crate::physics::{BuildingState, StateField, ZONE_COUNT};
use crate::points::{ObjectType, Units};
use crate::types::{Error, Result};

/// Points for zone `index`, numbered in the band `index * 10 + n`
pub struct ZoneProfile {
    index: usize,
    specs: Vec<PointSpec>,
}

impl ZoneProfile {
    pub fn new(index: usize) -> Result<Self> {
        if index >= ZONE_COUNT {
            return Err(Error::UnknownEquipment(format!("vav{}", index)));
        }

        let floor = Self::floor_of(index);
        let side = Self::orientation_of(index);
        let base = (index * 10) as u32;
        let tag = format!("Floor{}-{}", floor, side);
        let label = format!("Floor {} {}", floor, side);

        use ObjectType::*;
        let specs = vec![
            PointSpec::new(
                AnalogInput,
                base + 1,
                format!("{}-Zone-Temp", tag),
                Units::DegreesFahrenheit,
                Binding::Sensor(StateField::ZoneTemp(index)),
            )
            .with_description(format!("{} Zone Temperature", label)),
            PointSpec::new(
                AnalogValue,
                base + 1,
                format!("{}-Zone-Temp-SP", tag),
                Units::DegreesFahrenheit,
                Binding::Command(StateField::ZoneSetpoint(index)),
            )
            .with_description(format!("{} Zone Temperature Setpoint", label)),
            PointSpec::new(
                AnalogOutput,
                base + 1,
                format!("{}-Damper-Pos", tag),
                Units::Percent,
                Binding::Sensor(StateField::Damper(index)),
            )
            .with_description(format!("{} Damper Position", label)),
            PointSpec::new(
                AnalogInput,
                base + 2,
                format!("{}-Airflow", tag),
                Units::CubicFeetPerMinute,
                Binding::Sensor(StateField::ZoneAirflow(index)),
            )
            .with_description(format!("{} Airflow", label)),
            PointSpec::new(
                AnalogOutput,
                base + 2,
                format!("{}-Reheat-Valve", tag),
                Units::Percent,
                Binding::Sensor(StateField::ReheatValve(index)),
            )
            .with_description(format!("{} Reheat Valve", label)),
            PointSpec::new(
                BinaryInput,
                base + 1,
                format!("{}-Occupancy", tag),
                Units::NoUnits,
                Binding::Occupancy,
            )
            .with_description(format!("{} Occupancy Sensor", label)),
        ];

        Ok(Self { index, specs })
    }

    /// Two zones per floor, floors numbered from 1
    pub fn floor_of(index: usize) -> usize {
        index / 2 + 1
    }

    /// Even zones face north, odd zones south
    pub fn orientation_of(index: usize) -> &'static str {
        if index % 2 == 0 { "North" } else { "South" }
    }
}

impl EquipmentProfile for ZoneProfile {
    fn equipment(&self) -> Equipment {
        Equipment::Zone(self.index)
    }

    fn point_specs(&self) -> &[PointSpec] {
        &self.specs
    }

    fn status(&self, state: &BuildingState) -> String {
        let zone = &state.zones[self.index];
        format!(
            "VAV{}: Zone={:.1}°F, SP={:.1}°F, Damper={:.0}%, Flow={:.0}CFM",
            self.index, zone.temp, zone.setpoint, zone.damper, zone.airflow
        )
    }
}
