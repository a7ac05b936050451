//! Air handling unit serving all floors

use super::{Binding, EquipmentProfile, PointSpec};
use crate::config::Equipment;
use crate::physics::{BuildingState, StateField};
use crate::points::{BinaryPv, ObjectType, PointValue, Units};

pub struct AirHandlerProfile {
    specs: Vec<PointSpec>,
}

impl AirHandlerProfile {
    pub fn new() -> Self {
        use ObjectType::*;

        let specs = vec![
            PointSpec::new(
                AnalogInput,
                1,
                "AHU-1-Supply-Air-Temp",
                Units::DegreesFahrenheit,
                Binding::Sensor(StateField::SupplyAirTemp),
            )
            .with_description("AHU Supply Air Temperature"),
            PointSpec::new(
                AnalogInput,
                2,
                "AHU-1-Return-Air-Temp",
                Units::DegreesFahrenheit,
                Binding::Sensor(StateField::ReturnAirTemp),
            )
            .with_description("AHU Return Air Temperature"),
            PointSpec::new(
                AnalogInput,
                3,
                "AHU-1-Mixed-Air-Temp",
                Units::DegreesFahrenheit,
                Binding::Sensor(StateField::MixedAirTemp),
            )
            .with_description("AHU Mixed Air Temperature"),
            PointSpec::new(
                AnalogInput,
                4,
                "AHU-1-Supply-Air-Flow",
                Units::CubicFeetPerMinute,
                Binding::Sensor(StateField::SupplyAirFlow),
            )
            .with_description("AHU Supply Air Flow"),
            PointSpec::new(
                AnalogValue,
                1,
                "AHU-1-Supply-Air-Temp-SP",
                Units::DegreesFahrenheit,
                Binding::Command(StateField::SupplyAirSetpoint),
            )
            .with_description("AHU Supply Air Temperature Setpoint"),
            // Outputs are driven by the physics; external writes are transient
            PointSpec::new(
                AnalogOutput,
                1,
                "AHU-1-Fan-Speed-Cmd",
                Units::Percent,
                Binding::Sensor(StateField::FanSpeed),
            )
            .with_description("AHU Fan Speed Command"),
            PointSpec::new(
                AnalogOutput,
                2,
                "AHU-1-Cooling-Valve",
                Units::Percent,
                Binding::Sensor(StateField::CoolingValve),
            )
            .with_description("AHU Cooling Valve Position"),
            PointSpec::new(
                BinaryInput,
                1,
                "AHU-1-Fan-Status",
                Units::NoUnits,
                Binding::Held(PointValue::Binary(BinaryPv::Active)),
            )
            .with_description("AHU Fan Running Status"),
            PointSpec::new(
                BinaryOutput,
                1,
                "AHU-1-Enable",
                Units::NoUnits,
                Binding::Held(PointValue::Binary(BinaryPv::Active)),
            )
            .with_description("AHU Enable Command"),
        ];

        Self { specs }
    }
}

impl Default for AirHandlerProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl EquipmentProfile for AirHandlerProfile {
    fn equipment(&self) -> Equipment {
        Equipment::AirHandler
    }

    fn point_specs(&self) -> &[PointSpec] {
        &self.specs
    }

    fn status(&self, state: &BuildingState) -> String {
        format!(
            "AHU: Supply={:.1}°F, Return={:.1}°F, Fan={:.0}%, Cooling={:.0}%",
            state.supply_air_temp, state.return_air_temp, state.fan_speed, state.cooling_valve
        )
    }
}
