//! Chiller plant

use super::{Binding, EquipmentProfile, PointSpec};
use crate::config::Equipment;
use crate::physics::{BuildingState, StateField};
use crate::points::{BinaryPv, ObjectType, PointValue, Units};

pub struct ChillerProfile {
    specs: Vec<PointSpec>,
}

impl ChillerProfile {
    pub fn new() -> Self {
        let specs = vec![
            PointSpec::new(
                ObjectType::AnalogInput,
                100,
                "Chiller-1-CHW-Supply-Temp",
                Units::DegreesFahrenheit,
                Binding::Sensor(StateField::ChwSupplyTemp),
            )
            .with_description("Chiller Chilled Water Supply Temperature"),
            PointSpec::new(
                ObjectType::AnalogInput,
                101,
                "Chiller-1-CHW-Return-Temp",
                Units::DegreesFahrenheit,
                Binding::Sensor(StateField::ChwReturnTemp),
            )
            .with_description("Chiller Chilled Water Return Temperature"),
            PointSpec::new(
                ObjectType::BinaryInput,
                100,
                "Chiller-1-Status",
                Units::NoUnits,
                Binding::Held(PointValue::Binary(BinaryPv::Active)),
            )
            .with_description("Chiller Running Status"),
            PointSpec::new(
                ObjectType::BinaryOutput,
                100,
                "Chiller-1-Enable",
                Units::NoUnits,
                Binding::Held(PointValue::Binary(BinaryPv::Active)),
            )
            .with_description("Chiller Enable Command"),
        ];

        Self { specs }
    }
}

impl Default for ChillerProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl EquipmentProfile for ChillerProfile {
    fn equipment(&self) -> Equipment {
        Equipment::Chiller
    }

    fn point_specs(&self) -> &[PointSpec] {
        &self.specs
    }

    fn status(&self, state: &BuildingState) -> String {
        format!(
            "Chiller: Supply={:.1}°F, Return={:.1}°F",
            state.chw_supply_temp, state.chw_return_temp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Noise;
    use crate::points::PointId;

    #[test]
    fn test_points_follow_plant_temps() {
        let profile = ChillerProfile::new();
        let mut state = BuildingState::new();
        let mut points = profile.create_points(&state);
        assert_eq!(points.len(), 4);
        assert_eq!(points.points()[0].present_value, PointValue::Real(44.0));

        state.chw_supply_temp = 42.3;
        state.chw_return_temp = 51.9;
        profile.sync(&mut state, &mut points, &mut Noise::disabled()).unwrap();

        assert_eq!(
            points.get(PointId::new(ObjectType::AnalogInput, 100)).unwrap().present_value,
            PointValue::Real(42.3)
        );
        assert_eq!(
            points.get(PointId::new(ObjectType::AnalogInput, 101)).unwrap().present_value,
            PointValue::Real(51.9)
        );
        assert_eq!(
            points.get(PointId::new(ObjectType::BinaryInput, 100)).unwrap().present_value,
            PointValue::Binary(BinaryPv::Active)
        );
    }

    #[test]
    fn test_status_line() {
        let state = BuildingState::new();
        assert_eq!(
            ChillerProfile::new().status(&state),
            "Chiller: Supply=44.0°F, Return=54.0°F"
        );
    }
}
