//! Main electrical meter

use super::{Binding, EquipmentProfile, PointSpec};
use crate::config::Equipment;
use crate::physics::{BuildingState, StateField};
use crate::points::{ObjectType, Units};

pub struct MeterProfile {
    specs: Vec<PointSpec>,
}

impl MeterProfile {
    pub fn new() -> Self {
        let specs = vec![
            PointSpec::new(
                ObjectType::AnalogInput,
                200,
                "Main-Meter-Total-Power",
                Units::Kilowatts,
                Binding::Sensor(StateField::TotalPower),
            )
            .with_description("Building Total Power Demand"),
            PointSpec::new(
                ObjectType::AnalogInput,
                201,
                "Main-Meter-Total-Energy",
                Units::KilowattHours,
                Binding::Sensor(StateField::TotalEnergy),
            )
            .with_description("Building Total Energy Consumption"),
            PointSpec::new(
                ObjectType::AnalogInput,
                202,
                "Main-Meter-Voltage",
                Units::Volts,
                Binding::Voltage,
            )
            .with_description("Main Electrical Voltage"),
        ];

        Self { specs }
    }
}

impl Default for MeterProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl EquipmentProfile for MeterProfile {
    fn equipment(&self) -> Equipment {
        Equipment::Meter
    }

    fn point_specs(&self) -> &[PointSpec] {
        &self.specs
    }

    fn status(&self, state: &BuildingState) -> String {
        format!(
            "Meter: Power={:.1}kW, Energy={:.1}kWh",
            state.total_power, state.total_energy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Noise;
    use crate::points::PointValue;

    #[test]
    fn test_voltage_is_nominal_at_create() {
        let points = MeterProfile::new().create_points(&BuildingState::new());
        assert_eq!(points.points()[2].present_value, PointValue::Real(480.0));
    }

    #[test]
    fn test_voltage_resampled_within_band() {
        let profile = MeterProfile::new();
        let mut state = BuildingState::new();
        let mut points = profile.create_points(&state);
        let mut noise = Noise::seeded(3);

        for _ in 0..200 {
            profile.sync(&mut state, &mut points, &mut noise).unwrap();
            let volts = points.points()[2].present_value.as_real().unwrap();
            assert!((475.0..=485.0).contains(&volts));
        }
    }

    #[test]
    fn test_power_and_energy_follow_state() {
        let profile = MeterProfile::new();
        let mut state = BuildingState::new();
        let mut points = profile.create_points(&state);

        state.total_power = 87.5;
        state.total_energy = 1234.0;
        profile.sync(&mut state, &mut points, &mut Noise::disabled()).unwrap();

        assert_eq!(points.points()[0].present_value, PointValue::Real(87.5));
        assert_eq!(points.points()[1].present_value, PointValue::Real(1234.0));
        assert_eq!(
            profile.status(&state),
            "Meter: Power=87.5kW, Energy=1234.0kWh"
        );
    }
}
