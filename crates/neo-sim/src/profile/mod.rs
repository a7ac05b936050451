//! Equipment Profiles
//!
//! Each simulated device exposes a fixed, ordered list of points bound to
//! fields of [`BuildingState`]. A profile describes that list once; creating
//! the points and synchronizing them each tick is shared by all profiles.
//!
//! # Sync direction
//!
//! Sync runs in point order. Sensor bindings copy state into the point.
//! Command bindings copy the point's value (possibly written externally since
//! the last tick) back into state. Outputs recomputed by the physics every
//! tick, such as fan speed or damper position, use sensor bindings even
//! though remote actors may write them, so such writes only last until the
//! next sync.

mod air_handler;
mod chiller;
mod meter;
mod zone;

pub use air_handler::AirHandlerProfile;
pub use chiller::ChillerProfile;
pub use meter::MeterProfile;
pub use zone::ZoneProfile;

use crate::config::Equipment;
use crate::physics::{BuildingState, Noise, StateField};
use crate::points::{BinaryPv, ObjectType, Point, PointId, PointTable, PointValue, Units};
use crate::types::{Error, Result};

/// Where a point's value comes from and goes to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    /// State field copied into the point
    Sensor(StateField),
    /// Point value copied into the state field
    Command(StateField),
    /// Building occupancy as a binary point
    Occupancy,
    /// 480 V service, resampled every sync and never stored in state
    Voltage,
    /// Value lives only in the point
    Held(PointValue),
}

/// Nominal service voltage
pub const NOMINAL_VOLTAGE: f64 = 480.0;

/// Static description of one point of a profile
#[derive(Debug, Clone, PartialEq)]
pub struct PointSpec {
    pub id: PointId,
    pub name: String,
    pub description: String,
    pub units: Units,
    pub binding: Binding,
}

impl PointSpec {
    pub fn new(
        object_type: ObjectType,
        instance: u32,
        name: impl Into<String>,
        units: Units,
        binding: Binding,
    ) -> Self {
        Self {
            id: PointId::new(object_type, instance),
            name: name.into(),
            description: String::new(),
            units,
            binding,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    fn initial_value(&self, state: &BuildingState) -> PointValue {
        match self.binding {
            Binding::Sensor(field) | Binding::Command(field) => PointValue::Real(state.read(field)),
            Binding::Occupancy => PointValue::Binary(BinaryPv::from(state.occupied)),
            Binding::Voltage => PointValue::Real(NOMINAL_VOLTAGE),
            Binding::Held(value) => value,
        }
    }
}

/// One kind of simulated equipment
pub trait EquipmentProfile: Send + 'static {
    /// Equipment this profile simulates
    fn equipment(&self) -> Equipment;

    /// Point descriptions, in exposure order
    fn point_specs(&self) -> &[PointSpec];

    /// One-line summary of the equipment's principal live values
    fn status(&self, state: &BuildingState) -> String;

    /// Build the point list with initial values taken from `state`
    fn create_points(&self, state: &BuildingState) -> PointTable {
        PointTable::new(
            self.point_specs()
                .iter()
                .map(|spec| Point {
                    id: spec.id,
                    name: spec.name.clone(),
                    description: spec.description.clone(),
                    units: spec.units,
                    present_value: spec.initial_value(state),
                })
                .collect(),
        )
    }

    /// Exchange values between state and points, in point order.
    ///
    /// Stops at the first malformed point; bindings already processed stay
    /// applied.
    fn sync(&self, state: &mut BuildingState, points: &mut PointTable, noise: &mut Noise) -> Result<()> {
        let specs = self.point_specs();
        let points = points.points_mut();
        if specs.len() != points.len() {
            return Err(Error::PointLayout {
                expected: specs.len(),
                found: points.len(),
            });
        }

        for (spec, point) in specs.iter().zip(points.iter_mut()) {
            if spec.id != point.id {
                return Err(Error::PointNotFound(spec.id));
            }
            match spec.binding {
                Binding::Sensor(field) => {
                    point.present_value = PointValue::Real(state.read(field));
                }
                Binding::Command(field) => {
                    let value = point.present_value.as_real().ok_or(Error::ValueType {
                        id: spec.id,
                        expected: "real",
                    })?;
                    state.write(field, value);
                }
                Binding::Occupancy => {
                    point.present_value = PointValue::Binary(BinaryPv::from(state.occupied));
                }
                Binding::Voltage => {
                    point.present_value = PointValue::Real(NOMINAL_VOLTAGE + noise.jitter(5.0));
                }
                Binding::Held(_) => {}
            }
        }
        Ok(())
    }
}

/// Select the profile for an equipment selector
pub fn for_equipment(equipment: Equipment) -> Result<Box<dyn EquipmentProfile>> {
    Ok(match equipment {
        Equipment::AirHandler => Box::new(AirHandlerProfile::new()),
        Equipment::Zone(index) => Box::new(ZoneProfile::new(index)?),
        Equipment::Chiller => Box::new(ChillerProfile::new()),
        Equipment::Meter => Box::new(MeterProfile::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_profiles() -> Vec<Box<dyn EquipmentProfile>> {
        Equipment::all()
            .into_iter()
            .map(|e| for_equipment(e).unwrap())
            .collect()
    }

    #[test]
    fn test_point_ids_never_collide_across_profiles() {
        let mut seen = HashSet::new();
        for profile in all_profiles() {
            for spec in profile.point_specs() {
                assert!(seen.insert(spec.id), "duplicate point id {}", spec.id);
            }
        }
    }

    #[test]
    fn test_binary_points_hold_binary_values() {
        let state = BuildingState::new();
        for profile in all_profiles() {
            for point in profile.create_points(&state).points() {
                assert_eq!(
                    point.id.object_type.is_binary(),
                    point.present_value.as_binary().is_some(),
                    "{} has wrong value kind",
                    point.name
                );
            }
        }
    }

    #[test]
    fn test_sync_rejects_foreign_layout() {
        let state = BuildingState::new();
        let chiller = ChillerProfile::new();
        let meter = MeterProfile::new();
        let mut points = meter.create_points(&state);

        let mut state = state;
        let result = chiller.sync(&mut state, &mut points, &mut Noise::disabled());
        assert!(matches!(
            result,
            Err(Error::PointLayout { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn test_unknown_zone_index_rejected() {
        assert!(matches!(
            for_equipment(Equipment::Zone(6)),
            Err(Error::UnknownEquipment(_))
        ));
    }
}
