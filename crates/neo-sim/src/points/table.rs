//! Point table and the registration boundary of the exposure service

use tracing::{debug, info};

use super::{Point, PointId, PointValue};
use crate::types::{Error, Result};

/// Registration side of the point-exposure service.
///
/// The service owns protocol traffic; the device only announces its points
/// once at startup.
pub trait PointRegistrar: Send {
    fn register(&mut self, point: &Point) -> Result<()>;
}

/// Registrar that only records registrations in the log
#[derive(Debug, Default)]
pub struct LogRegistrar {
    registered: usize,
}

impl LogRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered(&self) -> usize {
        self.registered
    }
}

impl PointRegistrar for LogRegistrar {
    fn register(&mut self, point: &Point) -> Result<()> {
        self.registered += 1;
        info!(
            "Registered point {} '{}' = {}{}",
            point.id, point.name, point.present_value, point.units
        );
        Ok(())
    }
}

/// Ordered points of one device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointTable {
    points: Vec<Point>,
}

impl PointTable {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Apply an external write.
    ///
    /// The value becomes visible to the physics at the next sync.
    pub fn write(&mut self, id: PointId, value: PointValue) -> Result<()> {
        let point = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::PointNotFound(id))?;

        if !point.is_writable() {
            return Err(Error::NotWritable(id));
        }

        match (id.object_type.is_binary(), value) {
            (true, PointValue::Binary(_)) => {}
            (false, PointValue::Real(v)) if v.is_finite() => {}
            (false, PointValue::Real(_)) => return Err(Error::NonFinite(id.to_string())),
            (true, PointValue::Real(_)) => {
                return Err(Error::ValueType {
                    id,
                    expected: "binary",
                });
            }
            (false, PointValue::Binary(_)) => {
                return Err(Error::ValueType { id, expected: "real" });
            }
        }

        debug!("Point {} written: {} -> {}", id, point.present_value, value);
        point.present_value = value;
        Ok(())
    }

    /// Register every point, in order
    pub fn register_all(&self, registrar: &mut dyn PointRegistrar) -> Result<()> {
        for point in &self.points {
            registrar.register(point)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::{BinaryPv, ObjectType, Units};

    fn table() -> PointTable {
        PointTable::new(vec![
            Point {
                id: PointId::new(ObjectType::AnalogInput, 1),
                name: "Temp".to_string(),
                description: "Temperature".to_string(),
                units: Units::DegreesFahrenheit,
                present_value: PointValue::Real(72.0),
            },
            Point {
                id: PointId::new(ObjectType::AnalogValue, 1),
                name: "Temp-SP".to_string(),
                description: "Setpoint".to_string(),
                units: Units::DegreesFahrenheit,
                present_value: PointValue::Real(72.0),
            },
            Point {
                id: PointId::new(ObjectType::BinaryOutput, 1),
                name: "Enable".to_string(),
                description: "Enable".to_string(),
                units: Units::NoUnits,
                present_value: PointValue::Binary(BinaryPv::Active),
            },
        ])
    }

    #[test]
    fn test_write_commandable() {
        let mut table = table();
        let id = PointId::new(ObjectType::AnalogValue, 1);
        table.write(id, PointValue::Real(70.0)).unwrap();
        assert_eq!(table.get(id).unwrap().present_value, PointValue::Real(70.0));
    }

    #[test]
    fn test_write_rejects_sensor() {
        let mut table = table();
        let id = PointId::new(ObjectType::AnalogInput, 1);
        let result = table.write(id, PointValue::Real(70.0));
        assert!(matches!(result, Err(Error::NotWritable(_))));
        assert_eq!(table.get(id).unwrap().present_value, PointValue::Real(72.0));
    }

    #[test]
    fn test_write_rejects_unknown_and_mistyped() {
        let mut table = table();
        let missing = PointId::new(ObjectType::AnalogValue, 9);
        assert!(matches!(
            table.write(missing, PointValue::Real(1.0)),
            Err(Error::PointNotFound(_))
        ));

        let enable = PointId::new(ObjectType::BinaryOutput, 1);
        assert!(matches!(
            table.write(enable, PointValue::Real(1.0)),
            Err(Error::ValueType { expected: "binary", .. })
        ));

        let sp = PointId::new(ObjectType::AnalogValue, 1);
        assert!(matches!(
            table.write(sp, PointValue::Real(f64::NAN)),
            Err(Error::NonFinite(_))
        ));
    }

    #[test]
    fn test_register_all_in_order() {
        let table = table();
        let mut registrar = LogRegistrar::new();
        table.register_all(&mut registrar).unwrap();
        assert_eq!(registrar.registered(), 3);
        let enable = table.get(PointId::new(ObjectType::BinaryOutput, 1)).unwrap();
        assert_eq!(enable.name, "Enable");
    }
}
