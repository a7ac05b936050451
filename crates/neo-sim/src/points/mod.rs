//! Externally addressable points
//!
//! A point is the unit the exposure service serves to remote actors:
//! an object identifier, a name, engineering units and a present value.

mod table;

pub use table::{LogRegistrar, PointRegistrar, PointTable};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point object types
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectType {
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryOutput,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::AnalogInput => write!(f, "AI"),
            ObjectType::AnalogOutput => write!(f, "AO"),
            ObjectType::AnalogValue => write!(f, "AV"),
            ObjectType::BinaryInput => write!(f, "BI"),
            ObjectType::BinaryOutput => write!(f, "BO"),
        }
    }
}

impl ObjectType {
    /// Inputs are read-only to remote actors; values and outputs accept writes
    pub fn direction(&self) -> Direction {
        match self {
            ObjectType::AnalogInput | ObjectType::BinaryInput => Direction::Sensor,
            ObjectType::AnalogOutput | ObjectType::AnalogValue | ObjectType::BinaryOutput => {
                Direction::Command
            }
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, ObjectType::BinaryInput | ObjectType::BinaryOutput)
    }
}

/// Whether remote actors may write a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sensor,
    Command,
}

/// Point identifier: object type plus instance number
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointId {
    pub object_type: ObjectType,
    pub instance: u32,
}

impl PointId {
    pub const fn new(object_type: ObjectType, instance: u32) -> Self {
        Self {
            object_type,
            instance,
        }
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.instance)
    }
}

/// Binary present value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryPv {
    Inactive,
    Active,
}

impl From<bool> for BinaryPv {
    fn from(on: bool) -> Self {
        if on { BinaryPv::Active } else { BinaryPv::Inactive }
    }
}

impl fmt::Display for BinaryPv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryPv::Active => write!(f, "active"),
            BinaryPv::Inactive => write!(f, "inactive"),
        }
    }
}

/// Point value types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Real(f64),
    Binary(BinaryPv),
}

impl PointValue {
    pub fn as_real(&self) -> Option<f64> {
        match self {
            PointValue::Real(v) => Some(*v),
            PointValue::Binary(_) => None,
        }
    }

    pub fn as_binary(&self) -> Option<BinaryPv> {
        match self {
            PointValue::Binary(v) => Some(*v),
            PointValue::Real(_) => None,
        }
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointValue::Real(v) => write!(f, "{:.2}", v),
            PointValue::Binary(v) => write!(f, "{}", v),
        }
    }
}

/// Engineering units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Units {
    DegreesFahrenheit,
    CubicFeetPerMinute,
    Percent,
    Kilowatts,
    KilowattHours,
    Volts,
    NoUnits,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::DegreesFahrenheit => write!(f, "°F"),
            Units::CubicFeetPerMinute => write!(f, "CFM"),
            Units::Percent => write!(f, "%"),
            Units::Kilowatts => write!(f, "kW"),
            Units::KilowattHours => write!(f, "kWh"),
            Units::Volts => write!(f, "V"),
            Units::NoUnits => Ok(()),
        }
    }
}

/// One exposed point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub description: String,
    pub units: Units,
    pub present_value: PointValue,
}

impl Point {
    pub fn direction(&self) -> Direction {
        self.id.object_type.direction()
    }

    pub fn is_writable(&self) -> bool {
        self.direction() == Direction::Command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_id_display() {
        let id = PointId::new(ObjectType::AnalogValue, 21);
        assert_eq!(id.to_string(), "AV:21");
    }

    #[test]
    fn test_directions() {
        assert_eq!(ObjectType::AnalogInput.direction(), Direction::Sensor);
        assert_eq!(ObjectType::BinaryInput.direction(), Direction::Sensor);
        assert_eq!(ObjectType::AnalogValue.direction(), Direction::Command);
        assert_eq!(ObjectType::AnalogOutput.direction(), Direction::Command);
        assert_eq!(ObjectType::BinaryOutput.direction(), Direction::Command);
    }

    #[test]
    fn test_value_serialization() {
        let real = serde_json::to_value(PointValue::Real(72.5)).unwrap();
        assert_eq!(real, serde_json::json!(72.5));

        let binary = serde_json::to_value(PointValue::Binary(BinaryPv::Active)).unwrap();
        assert_eq!(binary, serde_json::json!("active"));

        let id = serde_json::to_value(PointId::new(ObjectType::BinaryOutput, 100)).unwrap();
        assert_eq!(
            id,
            serde_json::json!({ "object_type": "binary-output", "instance": 100 })
        );
    }

    #[test]
    fn test_binary_from_bool() {
        assert_eq!(BinaryPv::from(true), BinaryPv::Active);
        assert_eq!(BinaryPv::from(false), BinaryPv::Inactive);
    }
}
