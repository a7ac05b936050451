//! Building state: every continuous and boolean variable of one simulated
//! building at one instant.

use serde::{Deserialize, Serialize};

use crate::types::{Error, Result};

/// Number of terminal units served by the air handler
pub const ZONE_COUNT: usize = 6;

/// One VAV terminal unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneState {
    /// Zone temperature (°F)
    pub temp: f64,
    /// Zone temperature setpoint (°F, commandable)
    pub setpoint: f64,
    /// Damper position (%), held in [20, 100]
    pub damper: f64,
    /// Airflow (CFM)
    pub airflow: f64,
    /// Reheat valve (%), held in [0, 100]
    pub reheat_valve: f64,
}

impl Default for ZoneState {
    fn default() -> Self {
        Self {
            temp: 72.0,
            setpoint: 72.0,
            damper: 50.0,
            airflow: 2000.0,
            reheat_valve: 0.0,
        }
    }
}

/// Physics model for one building.
///
/// Mutated only by the control loops in tick order and by the command points
/// of the active equipment profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingState {
    // Environment
    pub outdoor_temp: f64,
    pub occupied: bool,

    // Central plant
    pub chw_supply_temp: f64,
    pub chw_return_temp: f64,
    pub hw_supply_temp: f64,
    pub hw_return_temp: f64,

    // Air handler
    pub supply_air_temp: f64,
    pub return_air_temp: f64,
    pub mixed_air_temp: f64,
    pub supply_air_flow: f64,
    pub fan_speed: f64,
    pub cooling_valve: f64,
    pub heating_valve: f64,
    pub supply_air_setpoint: f64,

    pub zones: [ZoneState; ZONE_COUNT],

    /// Instantaneous demand (kW)
    pub total_power: f64,
    /// Cumulative consumption (kWh), never decreases
    pub total_energy: f64,
}

impl Default for BuildingState {
    fn default() -> Self {
        Self {
            outdoor_temp: 85.0,
            occupied: true,
            chw_supply_temp: 44.0,
            chw_return_temp: 54.0,
            hw_supply_temp: 180.0,
            hw_return_temp: 160.0,
            supply_air_temp: 55.0,
            return_air_temp: 72.0,
            mixed_air_temp: 65.0,
            supply_air_flow: 12000.0,
            fan_speed: 75.0,
            cooling_valve: 50.0,
            heating_valve: 0.0,
            supply_air_setpoint: 55.0,
            zones: [ZoneState::default(); ZONE_COUNT],
            total_power: 0.0,
            total_energy: 0.0,
        }
    }
}

/// Address of a numeric field in [`BuildingState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateField {
    OutdoorTemp,
    ChwSupplyTemp,
    ChwReturnTemp,
    HwSupplyTemp,
    HwReturnTemp,
    SupplyAirTemp,
    ReturnAirTemp,
    MixedAirTemp,
    SupplyAirFlow,
    FanSpeed,
    CoolingValve,
    HeatingValve,
    SupplyAirSetpoint,
    ZoneTemp(usize),
    ZoneSetpoint(usize),
    Damper(usize),
    ZoneAirflow(usize),
    ReheatValve(usize),
    TotalPower,
    TotalEnergy,
}

impl std::fmt::Display for StateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateField::OutdoorTemp => write!(f, "outdoor_temp"),
            StateField::ChwSupplyTemp => write!(f, "chw_supply_temp"),
            StateField::ChwReturnTemp => write!(f, "chw_return_temp"),
            StateField::HwSupplyTemp => write!(f, "hw_supply_temp"),
            StateField::HwReturnTemp => write!(f, "hw_return_temp"),
            StateField::SupplyAirTemp => write!(f, "supply_air_temp"),
            StateField::ReturnAirTemp => write!(f, "return_air_temp"),
            StateField::MixedAirTemp => write!(f, "mixed_air_temp"),
            StateField::SupplyAirFlow => write!(f, "supply_air_flow"),
            StateField::FanSpeed => write!(f, "fan_speed"),
            StateField::CoolingValve => write!(f, "cooling_valve"),
            StateField::HeatingValve => write!(f, "heating_valve"),
            StateField::SupplyAirSetpoint => write!(f, "supply_air_setpoint"),
            StateField::ZoneTemp(i) => write!(f, "zones[{}].temp", i),
            StateField::ZoneSetpoint(i) => write!(f, "zones[{}].setpoint", i),
            StateField::Damper(i) => write!(f, "zones[{}].damper", i),
            StateField::ZoneAirflow(i) => write!(f, "zones[{}].airflow", i),
            StateField::ReheatValve(i) => write!(f, "zones[{}].reheat_valve", i),
            StateField::TotalPower => write!(f, "total_power"),
            StateField::TotalEnergy => write!(f, "total_energy"),
        }
    }
}

impl StateField {
    /// Every numeric field, zones included
    pub fn all() -> Vec<StateField> {
        let mut fields = vec![
            StateField::OutdoorTemp,
            StateField::ChwSupplyTemp,
            StateField::ChwReturnTemp,
            StateField::HwSupplyTemp,
            StateField::HwReturnTemp,
            StateField::SupplyAirTemp,
            StateField::ReturnAirTemp,
            StateField::MixedAirTemp,
            StateField::SupplyAirFlow,
            StateField::FanSpeed,
            StateField::CoolingValve,
            StateField::HeatingValve,
            StateField::SupplyAirSetpoint,
            StateField::TotalPower,
            StateField::TotalEnergy,
        ];
        for i in 0..ZONE_COUNT {
            fields.extend([
                StateField::ZoneTemp(i),
                StateField::ZoneSetpoint(i),
                StateField::Damper(i),
                StateField::ZoneAirflow(i),
                StateField::ReheatValve(i),
            ]);
        }
        fields
    }
}

impl BuildingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a numeric field. Zone indices must be below [`ZONE_COUNT`].
    pub fn read(&self, field: StateField) -> f64 {
        match field {
            StateField::OutdoorTemp => self.outdoor_temp,
            StateField::ChwSupplyTemp => self.chw_supply_temp,
            StateField::ChwReturnTemp => self.chw_return_temp,
            StateField::HwSupplyTemp => self.hw_supply_temp,
            StateField::HwReturnTemp => self.hw_return_temp,
            StateField::SupplyAirTemp => self.supply_air_temp,
            StateField::ReturnAirTemp => self.return_air_temp,
            StateField::MixedAirTemp => self.mixed_air_temp,
            StateField::SupplyAirFlow => self.supply_air_flow,
            StateField::FanSpeed => self.fan_speed,
            StateField::CoolingValve => self.cooling_valve,
            StateField::HeatingValve => self.heating_valve,
            StateField::SupplyAirSetpoint => self.supply_air_setpoint,
            StateField::ZoneTemp(i) => self.zones[i].temp,
            StateField::ZoneSetpoint(i) => self.zones[i].setpoint,
            StateField::Damper(i) => self.zones[i].damper,
            StateField::ZoneAirflow(i) => self.zones[i].airflow,
            StateField::ReheatValve(i) => self.zones[i].reheat_valve,
            StateField::TotalPower => self.total_power,
            StateField::TotalEnergy => self.total_energy,
        }
    }

    /// Write a numeric field. Zone indices must be below [`ZONE_COUNT`].
    pub fn write(&mut self, field: StateField, value: f64) {
        let slot = match field {
            StateField::OutdoorTemp => &mut self.outdoor_temp,
            StateField::ChwSupplyTemp => &mut self.chw_supply_temp,
            StateField::ChwReturnTemp => &mut self.chw_return_temp,
            StateField::HwSupplyTemp => &mut self.hw_supply_temp,
            StateField::HwReturnTemp => &mut self.hw_return_temp,
            StateField::SupplyAirTemp => &mut self.supply_air_temp,
            StateField::ReturnAirTemp => &mut self.return_air_temp,
            StateField::MixedAirTemp => &mut self.mixed_air_temp,
            StateField::SupplyAirFlow => &mut self.supply_air_flow,
            StateField::FanSpeed => &mut self.fan_speed,
            StateField::CoolingValve => &mut self.cooling_valve,
            StateField::HeatingValve => &mut self.heating_valve,
            StateField::SupplyAirSetpoint => &mut self.supply_air_setpoint,
            StateField::ZoneTemp(i) => &mut self.zones[i].temp,
            StateField::ZoneSetpoint(i) => &mut self.zones[i].setpoint,
            StateField::Damper(i) => &mut self.zones[i].damper,
            StateField::ZoneAirflow(i) => &mut self.zones[i].airflow,
            StateField::ReheatValve(i) => &mut self.zones[i].reheat_valve,
            StateField::TotalPower => &mut self.total_power,
            StateField::TotalEnergy => &mut self.total_energy,
        };
        *slot = value;
    }

    /// Fails on the first NaN or infinite field
    pub fn check_finite(&self) -> Result<()> {
        match StateField::all()
            .into_iter()
            .find(|field| !self.read(*field).is_finite())
        {
            Some(field) => Err(Error::NonFinite(field.to_string())),
            None => Ok(()),
        }
    }

    /// Arithmetic mean of all zone temperatures
    pub fn mean_zone_temp(&self) -> f64 {
        self.zones.iter().map(|z| z.temp).sum::<f64>() / ZONE_COUNT as f64
    }
}
