//! Control loops
//!
//! Each loop reads fields already updated earlier in the same tick, so the
//! order in [`BuildingState::update`] is part of the model.

use std::f64::consts::PI;

use chrono::{NaiveDateTime, Timelike};

use super::clock::is_business_hours;
use super::noise::Noise;
use super::state::BuildingState;
use crate::types::Result;

/// Cubic fan-affinity law, 15 kW at full speed
pub fn fan_power_kw(fan_speed: f64) -> f64 {
    (fan_speed / 100.0).powi(3) * 15.0
}

/// Chiller draw proportional to cooling valve, 80 kW at full open
pub fn chiller_power_kw(cooling_valve: f64) -> f64 {
    (cooling_valve / 100.0) * 80.0
}

/// Electric reheat, 2 kW per fully open valve
pub fn reheat_power_kw(reheat_valves: impl IntoIterator<Item = f64>) -> f64 {
    reheat_valves.into_iter().sum::<f64>() / 100.0 * 2.0
}

impl BuildingState {
    /// Advance the whole building by one tick of `interval_secs`.
    ///
    /// Side effects of the loops that ran are kept even when the final
    /// finiteness check fails.
    pub fn update(&mut self, now: NaiveDateTime, interval_secs: f64, noise: &mut Noise) -> Result<()> {
        self.update_occupancy(now, noise);
        self.update_outdoor_temp(now, noise);
        self.update_air_handler(noise);
        self.update_zones(interval_secs, noise);
        self.update_chiller(noise);
        self.update_power(interval_secs, noise);
        self.check_finite()
    }

    /// Schedule-based occupancy with imperfect adherence
    pub fn update_occupancy(&mut self, now: NaiveDateTime, noise: &mut Noise) {
        self.occupied = if is_business_hours(&now) {
            noise.chance(0.95)
        } else {
            noise.chance(0.05)
        };
    }

    /// Daily sinusoid, coolest around 06:00
    pub fn update_outdoor_temp(&mut self, now: NaiveDateTime, noise: &mut Noise) {
        let hour = now.hour() as f64;
        self.outdoor_temp = 75.0 + 15.0 * ((hour - 6.0) * PI / 12.0).sin() + noise.jitter(2.0);
    }

    pub fn update_air_handler(&mut self, noise: &mut Noise) {
        let outdoor_air = if self.occupied { 20.0 } else { 10.0 };
        self.mixed_air_temp = self.return_air_temp * (100.0 - outdoor_air) / 100.0
            + self.outdoor_temp * outdoor_air / 100.0;

        // Integrating controller on the previous tick's discharge temperature
        let error = self.supply_air_temp - self.supply_air_setpoint;
        self.cooling_valve = (self.cooling_valve + error * 2.0).clamp(0.0, 100.0);

        // Up to 30°F of cooling at full valve
        self.supply_air_temp = self.mixed_air_temp - self.cooling_valve * 0.3;

        self.return_air_temp = self.mean_zone_temp();

        let base_speed = if self.occupied { 75.0 } else { 40.0 };
        self.fan_speed = base_speed + noise.jitter(5.0);
        self.supply_air_flow = self.fan_speed * 160.0;
    }

    pub fn update_zones(&mut self, interval_secs: f64, noise: &mut Noise) {
        let base_load = if self.occupied { 0.5 } else { 0.1 };
        let supply_air_temp = self.supply_air_temp;

        for (i, zone) in self.zones.iter_mut().enumerate() {
            let mut load = base_load + noise.jitter(0.2);
            // Perimeter zones pick up solar gain
            if i % 2 == 0 {
                load += 0.3;
            }

            let error = zone.temp - zone.setpoint;
            zone.damper = (zone.damper + error * 3.0).clamp(20.0, 100.0);
            zone.airflow = zone.damper * 30.0;

            let cooling = (zone.airflow / 2000.0) * (zone.temp - supply_air_temp) * 0.1;
            let heat_gain = load * 2.0;
            zone.temp += (heat_gain - cooling) * (interval_secs / 60.0);

            // Fixed-rate ramp with a 1°F band below setpoint
            zone.reheat_valve = if zone.temp < zone.setpoint - 1.0 {
                (zone.reheat_valve + 5.0).min(100.0)
            } else {
                (zone.reheat_valve - 5.0).max(0.0)
            };
        }
    }

    /// Two-state chilled-water response to the air handler's cooling demand
    pub fn update_chiller(&mut self, noise: &mut Noise) {
        let cooling_load = self.cooling_valve * 100.0;
        let (supply, ret) = if cooling_load > 50.0 {
            (42.0, 52.0)
        } else {
            (44.0, 54.0)
        };
        self.chw_supply_temp = supply + noise.jitter(1.0);
        self.chw_return_temp = ret + noise.jitter(1.0);
    }

    pub fn update_power(&mut self, interval_secs: f64, noise: &mut Noise) {
        let misc = if self.occupied {
            50.0 + noise.jitter(5.0)
        } else {
            10.0 + noise.jitter(2.0)
        };

        self.total_power = fan_power_kw(self.fan_speed)
            + chiller_power_kw(self.cooling_valve)
            + reheat_power_kw(self.zones.iter().map(|z| z.reheat_valve))
            + misc;

        // Energy is a meter register; it only counts up
        self.total_energy += self.total_power.max(0.0) * (interval_secs / 3600.0);
    }
}
