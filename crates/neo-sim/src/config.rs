//! Simulator Configuration
//!
//! Settings are layered: built-in defaults, an optional TOML file, `NEO_SIM_*`
//! environment variables, then command-line flags applied by the binary.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::physics::{Noise, ZONE_COUNT};
use crate::types::{Error, Result};

/// Equipment a device process simulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equipment {
    AirHandler,
    /// VAV terminal unit for zone 0..=5
    Zone(usize),
    Chiller,
    Meter,
}

impl Equipment {
    /// Every selectable equipment, in selector order
    pub fn all() -> Vec<Equipment> {
        let mut all = vec![Equipment::AirHandler];
        all.extend((0..ZONE_COUNT).map(Equipment::Zone));
        all.push(Equipment::Chiller);
        all.push(Equipment::Meter);
        all
    }
}

impl FromStr for Equipment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let selector = s.trim().to_ascii_lowercase();
        match selector.as_str() {
            "ahu" => Ok(Equipment::AirHandler),
            "chiller" => Ok(Equipment::Chiller),
            "meter" => Ok(Equipment::Meter),
            other => other
                .strip_prefix("vav")
                .filter(|digits| digits.len() == 1)
                .and_then(|digits| digits.parse::<usize>().ok())
                .filter(|index| *index < ZONE_COUNT)
                .map(Equipment::Zone)
                .ok_or_else(|| Error::UnknownEquipment(s.to_string())),
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equipment::AirHandler => write!(f, "ahu"),
            Equipment::Zone(index) => write!(f, "vav{}", index),
            Equipment::Chiller => write!(f, "chiller"),
            Equipment::Meter => write!(f, "meter"),
        }
    }
}

/// Device simulator settings (neo-sim.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Equipment selector: ahu, vav0-vav5, chiller or meter
    #[serde(default)]
    pub equipment: Option<String>,

    /// Seconds between ticks
    #[serde(default = "default_interval")]
    pub interval_secs: f64,

    /// Fixed noise seed; random when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Disable to make every tick deterministic
    #[serde(default = "default_true")]
    pub noise: bool,
}

/// Shortest accepted tick period
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

fn default_interval() -> f64 {
    5.0
}

fn default_true() -> bool {
    true
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            equipment: None,
            interval_secs: default_interval(),
            seed: None,
            noise: true,
        }
    }
}

impl SimConfig {
    /// Config for one equipment selector with default settings
    pub fn for_equipment(selector: impl Into<String>) -> Self {
        Self {
            equipment: Some(selector.into()),
            ..Default::default()
        }
    }

    /// Load a TOML config file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply overrides from the process environment
    ///
    /// Reads:
    /// - `NEO_SIM_EQUIPMENT`: Equipment selector
    /// - `NEO_SIM_INTERVAL`: Tick interval in seconds
    /// - `NEO_SIM_SEED`: Noise seed
    /// - `NEO_SIM_NOISE`: `true`/`false`
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(equipment) = lookup("NEO_SIM_EQUIPMENT") {
            self.equipment = Some(equipment);
        }
        if let Some(interval) = lookup("NEO_SIM_INTERVAL") {
            self.interval_secs = interval
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid NEO_SIM_INTERVAL: {}", interval)))?;
        }
        if let Some(seed) = lookup("NEO_SIM_SEED") {
            self.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|_| Error::Config(format!("invalid NEO_SIM_SEED: {}", seed)))?,
            );
        }
        if let Some(noise) = lookup("NEO_SIM_NOISE") {
            self.noise = noise
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid NEO_SIM_NOISE: {}", noise)))?;
        }
        Ok(self)
    }

    /// Parse the equipment selector
    pub fn equipment(&self) -> Result<Equipment> {
        self.equipment
            .as_deref()
            .ok_or_else(|| Error::Config("equipment selector is required".to_string()))?
            .parse()
    }

    /// Tick period, at least [`MIN_INTERVAL`]
    pub fn interval(&self) -> Result<Duration> {
        let invalid = || {
            Error::Config(format!(
                "interval must be between {} s and {} s, got {}",
                MIN_INTERVAL.as_secs_f64(),
                Duration::MAX.as_secs_f64(),
                self.interval_secs
            ))
        };
        let interval = Duration::try_from_secs_f64(self.interval_secs).map_err(|_| invalid())?;
        if interval < MIN_INTERVAL {
            return Err(invalid());
        }
        Ok(interval)
    }

    /// Noise source described by this config
    pub fn make_noise(&self) -> Noise {
        match (self.noise, self.seed) {
            (false, _) => Noise::disabled(),
            (true, Some(seed)) => Noise::seeded(seed),
            (true, None) => Noise::from_entropy(),
        }
    }

    /// Check every setting without building anything
    pub fn validate(&self) -> Result<()> {
        self.equipment()?;
        self.interval()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_parse_selectors() {
        assert_eq!("ahu".parse::<Equipment>().unwrap(), Equipment::AirHandler);
        assert_eq!("vav0".parse::<Equipment>().unwrap(), Equipment::Zone(0));
        assert_eq!("vav5".parse::<Equipment>().unwrap(), Equipment::Zone(5));
        assert_eq!(" Chiller ".parse::<Equipment>().unwrap(), Equipment::Chiller);
        assert_eq!("METER".parse::<Equipment>().unwrap(), Equipment::Meter);
    }

    #[test]
    fn test_reject_unknown_selectors() {
        for bad in ["vav9", "vav6", "vav", "vav01", "vav-1", "furnace", ""] {
            assert!(
                matches!(bad.parse::<Equipment>(), Err(Error::UnknownEquipment(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for equipment in Equipment::all() {
            assert_eq!(equipment.to_string().parse::<Equipment>().unwrap(), equipment);
        }
        assert_eq!(Equipment::all().len(), 9);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("NEO_SIM_EQUIPMENT", "vav2"),
            ("NEO_SIM_INTERVAL", "1.5"),
            ("NEO_SIM_SEED", "42"),
            ("NEO_SIM_NOISE", "false"),
        ]);
        let config = SimConfig::default()
            .with_env_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.equipment().unwrap(), Equipment::Zone(2));
        assert_eq!(config.interval().unwrap(), Duration::from_millis(1500));
        assert_eq!(config.seed, Some(42));
        assert!(!config.noise);
        assert!(!config.make_noise().is_enabled());
    }

    #[test]
    fn test_bad_env_value() {
        let result = SimConfig::default().with_env_from(|k| {
            (k == "NEO_SIM_INTERVAL").then(|| "fast".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_interval() {
        let mut config = SimConfig::for_equipment("ahu");
        config.interval_secs = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        config.interval_secs = f64::NAN;
        assert!(matches!(config.interval(), Err(Error::Config(_))));
        config.interval_secs = -1.0;
        assert!(matches!(config.interval(), Err(Error::Config(_))));
    }

    #[test]
    fn test_interval_out_of_duration_range() {
        let mut config = SimConfig::for_equipment("ahu");

        // Too large for a Duration
        config.interval_secs = 1e20;
        assert!(matches!(config.interval(), Err(Error::Config(_))));

        // Rounds below the minimum tick period
        config.interval_secs = 1e-12;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let from_env = SimConfig::for_equipment("ahu")
            .with_env_from(|k| (k == "NEO_SIM_INTERVAL").then(|| "1e20".to_string()))
            .unwrap();
        assert!(matches!(from_env.interval(), Err(Error::Config(_))));

        config.interval_secs = 0.25;
        assert_eq!(config.interval().unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_missing_equipment() {
        assert!(matches!(
            SimConfig::default().equipment(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "equipment = \"chiller\"\nseed = 7").unwrap();

        let config = SimConfig::from_file(file.path()).unwrap();
        assert_eq!(config.equipment().unwrap(), Equipment::Chiller);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.interval_secs, 5.0);
        assert!(config.noise);
    }
}
