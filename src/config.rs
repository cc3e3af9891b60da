//! Run configuration. Defaults describe the APEX site; a TOML file may
//! override any subset of them, and command-line flags override the file.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::angles::pressure_at_elevation;
use crate::error::{ConfigError, ObserverError};
use crate::types::{ConstraintPolicy, Observer, RunConfig};

/// Observer fields as they may appear in a config file. A missing pressure
/// is derived from the elevation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObserverFile {
    pub name: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub elevation: Option<f64>,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub horizon: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub observer: Option<ObserverFile>,
    pub policy: Option<ConstraintPolicy>,
    pub tolerance: Option<f64>,
    pub timezone: Option<String>,
    pub plot_dir: Option<PathBuf>,
    pub vector_output: Option<bool>,
}

impl ConfigFile {
    pub fn read(file: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(file).map_err(|err| ConfigError::Read {
            file: file.to_path_buf(),
            err,
        })?;
        let config = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            file: file.to_path_buf(),
            err,
        })?;
        debug!("Read config file {}", file.display());
        Ok(config)
    }
}

impl ObserverFile {
    fn apply(self, base: Observer) -> Result<Observer, ObserverError> {
        let elevation = self.elevation.unwrap_or(base.elevation);
        let pressure = match (self.pressure, self.elevation) {
            (Some(p), _) => p,
            (None, Some(e)) => pressure_at_elevation(e),
            (None, None) => base.pressure,
        };
        let observer = Observer {
            name: self.name.unwrap_or(base.name),
            longitude: self.longitude.unwrap_or(base.longitude),
            latitude: self.latitude.unwrap_or(base.latitude),
            elevation,
            temperature: self.temperature.unwrap_or(base.temperature),
            pressure,
            horizon: self.horizon.unwrap_or(base.horizon),
        };
        observer.validate()?;
        Ok(observer)
    }
}

impl RunConfig {
    /// Layer `file` over `self`.
    pub fn merge_file(self, file: ConfigFile) -> Result<Self, ObserverError> {
        let observer = match file.observer {
            Some(o) => o.apply(self.observer)?,
            None => self.observer,
        };
        Ok(Self {
            observer,
            policy: file.policy.unwrap_or(self.policy),
            tolerance: file.tolerance.unwrap_or(self.tolerance),
            timezone: file.timezone.unwrap_or(self.timezone),
            plot_dir: file.plot_dir.unwrap_or(self.plot_dir),
            vector_output: file.vector_output.unwrap_or(self.vector_output),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_keeps_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        let config = RunConfig::default().merge_file(file).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_elevation_without_pressure_recomputes_pressure() {
        let file: ConfigFile = toml::from_str(
            r#"
            [observer]
            name = "Sea level"
            elevation = 0.0
            "#,
        )
        .unwrap();
        let config = RunConfig::default().merge_file(file).unwrap();
        assert_eq!(config.observer.name, "Sea level");
        assert!((config.observer.pressure - 1013.25).abs() < 1e-9);
        assert_eq!(config.observer.latitude, Observer::apex().latitude);
    }

    #[test]
    fn test_policy_from_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            tolerance = 2.5
            [policy]
            kind = "zenith_distance"
            margin = 30.0
            "#,
        )
        .unwrap();
        let config = RunConfig::default().merge_file(file).unwrap();
        assert_eq!(config.policy, ConstraintPolicy::ZenithDistance { margin: 30.0 });
        assert_eq!(config.tolerance, 2.5);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<ConfigFile>("colour = \"red\"").is_err());
    }

    #[test]
    fn test_invalid_latitude_is_rejected() {
        let file: ConfigFile = toml::from_str("[observer]\nlatitude = 91.0").unwrap();
        assert_eq!(
            RunConfig::default().merge_file(file),
            Err(ObserverError::Latitude(91.0))
        );
    }
}
