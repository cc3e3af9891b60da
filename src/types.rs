use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::angles;
use crate::error::ObserverError;

/// A fixed ground site. Angles are degrees (longitude east-positive), the
/// elevation is metres above sea level, temperature °C and pressure hPa.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Observer {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: f64,
    pub temperature: f64,
    pub pressure: f64,
    pub horizon: f64,
}

impl Observer {
    /// A site at standard temperature (0 °C) with the pressure of the
    /// standard atmosphere at `elevation`.
    pub fn new(
        name: &str,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Result<Self, ObserverError> {
        let observer = Self {
            name: name.to_string(),
            longitude,
            latitude,
            elevation,
            temperature: 0.0,
            pressure: angles::pressure_at_elevation(elevation),
            horizon: 0.0,
        };
        observer.validate()?;
        Ok(observer)
    }

    /// The APEX telescope on Llano de Chajnantor.
    pub fn apex() -> Self {
        Self {
            name: "APEX".to_string(),
            longitude: -(67.0 + 45.0 / 60.0 + 33.0 / 3600.0),
            latitude: -(23.0 + 20.8 / 3600.0),
            elevation: 5105.0,
            temperature: 0.0,
            pressure: angles::pressure_at_elevation(5105.0),
            horizon: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ObserverError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ObserverError::Latitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ObserverError::Longitude(self.longitude));
        }
        if self.temperature <= -273.15 {
            return Err(ObserverError::Temperature(self.temperature));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSample {
    pub instant: DateTime<Utc>,
    pub elevation: f64,
    /// Degrees clockwise from north, in (-180, 180].
    pub azimuth: f64,
}

impl SolarSample {
    pub fn zenith_distance(&self) -> f64 {
        90.0 - self.elevation
    }
}

/// How a solar elevation turns into a ceiling on telescope elevation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintPolicy {
    /// `max_el = limit - elevation`
    SunDistance { limit: f64 },
    /// `max_el = 90 - (margin - zenith_distance)`
    ZenithDistance { margin: f64 },
}

impl Default for ConstraintPolicy {
    fn default() -> Self {
        ConstraintPolicy::SunDistance { limit: 150.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceRecord {
    pub instant: DateTime<Utc>,
    pub elevation: f64,
    pub azimuth: f64,
    pub max_el: f64,
}

/// The records of one day for which the constraint is active, in time order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AvoidanceWindow {
    pub(crate) records: Vec<AvoidanceRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvoidanceSummary {
    pub utc_start: DateTime<Utc>,
    pub utc_end: DateTime<Utc>,
    pub local_start: DateTime<FixedOffset>,
    pub local_end: DateTime<FixedOffset>,
    pub max_elevation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub observer: Observer,
    pub policy: ConstraintPolicy,
    pub tolerance: f64,
    pub timezone: String,
    pub plot_dir: PathBuf,
    pub vector_output: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            observer: Observer::apex(),
            policy: ConstraintPolicy::default(),
            tolerance: 0.0,
            timezone: "America/Santiago".to_string(),
            plot_dir: PathBuf::from("plots"),
            vector_output: false,
        }
    }
}
