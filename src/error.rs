use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SunAvoidanceError {
    #[error(transparent)]
    InvalidTime(#[from] InvalidTimeError),

    #[error(transparent)]
    Offset(#[from] OffsetError),

    #[error(transparent)]
    Observer(#[from] ObserverError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plot(#[from] PlotError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidTimeError {
    #[error("Couldn't parse '{0}' as a date; expected YYYY-MM-DD (e.g. 2017-10-10)")]
    Malformed(String),

    #[error("{0} is outside the supported years 1-9999")]
    OutOfRange(NaiveDate),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OffsetError {
    #[error("Couldn't parse '{0}' as a UTC offset in hours (e.g. -3 or +5.5)")]
    Malformed(String),

    #[error("A UTC offset of {0} hours is not within ±24 hours")]
    OutOfRange(f64),

    #[error("'{0}' is not a time zone in the IANA database")]
    UnknownZone(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObserverError {
    #[error("Observer latitude {0}° is not within [-90°, 90°]")]
    Latitude(f64),

    #[error("Observer longitude {0}° is not within [-180°, 180°]")]
    Longitude(f64),

    #[error("Observer temperature {0} °C is below absolute zero")]
    Temperature(f64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't read the config file {file}: {err}")]
    Read {
        file: PathBuf,
        err: std::io::Error,
    },

    #[error("Couldn't parse the config file {file}: {err}")]
    Parse {
        file: PathBuf,
        err: toml::de::Error,
    },
}

#[derive(Error, Debug)]
pub enum PlotError {
    #[cfg(not(feature = "plotting"))]
    #[error(
        "sun-avoidance was not compiled with the \"plotting\" feature; \
         use --no-plot or rebuild with it enabled"
    )]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error("Error from the plotters library: {0}")]
    Draw(String),

    #[error("Couldn't create the plot directory {dir}: {err}")]
    CreateDir {
        dir: PathBuf,
        err: std::io::Error,
    },
}
