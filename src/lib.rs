pub mod angles;
pub mod avoidance;
mod cli;
pub mod config;
pub mod error;
pub mod plot;
pub mod series;
pub mod types;

pub use angles::{
    deg_to_rad, delta_t, julian_day, normalize_angle, normalize_azimuth, pressure_at_elevation,
    rad_to_deg, refraction_correction, solar_position,
};

pub use avoidance::{reduce, ZENITH};

pub use cli::SunAvoidance;

pub use config::{ConfigFile, ObserverFile};

pub use error::{
    ConfigError, InvalidTimeError, ObserverError, OffsetError, PlotError, SunAvoidanceError,
};

pub use plot::{ensure_dir, plot_window, PlotRequest};

pub use series::{day_instants, day_series, format_hm, local_time, parse_date, UtcOffset};

pub use types::{
    AvoidanceRecord, AvoidanceSummary, AvoidanceWindow, ConstraintPolicy, Observer, RunConfig,
    SolarSample,
};
