use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::series::{local_time, UtcOffset};
use crate::types::{
    AvoidanceRecord, AvoidanceSummary, AvoidanceWindow, ConstraintPolicy, SolarSample,
};

/// Highest elevation a telescope can point at.
pub const ZENITH: f64 = 90.0;

impl ConstraintPolicy {
    /// Ceiling on telescope elevation for a solar elevation, before any
    /// tolerance is subtracted.
    pub fn max_elevation(&self, solar_elevation: f64) -> f64 {
        match *self {
            ConstraintPolicy::SunDistance { limit } => limit - solar_elevation,
            ConstraintPolicy::ZenithDistance { margin } => {
                let zenith_distance = ZENITH - solar_elevation;
                ZENITH - (margin - zenith_distance)
            }
        }
    }

    /// The solar elevation above which the constraint becomes active.
    pub fn activation_elevation(&self, tolerance: f64) -> f64 {
        match *self {
            ConstraintPolicy::SunDistance { limit } => limit - tolerance - ZENITH,
            ConstraintPolicy::ZenithDistance { margin } => ZENITH - margin - tolerance,
        }
    }
}

/// Keep the samples whose ceiling is at or below the zenith, in input
/// order.
pub fn reduce(
    series: &[SolarSample],
    policy: &ConstraintPolicy,
    tolerance: f64,
) -> AvoidanceWindow {
    let records: Vec<AvoidanceRecord> = series
        .iter()
        .filter_map(|s| {
            let max_el = policy.max_elevation(s.elevation) - tolerance;
            (max_el <= ZENITH).then_some(AvoidanceRecord {
                instant: s.instant,
                elevation: s.elevation,
                azimuth: s.azimuth,
                max_el,
            })
        })
        .collect();

    debug!(
        "{} of {} samples constrained by {:?} (tolerance {}°, active above {}°)",
        records.len(),
        series.len(),
        policy,
        tolerance,
        policy.activation_elevation(tolerance)
    );
    AvoidanceWindow { records }
}

impl AvoidanceWindow {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[AvoidanceRecord] {
        &self.records
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.records.first().map(|r| r.instant)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.records.last().map(|r| r.instant)
    }

    /// The tightest ceiling of the day.
    pub fn max_elevation_reached(&self) -> Option<f64> {
        self.records.iter().map(|r| r.max_el).reduce(f64::min)
    }

    /// True when no two neighbouring records are further apart than
    /// `cadence`. Empty windows are contiguous.
    pub fn is_contiguous(&self, cadence: Duration) -> bool {
        self.records
            .windows(2)
            .all(|pair| pair[1].instant - pair[0].instant <= cadence)
    }
}

impl AvoidanceSummary {
    /// `None` when there is no avoidance on this day.
    pub fn from_window(window: &AvoidanceWindow, offset: UtcOffset) -> Option<Self> {
        let utc_start = window.start()?;
        let utc_end = window.end()?;
        let max_elevation = window.max_elevation_reached()?;
        Some(Self {
            utc_start,
            utc_end,
            local_start: local_time(&utc_start, offset),
            local_end: local_time(&utc_end, offset),
            max_elevation,
        })
    }

    /// Whole degrees, truncated toward zero.
    pub fn max_elevation_degrees(&self) -> i64 {
        self.max_elevation.trunc() as i64
    }
}
