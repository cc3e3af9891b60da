use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use log::debug;

use crate::angles;
use crate::error::{InvalidTimeError, OffsetError};
use crate::types::{Observer, SolarSample};

pub const MINUTES_PER_DAY: i64 = 1440;

pub fn minutes_to_time(total_minutes: i64) -> (i64, i64) {
    (total_minutes / 60, total_minutes % 60)
}

pub fn parse_date(s: &str) -> Result<NaiveDate, InvalidTimeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| InvalidTimeError::Malformed(s.to_string()))
}

/// Years a `YYYY-MM-DD` date may name.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// The instants 00:00, 00:01, ... 23:59 UTC of `date`.
pub fn day_instants(date: NaiveDate) -> Result<Vec<DateTime<Utc>>, InvalidTimeError> {
    if !SUPPORTED_YEARS.contains(&date.year()) {
        return Err(InvalidTimeError::OutOfRange(date));
    }
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or(InvalidTimeError::OutOfRange(date))?
        .and_utc();

    Ok((0..MINUTES_PER_DAY)
        .map(|m| midnight + Duration::minutes(m))
        .collect())
}

/// One UTC day of solar positions at a one-minute cadence.
pub fn day_series(
    observer: &Observer,
    date: NaiveDate,
) -> Result<Vec<SolarSample>, InvalidTimeError> {
    let series: Vec<SolarSample> = day_instants(date)?
        .iter()
        .map(|instant| angles::solar_position(observer, instant))
        .collect();

    let minutes_up = series
        .iter()
        .filter(|s| s.elevation > observer.horizon)
        .count();
    let (hours, minutes) = minutes_to_time(minutes_up as i64);
    debug!(
        "{} on {date}: Sun above the {}° horizon for {hours}h{minutes:02}m",
        observer.name, observer.horizon
    );
    Ok(series)
}

/// A signed UTC offset in (possibly fractional) hours, resolved to whole
/// seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcOffset {
    hours: f64,
    fixed: FixedOffset,
}

impl UtcOffset {
    pub fn from_hours(hours: f64) -> Result<Self, OffsetError> {
        if !hours.is_finite() {
            return Err(OffsetError::OutOfRange(hours));
        }
        let seconds = (hours * 3600.0).round();
        if seconds.abs() >= 86_400.0 {
            return Err(OffsetError::OutOfRange(hours));
        }
        let fixed =
            FixedOffset::east_opt(seconds as i32).ok_or(OffsetError::OutOfRange(hours))?;
        Ok(Self { hours, fixed })
    }

    /// The offset `zone` has at 12:00 UTC on `date`.
    pub fn for_zone(zone: &str, date: NaiveDate) -> Result<Self, OffsetError> {
        let tz: Tz = zone
            .parse()
            .map_err(|_| OffsetError::UnknownZone(zone.to_string()))?;
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or(OffsetError::UnknownZone(zone.to_string()))?;
        let seconds = tz
            .offset_from_utc_datetime(&noon)
            .fix()
            .local_minus_utc();
        Self::from_hours(seconds as f64 / 3600.0)
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn fixed_offset(&self) -> FixedOffset {
        self.fixed
    }
}

impl FromStr for UtcOffset {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix(['H', 'h'])
            .unwrap_or(trimmed)
            .trim_start_matches('+');
        let hours: f64 = number
            .parse()
            .map_err(|_| OffsetError::Malformed(s.to_string()))?;
        Self::from_hours(hours)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.hours < 0.0 { '-' } else { '+' };
        write!(f, "{sign}{}", self.hours.abs())
    }
}

pub fn local_time(instant: &DateTime<Utc>, offset: UtcOffset) -> DateTime<FixedOffset> {
    instant.with_timezone(&offset.fixed_offset())
}

pub fn format_hm<Tz2: TimeZone>(instant: &DateTime<Tz2>) -> String
where
    Tz2::Offset: fmt::Display,
{
    instant.format("%H:%M").to_string()
}

/// Hours since local midnight of `instant`.
pub fn local_hours(instant: &DateTime<FixedOffset>) -> f64 {
    instant.hour() as f64 + instant.minute() as f64 / 60.0 + instant.second() as f64 / 3600.0
}
