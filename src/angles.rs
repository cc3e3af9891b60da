use chrono::{DateTime, Datelike, Utc};
use log::trace;

use crate::types::{Observer, SolarSample};

/// Julian day of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
/// Julian day of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Equatorial horizontal parallax of the Sun at 1 AU, degrees.
pub const SOLAR_PARALLAX: f64 = 8.794 / 3600.0;
/// Polar/equatorial axis ratio of the Earth.
pub const EARTH_AXIS_RATIO: f64 = 0.996_647_19;
pub const EARTH_RADIUS_METERS: f64 = 6_378_140.0;

/// Geometric elevation below which no refraction is applied (apparent
/// upper limb on the horizon).
pub const REFRACTION_CUTOFF: f64 = -0.83337;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Fold a [0, 360) azimuth into (-180, 180].
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let az = normalize_angle(azimuth);
    if az > 180.0 {
        az - 360.0
    } else {
        az
    }
}

pub fn julian_day(instant: &DateTime<Utc>) -> f64 {
    let secs = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JD + secs / 86_400.0
}

/// TT - UT in seconds (Espenak & Meeus polynomial for 2005-2050; the
/// polynomial is held at its end points outside that range).
pub fn delta_t(year: f64) -> f64 {
    let t = year.clamp(2005.0, 2050.0) - 2000.0;
    62.92 + 0.32217 * t + 0.005589 * t * t
}

/// Atmospheric pressure (hPa) of the 1976 U.S. Standard Atmosphere.
pub fn pressure_at_elevation(elevation: f64) -> f64 {
    1013.25 * (1.0 - 0.0065 * elevation / 288.15).powf(5.255_876_1)
}

/// Refraction (degrees) to add to a geometric elevation.
pub fn refraction_correction(elevation: f64, pressure: f64, temperature: f64) -> f64 {
    if elevation <= REFRACTION_CUTOFF || pressure <= 0.0 {
        return 0.0;
    }
    let r = 1.02 / deg_to_rad(elevation + 10.3 / (elevation + 5.11)).tan();
    (pressure / 1010.0) * (283.0 / (273.0 + temperature)) * r / 60.0
}

/// Apparent geocentric right ascension and declination (degrees) and the
/// Earth-Sun distance (AU) for a Julian ephemeris day.
pub fn solar_equatorial(jde: f64) -> (f64, f64, f64) {
    let t = (jde - J2000) / DAYS_PER_CENTURY;

    let l0 = normalize_angle(280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t);
    let m = normalize_angle(357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t);
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;
    let m_rad = deg_to_rad(m);
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();

    let true_longitude = l0 + c;
    let true_anomaly = deg_to_rad(m + c);
    let distance = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    let omega = deg_to_rad(125.04 - 1934.136 * t);
    let lambda = deg_to_rad(true_longitude - 0.00569 - 0.00478 * omega.sin());
    let epsilon = deg_to_rad(mean_obliquity(t) + 0.00256 * omega.cos());

    let ra = (epsilon.cos() * lambda.sin()).atan2(lambda.cos());
    let dec = (epsilon.sin() * lambda.sin()).asin();
    (normalize_angle(rad_to_deg(ra)), rad_to_deg(dec), distance)
}

fn mean_obliquity(t: f64) -> f64 {
    23.0 + 26.0 / 60.0 + 21.448 / 3600.0
        - (46.8150 * t + 0.000_59 * t * t - 0.001_813 * t * t * t) / 3600.0
}

/// Apparent sidereal time at Greenwich (degrees) for a Julian day in UT.
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let t = (jd - J2000) / DAYS_PER_CENTURY;
    let mean = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    let omega = deg_to_rad(125.04 - 1934.136 * t);
    let nutation_in_longitude = -0.00478 * omega.sin();
    let epsilon = deg_to_rad(mean_obliquity(t));
    normalize_angle(mean + nutation_in_longitude * epsilon.cos())
}

/// Shift a geocentric hour angle and declination to the observer's
/// position on the ellipsoid. Angles in degrees, distance in AU.
pub fn topocentric_shift(
    observer: &Observer,
    hour_angle: f64,
    declination: f64,
    distance: f64,
) -> (f64, f64) {
    let phi = deg_to_rad(observer.latitude);
    let u = (EARTH_AXIS_RATIO * phi.tan()).atan();
    let height = observer.elevation / EARTH_RADIUS_METERS;
    let rho_sin = EARTH_AXIS_RATIO * u.sin() + height * phi.sin();
    let rho_cos = u.cos() + height * phi.cos();

    let sin_pi = deg_to_rad(SOLAR_PARALLAX).sin() / distance;
    let h = deg_to_rad(hour_angle);
    let dec = deg_to_rad(declination);

    let denom = dec.cos() - rho_cos * sin_pi * h.cos();
    let delta_ra = (-rho_cos * sin_pi * h.sin()).atan2(denom);
    let dec_topo = ((dec.sin() - rho_sin * sin_pi) * delta_ra.cos()).atan2(denom);
    (hour_angle - rad_to_deg(delta_ra), rad_to_deg(dec_topo))
}

/// Geometric elevation and azimuth ([0, 360) from north through east) of a
/// point at the given hour angle and declination.
pub fn horizontal(latitude: f64, hour_angle: f64, declination: f64) -> (f64, f64) {
    let phi = deg_to_rad(latitude);
    let h = deg_to_rad(hour_angle);
    let dec = deg_to_rad(declination);

    let sin_el = phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos();
    let elevation = rad_to_deg(sin_el.clamp(-1.0, 1.0).asin());
    let az_south = h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos());
    (elevation, normalize_angle(rad_to_deg(az_south) + 180.0))
}

/// The Sun's apparent topocentric elevation and azimuth as seen by
/// `observer` at `instant`.
pub fn solar_position(observer: &Observer, instant: &DateTime<Utc>) -> SolarSample {
    let jd = julian_day(instant);
    let jde = jd + delta_t(instant.year() as f64) / 86_400.0;

    let (ra, dec, distance) = solar_equatorial(jde);
    let hour_angle = greenwich_sidereal_time(jd) + observer.longitude - ra;
    let (hour_angle, dec) = topocentric_shift(observer, hour_angle, dec, distance);
    let (geometric, azimuth) = horizontal(observer.latitude, hour_angle, dec);
    let elevation =
        geometric + refraction_correction(geometric, observer.pressure, observer.temperature);

    trace!("{instant}: ra {ra:.4} dec {dec:.4} el {elevation:.4} az {azimuth:.4}");
    SolarSample {
        instant: *instant,
        elevation,
        azimuth: normalize_azimuth(azimuth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_obliquity_j2000() {
        assert!((mean_obliquity(0.0) - 23.439_291).abs() < 1e-6);
    }

    #[test]
    fn test_topocentric_shift_is_tiny_for_the_sun() {
        let apex = Observer::apex();
        let (h, dec) = topocentric_shift(&apex, 30.0, -6.0, 1.0);
        assert!((h - 30.0).abs() < 0.01);
        assert!((dec + 6.0).abs() < 0.01);
    }
}
