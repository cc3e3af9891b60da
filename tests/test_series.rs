use chrono::{Duration, NaiveDate, TimeZone, Timelike, Utc};

use sun_avoidance::error::{InvalidTimeError, OffsetError};
use sun_avoidance::series::*;
use sun_avoidance::types::Observer;

// ── Time utilities ──

#[test]
fn test_known_time_conversions() {
    assert_eq!(minutes_to_time(0), (0, 0));
    assert_eq!(minutes_to_time(720), (12, 0));
    assert_eq!(minutes_to_time(1439), (23, 59));
    assert_eq!(minutes_to_time(390), (6, 30));
}

// ── Dates ──

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("2017-10-09").unwrap(),
        NaiveDate::from_ymd_opt(2017, 10, 9).unwrap()
    );
    assert_eq!(
        parse_date(" 2024-02-29 ").unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
}

#[test]
fn test_parse_date_rejects_malformed() {
    for bad in ["", "2017-13-01", "2023-02-29", "09/10/2017", "2017-10-09T00:00", "yesterday"] {
        assert_eq!(
            parse_date(bad),
            Err(InvalidTimeError::Malformed(bad.to_string())),
            "{bad}"
        );
    }
}

#[test]
fn test_day_instants_out_of_range() {
    for date in [NaiveDate::MAX, NaiveDate::MIN, NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap()] {
        assert_eq!(day_instants(date), Err(InvalidTimeError::OutOfRange(date)));
    }
    assert_eq!(day_instants(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()).unwrap().len(), 1440);
}

// ── Series ──

#[test]
fn test_series_has_1440_minutes() {
    let apex = Observer::apex();
    for date in ["2017-10-09", "2024-02-29", "2017-06-21", "1999-12-31"] {
        let date = parse_date(date).unwrap();
        let series = day_series(&apex, date).unwrap();
        assert_eq!(series.len(), 1440);

        let first = series[0].instant;
        assert_eq!(first, date.and_hms_opt(0, 0, 0).unwrap().and_utc());
        assert_eq!(series[1439].instant - first, Duration::minutes(1439));
        for pair in series.windows(2) {
            assert_eq!(pair[1].instant - pair[0].instant, Duration::minutes(1));
        }
        assert!(series.iter().all(|s| s.instant.second() == 0));
    }
}

#[test]
fn test_series_samples_are_normalized() {
    let apex = Observer::apex();
    let series = day_series(&apex, parse_date("2017-10-09").unwrap()).unwrap();
    for s in &series {
        assert!(s.azimuth > -180.0 && s.azimuth <= 180.0, "{s:?}");
        assert!(s.elevation >= -90.0 && s.elevation <= 90.0, "{s:?}");
    }
}

// ── Offsets ──

#[test]
fn test_offset_parsing() {
    let cases: &[(&str, f64)] = &[
        ("-3", -3.0),
        ("-3H", -3.0),
        ("-3h", -3.0),
        ("+5.5", 5.5),
        ("0", 0.0),
        (" -4 ", -4.0),
        ("12.75", 12.75),
    ];
    for &(input, hours) in cases {
        assert_eq!(input.parse::<UtcOffset>().unwrap().hours(), hours, "{input}");
    }
}

#[test]
fn test_offset_parsing_errors() {
    assert_eq!(
        "three".parse::<UtcOffset>(),
        Err(OffsetError::Malformed("three".to_string()))
    );
    assert_eq!("-24".parse::<UtcOffset>(), Err(OffsetError::OutOfRange(-24.0)));
    assert!(UtcOffset::from_hours(f64::NAN).is_err());
}

#[test]
fn test_offset_rounding_to_a_full_day_is_rejected() {
    // Rounds to 86400 s, which no fixed offset can represent.
    assert_eq!(
        UtcOffset::from_hours(23.9999999),
        Err(OffsetError::OutOfRange(23.9999999))
    );
    assert_eq!(
        "-23.99999999".parse::<UtcOffset>(),
        Err(OffsetError::OutOfRange(-23.99999999))
    );

    // One second short of a day is still a real offset.
    let t = Utc.with_ymd_and_hms(2017, 10, 9, 14, 35, 0).unwrap();
    let offset = UtcOffset::from_hours(86_399.0 / 3600.0).unwrap();
    assert_eq!(offset.fixed_offset().local_minus_utc(), 86_399);
    let local = local_time(&t, offset);
    assert_eq!(format_hm(&local), "14:34");
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2017, 10, 10).unwrap());
}

#[test]
fn test_offset_for_zone() {
    // Chilean summer time began on 2017-08-13.
    let october = NaiveDate::from_ymd_opt(2017, 10, 9).unwrap();
    let june = NaiveDate::from_ymd_opt(2017, 6, 21).unwrap();
    assert_eq!(UtcOffset::for_zone("America/Santiago", october).unwrap().hours(), -3.0);
    assert_eq!(UtcOffset::for_zone("America/Santiago", june).unwrap().hours(), -4.0);
    assert_eq!(UtcOffset::for_zone("Asia/Kolkata", june).unwrap().hours(), 5.5);
    assert_eq!(
        UtcOffset::for_zone("Mars/Olympus_Mons", june),
        Err(OffsetError::UnknownZone("Mars/Olympus_Mons".to_string()))
    );
}

// ── Local time ──

#[test]
fn test_local_time_is_utc_minus_three_hours() {
    let apex = Observer::apex();
    let offset = UtcOffset::from_hours(-3.0).unwrap();
    let series = day_series(&apex, parse_date("2017-10-09").unwrap()).unwrap();
    for s in &series {
        let local = local_time(&s.instant, offset);
        assert_eq!(local, s.instant);
        assert_eq!(local.naive_local(), s.instant.naive_utc() - Duration::hours(3));
    }
}

#[test]
fn test_fractional_local_time() {
    let t = Utc.with_ymd_and_hms(2017, 10, 9, 0, 0, 0).unwrap();
    let local = local_time(&t, UtcOffset::from_hours(5.5).unwrap());
    assert_eq!(format_hm(&local), "05:30");
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2017, 10, 9).unwrap());

    let local = local_time(&t, UtcOffset::from_hours(-3.0).unwrap());
    assert_eq!(format_hm(&local), "21:00");
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2017, 10, 8).unwrap());
    assert!((local_hours(&local) - 21.0).abs() < 1e-12);
}
