use chrono::Timelike;

use sun_avoidance::{
    day_series, parse_date, reduce, AvoidanceSummary, ConstraintPolicy, Observer, UtcOffset,
};

fn main() {
    let apex = Observer::apex();
    let date = parse_date("2017-10-09").unwrap();
    let offset = UtcOffset::from_hours(-3.0).unwrap();
    let policy = ConstraintPolicy::default();

    let series = day_series(&apex, date).unwrap();

    println!("=== Sun Avoidance Example ===");
    println!(
        "Location: {} ({:.4}°, {:.4}°, {} m, {:.1} hPa)",
        apex.name, apex.latitude, apex.longitude, apex.elevation, apex.pressure
    );
    println!("Date: {date} (UT {offset}H)");
    println!();
    println!("--- Hourly Solar Position ---");
    for s in series.iter().filter(|s| s.instant.minute() == 0) {
        println!(
            "{}  el {:6.2}°  az {:7.2}°  max El {:6.2}°",
            s.instant.format("%H:%M"),
            s.elevation,
            s.azimuth,
            policy.max_elevation(s.elevation)
        );
    }
    println!();

    let window = reduce(&series, &policy, 0.0);
    match AvoidanceSummary::from_window(&window, offset) {
        Some(summary) => {
            println!("--- Sun Avoidance ---");
            println!(
                "UTC:   {} - {}",
                summary.utc_start.format("%H:%M"),
                summary.utc_end.format("%H:%M")
            );
            println!(
                "Local: {} - {}",
                summary.local_start.format("%H:%M"),
                summary.local_end.format("%H:%M")
            );
            println!("Max telescope elevation: {:.2}°", summary.max_elevation);
        }
        None => println!("No elevation limit on {date}"),
    }
}
