//! Command-line interface for `sun-avoidance`.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::{AppSettings, Parser};
use log::{debug, info};

use crate::avoidance::reduce;
use crate::config::ConfigFile;
use crate::error::SunAvoidanceError;
use crate::plot::{self, PlotRequest};
use crate::series::{day_series, format_hm, parse_date, UtcOffset};
use crate::types::{AvoidanceSummary, AvoidanceWindow, ConstraintPolicy, RunConfig};

#[derive(Debug, Parser)]
#[clap(
    name = "sun-avoidance",
    version,
    about = "Engineering sun avoidance: when the Sun caps the usable telescope \
             elevation on a UT date"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
pub struct SunAvoidance {
    /// UT date, e.g. 2017-10-10. Defaults to today (UTC).
    date: Option<String>,

    /// UT offset in hours for local times, e.g. -3. Defaults to the offset
    /// of --timezone on the given date.
    #[clap(short, long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// IANA time zone used when no --offset is given.
    #[clap(long)]
    timezone: Option<String>,

    /// A TOML file with site, policy and output settings.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Maximum telescope elevation is LIMIT minus the solar elevation.
    #[clap(long)]
    limit: Option<f64>,

    /// Maximum telescope elevation is 90 - (MARGIN - solar zenith distance).
    #[clap(long, conflicts_with = "limit")]
    zenith_margin: Option<f64>,

    /// Extra margin [deg] subtracted from the maximum telescope elevation.
    #[clap(long, allow_hyphen_values = true)]
    tolerance: Option<f64>,

    /// Directory to write plots into.
    #[clap(long)]
    plot_dir: Option<PathBuf>,

    /// Also write an SVG of the plot.
    #[clap(long)]
    svg: bool,

    /// Don't write a plot; only print the summary. Overrides --svg and
    /// --show.
    #[clap(long)]
    no_plot: bool,

    /// Open the plot with 'display' once written.
    #[clap(long)]
    show: bool,

    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv).
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,
}

impl SunAvoidance {
    /// Layer the config file and flags over the defaults.
    fn run_config(&self) -> Result<RunConfig, SunAvoidanceError> {
        let mut config = RunConfig::default();
        if let Some(file) = &self.config {
            config = config.merge_file(ConfigFile::read(file)?)?;
        }
        if let Some(limit) = self.limit {
            config.policy = ConstraintPolicy::SunDistance { limit };
        }
        if let Some(margin) = self.zenith_margin {
            config.policy = ConstraintPolicy::ZenithDistance { margin };
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(timezone) = &self.timezone {
            config.timezone = timezone.clone();
        }
        if let Some(dir) = &self.plot_dir {
            config.plot_dir = dir.clone();
        }
        config.vector_output |= self.svg;
        Ok(config)
    }

    fn date(&self) -> Result<NaiveDate, SunAvoidanceError> {
        match &self.date {
            Some(d) => Ok(parse_date(d)?),
            None => Ok(Utc::now().date_naive()),
        }
    }

    fn offset(
        &self,
        config: &RunConfig,
        date: NaiveDate,
    ) -> Result<UtcOffset, SunAvoidanceError> {
        let offset = match &self.offset {
            Some(o) => o.parse::<UtcOffset>()?,
            None => {
                let offset = UtcOffset::for_zone(&config.timezone, date)?;
                debug!("{} is UT {}H on {date}", config.timezone, offset);
                offset
            }
        };
        Ok(offset)
    }

    pub fn run(self) -> Result<(), SunAvoidanceError> {
        setup_logging(self.verbosity).expect("Failed to initialise logging.");

        let date = self.date()?;
        let config = self.run_config()?;
        let offset = self.offset(&config, date)?;
        info!("sun-avoidance {}", env!("CARGO_PKG_VERSION"));
        debug!("{config:?}");

        let series = day_series(&config.observer, date)?;
        let window = reduce(&series, &config.policy, config.tolerance);

        println!(" - Using local time: UTC {offset}H");
        match AvoidanceSummary::from_window(&window, offset) {
            None => println!("\nNo elevation limit on {date}"),
            Some(summary) => {
                let figure = if self.no_plot {
                    None
                } else {
                    let request = PlotRequest {
                        site: &config.observer.name,
                        date,
                        offset,
                        dir: &config.plot_dir,
                        vector_output: config.vector_output,
                    };
                    Some(plot::plot_window(&window, &summary, &request)?)
                };
                print_summary(&window, &summary, figure.as_deref());
                if self.show {
                    if let Some(png) = figure.as_ref().and_then(|f| f.first()) {
                        plot::show(png);
                    }
                }
            }
        }
        Ok(())
    }
}

fn print_summary(
    window: &AvoidanceWindow,
    summary: &AvoidanceSummary,
    figure: Option<&[PathBuf]>,
) {
    if let Some(files) = figure {
        for f in files {
            println!("Figure saved to: {}", f.display());
        }
    }
    println!(
        "\nUTC sun avoidance {} - {}",
        format_hm(&summary.utc_start),
        format_hm(&summary.utc_end)
    );
    println!(
        "Local sun avoidance {} - {}",
        format_hm(&summary.local_start),
        format_hm(&summary.local_end)
    );
    println!("Max elevation {} degrees", summary.max_elevation_degrees());
    debug!("{} constrained minutes", window.len());
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// only uses colours if we're on a tty. Source code lines are displayed in
/// log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}
