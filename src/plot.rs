//! Rendering of the maximum-elevation curve over an avoidance window.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, warn};

use crate::error::PlotError;
use crate::series::UtcOffset;
use crate::types::{AvoidanceSummary, AvoidanceWindow};

/// What goes on a plot besides the window itself.
#[derive(Debug, Clone)]
pub struct PlotRequest<'a> {
    pub site: &'a str,
    pub date: NaiveDate,
    pub offset: UtcOffset,
    pub dir: &'a Path,
    pub vector_output: bool,
}

impl PlotRequest<'_> {
    pub fn title(&self) -> String {
        format!("{} {} (UT {}H)", self.site, self.date, self.offset)
    }

    pub fn filename(&self, extension: &str) -> PathBuf {
        self.dir
            .join(format!("maxEl_{}.{extension}", self.date.format("%Y-%m-%d")))
    }
}

/// Create `dir` (and parents) if it doesn't exist yet.
pub fn ensure_dir(dir: &Path) -> Result<(), PlotError> {
    if !dir.exists() {
        info!("Creating directory {}", dir.display());
        std::fs::create_dir_all(dir).map_err(|err| PlotError::CreateDir {
            dir: dir.to_path_buf(),
            err,
        })?;
    }
    Ok(())
}

/// Start an image viewer on `file` without waiting for it.
pub fn show(file: &Path) {
    match std::process::Command::new("display").arg(file).spawn() {
        Ok(_) => info!("Opened {} with 'display'", file.display()),
        Err(e) => warn!("Couldn't open {} with 'display': {e}", file.display()),
    }
}

/// Draw the window and return the files written (PNG first).
#[cfg(feature = "plotting")]
pub fn plot_window(
    window: &AvoidanceWindow,
    summary: &AvoidanceSummary,
    request: &PlotRequest,
) -> Result<Vec<PathBuf>, PlotError> {
    plotting::plot_window(window, summary, request)
}

#[cfg(not(feature = "plotting"))]
pub fn plot_window(
    _window: &AvoidanceWindow,
    _summary: &AvoidanceSummary,
    _request: &PlotRequest,
) -> Result<Vec<PathBuf>, PlotError> {
    Err(PlotError::NoPlottingFeature)
}

#[cfg(feature = "plotting")]
mod plotting {
    use log::debug;
    use plotters::{
        coord::Shift,
        prelude::*,
        style::text_anchor::{HPos, Pos, VPos},
    };

    use super::*;
    use crate::avoidance::ZENITH;
    use crate::series::{format_hm, local_hours};

    /// 6.4 x 4.8 inches at 120 dpi.
    const X_PIXELS: u32 = 768;
    const Y_PIXELS: u32 = 576;

    pub(super) fn plot_window(
        window: &AvoidanceWindow,
        summary: &AvoidanceSummary,
        request: &PlotRequest,
    ) -> Result<Vec<PathBuf>, PlotError> {
        ensure_dir(request.dir)?;
        let mut written = vec![];

        let png = request.filename("png");
        draw(
            BitMapBackend::new(&png, (X_PIXELS, Y_PIXELS)).into_drawing_area(),
            window,
            summary,
            request,
        )?;
        written.push(png);

        if request.vector_output {
            let svg = request.filename("svg");
            draw(
                SVGBackend::new(&svg, (X_PIXELS, Y_PIXELS)).into_drawing_area(),
                window,
                summary,
                request,
            )?;
            written.push(svg);
        }

        for f in &written {
            debug!("Wrote {}", f.display());
        }
        Ok(written)
    }

    fn draw_err<E: std::fmt::Display>(e: E) -> PlotError {
        PlotError::Draw(e.to_string())
    }

    fn format_hours(hours: f64) -> String {
        let minutes = (hours * 60.0).round() as i64;
        let minutes = minutes.rem_euclid(24 * 60);
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    fn draw<DB: DrawingBackend>(
        root: DrawingArea<DB, Shift>,
        window: &AvoidanceWindow,
        summary: &AvoidanceSummary,
        request: &PlotRequest,
    ) -> Result<(), PlotError> {
        root.fill(&WHITE).map_err(draw_err)?;

        // x is hours since the local midnight before the window starts, so a
        // window running past local midnight stays monotonic.
        let x_start = local_hours(&summary.local_start);
        let points: Vec<(f64, f64)> = window
            .records()
            .iter()
            .map(|r| {
                let since_start = (r.instant - summary.utc_start).num_seconds() as f64 / 3600.0;
                (x_start + since_start, r.max_el)
            })
            .collect();
        let x_end = points
            .last()
            .map(|p| p.0)
            .unwrap_or(x_start)
            .max(x_start + 1.0 / 60.0);
        let y_min = (summary.max_elevation - 5.0).floor();

        let mut cc = ChartBuilder::on(&root)
            .caption(request.title(), ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_start..x_end, y_min..ZENITH)
            .map_err(draw_err)?;

        cc.configure_mesh()
            .x_desc(format!("Local time (UT {}H)", request.offset))
            .y_desc("Max telescope elevation [deg]")
            .x_label_formatter(&|h| format_hours(*h))
            .draw()
            .map_err(draw_err)?;

        let colour = RGBColor(214, 39, 40);
        cc.draw_series(
            AreaSeries::new(points.iter().copied(), ZENITH, colour.mix(0.3).filled())
                .border_style(colour.stroke_width(2)),
        )
        .map_err(draw_err)?;

        let x_span = x_end - x_start;
        let y_span = ZENITH - y_min;
        let font = TextStyle::from(("sans-serif", 18).into_font());
        let annotations = [
            (
                format!("SA starts {}", format_hm(&summary.local_start)),
                x_start + 0.02 * x_span,
                HPos::Left,
                0.05,
            ),
            (
                format!("SA ends {}", format_hm(&summary.local_end)),
                x_start + 0.98 * x_span,
                HPos::Right,
                0.05,
            ),
            (
                format!("Max El: {}°", summary.max_elevation_degrees()),
                x_start + 0.5 * x_span,
                HPos::Center,
                0.15,
            ),
        ];
        cc.draw_series(annotations.into_iter().map(|(text, x, h_pos, y_frac)| {
            Text::new(
                text,
                (x, y_min + y_frac * y_span),
                font.clone().pos(Pos::new(h_pos, VPos::Bottom)),
            )
        }))
        .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::format_hours;

        #[test]
        fn test_format_hours() {
            assert_eq!(format_hours(13.5), "13:30");
            assert_eq!(format_hours(24.25), "00:15");
            assert_eq!(format_hours(9.999), "10:00");
        }
    }
}
