use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::models::{AppError, AppResult, Report};

const CHART_SIZE: (u32, u32) = (1000, 600);

/// Y axis unit label; benchmark means are reported in nanoseconds.
const Y_LABEL: &str = "nanos";

/// Line colors, cycled when a report has more series than entries here.
const COLORS: &[RGBColor] = &[
    RGBColor(66, 133, 244),
    RGBColor(219, 68, 55),
    RGBColor(244, 180, 0),
    RGBColor(15, 157, 88),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
    RGBColor(255, 112, 67),
    RGBColor(93, 64, 55),
];

pub struct ChartRenderer;

impl ChartRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draws one line per series into an SVG file at `output`, with a legend
    /// listing every series name.
    pub fn render(&self, report: &Report, output: &Path) -> AppResult<()> {
        if report.data.is_empty() {
            return Err(AppError::EmptyReport);
        }
        self.draw(report, output)
            .map_err(|e| AppError::ChartError(e.to_string()))?;
        info!(chart = %output.display(), "chart written");
        Ok(())
    }

    fn draw(&self, report: &Report, output: &Path) -> anyhow::Result<()> {
        let (x_range, y_range) = axis_ranges(report);

        let root = SVGBackend::new(output, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), y_range)?;

        // label only multiples of the forced tick interval, when one is set
        let tick_formatter = |x: &f64| {
            report
                .xtick
                .map_or_else(String::new, |tick| format_forced_tick(*x, tick))
        };

        let mut mesh = chart.configure_mesh();
        mesh.y_desc(Y_LABEL);
        if let Some(label) = &report.xlabel {
            mesh.x_desc(label.clone());
        }
        if let Some(tick) = report.xtick.filter(|t| *t > 0.0) {
            let count = ((x_range.end - x_range.start) / tick).ceil() as usize + 1;
            mesh.x_labels(count.max(2)).x_label_formatter(&tick_formatter);
        }
        mesh.draw()?;

        for (idx, (name, series)) in report.data.iter().enumerate() {
            let color = COLORS[idx % COLORS.len()];
            let points: Vec<(f64, f64)> = series
                .xs
                .iter()
                .copied()
                .zip(series.ys.iter().copied())
                .collect();
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                .label(name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

fn axis_ranges(report: &Report) -> (Range<f64>, Range<f64>) {
    let xs = report.data.values().flat_map(|s| s.xs.iter().copied());
    let ys = report.data.values().flat_map(|s| s.ys.iter().copied());
    (padded_range(xs), padded_range(ys))
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

fn format_forced_tick(x: f64, tick: f64) -> String {
    let steps = x / tick;
    if (steps - steps.round()).abs() > 1e-6 {
        return String::new();
    }
    if x.fract().abs() < 1e-6 {
        format!("{x:.0}")
    } else {
        format!("{x}")
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Series;

    use super::*;

    fn sample_report() -> Report {
        let mut report = Report {
            xlabel: Some("# of digits".to_string()),
            xtick: Some(1.0),
            ..Report::default()
        };
        let mut to_chars = Series::default();
        to_chars.push(1.0, 10.0);
        to_chars.push(2.0, 14.0);
        let mut snprintf = Series::default();
        snprintf.push(1.0, 25.0);
        snprintf.push(2.0, 31.0);
        report.data.insert("to_chars".to_string(), to_chars);
        report.data.insert("snprintf".to_string(), snprintf);
        report
    }

    #[test]
    fn test_chart_contains_series_names_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("chart.svg");
        ChartRenderer::new().render(&sample_report(), &output).unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("to_chars"));
        assert!(svg.contains("snprintf"));
        assert!(svg.contains("# of digits"));
        assert!(svg.contains("nanos"));
    }

    #[test]
    fn test_empty_report_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("chart.svg");
        let err = ChartRenderer::new()
            .render(&Report::default(), &output)
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyReport));
        assert!(!output.exists());
    }

    #[test]
    fn test_forced_tick_labels_only_multiples() {
        assert_eq!(format_forced_tick(2.0, 1.0), "2");
        assert_eq!(format_forced_tick(2.5, 0.5), "2.5");
        assert_eq!(format_forced_tick(2.3, 1.0), "");
    }

    #[test]
    fn test_padded_range_widens_single_point() {
        let range = padded_range([3.0].into_iter());
        assert_eq!(range, 2.5..3.5);
    }
}
