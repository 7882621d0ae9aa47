use super::config::{self, BAR_WIDTH};
use super::models::{OptionRow, Window};
use crate::error::{Result, ScrapeError};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

// -----------------------------------------------
// CHART DATA
// -----------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Grouped bar chart: one category per strike, one bar per series
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<i64>,
    pub series: Vec<Series>,
}

impl BarChart {
    /// Y axis range covering every bar and zero, with headroom for value labels
    pub fn value_range(&self) -> (f64, f64) {
        let (min, max) = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let span = max - min;
        if span == 0.0 {
            return (0.0, 1.0);
        }
        let pad = span * 0.12;
        let lo = if min < 0.0 { min - pad } else { 0.0 };
        let hi = if max > 0.0 { max + pad } else { 0.0 };
        (lo, hi)
    }
}

/// The two charts drawn for every window
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub oi_comparison: BarChart,
    pub oi_change: BarChart,
}

fn field_value<T>(
    row: &OptionRow,
    field: &'static str,
    raw: &str,
    parsed: Option<T>,
) -> Result<T> {
    parsed.ok_or_else(|| ScrapeError::MalformedField {
        strike: row.strike.clone(),
        field,
        value: raw.to_string(),
    })
}

/// Build both chart definitions from the window.
///
/// Any non-numeric strike, OI or OI change inside the window fails the
/// whole cycle rather than dropping the row.
pub fn prepare_charts(window: &Window) -> Result<ChartSet> {
    let n = window.len();
    let mut strikes = Vec::with_capacity(n);
    let mut calls_oi = Vec::with_capacity(n);
    let mut puts_oi = Vec::with_capacity(n);
    let mut calls_change = Vec::with_capacity(n);
    let mut puts_change = Vec::with_capacity(n);

    for row in &window.rows {
        strikes.push(field_value(row, "strike", &row.strike, row.strike_value())?);
        calls_oi.push(field_value(row, "calls_oi", &row.calls_oi, row.calls_oi_value())?);
        puts_oi.push(field_value(row, "puts_oi", &row.puts_oi, row.puts_oi_value())?);
        calls_change.push(field_value(
            row,
            "calls_oi_change",
            &row.calls_oi_change,
            row.calls_oi_change_value(),
        )?);
        puts_change.push(field_value(
            row,
            "puts_oi_change",
            &row.puts_oi_change,
            row.puts_oi_change_value(),
        )?);
    }

    Ok(ChartSet {
        oi_comparison: BarChart {
            title: "Calls OI and Puts OI".to_string(),
            x_label: "Strike".to_string(),
            y_label: "OI".to_string(),
            labels: strikes.clone(),
            series: vec![
                Series { name: "calls_oi".to_string(), values: calls_oi },
                Series { name: "puts_oi".to_string(), values: puts_oi },
            ],
        },
        oi_change: BarChart {
            title: "Calls OI Change and Puts OI Change".to_string(),
            x_label: "Strike".to_string(),
            y_label: "OI Change (%)".to_string(),
            labels: strikes,
            series: vec![
                Series { name: "calls_oi_change".to_string(), values: calls_change },
                Series { name: "puts_oi_change".to_string(), values: puts_change },
            ],
        },
    })
}

// -----------------------------------------------
// RENDERING
// -----------------------------------------------

/// Draws a chart to an image file at `path`
pub trait ChartRenderer: Send + Sync {
    fn render(&self, chart: &BarChart, path: &Path) -> Result<()>;
}

const SERIES_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];

fn render_err<E: std::fmt::Display>(err: E) -> ScrapeError {
    ScrapeError::Render(err.to_string())
}

/// SVG bar charts via plotters
pub struct SvgChartRenderer {
    size: (u32, u32),
}

impl SvgChartRenderer {
    pub fn new(size: (u32, u32)) -> Self {
        Self { size }
    }
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new(config::CHART_SIZE)
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, chart: &BarChart, path: &Path) -> Result<()> {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let n = chart.labels.len();
        let (y_min, y_max) = chart.value_range();

        // Strike i sits at x = i, centred between its pair of bars
        let x_range = -0.5..n as f64 - 0.5;

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title.as_str(), ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_min..y_max)
            .map_err(render_err)?;

        let labels = &chart.labels;
        let strike_label = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() < 1e-6 && idx >= 0.0 {
                labels
                    .get(idx as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default()
            } else {
                String::new()
            }
        };

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&strike_label)
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        let value_style = TextStyle::from(("sans-serif", 11).into_font());

        for (series_idx, series) in chart.series.iter().enumerate() {
            let color = SERIES_COLORS[series_idx % SERIES_COLORS.len()];
            // Calls sit left of the tick, puts right of it
            let offset = (series_idx as f64 - 0.5) * BAR_WIDTH;

            ctx.draw_series(series.values.iter().enumerate().map(|(i, v)| {
                let left = i as f64 + offset - BAR_WIDTH / 2.0;
                Rectangle::new([(left, 0.0), (left + BAR_WIDTH, *v)], color.filled())
            }))
            .map_err(render_err)?
            .label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));

            ctx.draw_series(series.values.iter().enumerate().map(|(i, v)| {
                let vpos = if *v >= 0.0 { VPos::Bottom } else { VPos::Top };
                let style = value_style.pos(Pos::new(HPos::Center, vpos));
                Text::new(v.to_string(), (i as f64 + offset, *v), style)
            }))
            .map_err(render_err)?;
        }

        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}
