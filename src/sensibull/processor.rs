use super::browser::BrowserSession;
use super::charts::{prepare_charts, ChartRenderer};
use super::config;
use super::extractor::extract_rows;
use super::models::ChainSnapshot;
use super::window::select_window;
use crate::error::Result;
use crate::utility::timing::{timed_async, Timer};
use chrono::Local;
use std::path::Path;
use tracing::info;

/// One refresh → extract → select → render pass.
///
/// Both chart files are written under `output_dir` only after the table,
/// the window and every value inside it have been validated.
pub async fn run_cycle<B, R>(session: &B, renderer: &R, output_dir: &Path) -> Result<ChainSnapshot>
where
    B: BrowserSession,
    R: ChartRenderer + ?Sized,
{
    let _cycle = Timer::start("refresh cycle");

    timed_async("page refresh", || session.refresh()).await?;
    let rows = timed_async("table extraction", || extract_rows(session)).await?;

    let window = select_window(&rows)?;
    let charts = prepare_charts(&window)?;

    let max_calls_oi_strike = window
        .extremum_row()
        .map(|row| row.strike.clone())
        .unwrap_or_default();
    info!(
        rows = rows.len(),
        window = window.len(),
        strike = %max_calls_oi_strike,
        max_calls_oi = window.max_calls_oi,
        "Selected window around max calls OI"
    );

    let render = Timer::start("chart render");
    std::fs::create_dir_all(output_dir)?;
    renderer.render(&charts.oi_comparison, &output_dir.join(config::OI_COMPARISON_CHART))?;
    renderer.render(&charts.oi_change, &output_dir.join(config::OI_CHANGE_CHART))?;
    render.stop();

    Ok(ChainSnapshot {
        captured_at: Local::now(),
        total_rows: rows.len(),
        max_calls_oi_strike,
        max_calls_oi: window.max_calls_oi,
        window: window.rows,
        oi_comparison_chart: config::OI_COMPARISON_CHART.to_string(),
        oi_change_chart: config::OI_CHANGE_CHART.to_string(),
    })
}
