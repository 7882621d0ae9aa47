use super::browser::{open_session, SessionSettings};
use super::charts::{ChartRenderer, SvgChartRenderer};
use super::models::ChainSnapshot;
use super::processor::run_cycle;
use super::sensibull_api_server;

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

/// Sensibull command handler - the execution modes of the binary
pub struct SensibullCommands;

impl SensibullCommands {
    /// Run API server mode
    pub async fn run_server(
        port: u16,
        mode: &str,
        settings: &SessionSettings,
        output_dir: &Path,
    ) -> Result<()> {
        println!("{}", "=".repeat(60).blue());
        println!("{}", "Option Chain OI Server".green().bold());
        println!("{}", "=".repeat(60).blue());
        println!();

        println!("{} Connecting to WebDriver at {}...", "→".cyan(), settings.webdriver_url.yellow());
        let session = open_session(settings).await?;
        println!("{} Browser on {}", "✓".green(), settings.page_url.yellow());
        println!();

        let renderer: Arc<dyn ChartRenderer> = Arc::new(SvgChartRenderer::default());
        sensibull_api_server::start_server(port, mode, session, renderer, output_dir.to_path_buf()).await
    }

    /// Run a single refresh cycle and print the window
    pub async fn run_once(settings: &SessionSettings, output_dir: &Path) -> Result<()> {
        println!("{}", "=".repeat(60).blue());
        println!("{}", "Option Chain OI Snapshot".green().bold());
        println!("{}", "=".repeat(60).blue());
        println!();

        println!("{} Connecting to WebDriver at {}...", "→".cyan(), settings.webdriver_url.yellow());
        let session = open_session(settings).await?;

        let renderer = SvgChartRenderer::default();
        let outcome = run_cycle(&session, &renderer, output_dir).await;

        // Close the browser whatever the cycle outcome
        session.close().await?;

        let snapshot = outcome?;
        Self::display_snapshot(&snapshot, output_dir);
        Ok(())
    }

    /// Display the selected window and chart paths
    fn display_snapshot(snapshot: &ChainSnapshot, output_dir: &Path) {
        println!("{}", "=".repeat(60).blue());
        println!("{}", "Results".cyan().bold());
        println!("{}", "=".repeat(60).blue());
        println!("{} Captured: {}", "✓".green(), snapshot.captured_at.format("%d-%b-%Y %H:%M:%S"));
        println!("{} Strikes on page: {}", "✓".green(), snapshot.total_rows);
        println!(
            "{} Max calls OI: {} at strike {}",
            "✓".green(),
            snapshot.max_calls_oi,
            snapshot.max_calls_oi_strike.yellow()
        );
        println!();

        println!(
            "  {:>10} {:>12} {:>10} {:>10} {:>12}",
            "Calls OI%", "Calls OI", "Strike", "Puts OI", "Puts OI%"
        );
        for row in &snapshot.window {
            let line = format!(
                "  {:>10} {:>12} {:>10} {:>10} {:>12}",
                row.calls_oi_change, row.calls_oi, row.strike, row.puts_oi, row.puts_oi_change
            );
            if row.strike == snapshot.max_calls_oi_strike {
                println!("{}", line.green().bold());
            } else {
                println!("{}", line);
            }
        }
        println!();

        println!(
            "{} Charts: {}, {}",
            "ℹ".blue(),
            output_dir.join(&snapshot.oi_comparison_chart).display(),
            output_dir.join(&snapshot.oi_change_chart).display()
        );
        println!("{}", "=".repeat(60).blue());
    }

    /// Print usage instructions
    pub fn print_usage() {
        eprintln!("Set OI_MODE environment variable to control execution mode");
        eprintln!("Examples:");
        eprintln!("  OI_MODE=server OI_PORT=3001 cargo run   # Serve charts on port 3001");
        eprintln!("  OI_MODE=once cargo run                  # Single refresh, print window");
        eprintln!("Other variables: OI_WEBDRIVER_URL, OI_PAGE_URL, OI_OUTPUT_DIR, OI_HEADLESS");
    }
}
