mod app_config;

use anyhow::Result;
use app_config::{AppConfig, Colorize};
use oi_analyzer::logging;
use oi_analyzer::sensibull::SensibullCommands;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;

    // ========================================
    // CONFIGURATION - from environment
    // ========================================
    let config = AppConfig::from_env()?;
    config.validate()?;
    config.log_config();

    match config.mode.as_str() {
        "server" => {
            SensibullCommands::run_server(config.port, &config.mode, &config.session, &config.output_dir)
                .await?
        }
        "once" => SensibullCommands::run_once(&config.session, &config.output_dir).await?,
        other => {
            eprintln!("{} Invalid mode '{}'. Use 'server' or 'once'", "✗".red(), other);
            SensibullCommands::print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
