use anyhow::{bail, Context, Result};
use oi_analyzer::sensibull::{config, SessionSettings};
use std::path::PathBuf;

/// Application configuration handler
pub struct AppConfig {
    pub mode: String,
    pub port: u16,
    pub session: SessionSettings,
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Create new configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            mode: config::get_execution_mode(),
            port: Self::get_port()?,
            session: SessionSettings::from_env(),
            output_dir: PathBuf::from(config::get_output_dir()),
        })
    }

    /// Log configuration details
    pub fn log_config(&self) {
        println!("{} Mode: {}", "→".cyan(), self.mode.yellow());
        println!("{} WebDriver: {}", "→".cyan(), self.session.webdriver_url);
        println!("{} Page: {}", "→".cyan(), self.session.page_url);
        println!("{} Output dir: {}", "→".cyan(), self.output_dir.display());
        if !self.session.headless {
            println!("{} Browser window visible (OI_HEADLESS=false)", "ℹ".blue());
        }
        println!();
    }

    /// Get port from environment or default
    fn get_port() -> Result<u16> {
        match config::get_port_var() {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("OI_PORT must be a valid port number, got '{}'", raw)),
            None => Ok(config::DEFAULT_PORT),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.session.webdriver_url.trim().is_empty() {
            bail!("OI_WEBDRIVER_URL must not be empty");
        }
        if self.session.page_url.trim().is_empty() {
            bail!("OI_PAGE_URL must not be empty");
        }
        if self.output_dir.as_os_str().is_empty() {
            bail!("OI_OUTPUT_DIR must not be empty");
        }
        Ok(())
    }
}

// Re-export colored for use in main.rs
pub use colored::Colorize;
