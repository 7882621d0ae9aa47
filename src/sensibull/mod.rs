pub mod browser;
pub mod charts;
pub mod config;
pub mod extractor;
pub mod models;
pub mod page;
pub mod processor;
pub mod row_parser;
pub mod sensibull_api_server;
pub mod sensibull_commands;
pub mod window;

// Re-exports (public API)
pub use browser::{BrowserSession, DomElement, SessionSettings, WebDriverSession};
pub use charts::{prepare_charts, BarChart, ChartRenderer, ChartSet, Series, SvgChartRenderer};
pub use extractor::extract_rows;
pub use models::{ChainSnapshot, OptionRow, Window};
pub use processor::run_cycle;
pub use row_parser::parse_row;
pub use sensibull_api_server::{build_router, AppState};
pub use sensibull_commands::SensibullCommands;
pub use window::{find_max_calls_oi, select_window, window_bounds};
