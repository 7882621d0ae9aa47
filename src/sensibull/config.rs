// -----------------------------------------------
// SENSIBULL OPTION CHAIN PAGE
// -----------------------------------------------
pub const SENSIBULL_OPTION_CHAIN_URL: &str = "https://web.sensibull.com/option-chain";

// -----------------------------------------------
// TABLE LOCATORS (XPath)
// -----------------------------------------------
pub const TABLE_BODY_XPATH: &str = r#"//div[@id="oc-table-body"]"#;
pub const ROW_GROUP_XPATH: &str = r#"div[@class="rt-tr-group"]"#;
pub const ODD_ROW_XPATH: &str = r#"div[@class="rt-tr -odd"]"#;
pub const EVEN_ROW_XPATH: &str = r#"div[@class="rt-tr -even"]"#;
pub const CELL_XPATH: &str = r#"div[@class="rt-td"]"#;

/// Row locator for a 1-based row-group index (odd groups use the `-odd` stripe).
pub fn row_xpath_for_group(group_number: usize) -> &'static str {
    if group_number % 2 != 0 {
        ODD_ROW_XPATH
    } else {
        EVEN_ROW_XPATH
    }
}

// -----------------------------------------------
// ROW LAYOUT
// -----------------------------------------------
pub const COLUMN_NAMES: [&str; 8] = [
    "calls_oi_change",
    "calls_oi",
    "calls_ltp",
    "strike",
    "iv",
    "puts_ltp",
    "puts_oi",
    "puts_oi_change",
];
pub const COLUMN_COUNT: usize = COLUMN_NAMES.len();

pub const PLACEHOLDER_CELL: &str = "-";
pub const PLACEHOLDER_PERCENT: &str = "0%";

// -----------------------------------------------
// WINDOW AROUND MAX CALL OI
// -----------------------------------------------
pub const WINDOW_BEFORE: usize = 2;
pub const WINDOW_AFTER: usize = 5;

// -----------------------------------------------
// CHART OUTPUT
// -----------------------------------------------
pub const DEFAULT_OUTPUT_DIR: &str = "static";
pub const OI_COMPARISON_CHART: &str = "oi_comparison_graph.svg";
pub const OI_CHANGE_CHART: &str = "oi_change_graph.svg";
pub const CHART_SIZE: (u32, u32) = (640, 480);
pub const BAR_WIDTH: f64 = 0.35;

// -----------------------------------------------
// WEBDRIVER
// -----------------------------------------------
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const BROWSER_WINDOW_SIZE: &str = "--window-size=1440,900";
pub const WEBDRIVER_PROBE_TIMEOUT_SECS: u64 = 5;

// -----------------------------------------------
// SERVER
// -----------------------------------------------
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MODE: &str = "server";

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Get the execution mode from environment or default to server
pub fn get_execution_mode() -> String {
    std::env::var("OI_MODE").unwrap_or_else(|_| DEFAULT_MODE.to_string())
}

pub fn get_port_var() -> Option<String> {
    std::env::var("OI_PORT").ok()
}

pub fn get_webdriver_url() -> String {
    std::env::var("OI_WEBDRIVER_URL").unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string())
}

pub fn get_page_url() -> String {
    std::env::var("OI_PAGE_URL").unwrap_or_else(|_| SENSIBULL_OPTION_CHAIN_URL.to_string())
}

pub fn get_output_dir() -> String {
    std::env::var("OI_OUTPUT_DIR").unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
}

/// Headless unless OI_HEADLESS is explicitly "false" or "0"
pub fn is_headless() -> bool {
    !matches!(
        std::env::var("OI_HEADLESS").as_deref(),
        Ok("false") | Ok("0")
    )
}
