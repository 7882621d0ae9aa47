use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One strike row scraped from the option chain table.
///
/// Every field is kept as page text; numeric interpretation happens when the
/// window is selected and when chart data is prepared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRow {
    pub calls_oi_change: String,
    pub calls_oi: String,
    pub calls_ltp: String,
    pub strike: String,
    pub iv: String,
    pub puts_ltp: String,
    pub puts_oi: String,
    pub puts_oi_change: String,
}

impl OptionRow {
    /// Call OI as a float, `None` when the cell is not numeric
    pub fn calls_oi_value(&self) -> Option<f64> {
        parse_number(&self.calls_oi)
    }

    pub fn puts_oi_value(&self) -> Option<f64> {
        parse_number(&self.puts_oi)
    }

    pub fn strike_value(&self) -> Option<i64> {
        self.strike.trim().parse::<i64>().ok()
    }

    /// Call OI change with the trailing `%` stripped
    pub fn calls_oi_change_value(&self) -> Option<f64> {
        parse_percent(&self.calls_oi_change)
    }

    pub fn puts_oi_change_value(&self) -> Option<f64> {
        parse_percent(&self.puts_oi_change)
    }
}

/// Finite values only; `NaN` and `inf` count as unparseable
fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_percent(text: &str) -> Option<f64> {
    parse_number(text.trim().trim_end_matches('%'))
}

/// Contiguous slice of rows around the strike with the largest call OI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window {
    /// Index of the max call OI row in the full row list
    pub extremum_index: usize,
    pub max_calls_oi: f64,
    /// Index in the full row list of `rows[0]`
    pub start: usize,
    pub rows: Vec<OptionRow>,
}

impl Window {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row holding the max call OI
    pub fn extremum_row(&self) -> Option<&OptionRow> {
        self.extremum_index
            .checked_sub(self.start)
            .and_then(|i| self.rows.get(i))
    }
}

/// Result of one successful scrape-and-render cycle
#[derive(Debug, Clone, Serialize)]
pub struct ChainSnapshot {
    pub captured_at: DateTime<Local>,
    pub total_rows: usize,
    pub max_calls_oi_strike: String,
    pub max_calls_oi: f64,
    pub window: Vec<OptionRow>,
    pub oi_comparison_chart: String,
    pub oi_change_chart: String,
}
