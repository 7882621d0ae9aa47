use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Option chain table not found on page")]
    TableNotFound,

    #[error("Option chain table has no rows")]
    EmptyTable,

    #[error("No values found in row group {row_group}")]
    EmptyRow { row_group: usize },

    #[error("Malformed row {row_group}: expected 8 cells, got {cells}")]
    MalformedRow { row_group: usize, cells: usize },

    #[error("No valid calls_oi value found")]
    NoValidCallsOi,

    #[error("Strike {strike}: {field} value '{value}' is not numeric")]
    MalformedField {
        strike: String,
        field: &'static str,
        value: String,
    },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Chart render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

impl ScrapeError {
    /// True when the page simply had nothing usable this cycle, as opposed
    /// to a browser, render or filesystem fault.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            ScrapeError::TableNotFound
                | ScrapeError::EmptyTable
                | ScrapeError::EmptyRow { .. }
                | ScrapeError::MalformedRow { .. }
                | ScrapeError::NoValidCallsOi
                | ScrapeError::MalformedField { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_no_data() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<fantoccini::error::CmdError> for ScrapeError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        ScrapeError::Browser(err.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for ScrapeError {
    fn from(err: fantoccini::error::NewSessionError) -> Self {
        ScrapeError::Browser(err.to_string())
    }
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, Html(crate::sensibull::page::render_error(&self))).into_response()
    }
}
