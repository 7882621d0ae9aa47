pub mod error;
pub mod logging;
pub mod sensibull;
pub mod utility;

// Re-exports for convenience
pub use error::ScrapeError;
pub use sensibull::{OptionRow, Window};
