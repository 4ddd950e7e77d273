// UI and formatting module

pub mod formatters;
pub mod report_formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_time, SeverityStyle};
pub use report_formatters::format_run_report;
