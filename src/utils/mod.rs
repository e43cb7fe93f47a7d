//! Shared utilities: logging helpers, console summaries and timestamp parsing.

pub mod logging;
pub mod time;

pub use logging::{log_output_written, log_table_read, log_table_read_start};
pub use time::{hours_between, parse_timestamp};
