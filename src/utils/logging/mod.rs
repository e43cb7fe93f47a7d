//! Run reporting: log lines, loading spinners and console summaries

pub mod console;
pub mod log;
pub mod progress;

pub use console::print_ranked_counts;
pub use log::{log_output_written, log_table_read, log_table_read_start};
pub use progress::{create_spinner, finish_progress_bar};
