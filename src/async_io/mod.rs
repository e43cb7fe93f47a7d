//! Async table loading
//! Reads tables on the tokio runtime, several at a time when an analysis
//! needs more than one

pub mod batch_ops;
pub mod file_ops;
pub mod loader;
pub mod parallel_ops;

pub use batch_ops::{read_csv_async, read_parquet_async, read_table_async};
pub use file_ops::{locate_table_async, open_table_file_async};
pub use loader::AsyncTableLoader;
pub use parallel_ops::{TableBatches, load_tables_parallel};
