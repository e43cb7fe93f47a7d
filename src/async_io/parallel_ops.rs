//! Concurrent loading of several tables

use std::collections::BTreeMap;

use arrow::record_batch::RecordBatch;
use futures::stream::{self, StreamExt, TryStreamExt};
use itertools::Itertools;

use super::loader::AsyncTableLoader;
use crate::error::Result;
use crate::schema::MimicTable;

/// Tables read concurrently, keyed by table
pub type TableBatches = BTreeMap<MimicTable, Vec<RecordBatch>>;

/// Load several tables concurrently
///
/// At most one table per CPU is read at a time. Duplicate entries in
/// `tables` are read once. The first failing table aborts the load.
///
/// # Errors
/// Returns the error of the first table that fails to load
pub async fn load_tables_parallel(
    loader: &AsyncTableLoader,
    tables: &[MimicTable],
) -> Result<TableBatches> {
    let tables = tables.iter().copied().unique().collect_vec();
    log::info!(
        "Loading {} tables from {}: {}",
        tables.len(),
        loader.data_dir().display(),
        tables.iter().join(", ")
    );

    let loaded: Vec<(MimicTable, Vec<RecordBatch>)> = stream::iter(tables)
        .map(|table| async move { loader.load_batches(table).await.map(|b| (table, b)) })
        .buffer_unordered(num_cpus::get().max(1))
        .try_collect()
        .await?;

    Ok(loaded.into_iter().collect())
}
