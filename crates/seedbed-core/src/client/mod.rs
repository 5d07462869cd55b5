use crate::errors::StoreError;
use crate::model::{ColumnSpec, SeedRecord};
use async_trait::async_trait;

/// Everything the bootstrap flow needs from a remote data store.
///
/// Errors are returned as [`StoreError`] rather than `anyhow` because the
/// decision procedure branches on classification (a missing table is a
/// normal outcome, not a failure).
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Cheap existence probe. `Ok(Some(n))` when the backend reports an
    /// exact row count, `Ok(None)` when it confirms the table without one.
    async fn probe_head(&self, table: &str) -> Result<Option<u64>, StoreError>;

    /// Invokes a named server-side creation procedure.
    async fn invoke_procedure(&self, name: &str) -> Result<(), StoreError>;

    /// Asks the backend to create the table from its declared columns.
    async fn create_table(&self, table: &str, columns: &[ColumnSpec]) -> Result<(), StoreError>;

    /// Inserts one batch of rows. All-or-nothing per call.
    async fn insert(&self, table: &str, records: &[SeedRecord]) -> Result<(), StoreError>;

    /// Reads back up to `limit` rows, used by post-run inspection.
    async fn fetch_sample(&self, table: &str, limit: usize)
        -> Result<Vec<SeedRecord>, StoreError>;

    fn backend_name(&self) -> &'static str;
}

pub mod fake;
pub mod postgrest;
