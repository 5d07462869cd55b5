use crate::client::StoreClient;
use crate::errors::StoreError;

/// What a cheap existence check learned about a table.
#[derive(Debug, Clone)]
pub enum TableProbe {
    Exists { rows: Option<u64> },
    NotExists,
    Indeterminate(StoreError),
}

impl TableProbe {
    pub fn exists(&self) -> bool {
        matches!(self, TableProbe::Exists { .. })
    }
}

/// Probes for a table and classifies the result. This never fails: an error
/// that names a missing relation means the table is absent, and anything
/// else (auth, transport, rate limits) is inconclusive rather than fatal.
pub async fn probe_table(store: &dyn StoreClient, table: &str) -> TableProbe {
    match store.probe_head(table).await {
        Ok(rows) => TableProbe::Exists { rows },
        Err(e) if e.is_undefined_table() => TableProbe::NotExists,
        Err(e) => {
            tracing::debug!(table, error = %e, "existence probe inconclusive");
            TableProbe::Indeterminate(e)
        }
    }
}
