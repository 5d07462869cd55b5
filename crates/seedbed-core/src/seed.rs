use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::model::{SeedRecord, TableSpec};
use std::collections::BTreeSet;

/// Result of one seed batch. `inserted` is either zero or `attempted`;
/// the batch goes to the store in a single call and lands atomically.
#[derive(Debug, Clone)]
pub struct SeedOutcome {
    pub attempted: usize,
    pub inserted: usize,
    pub error: Option<StoreError>,
}

impl SeedOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Inserts the seed batch for a table. Records may carry fields beyond the
/// declared columns; those are logged and passed through untouched, since
/// the remote schema is the real authority on what fits.
pub async fn seed(
    store: &dyn StoreClient,
    spec: &TableSpec,
    records: &[SeedRecord],
) -> SeedOutcome {
    if records.is_empty() {
        return SeedOutcome {
            attempted: 0,
            inserted: 0,
            error: None,
        };
    }

    let stray: BTreeSet<String> = records
        .iter()
        .flat_map(|r| spec.stray_fields(r))
        .collect();
    if !stray.is_empty() {
        tracing::warn!(
            table = %spec.name,
            fields = ?stray,
            "seed records carry fields not in the declared columns"
        );
    }

    match store.insert(&spec.name, records).await {
        Ok(()) => SeedOutcome {
            attempted: records.len(),
            inserted: records.len(),
            error: None,
        },
        Err(e) => {
            tracing::warn!(table = %spec.name, error = %e, "seed batch rejected");
            SeedOutcome {
                attempted: records.len(),
                inserted: 0,
                error: Some(e),
            }
        }
    }
}
