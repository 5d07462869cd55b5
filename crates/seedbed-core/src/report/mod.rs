use crate::errors::StoreError;
use crate::provision::ProvisionOutcome;

pub mod console;

/// Everything one table contributed to a bootstrap run.
///
/// `outcome` is what provisioning itself concluded. When provisioning
/// failed but the seed batch still landed (stores that create tables on
/// first insert), the recorded outcome stays `Failed` and the
/// reclassification is available through [`TableReport::effective_outcome`].
#[derive(Debug, Clone)]
pub struct TableReport {
    pub table: String,
    pub outcome: ProvisionOutcome,
    pub attempted: usize,
    pub inserted: usize,
    pub error: Option<StoreError>,
    /// Manual DDL, carried when no automated creation path worked.
    pub ddl_hint: Option<String>,
}

impl TableReport {
    pub fn effective_outcome(&self) -> ProvisionOutcome {
        match &self.outcome {
            ProvisionOutcome::Failed(_) if self.inserted > 0 => {
                ProvisionOutcome::CreatedImplicitlyByInsert
            }
            other => other.clone(),
        }
    }

    /// One human-readable line covering provisioning and seeding.
    pub fn line(&self) -> String {
        let mut line = format!("{}: {}", self.table, self.outcome);
        match &self.error {
            Some(e) => {
                line.push_str(&format!(
                    "; insert failed after {} attempted: {}",
                    self.attempted, e
                ));
            }
            None if self.attempted == 0 => line.push_str("; no seed records"),
            None => line.push_str(&format!("; inserted {}/{}", self.inserted, self.attempted)),
        }
        if self.outcome.is_failed() && self.inserted > 0 {
            line.push_str(" (table created implicitly by first insert)");
        }
        line
    }
}

/// Append-only record of a whole run, one entry per table in the order
/// the tables were processed.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    entries: Vec<TableReport>,
}

impl RunReport {
    pub fn record(&mut self, entry: TableReport) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TableReport] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows_inserted(&self) -> usize {
        self.entries.iter().map(|e| e.inserted).sum()
    }

    /// The per-table lines, in processing order.
    pub fn summarize(&self) -> Vec<String> {
        self.entries.iter().map(TableReport::line).collect()
    }
}
