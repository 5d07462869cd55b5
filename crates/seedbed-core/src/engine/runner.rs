use crate::client::StoreClient;
use crate::ddl;
use crate::model::{SeedRecord, TableSpec};
use crate::probe::{probe_table, TableProbe};
use crate::provision::{provision, ProvisionOutcome};
use crate::report::{RunReport, TableReport};
use crate::seed::seed;
use std::sync::Arc;

/// One table's worth of work: its declared shape plus the rows to insert.
#[derive(Debug, Clone)]
pub struct TablePlan {
    pub spec: TableSpec,
    pub seeds: Vec<SeedRecord>,
}

impl TablePlan {
    pub fn new(spec: TableSpec, seeds: Vec<SeedRecord>) -> Self {
        TablePlan { spec, seeds }
    }
}

pub struct Runner {
    pub store: Arc<dyn StoreClient>,
}

impl Runner {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Runner { store }
    }

    /// Processes every plan in order and returns the accumulated report.
    /// Tables are independent: one table failing outright never stops the
    /// run, and the report always holds one entry per plan.
    pub async fn run(&self, plans: &[TablePlan]) -> RunReport {
        let mut report = RunReport::default();
        for plan in plans {
            let entry = self.run_table(plan).await;
            tracing::info!(
                table = %entry.table,
                outcome = %entry.effective_outcome(),
                inserted = entry.inserted,
                "table processed"
            );
            report.record(entry);
        }
        report
    }

    async fn run_table(&self, plan: &TablePlan) -> TableReport {
        let store = self.store.as_ref();
        let table = plan.spec.name.clone();

        let outcome = match probe_table(store, &table).await {
            TableProbe::Exists { rows } => {
                tracing::debug!(table = %table, rows = ?rows, "table present, skipping creation");
                ProvisionOutcome::AlreadyExists
            }
            TableProbe::NotExists => provision(store, &plan.spec).await,
            TableProbe::Indeterminate(e) => {
                // The creation paths tolerate an existing table, so an
                // unreadable probe downgrades to a warning instead of
                // aborting the table.
                tracing::warn!(table = %table, error = %e, "probe inconclusive, attempting creation anyway");
                provision(store, &plan.spec).await
            }
        };

        // Seeding runs regardless of the outcome above: on stores that
        // create tables on first insert, the batch is the last creation
        // path left.
        let seeded = seed(store, &plan.spec, &plan.seeds).await;

        let ddl_hint = if outcome.is_failed() {
            Some(ddl::table_sql(&plan.spec))
        } else {
            None
        };

        TableReport {
            table,
            outcome,
            attempted: seeded.attempted,
            inserted: seeded.inserted,
            error: seeded.error,
            ddl_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeStore;
    use crate::model::{ColumnSpec, ColumnType};

    fn plan(table: &str, procedure: Option<&str>, seeds: usize) -> TablePlan {
        let mut spec = TableSpec::new(table)
            .column(ColumnSpec::new("id", ColumnType::Serial).primary_key())
            .column(ColumnSpec::new("name", ColumnType::Text).not_null());
        if let Some(p) = procedure {
            spec = spec.creation_procedure(p);
        }
        let seeds = (0..seeds)
            .map(|i| match serde_json::json!({"name": format!("row {i}")}) {
                serde_json::Value::Object(map) => SeedRecord(map),
                _ => SeedRecord::default(),
            })
            .collect();
        TablePlan::new(spec, seeds)
    }

    #[tokio::test]
    async fn existing_table_is_left_alone_and_seeded() {
        let fake = FakeStore::new().with_table("projects");
        let runner = Runner::new(Arc::new(fake.clone()));

        let report = runner.run(&[plan("projects", Some("create_projects_table"), 5)]).await;

        let entry = &report.entries()[0];
        assert_eq!(entry.outcome, ProvisionOutcome::AlreadyExists);
        assert_eq!(entry.inserted, 5);
        // no creation path was exercised
        assert!(fake.calls().iter().all(|c| !c.starts_with("procedure:")));
        assert!(fake.calls().iter().all(|c| !c.starts_with("create_table:")));
    }

    #[tokio::test]
    async fn one_failing_table_does_not_stop_the_next() {
        let fake = FakeStore::new()
            .with_procedure("create_system_logs_table", "system_logs")
            .deny_schema_calls()
            .no_auto_create();
        let runner = Runner::new(Arc::new(fake.clone()));

        let report = runner
            .run(&[
                plan("projects", None, 5),
                plan("system_logs", Some("create_system_logs_table"), 7),
            ])
            .await;

        assert_eq!(report.len(), 2);
        assert!(report.entries()[0].outcome.is_failed());
        assert_eq!(
            report.entries()[1].outcome,
            ProvisionOutcome::CreatedViaProcedure
        );
        assert_eq!(report.entries()[1].inserted, 7);
    }

    #[tokio::test]
    async fn inconclusive_probe_still_attempts_creation() {
        let fake = FakeStore::new()
            .probe_failure(crate::errors::StoreError::message("auth expired").with_status(401));
        let runner = Runner::new(Arc::new(fake.clone()));

        let report = runner.run(&[plan("projects", None, 0)]).await;

        assert_eq!(
            report.entries()[0].outcome,
            ProvisionOutcome::CreatedViaSchemaCall
        );
        assert!(fake.calls().iter().any(|c| c == "create_table:projects"));
    }

    #[tokio::test]
    async fn failed_provisioning_carries_a_ddl_hint() {
        let fake = FakeStore::new().deny_schema_calls().no_auto_create();
        let runner = Runner::new(Arc::new(fake));

        let report = runner.run(&[plan("projects", None, 0)]).await;

        let hint = report.entries()[0].ddl_hint.as_deref().unwrap();
        assert!(hint.starts_with("CREATE TABLE IF NOT EXISTS projects"));
    }
}
