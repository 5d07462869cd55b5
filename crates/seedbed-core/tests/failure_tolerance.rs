//! Failure paths of the bootstrap flow.
//!
//! A table that cannot be provisioned or seeded must degrade into report
//! entries, never into a panic or an aborted run.

use seedbed_core::client::fake::FakeStore;
use seedbed_core::engine::runner::{Runner, TablePlan};
use seedbed_core::errors::StoreError;
use seedbed_core::model::{ColumnSpec, ColumnType, SeedRecord, TableSpec};
use seedbed_core::provision::ProvisionOutcome;
use std::sync::Arc;

fn row(value: serde_json::Value) -> SeedRecord {
    match value {
        serde_json::Value::Object(map) => SeedRecord(map),
        _ => SeedRecord::default(),
    }
}

fn plan(table: &str, seeds: usize) -> TablePlan {
    let spec = TableSpec::new(table)
        .column(ColumnSpec::new("id", ColumnType::Serial).primary_key())
        .column(ColumnSpec::new("name", ColumnType::Text).not_null());
    let seeds = (0..seeds)
        .map(|i| row(serde_json::json!({"name": format!("row {i}")})))
        .collect();
    TablePlan::new(spec, seeds)
}

#[tokio::test]
async fn every_path_failing_yields_a_failed_entry_not_a_crash() {
    let fake = FakeStore::new().deny_schema_calls().no_auto_create();
    let runner = Runner::new(Arc::new(fake));

    let report = runner.run(&[plan("projects", 5)]).await;

    let entry = &report.entries()[0];
    assert!(entry.outcome.is_failed());
    assert_eq!(entry.inserted, 0);
    assert!(entry.error.is_some(), "the seed failure is captured too");
    assert!(
        entry.effective_outcome().is_failed(),
        "no rows means no implicit-creation reclassification"
    );
}

#[tokio::test]
async fn failed_table_gets_a_manual_ddl_hint() {
    let fake = FakeStore::new().deny_schema_calls().no_auto_create();
    let runner = Runner::new(Arc::new(fake));

    let report = runner.run(&[plan("system_logs", 0)]).await;

    let hint = report.entries()[0]
        .ddl_hint
        .as_deref()
        .expect("failed provisioning carries DDL");
    assert!(hint.starts_with("CREATE TABLE IF NOT EXISTS system_logs"));
    assert!(hint.contains("id SERIAL PRIMARY KEY"));
}

#[tokio::test]
async fn inconclusive_probe_does_not_fail_the_table() {
    let fake = FakeStore::new()
        .probe_failure(StoreError::message("upstream timeout").with_status(504));
    let runner = Runner::new(Arc::new(fake.clone()));

    let report = runner.run(&[plan("projects", 3)]).await;

    let entry = &report.entries()[0];
    assert_eq!(entry.outcome, ProvisionOutcome::CreatedViaSchemaCall);
    assert_eq!(entry.inserted, 3);
}

#[tokio::test]
async fn earlier_failure_leaves_later_tables_untouched() {
    // projects has no creation path and no auto-create; system_logs is
    // healthy. The second table must come out fully provisioned.
    let fake = FakeStore::new()
        .with_procedure("create_system_logs_table", "system_logs")
        .deny_schema_calls()
        .no_auto_create();
    let runner = Runner::new(Arc::new(fake.clone()));

    let mut logs = plan("system_logs", 7);
    logs.spec.creation_procedure = Some("create_system_logs_table".to_string());

    let report = runner.run(&[plan("projects", 5), logs]).await;

    assert_eq!(report.len(), 2);
    assert!(report.entries()[0].outcome.is_failed());
    assert_eq!(
        report.entries()[1].outcome,
        ProvisionOutcome::CreatedViaProcedure
    );
    assert_eq!(report.entries()[1].inserted, 7);
    assert_eq!(fake.rows_in("system_logs"), 7);
}

#[tokio::test]
async fn report_lines_carry_the_classified_error() {
    let fake = FakeStore::new().deny_schema_calls().no_auto_create();
    let runner = Runner::new(Arc::new(fake));

    let report = runner.run(&[plan("projects", 2)]).await;
    let line = report.entries()[0].line();

    // the 42P01 from the rejected insert is visible to the operator
    assert!(line.contains("42P01"), "line was: {line}");
}
