//! End-to-end bootstrap flows against the in-memory store.
//!
//! Covers the probe -> provision -> seed pipeline for the canonical
//! two-table setup: an existing table is reused, a missing one is created
//! through whichever path the backend supports, and seed batches land as
//! a whole or not at all.

use seedbed_core::client::fake::FakeStore;
use seedbed_core::engine::runner::{Runner, TablePlan};
use seedbed_core::model::{ColumnSpec, ColumnType, SeedRecord, TableSpec};
use seedbed_core::provision::ProvisionOutcome;
use std::sync::Arc;

fn row(value: serde_json::Value) -> SeedRecord {
    match value {
        serde_json::Value::Object(map) => SeedRecord(map),
        _ => SeedRecord::default(),
    }
}

fn projects_plan() -> TablePlan {
    let spec = TableSpec::new("projects")
        .creation_procedure("create_projects_table")
        .column(ColumnSpec::new("id", ColumnType::Serial).primary_key())
        .column(ColumnSpec::new("project_name", ColumnType::Text).not_null())
        .column(ColumnSpec::new("token_symbol", ColumnType::Text).not_null())
        .column(ColumnSpec::new("overall_rating", ColumnType::Float8));

    let seeds = (1..=5)
        .map(|i| {
            row(serde_json::json!({
                "project_name": format!("Project {i}"),
                "token_symbol": format!("TOK{i}"),
                "overall_rating": 7.5
            }))
        })
        .collect();

    TablePlan::new(spec, seeds)
}

fn logs_plan() -> TablePlan {
    let spec = TableSpec::new("system_logs")
        .creation_procedure("create_system_logs_table")
        .column(ColumnSpec::new("id", ColumnType::Serial).primary_key())
        .column(ColumnSpec::new("message", ColumnType::Text).not_null())
        .column(ColumnSpec::new("level", ColumnType::Text).not_null())
        .column(ColumnSpec::new("source", ColumnType::Text).not_null());

    let seeds = (1..=7)
        .map(|i| {
            row(serde_json::json!({
                "message": format!("entry {i}"),
                "level": "info",
                "source": "seedbed"
            }))
        })
        .collect();

    TablePlan::new(spec, seeds)
}

#[tokio::test]
async fn existing_table_is_reused_and_seeded() {
    let fake = FakeStore::new().with_rows(
        "projects",
        vec![row(serde_json::json!({"project_name": "old", "token_symbol": "OLD"}))],
    );
    let runner = Runner::new(Arc::new(fake.clone()));

    let report = runner.run(&[projects_plan()]).await;

    let entry = &report.entries()[0];
    assert_eq!(entry.outcome, ProvisionOutcome::AlreadyExists);
    assert_eq!((entry.attempted, entry.inserted), (5, 5));
    assert_eq!(fake.rows_in("projects"), 6, "seed rows append to existing ones");

    // reuse means no creation traffic at all
    let creation_calls = fake
        .calls()
        .iter()
        .filter(|c| c.starts_with("procedure:") || c.starts_with("create_table:"))
        .count();
    assert_eq!(creation_calls, 0);
}

#[tokio::test]
async fn registered_procedure_wins_without_touching_schema_calls() {
    let fake = FakeStore::new().with_procedure("create_projects_table", "projects");
    let runner = Runner::new(Arc::new(fake.clone()));

    let report = runner.run(&[projects_plan()]).await;

    let entry = &report.entries()[0];
    assert_eq!(entry.outcome, ProvisionOutcome::CreatedViaProcedure);
    assert_eq!(entry.inserted, 5);

    let schema_calls = fake
        .calls()
        .iter()
        .filter(|c| c.starts_with("create_table:"))
        .count();
    assert_eq!(schema_calls, 0, "first success must short-circuit the fallback");
}

#[tokio::test]
async fn failed_provisioning_still_seeds_through_implicit_creation() {
    // No procedures, no schema calls. Insert-time auto creation is the
    // only path left, which is exactly how the hosted API behaves.
    let fake = FakeStore::new().deny_schema_calls();
    let runner = Runner::new(Arc::new(fake.clone()));

    let report = runner.run(&[logs_plan()]).await;

    let entry = &report.entries()[0];
    assert!(entry.outcome.is_failed(), "recorded outcome keeps the failure");
    assert_eq!((entry.attempted, entry.inserted), (7, 7));
    assert_eq!(
        entry.effective_outcome(),
        ProvisionOutcome::CreatedImplicitlyByInsert
    );
    assert_eq!(fake.rows_in("system_logs"), 7);

    // every creation path was tried before seeding
    assert_eq!(
        fake.calls(),
        vec![
            "probe:system_logs",
            "procedure:create_system_logs_table",
            "create_table:system_logs",
            "insert:system_logs:7",
        ]
    );

    let line = entry.line();
    assert!(line.contains("provisioning failed"));
    assert!(line.contains("inserted 7/7"));
}

#[tokio::test]
async fn two_table_run_reports_in_processing_order() {
    let fake = FakeStore::new()
        .with_procedure("create_projects_table", "projects")
        .with_procedure("create_system_logs_table", "system_logs");
    let runner = Runner::new(Arc::new(fake));

    let report = runner.run(&[projects_plan(), logs_plan()]).await;

    assert_eq!(report.len(), 2);
    assert_eq!(report.rows_inserted(), 12);

    let lines = report.summarize();
    assert!(lines[0].starts_with("projects:"));
    assert!(lines[1].starts_with("system_logs:"));
}

#[tokio::test]
async fn seed_batch_is_all_or_nothing() {
    let fake = FakeStore::new()
        .with_table("projects")
        .with_table("system_logs")
        .fail_inserts();
    let runner = Runner::new(Arc::new(fake.clone()));

    let report = runner.run(&[projects_plan(), logs_plan()]).await;

    for entry in report.entries() {
        assert_eq!(entry.inserted, 0, "a rejected batch inserts nothing");
        assert!(entry.error.is_some());
    }
    assert_eq!(report.rows_inserted(), 0);
    assert_eq!(fake.rows_in("projects"), 0);
    assert_eq!(fake.rows_in("system_logs"), 0);
}
