use chrono::{DateTime, Duration, SecondsFormat, Utc};
use seedbed_core::engine::runner::TablePlan;
use seedbed_core::model::{ColumnSpec, ColumnType, SeedRecord, TableSpec};
use serde_json::json;

/// The tables this tool manages, in processing order.
pub const TABLE_NAMES: [&str; 2] = ["projects", "system_logs"];

pub fn default_plans() -> Vec<TablePlan> {
    vec![
        TablePlan::new(projects_table(), sample_projects()),
        TablePlan::new(system_logs_table(), sample_system_logs()),
    ]
}

fn projects_table() -> TableSpec {
    TableSpec::new("projects")
        .creation_procedure("create_projects_table")
        .column(ColumnSpec::new("id", ColumnType::Serial).primary_key())
        .column(ColumnSpec::new("project_name", ColumnType::Text).not_null())
        .column(ColumnSpec::new("token_symbol", ColumnType::Text).not_null())
        .column(ColumnSpec::new("description", ColumnType::Text))
        .column(ColumnSpec::new("website_url", ColumnType::Text))
        .column(ColumnSpec::new("twitter_handle", ColumnType::Text))
        .column(
            ColumnSpec::new("discovery_date", ColumnType::TimestampTz)
                .not_null()
                .default_expr("now()"),
        )
        .column(ColumnSpec::new("overall_rating", ColumnType::Float8))
        .column(ColumnSpec::new("analysis_status", ColumnType::Text).default_expr("'pending'"))
}

fn system_logs_table() -> TableSpec {
    TableSpec::new("system_logs")
        .creation_procedure("create_system_logs_table")
        .column(ColumnSpec::new("id", ColumnType::Serial).primary_key())
        .column(ColumnSpec::new("message", ColumnType::Text).not_null())
        .column(ColumnSpec::new("level", ColumnType::Text).not_null())
        .column(ColumnSpec::new("source", ColumnType::Text).not_null())
        .column(
            ColumnSpec::new("created_at", ColumnType::TimestampTz)
                .not_null()
                .default_expr("now()"),
        )
}

fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn row(value: serde_json::Value) -> SeedRecord {
    match value {
        serde_json::Value::Object(map) => SeedRecord(map),
        _ => SeedRecord::default(),
    }
}

fn sample_projects() -> Vec<SeedRecord> {
    let now = Utc::now();
    vec![
        row(json!({
            "project_name": "LayerZero Protocol",
            "token_symbol": "ZRO",
            "description": "Cross-chain interoperability protocol enabling seamless messaging across blockchains",
            "website_url": "https://layerzero.network",
            "twitter_handle": "LayerZero_Labs",
            "discovery_date": iso(now),
            "overall_rating": 8.7,
            "analysis_status": "completed",
        })),
        row(json!({
            "project_name": "Celestia",
            "token_symbol": "TIA",
            "description": "Modular blockchain network with a focus on data availability",
            "website_url": "https://celestia.org",
            "twitter_handle": "CelestiaOrg",
            "discovery_date": iso(now - Duration::days(1)),
            "overall_rating": 9.2,
            "analysis_status": "completed",
        })),
        row(json!({
            "project_name": "zkSync",
            "token_symbol": "ZKS",
            "description": "Layer 2 scaling solution for Ethereum using zero-knowledge proofs",
            "website_url": "https://zksync.io",
            "twitter_handle": "zksync",
            "discovery_date": iso(now - Duration::days(2)),
            "overall_rating": 8.9,
            "analysis_status": "completed",
        })),
        row(json!({
            "project_name": "Sei Network",
            "token_symbol": "SEI",
            "description": "Specialized Layer 1 blockchain for trading",
            "website_url": "https://sei.io",
            "twitter_handle": "SeiNetwork",
            "discovery_date": iso(now - Duration::days(3)),
            "overall_rating": 7.5,
            "analysis_status": "completed",
        })),
        row(json!({
            "project_name": "Starknet",
            "token_symbol": "STRK",
            "description": "Layer 2 scaling solution for Ethereum using STARKs",
            "website_url": "https://starknet.io",
            "twitter_handle": "StarkNetEco",
            "discovery_date": iso(now - Duration::days(4)),
            "overall_rating": 8.6,
            "analysis_status": "completed",
        })),
    ]
}

fn sample_system_logs() -> Vec<SeedRecord> {
    let now = Utc::now();
    vec![
        row(json!({
            "message": "System started successfully",
            "level": "info",
            "source": "SYSTEM",
            "created_at": iso(now),
        })),
        row(json!({
            "message": "Twitter API connection established",
            "level": "info",
            "source": "TWITTER",
            "created_at": iso(now - Duration::seconds(600)),
        })),
        row(json!({
            "message": "Starting Twitter data collection",
            "level": "info",
            "source": "SCRAPER",
            "created_at": iso(now - Duration::seconds(590)),
        })),
        row(json!({
            "message": "Found 5 new potential projects",
            "level": "info",
            "source": "ANALYZER",
            "created_at": iso(now - Duration::seconds(580)),
        })),
        row(json!({
            "message": "Analysis complete for LayerZero Protocol",
            "level": "info",
            "source": "AI",
            "created_at": iso(now - Duration::seconds(570)),
        })),
        row(json!({
            "message": "All projects have been successfully saved to the database",
            "level": "info",
            "source": "DATABASE",
            "created_at": iso(now - Duration::seconds(510)),
        })),
        row(json!({
            "message": "System idle, waiting for next scheduled run",
            "level": "info",
            "source": "SYSTEM",
            "created_at": iso(now - Duration::seconds(500)),
        })),
    ]
}
