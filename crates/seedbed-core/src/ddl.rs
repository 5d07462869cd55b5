use crate::model::{ColumnSpec, TableSpec};

/// Renders the idempotent DDL statement for a table. Sent through the
/// schema-call fallback and printed as a manual hint when every automated
/// provisioning path fails.
pub fn create_table_sql(table: &str, columns: &[ColumnSpec]) -> String {
    let body = columns
        .iter()
        .map(render_column)
        .collect::<Vec<_>>()
        .join(",\n  ");
    format!("CREATE TABLE IF NOT EXISTS {table} (\n  {body}\n);")
}

/// Same rendering, taken from a full table spec.
pub fn table_sql(spec: &TableSpec) -> String {
    create_table_sql(&spec.name, &spec.columns)
}

fn render_column(column: &ColumnSpec) -> String {
    let mut out = format!("{} {}", column.name, column.ty.sql_name());
    if column.primary_key {
        out.push_str(" PRIMARY KEY");
    } else if !column.nullable {
        out.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        out.push_str(" DEFAULT ");
        out.push_str(default);
    }
    out
}
