use serde::{Deserialize, Serialize};

/// Declarative shape of a table the bootstrap run is responsible for.
///
/// The column list drives the schema-call fallback and the manual DDL hint;
/// the creation procedure, when present, is tried first during provisioning.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    pub creation_procedure: Option<String>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>) -> Self {
        TableSpec {
            name: name.into(),
            columns: Vec::new(),
            creation_procedure: None,
        }
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    pub fn creation_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.creation_procedure = Some(procedure.into());
        self
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Fields present in `record` but absent from the declared columns.
    /// Seeding tolerates these; callers may warn about them.
    pub fn stray_fields(&self, record: &SeedRecord) -> Vec<String> {
        record
            .keys()
            .filter(|k| !self.columns.iter().any(|c| c.name == **k))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ColumnType,
    pub nullable: bool,
    pub primary_key: bool,
    pub default: Option<String>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        ColumnSpec {
            name: name.into(),
            ty,
            nullable: true,
            primary_key: false,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Default expression rendered verbatim into DDL, e.g. `now()` or `'pending'`.
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Serial,
    Text,
    Float8,
    TimestampTz,
}

impl ColumnType {
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Serial => "SERIAL",
            ColumnType::Text => "TEXT",
            ColumnType::Float8 => "DOUBLE PRECISION",
            ColumnType::TimestampTz => "TIMESTAMPTZ",
        }
    }
}

/// One row to insert, kept as a free-form JSON object so seed data can
/// carry any column subset the remote store accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedRecord(pub serde_json::Map<String, serde_json::Value>);

impl SeedRecord {
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
