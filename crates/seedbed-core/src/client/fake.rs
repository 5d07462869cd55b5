use super::StoreClient;
use crate::errors::{codes, StoreError};
use crate::model::{ColumnSpec, SeedRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory store used by tests and by `--store fake`.
///
/// Behavior switches let a test script each failure mode the real API
/// exhibits: missing tables, unregistered procedures, rejected inserts and
/// inconclusive probes. Every call is appended to a log so tests can assert
/// which remote operations a flow did (and did not) perform.
#[derive(Clone)]
pub struct FakeStore {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    tables: BTreeMap<String, Vec<SeedRecord>>,
    // creation procedure -> table it creates
    procedures: BTreeMap<String, String>,
    allow_schema_calls: bool,
    auto_create_on_insert: bool,
    fail_inserts: bool,
    probe_error: Option<StoreError>,
    calls: Vec<String>,
}

impl Default for Inner {
    fn default() -> Self {
        Inner {
            tables: BTreeMap::new(),
            procedures: BTreeMap::new(),
            allow_schema_calls: true,
            auto_create_on_insert: true,
            fail_inserts: false,
            probe_error: None,
            calls: Vec::new(),
        }
    }
}

impl FakeStore {
    pub fn new() -> Self {
        FakeStore {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pre-creates an empty table.
    pub fn with_table(self, name: &str) -> Self {
        self.lock().tables.insert(name.to_string(), Vec::new());
        self
    }

    /// Pre-creates a table holding `rows`.
    pub fn with_rows(self, name: &str, rows: Vec<SeedRecord>) -> Self {
        self.lock().tables.insert(name.to_string(), rows);
        self
    }

    /// Registers a creation procedure that, when invoked, creates `table`.
    pub fn with_procedure(self, procedure: &str, table: &str) -> Self {
        self.lock()
            .procedures
            .insert(procedure.to_string(), table.to_string());
        self
    }

    /// Makes schema calls fail the way an API without `exec_sql` does.
    pub fn deny_schema_calls(self) -> Self {
        self.lock().allow_schema_calls = false;
        self
    }

    /// Disables implicit table creation on first insert.
    pub fn no_auto_create(self) -> Self {
        self.lock().auto_create_on_insert = false;
        self
    }

    /// Makes every insert fail.
    pub fn fail_inserts(self) -> Self {
        self.lock().fail_inserts = true;
        self
    }

    /// Forces every probe to fail with `err`, regardless of table state.
    pub fn probe_failure(self, err: StoreError) -> Self {
        self.lock().probe_error = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.lock().tables.contains_key(name)
    }

    pub fn rows_in(&self, name: &str) -> usize {
        self.lock().tables.get(name).map_or(0, |rows| rows.len())
    }
}

impl Default for FakeStore {
    fn default() -> Self {
        FakeStore::new()
    }
}

#[async_trait]
impl StoreClient for FakeStore {
    async fn probe_head(&self, table: &str) -> Result<Option<u64>, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("probe:{table}"));

        if let Some(err) = &inner.probe_error {
            return Err(err.clone());
        }
        match inner.tables.get(table) {
            Some(rows) => Ok(Some(rows.len() as u64)),
            None => Err(StoreError::undefined_table(table)),
        }
    }

    async fn invoke_procedure(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("procedure:{name}"));

        match inner.procedures.get(name).cloned() {
            Some(table) => {
                inner.tables.entry(table).or_default();
                Ok(())
            }
            None => Err(StoreError::coded(
                codes::UNDEFINED_FUNCTION,
                format!("Could not find the function public.{name} without parameters in the schema cache"),
            )),
        }
    }

    async fn create_table(&self, table: &str, _columns: &[ColumnSpec]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("create_table:{table}"));

        if !inner.allow_schema_calls {
            return Err(StoreError::coded(
                codes::UNDEFINED_FUNCTION,
                "Could not find the function public.exec_sql(query) in the schema cache",
            ));
        }
        inner.tables.entry(table.to_string()).or_default();
        Ok(())
    }

    async fn insert(&self, table: &str, records: &[SeedRecord]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("insert:{table}:{}", records.len()));

        if inner.fail_inserts {
            return Err(StoreError::message(format!(
                "insert into {table} rejected"
            )));
        }
        if !inner.tables.contains_key(table) && !inner.auto_create_on_insert {
            return Err(StoreError::undefined_table(table));
        }
        inner
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(records.iter().cloned());
        Ok(())
    }

    async fn fetch_sample(
        &self,
        table: &str,
        limit: usize,
    ) -> Result<Vec<SeedRecord>, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("fetch:{table}"));

        match inner.tables.get(table) {
            Some(rows) => Ok(rows.iter().take(limit).cloned().collect()),
            None => Err(StoreError::undefined_table(table)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}
