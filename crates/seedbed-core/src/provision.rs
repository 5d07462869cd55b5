use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::model::TableSpec;
use std::fmt;

/// How a table ended up existing, or why it still does not.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionOutcome {
    /// The probe found the table; nothing was created.
    AlreadyExists,
    /// The table's registered creation procedure ran.
    CreatedViaProcedure,
    /// The backend created the table from the declared columns.
    CreatedViaSchemaCall,
    /// No creation path succeeded, but the first insert brought the
    /// table into being anyway.
    CreatedImplicitlyByInsert,
    /// Every creation path failed; the reason is the last error seen.
    Failed(String),
}

impl ProvisionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ProvisionOutcome::Failed(_))
    }
}

impl fmt::Display for ProvisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionOutcome::AlreadyExists => write!(f, "already exists"),
            ProvisionOutcome::CreatedViaProcedure => write!(f, "created via procedure"),
            ProvisionOutcome::CreatedViaSchemaCall => write!(f, "created via schema call"),
            ProvisionOutcome::CreatedImplicitlyByInsert => {
                write!(f, "created implicitly by first insert")
            }
            ProvisionOutcome::Failed(reason) => write!(f, "provisioning failed: {reason}"),
        }
    }
}

enum Attempt {
    Procedure(String),
    SchemaCall,
}

/// Tries each creation path for a table in order and stops at the first
/// success. The procedure attempt only exists when the spec names one; the
/// schema call is always last. Exhausting the list yields `Failed` with the
/// last error, never a panic or early return.
pub async fn provision(store: &dyn StoreClient, spec: &TableSpec) -> ProvisionOutcome {
    let mut attempts = Vec::new();
    if let Some(procedure) = &spec.creation_procedure {
        attempts.push(Attempt::Procedure(procedure.clone()));
    }
    attempts.push(Attempt::SchemaCall);

    let mut last_err: Option<StoreError> = None;
    for attempt in attempts {
        match run_attempt(store, spec, &attempt).await {
            Ok(outcome) => return outcome,
            Err(e) => {
                tracing::debug!(table = %spec.name, error = %e, "creation attempt failed");
                last_err = Some(e);
            }
        }
    }

    let reason = last_err
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no creation path available".to_string());
    tracing::warn!(table = %spec.name, %reason, "all creation attempts exhausted");
    ProvisionOutcome::Failed(reason)
}

async fn run_attempt(
    store: &dyn StoreClient,
    spec: &TableSpec,
    attempt: &Attempt,
) -> Result<ProvisionOutcome, StoreError> {
    match attempt {
        Attempt::Procedure(name) => {
            store.invoke_procedure(name).await?;
            Ok(ProvisionOutcome::CreatedViaProcedure)
        }
        Attempt::SchemaCall => {
            store.create_table(&spec.name, &spec.columns).await?;
            Ok(ProvisionOutcome::CreatedViaSchemaCall)
        }
    }
}
