use std::fmt;

/// Machine-readable error codes surfaced by PostgREST-style APIs.
pub mod codes {
    /// SQLSTATE for "relation does not exist".
    pub const UNDEFINED_TABLE: &str = "42P01";
    /// PostgREST code for an RPC function missing from the schema cache.
    pub const UNDEFINED_FUNCTION: &str = "PGRST202";
}

#[derive(Debug, Clone)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// An error reported by the remote data store, classified as far as the
/// response allows. Transport failures carry no code; API failures carry
/// whatever code the store returned.
#[derive(Debug, Clone)]
pub struct StoreError {
    pub code: Option<String>,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
    pub http_status: Option<u16>,
}

impl StoreError {
    pub fn message(message: impl Into<String>) -> Self {
        StoreError {
            code: None,
            message: message.into(),
            details: None,
            hint: None,
            http_status: None,
        }
    }

    pub fn coded(code: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError {
            code: Some(code.into()),
            ..StoreError::message(message)
        }
    }

    /// The error a PostgREST endpoint returns when the probed relation
    /// is missing from the exposed schema.
    pub fn undefined_table(table: &str) -> Self {
        StoreError::coded(
            codes::UNDEFINED_TABLE,
            format!("relation \"public.{table}\" does not exist"),
        )
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn is_undefined_table(&self) -> bool {
        self.code.as_deref() == Some(codes::UNDEFINED_TABLE)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "{}: ", code)?;
        }
        write!(f, "{}", self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}
