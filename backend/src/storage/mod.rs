//! Pluggable destinations for captured emails.
//!
//! The submission flow is identical for every deployment; only the final
//! write differs. `Postgres` and `Memory` give at-most-once capture per
//! normalized email, enforced by the store itself. `Log` and `Sheets`
//! are best effort: they accept everything and never report duplicates.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use shared::validation::NormalizedEmail;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::config::{Config, StorageBackend};

pub mod log_store;
pub mod memory;
pub mod postgres;
pub mod sheets;

pub use log_store::LogStore;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use sheets::SheetsRelay;

/// One captured email plus the context it arrived with.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub email: NormalizedEmail,
    pub submitted_at: OffsetDateTime,
    pub user_agent: String,
    pub ip_address: String,
    pub source: String,
    pub received_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created { id: String },
    /// The normalized email was already stored. Still a success.
    Duplicate { id: Option<String> },
    /// Taken by a best-effort backend with no persistence guarantee.
    Accepted { message: &'static str },
}

#[derive(Debug)]
pub enum StoreError {
    Misconfigured(&'static str),
    Database(sqlx::Error),
    Relay(reqwest::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misconfigured(what) => write!(f, "Store misconfigured: {}", what),
            Self::Database(e) => write!(f, "Database error: {}", e),
            Self::Relay(e) => write!(f, "Relay error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(e) => Some(e),
            Self::Relay(e) => Some(e),
            Self::Misconfigured(_) => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Relay(err)
    }
}

pub trait SubmissionStore: Send + Sync {
    fn name(&self) -> &'static str;

    fn save<'a>(&'a self, record: &'a SubmissionRecord) -> BoxFuture<'a, Result<SaveOutcome, StoreError>>;
}

pub fn build_store(config: &Config) -> Arc<dyn SubmissionStore> {
    let store: Arc<dyn SubmissionStore> = match config.backend {
        StorageBackend::Log => Arc::new(LogStore),
        StorageBackend::Memory => Arc::new(MemoryStore::default()),
        StorageBackend::Postgres => {
            if config.database_url.is_none() {
                warn!("STORAGE_BACKEND=postgres but DATABASE_URL is not set; submissions will fail");
            }
            Arc::new(PostgresStore::new(
                config.database_url.clone(),
                &config.submissions_table,
                config.db_max_connections,
            ))
        }
        StorageBackend::Sheets => Arc::new(SheetsRelay::new(config.sheets_url.clone())),
    };

    info!("Submission store: {}", store.name());
    store
}
