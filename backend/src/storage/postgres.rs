use futures::future::BoxFuture;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::OnceCell;
use tracing::{error, info};
use uuid::Uuid;

use super::{SaveOutcome, StoreError, SubmissionRecord, SubmissionStore};

/// Postgres-backed store. The pool is opened on first use and then shared
/// by every request this process serves.
pub struct PostgresStore {
    database_url: Option<String>,
    max_connections: u32,
    pool: OnceCell<PgPool>,
    schema_sql: Vec<String>,
    insert_sql: String,
    lookup_sql: String,
}

impl PostgresStore {
    /// `table` must already be a validated bare identifier.
    pub fn new(database_url: Option<String>, table: &str, max_connections: u32) -> Self {
        let schema_sql = vec![
            format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id UUID PRIMARY KEY,
                    email TEXT NOT NULL,
                    original_email TEXT NOT NULL,
                    submitted_at TIMESTAMPTZ NOT NULL,
                    user_agent TEXT NOT NULL,
                    ip_address TEXT NOT NULL,
                    source TEXT NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )"
            ),
            format!("CREATE UNIQUE INDEX IF NOT EXISTS {table}_email_key ON {table} (email)"),
            format!("CREATE INDEX IF NOT EXISTS {table}_submitted_at_idx ON {table} (submitted_at)"),
            format!("CREATE INDEX IF NOT EXISTS {table}_created_at_idx ON {table} (created_at)"),
        ];

        Self {
            database_url,
            max_connections,
            pool: OnceCell::new(),
            schema_sql,
            insert_sql: format!(
                "INSERT INTO {table}
                    (id, email, original_email, submitted_at, user_agent, ip_address, source, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 ON CONFLICT (email) DO NOTHING
                 RETURNING id"
            ),
            lookup_sql: format!("SELECT id FROM {table} WHERE email = $1"),
        }
    }

    /// Returns the shared pool, connecting and preparing the schema on the first call.
    /// A failed attempt leaves the cell empty so the next request retries.
    pub async fn get_or_create_connection(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                let url = self
                    .database_url
                    .as_deref()
                    .ok_or(StoreError::Misconfigured("DATABASE_URL is not set"))?;

                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .connect(url)
                    .await?;

                for statement in &self.schema_sql {
                    sqlx::query(statement.as_str()).execute(&pool).await?;
                }

                info!("Connected to Postgres submission store");
                Ok::<_, StoreError>(pool)
            })
            .await
    }

    async fn existing_id(&self, pool: &PgPool, key: &str) -> Result<Option<Uuid>, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(&self.lookup_sql)
            .bind(key)
            .fetch_optional(pool)
            .await?;
        Ok(id)
    }
}

impl SubmissionStore for PostgresStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn save<'a>(&'a self, record: &'a SubmissionRecord) -> BoxFuture<'a, Result<SaveOutcome, StoreError>> {
        Box::pin(async move {
            let pool = self.get_or_create_connection().await?;
            let key = record.email.key();

            // The unique index decides; there is no separate existence check
            let inserted = sqlx::query_scalar::<_, Uuid>(&self.insert_sql)
                .bind(Uuid::new_v4())
                .bind(key)
                .bind(record.email.original())
                .bind(record.submitted_at)
                .bind(&record.user_agent)
                .bind(&record.ip_address)
                .bind(&record.source)
                .bind(record.received_at)
                .fetch_optional(pool)
                .await;

            match inserted {
                Ok(Some(id)) => Ok(SaveOutcome::Created { id: id.to_string() }),
                Ok(None) => {
                    let id = self.existing_id(pool, key).await?;
                    Ok(SaveOutcome::Duplicate {
                        id: id.map(|id| id.to_string()),
                    })
                }
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    Ok(SaveOutcome::Duplicate { id: None })
                }
                Err(e) => {
                    error!("Failed to insert submission: {}", e);
                    Err(e.into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::validation::validate_and_normalize;
    use time::OffsetDateTime;

    #[test]
    fn test_sql_uses_configured_table() {
        let store = PostgresStore::new(None, "promo_emails", 2);
        assert!(store.insert_sql.contains("INSERT INTO promo_emails"));
        assert!(store.insert_sql.contains("ON CONFLICT (email) DO NOTHING"));
        assert!(store.schema_sql[1].contains("UNIQUE INDEX IF NOT EXISTS promo_emails_email_key"));
        assert_eq!(store.schema_sql.len(), 4);
    }

    fn record(email: &str) -> SubmissionRecord {
        let now = OffsetDateTime::now_utc();
        SubmissionRecord {
            email: validate_and_normalize(email).unwrap(),
            submitted_at: now,
            user_agent: "test".into(),
            ip_address: "Unknown".into(),
            source: "test".into(),
            received_at: now,
        }
    }

    #[tokio::test]
    async fn test_missing_url_is_misconfiguration() {
        let store = PostgresStore::new(None, "emails", 1);

        let err = store.save(&record("a@b.co")).await.unwrap_err();
        assert!(matches!(err, StoreError::Misconfigured(_)));
        // Nothing was cached, so a later call tries again
        assert!(store.pool.get().is_none());
    }

    // Needs a reachable database; skipped when DATABASE_URL is unset.
    // Uses a throwaway table so it never touches real submissions.
    #[tokio::test]
    async fn test_unique_index_reports_duplicates() {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => return,
        };
        let table = format!("emails_test_{}", Uuid::new_v4().simple());
        let store = std::sync::Arc::new(PostgresStore::new(Some(url), &table, 4));

        let first = store.save(&record("Fan@Example.com")).await.unwrap();
        let SaveOutcome::Created { id } = first else {
            panic!("expected Created, got {:?}", first);
        };

        let again = store.save(&record("fan@example.com")).await.unwrap();
        assert_eq!(again, SaveOutcome::Duplicate { id: Some(id) });

        // Concurrent inserts of one new address: the index lets exactly one through
        let saves = (0..8).map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.save(&record("race@example.com")).await })
        });
        let outcomes = futures::future::join_all(saves).await;
        let created = outcomes
            .into_iter()
            .map(|joined| joined.unwrap().unwrap())
            .filter(|outcome| matches!(outcome, SaveOutcome::Created { .. }))
            .count();
        assert_eq!(created, 1);

        let pool = store.get_or_create_connection().await.unwrap();
        sqlx::query(&format!("DROP TABLE {}", table))
            .execute(pool)
            .await
            .unwrap();
    }
}
