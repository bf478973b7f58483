use std::collections::hash_map::Entry;
use std::collections::HashMap;

use futures::future::BoxFuture;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{SaveOutcome, StoreError, SubmissionRecord, SubmissionStore};

#[derive(Debug, Clone)]
pub struct StoredSubmission {
    pub id: Uuid,
    pub record: SubmissionRecord,
}

/// Keeps submissions in process memory, keyed by normalized email.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, StoredSubmission>>,
}

impl MemoryStore {
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    pub async fn get(&self, key: &str) -> Option<StoredSubmission> {
        self.records.lock().await.get(key).cloned()
    }
}

impl SubmissionStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn save<'a>(&'a self, record: &'a SubmissionRecord) -> BoxFuture<'a, Result<SaveOutcome, StoreError>> {
        Box::pin(async move {
            let mut records = self.records.lock().await;

            // Check and insert under one lock
            match records.entry(record.email.key().to_string()) {
                Entry::Occupied(existing) => Ok(SaveOutcome::Duplicate {
                    id: Some(existing.get().id.to_string()),
                }),
                Entry::Vacant(slot) => {
                    let id = Uuid::new_v4();
                    slot.insert(StoredSubmission {
                        id,
                        record: record.clone(),
                    });
                    Ok(SaveOutcome::Created { id: id.to_string() })
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::validation::validate_and_normalize;
    use std::sync::Arc;
    use time::OffsetDateTime;

    fn record(email: &str) -> SubmissionRecord {
        let now = OffsetDateTime::now_utc();
        SubmissionRecord {
            email: validate_and_normalize(email).unwrap(),
            submitted_at: now,
            user_agent: "test".into(),
            ip_address: "127.0.0.1".into(),
            source: "test".into(),
            received_at: now,
        }
    }

    #[tokio::test]
    async fn test_second_save_is_duplicate_with_same_id() {
        let store = MemoryStore::default();

        let first = store.save(&record("User@Example.COM")).await.unwrap();
        let second = store.save(&record("user@example.com")).await.unwrap();

        let SaveOutcome::Created { id } = first else {
            panic!("expected created, got {:?}", first);
        };
        assert_eq!(second, SaveOutcome::Duplicate { id: Some(id) });
        assert_eq!(store.len().await, 1);

        let stored = store.get("user@example.com").await.unwrap();
        assert_eq!(stored.record.email.original(), "User@Example.COM");
    }

    #[tokio::test]
    async fn test_concurrent_identical_submissions_create_one_record() {
        let store = Arc::new(MemoryStore::default());

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.save(&record("race@example.com")).await.unwrap() })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if matches!(task.await.unwrap(), SaveOutcome::Created { .. }) {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}
