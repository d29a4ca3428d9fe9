//! In-memory [`SessionStore`] for tests and local runs.
//!
//! Documents are kept as JSON bytes under the same keys the S3 store uses,
//! with a per-key version counter standing in for the ETag.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use aferir_core::keys;
use aferir_core::models::narrative::SessionNarrative;
use aferir_core::models::session::{ScoredSession, SessionRecord};
use aferir_core::models::transaction::NarrativeTransaction;

use crate::error::StorageError;
use crate::state::Versioned;
use crate::store::SessionStore;

#[derive(Default)]
pub struct MemorySessionStore {
    objects: Mutex<BTreeMap<String, (Vec<u8>, u64)>>,
    unavailable: AtomicBool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `StorageError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Stored keys starting with `prefix`, in order.
    pub async fn keys_under(&self, prefix: &str) -> Vec<String> {
        self.objects
            .lock()
            .await
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Store raw bytes under `key`, bypassing serialization and write
    /// conditions. Seeds objects the service itself would never write.
    pub async fn put_raw(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        let mut objects = self.objects.lock().await;
        let key = key.into();
        let version = objects.get(&key).map_or(1, |(_, version)| version + 1);
        objects.insert(key, (body.into(), version));
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store marked unavailable".to_string()));
        }
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Versioned<T>, StorageError> {
        let objects = self.objects.lock().await;
        let (body, version) = objects.get(key).ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })?;
        Ok(Versioned {
            value: serde_json::from_slice(body)?,
            etag: version.to_string(),
        })
    }

    async fn put<T: Serialize>(&self, key: &str, value: &T, condition: Condition<'_>) -> Result<String, StorageError> {
        self.check_available()?;
        let body = serde_json::to_vec_pretty(value)?;
        let mut objects = self.objects.lock().await;

        let current = objects.get(key).map(|(_, version)| *version);
        match (condition, current) {
            (Condition::Absent, Some(_)) => {
                return Err(StorageError::AlreadyExists {
                    key: key.to_string(),
                });
            }
            (Condition::Matches(etag), Some(version)) if etag != version.to_string() => {
                return Err(StorageError::PreconditionFailed {
                    key: key.to_string(),
                });
            }
            (Condition::Matches(_), None) => {
                return Err(StorageError::NotFound {
                    key: key.to_string(),
                });
            }
            _ => {}
        }

        let version = current.unwrap_or(0) + 1;
        objects.insert(key.to_string(), (body, version));
        Ok(version.to_string())
    }
}

#[derive(Clone, Copy)]
enum Condition<'a> {
    None,
    Absent,
    Matches(&'a str),
}

impl SessionStore for MemorySessionStore {
    async fn create(&self, record: &SessionRecord) -> Result<String, StorageError> {
        let key = keys::session(&record.company_id, record.id);
        self.put(&key, record, Condition::Absent).await
    }

    async fn load(&self, company_id: &str, id: Uuid) -> Result<Versioned<SessionRecord>, StorageError> {
        self.get(&keys::session(company_id, id)).await
    }

    async fn save_progress(&self, record: &SessionRecord, expected_etag: &str) -> Result<String, StorageError> {
        let key = keys::session(&record.company_id, record.id);
        self.put(&key, record, Condition::Matches(expected_etag)).await
    }

    async fn save_result(&self, scored: &ScoredSession) -> Result<(), StorageError> {
        let key = keys::session_result(&scored.session.company_id, scored.session.id);
        self.put(&key, scored, Condition::Absent).await?;
        Ok(())
    }

    async fn load_result(&self, company_id: &str, id: Uuid) -> Result<ScoredSession, StorageError> {
        Ok(self.get(&keys::session_result(company_id, id)).await?.value)
    }

    async fn save_narrative(
        &self,
        company_id: &str,
        narrative: &SessionNarrative,
        transaction: &NarrativeTransaction,
    ) -> Result<(), StorageError> {
        self.save_transaction(company_id, transaction).await?;
        let key = keys::session_narrative(company_id, narrative.session_id);
        self.put(&key, narrative, Condition::None).await?;
        Ok(())
    }

    async fn save_transaction(&self, company_id: &str, transaction: &NarrativeTransaction) -> Result<(), StorageError> {
        let key = keys::narrative_transaction(company_id, transaction.id);
        self.put(&key, transaction, Condition::None).await?;
        Ok(())
    }

    async fn load_narrative(&self, company_id: &str, id: Uuid) -> Result<Option<SessionNarrative>, StorageError> {
        match self.get(&keys::session_narrative(company_id, id)).await {
            Ok(versioned) => Ok(Some(versioned.value)),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list(&self, company_id: &str) -> Result<Vec<SessionRecord>, StorageError> {
        let prefix = keys::sessions_prefix(company_id);
        let objects = self.objects.lock().await;

        let mut sessions = Vec::new();
        for (key, (body, _)) in objects.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            match keys::parse_session_key(company_id, key) {
                Ok(Some(_)) => match serde_json::from_slice::<SessionRecord>(body) {
                    Ok(record) => sessions.push(record),
                    Err(e) => warn!(key = %key, error = %e, "skipping unreadable session document"),
                },
                Ok(None) => {}
                Err(e) => warn!(key = %key, error = %e, "skipping malformed session key"),
            }
        }
        Ok(sessions)
    }
}
