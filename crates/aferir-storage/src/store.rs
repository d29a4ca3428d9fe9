//! Session persistence seam.
//!
//! The service layer talks to a [`SessionStore`]; production uses
//! [`S3SessionStore`], tests use [`crate::memory::MemorySessionStore`].

use std::future::Future;

use aws_sdk_s3::Client;
use tracing::{info, warn};
use uuid::Uuid;

use aferir_core::keys;
use aferir_core::models::narrative::SessionNarrative;
use aferir_core::models::session::{ScoredSession, SessionRecord};
use aferir_core::models::transaction::NarrativeTransaction;

use crate::error::StorageError;
use crate::objects;
use crate::state::{self, Versioned};

pub trait SessionStore: Send + Sync {
    /// Store a new session. Fails with `AlreadyExists` if the id is taken.
    fn create(&self, record: &SessionRecord) -> impl Future<Output = Result<String, StorageError>> + Send;

    fn load(
        &self,
        company_id: &str,
        id: Uuid,
    ) -> impl Future<Output = Result<Versioned<SessionRecord>, StorageError>> + Send;

    /// Overwrite a session read at `expected_etag`. Returns the new ETag.
    fn save_progress(
        &self,
        record: &SessionRecord,
        expected_etag: &str,
    ) -> impl Future<Output = Result<String, StorageError>> + Send;

    /// Write the scored outcome once. A second write is `AlreadyExists`.
    fn save_result(&self, scored: &ScoredSession) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn load_result(
        &self,
        company_id: &str,
        id: Uuid,
    ) -> impl Future<Output = Result<ScoredSession, StorageError>> + Send;

    /// Store a narrative and the transaction that produced it.
    fn save_narrative(
        &self,
        company_id: &str,
        narrative: &SessionNarrative,
        transaction: &NarrativeTransaction,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Store a transaction on its own, e.g. a failed generation.
    fn save_transaction(
        &self,
        company_id: &str,
        transaction: &NarrativeTransaction,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn load_narrative(
        &self,
        company_id: &str,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<SessionNarrative>, StorageError>> + Send;

    fn list(&self, company_id: &str) -> impl Future<Output = Result<Vec<SessionRecord>, StorageError>> + Send;
}

/// Sessions stored as JSON documents in one S3 bucket.
#[derive(Clone)]
pub struct S3SessionStore {
    client: Client,
    bucket: String,
}

impl S3SessionStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

impl SessionStore for S3SessionStore {
    async fn create(&self, record: &SessionRecord) -> Result<String, StorageError> {
        let key = keys::session(&record.company_id, record.id);
        state::create_state(&self.client, &self.bucket, &key, record).await
    }

    async fn load(&self, company_id: &str, id: Uuid) -> Result<Versioned<SessionRecord>, StorageError> {
        let key = keys::session(company_id, id);
        state::load_state(&self.client, &self.bucket, &key).await
    }

    async fn save_progress(&self, record: &SessionRecord, expected_etag: &str) -> Result<String, StorageError> {
        let key = keys::session(&record.company_id, record.id);
        state::save_state_if_match(&self.client, &self.bucket, &key, record, expected_etag).await
    }

    async fn save_result(&self, scored: &ScoredSession) -> Result<(), StorageError> {
        let key = keys::session_result(&scored.session.company_id, scored.session.id);
        state::create_state(&self.client, &self.bucket, &key, scored).await?;
        info!(session_id = %scored.session.id, key = %key, "result persisted");
        Ok(())
    }

    async fn load_result(&self, company_id: &str, id: Uuid) -> Result<ScoredSession, StorageError> {
        let key = keys::session_result(company_id, id);
        Ok(state::load_state(&self.client, &self.bucket, &key).await?.value)
    }

    async fn save_narrative(
        &self,
        company_id: &str,
        narrative: &SessionNarrative,
        transaction: &NarrativeTransaction,
    ) -> Result<(), StorageError> {
        self.save_transaction(company_id, transaction).await?;

        let key = keys::session_narrative(company_id, narrative.session_id);
        state::save_state(&self.client, &self.bucket, &key, narrative).await?;
        Ok(())
    }

    async fn save_transaction(&self, company_id: &str, transaction: &NarrativeTransaction) -> Result<(), StorageError> {
        let key = keys::narrative_transaction(company_id, transaction.id);
        state::save_state(&self.client, &self.bucket, &key, transaction).await?;
        Ok(())
    }

    async fn load_narrative(&self, company_id: &str, id: Uuid) -> Result<Option<SessionNarrative>, StorageError> {
        let key = keys::session_narrative(company_id, id);
        match state::load_state(&self.client, &self.bucket, &key).await {
            Ok(versioned) => Ok(Some(versioned.value)),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list(&self, company_id: &str) -> Result<Vec<SessionRecord>, StorageError> {
        let prefix = keys::sessions_prefix(company_id);
        let object_keys = objects::list_objects(&self.client, &self.bucket, &prefix).await?;

        let mut sessions = Vec::new();
        for key in &object_keys {
            match keys::parse_session_key(company_id, key) {
                Ok(Some(_)) => {}
                Ok(None) => continue,
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping malformed session key");
                    continue;
                }
            }
            let output = objects::get_object(&self.client, &self.bucket, key).await?;
            match serde_json::from_slice::<SessionRecord>(&output.body) {
                Ok(record) => sessions.push(record),
                Err(e) => warn!(key = %key, error = %e, "skipping unreadable session document"),
            }
        }
        Ok(sessions)
    }
}
