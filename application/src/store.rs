//! Conference store
//!
//! Owns every live conference. Each conference lives behind a
//! [`ConferenceHandle`] that carries its state record together with the
//! primitives that serialize writers against it.

use crate::error::ConferenceError;
use roundtable_domain::{
    Conference, ConferenceConfig, ConferenceSnapshot, MessagePage, Stage,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

/// Default page size for [`ConferenceStore::list_messages`].
pub const DEFAULT_MESSAGE_LIMIT: usize = 50;

/// Shared access to one conference
pub struct ConferenceHandle {
    id: String,
    state: RwLock<Conference>,
    /// Held for the whole of an introduction, a round or the conclusion
    sequence: Mutex<()>,
    cancel: CancellationToken,
    started: AtomicBool,
}

impl ConferenceHandle {
    fn new(conference: Conference) -> Self {
        Self {
            id: conference.id().to_string(),
            state: RwLock::new(conference),
            sequence: Mutex::new(()),
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Conference> {
        self.state.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Conference> {
        self.state.write().await
    }

    pub async fn stage(&self) -> Stage {
        self.state.read().await.stage()
    }

    pub async fn snapshot(&self) -> ConferenceSnapshot {
        self.state.read().await.snapshot()
    }

    /// Exclusive right to run the next orchestration sequence.
    pub(crate) async fn lock_sequence(&self) -> MutexGuard<'_, ()> {
        self.sequence.lock().await
    }

    /// Returns true exactly once, for whoever starts the conference.
    pub fn try_mark_started(&self) -> bool {
        self.started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Request that no further discussion turns start.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Registry of live conferences
#[derive(Default)]
pub struct ConferenceStore {
    conferences: RwLock<HashMap<String, Arc<ConferenceHandle>>>,
}

impl ConferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `config` and register a new conference in `waiting`.
    pub async fn create(
        &self,
        config: ConferenceConfig,
    ) -> Result<Arc<ConferenceHandle>, ConferenceError> {
        let id = Uuid::new_v4().to_string();
        let conference = Conference::new(&id, config).map_err(ConferenceError::Validation)?;

        info!(
            "Created conference {} on \"{}\" ({} rounds, {} speakers)",
            id,
            conference.topic(),
            conference.rounds_total(),
            conference.speakers().count()
        );

        let handle = Arc::new(ConferenceHandle::new(conference));
        self.conferences
            .write()
            .await
            .insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    pub async fn handle(&self, id: &str) -> Result<Arc<ConferenceHandle>, ConferenceError> {
        self.conferences
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ConferenceError::NotFound(id.to_string()))
    }

    /// Full state of a conference.
    pub async fn get(&self, id: &str) -> Result<ConferenceSnapshot, ConferenceError> {
        Ok(self.handle(id).await?.snapshot().await)
    }

    /// Paginated transcript; `limit` defaults to 50 and `offset` to 0.
    pub async fn list_messages(
        &self,
        id: &str,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<MessagePage, ConferenceError> {
        let handle = self.handle(id).await?;
        let state = handle.read().await;
        Ok(state.messages_page(
            limit.unwrap_or(DEFAULT_MESSAGE_LIMIT),
            offset.unwrap_or(0),
        ))
    }

    pub async fn ids(&self) -> Vec<String> {
        self.conferences.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.conferences.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conferences.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{DomainError, Participant};

    fn config() -> ConferenceConfig {
        ConferenceConfig::new(
            "Q3 roadmap",
            vec![
                Participant::new("gm", "Alex", "General manager"),
                Participant::new("cfo", "Dana", "Financial manager"),
            ],
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = ConferenceStore::new();
        let handle = store.create(config()).await.unwrap();

        let snapshot = store.get(handle.id()).await.unwrap();
        assert_eq!(snapshot.topic, "Q3 roadmap");
        assert_eq!(snapshot.stage, Stage::Waiting);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_config() {
        let store = ConferenceStore::new();
        let config = ConferenceConfig::new(
            "Q3 roadmap",
            vec![Participant::new("gm", "Alex", "General manager")],
        );

        let err = store.create(config).await.err().unwrap();
        assert_eq!(
            err,
            ConferenceError::Validation(DomainError::NotEnoughParticipants {
                active: 1,
                required: 2
            })
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = ConferenceStore::new();
        assert_eq!(
            store.get("nope").await.unwrap_err(),
            ConferenceError::NotFound("nope".to_string())
        );
        assert!(store.list_messages("nope", None, None).await.is_err());
    }

    #[tokio::test]
    async fn test_list_messages_defaults() {
        let store = ConferenceStore::new();
        let handle = store.create(config()).await.unwrap();
        {
            let mut state = handle.write().await;
            for i in 0..60 {
                state.append_message("gm", format!("m{i}")).unwrap();
            }
        }

        let page = store.list_messages(handle.id(), None, None).await.unwrap();
        assert_eq!(page.total, 60);
        assert_eq!(page.messages.len(), DEFAULT_MESSAGE_LIMIT);

        let page = store
            .list_messages(handle.id(), Some(5), Some(58))
            .await
            .unwrap();
        assert_eq!(page.messages.len(), 2);
        assert_eq!(page.messages[0].text, "m58");
    }

    #[tokio::test]
    async fn test_try_mark_started_once() {
        let store = ConferenceStore::new();
        let handle = store.create(config()).await.unwrap();
        assert!(!handle.is_started());
        assert!(handle.try_mark_started());
        assert!(!handle.try_mark_started());
        assert!(handle.is_started());
    }
}
