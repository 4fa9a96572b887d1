//! Interactive sessions.
//!
//! Each session owns its history and current selection and nothing else is
//! shared between sessions. A session is guarded by its own async mutex, held
//! for the whole of a command (including the model call), so one session
//! processes one request at a time while separate sessions run in parallel.

pub mod handlers;
pub mod history;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::AnalysisRecord;
use history::{HistoryCache, IndexError};

#[derive(Debug)]
pub struct Session {
    history: HistoryCache,
    current: Option<usize>,
    last_active: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            history: HistoryCache::new(),
            current: None,
            last_active: Instant::now(),
        }
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    pub fn record_mut(&mut self, index: usize) -> Result<&mut AnalysisRecord, IndexError> {
        self.history.get_mut(index)
    }

    /// Appends a finished analysis and makes it the current selection.
    pub fn record_completed(&mut self, record: AnalysisRecord) -> usize {
        let index = self.history.append(record);
        self.current = Some(index);
        index
    }

    /// Marks an existing entry as the current selection.
    pub fn select(&mut self, index: usize) -> Result<&AnalysisRecord, IndexError> {
        self.history.get(index)?;
        self.current = Some(index);
        self.history.get(index)
    }

    /// Deletes an entry. The selection keeps pointing at the same record when
    /// an earlier entry goes away, and is cleared when its own record is removed.
    pub fn remove(&mut self, index: usize) -> Result<AnalysisRecord, IndexError> {
        let removed = self.history.remove(index)?;
        self.current = match self.current {
            Some(cur) if cur == index => None,
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<(usize, &AnalysisRecord)> {
        let index = self.current?;
        self.history.get(index).ok().map(|r| (index, r))
    }

    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// All live sessions, keyed by id.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Starts a new empty session. Idle sessions are swept first.
    pub async fn create(&self) -> Uuid {
        self.purge_idle().await;
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(Session::new())));
        info!("Session {id} started");
        id
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::SessionNotFound(id))
    }

    /// Ends a session, discarding its history.
    pub async fn end(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Session {id} ended"))
            .ok_or(AppError::SessionNotFound(id))
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle longer than the TTL. A session is kept while any
    /// request holds its handle, locked or not.
    async fn purge_idle(&self) {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Ok(session) => session.last_active.elapsed() < self.idle_ttl,
                Err(_) => true,
            }
        });
        let purged = before - sessions.len();
        if purged > 0 {
            info!("Purged {purged} idle session(s)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::history::tests::record;
    use super::*;

    #[test]
    fn test_record_completed_sets_current() {
        let mut session = Session::new();
        session.record_completed(record("R1"));
        let idx = session.record_completed(record("R2"));
        assert_eq!(idx, 1);
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(session.current().unwrap().1.job_title.as_deref(), Some("R2"));
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let mut session = Session::new();
        session.record_completed(record("R1"));
        assert!(session.select(4).is_err());
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn test_remove_earlier_entry_shifts_selection() {
        let mut session = Session::new();
        session.record_completed(record("R1"));
        session.record_completed(record("R2"));
        session.record_completed(record("R3"));
        session.remove(0).unwrap();
        let (idx, current) = session.current().unwrap();
        assert_eq!(idx, 1);
        assert_eq!(current.job_title.as_deref(), Some("R3"));
    }

    #[test]
    fn test_remove_selected_entry_clears_selection() {
        let mut session = Session::new();
        session.record_completed(record("R1"));
        session.record_completed(record("R2"));
        session.select(0).unwrap();
        session.remove(0).unwrap();
        assert!(session.current().is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_remove_later_entry_keeps_selection() {
        let mut session = Session::new();
        session.record_completed(record("R1"));
        session.record_completed(record("R2"));
        session.select(0).unwrap();
        session.remove(1).unwrap();
        assert_eq!(session.current_index(), Some(0));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.create().await;
        let b = store.create().await;

        store
            .get(a)
            .await
            .unwrap()
            .lock()
            .await
            .record_completed(record("only in a"));

        assert_eq!(store.get(a).await.unwrap().lock().await.history().len(), 1);
        assert!(store.get(b).await.unwrap().lock().await.history().is_empty());
    }

    #[tokio::test]
    async fn test_end_discards_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create().await;
        store.end(id).await.unwrap();
        assert!(matches!(
            store.get(id).await,
            Err(AppError::SessionNotFound(_))
        ));
        assert!(store.end(id).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_are_purged_on_create() {
        let store = SessionStore::new(Duration::from_secs(60));
        let stale = store.create().await;
        tokio::time::advance(Duration::from_secs(120)).await;
        let fresh = store.create().await;

        assert!(store.get(stale).await.is_err());
        assert!(store.get(fresh).await.is_ok());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetched_session_survives_purge_until_released() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create().await;
        let handle = store.get(id).await.unwrap();

        tokio::time::advance(Duration::from_secs(120)).await;
        store.create().await;
        assert!(store.get(id).await.is_ok());

        handle.lock().await.record_completed(record("kept"));
        drop(handle);
        tokio::time::advance(Duration::from_secs(120)).await;
        store.create().await;
        assert!(store.get(id).await.is_err());
    }
}
