//! In-memory session store behind a serializing worker task.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};

use gatehouse_core::auth::{generate_session_id, AuthError, Result, Session, SessionId};

/// Commands accepted by the store worker. Each carries a one-shot reply
/// channel so callers block until the worker has processed their request.
enum StoreCommand {
    Put {
        session: Session,
        reply: oneshot::Sender<()>,
    },
    Get {
        id: SessionId,
        reply: oneshot::Sender<Option<Session>>,
    },
    Delete {
        id: SessionId,
        reply: oneshot::Sender<()>,
    },
}

/// Handle to the session-store worker.
///
/// The worker task owns the only reference to the id → session map and
/// processes one command at a time, so `generate`/`find`/`destroy` are
/// linearizable without locks. Handles are cheap to clone; all clones reach
/// the same worker. The worker exits once every handle has been dropped.
///
/// There is no timeout on the round-trip: a stalled worker stalls every
/// caller.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: mpsc::Sender<StoreCommand>,
}

/// Mailbox depth before senders start queuing behind each other.
const MAILBOX_CAPACITY: usize = 64;

impl SessionStore {
    /// Start the store worker and return a handle to it.
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::channel::<StoreCommand>(MAILBOX_CAPACITY);

        tokio::spawn(async move {
            let mut sessions: HashMap<SessionId, Session> = HashMap::new();
            tracing::debug!("session store worker started");

            while let Some(cmd) = rx.recv().await {
                match cmd {
                    StoreCommand::Put { session, reply } => {
                        sessions.insert(session.id.clone(), session);
                        // Ignore a dropped caller; the insert already happened.
                        let _ = reply.send(());
                    }
                    StoreCommand::Get { id, reply } => {
                        let _ = reply.send(sessions.get(&id).cloned());
                    }
                    StoreCommand::Delete { id, reply } => {
                        sessions.remove(&id);
                        let _ = reply.send(());
                    }
                }
            }

            tracing::debug!(remaining = sessions.len(), "session store worker stopped");
        });

        Self { tx }
    }

    /// Allocate a fresh session, store it, and return it.
    pub async fn generate(&self, provider: &str) -> Result<Session> {
        let session = Session::new(generate_session_id(), provider);

        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Put {
                session: session.clone(),
                reply,
            })
            .await
            .map_err(|_| AuthError::StoreUnavailable)?;
        rx.await.map_err(|_| AuthError::StoreUnavailable)?;

        Ok(session)
    }

    /// Look up a session by id. Absence is `None`, not an error.
    pub async fn find(&self, id: &SessionId) -> Result<Option<Session>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Get {
                id: id.clone(),
                reply,
            })
            .await
            .map_err(|_| AuthError::StoreUnavailable)?;
        rx.await.map_err(|_| AuthError::StoreUnavailable)
    }

    /// Remove a session. Removing an id that was never issued is a no-op.
    pub async fn destroy(&self, id: &SessionId) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Delete {
                id: id.clone(),
                reply,
            })
            .await
            .map_err(|_| AuthError::StoreUnavailable)?;
        rx.await.map_err(|_| AuthError::StoreUnavailable)
    }
}

#[cfg(test)]
impl SessionStore {
    /// Handle whose worker is already gone, for exercising failure paths.
    pub(crate) fn closed() -> Self {
        let (tx, _rx) = mpsc::channel(1);
        Self { tx }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[tokio::test]
    async fn generate_then_find_returns_session() {
        let store = SessionStore::spawn();

        let session = store.generate("google").await.unwrap();

        let found = store.find(&session.id).await.unwrap();
        assert!(found.is_some());
        let found = found.unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(found.provider, "google");
    }

    #[tokio::test]
    async fn find_nonexistent_returns_none() {
        let store = SessionStore::spawn();

        let result = store
            .find(&SessionId::new("nonexistent".to_string()))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn destroy_removes_session() {
        let store = SessionStore::spawn();

        let session = store.generate("google").await.unwrap();
        store.destroy(&session.id).await.unwrap();

        let found = store.find(&session.id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn destroy_nonexistent_is_noop() {
        let store = SessionStore::spawn();

        let survivor = store.generate("github").await.unwrap();

        store
            .destroy(&SessionId::new("never-issued".to_string()))
            .await
            .unwrap();

        // No error, and other sessions are untouched.
        assert!(store.find(&survivor.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn destroyed_id_is_not_resurrected_by_find() {
        let store = SessionStore::spawn();

        let session = store.generate("google").await.unwrap();
        store.destroy(&session.id).await.unwrap();
        store.destroy(&session.id).await.unwrap();

        assert!(store.find(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_generates_produce_distinct_sessions() {
        let store = SessionStore::spawn();

        let mut handles = Vec::new();
        for _ in 0..100 {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.generate("google").await.unwrap() },
            ));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            let session = handle.await.unwrap();
            assert!(ids.insert(session.id), "duplicate session id generated");
        }

        // No lost updates: every generated session is still findable.
        for id in &ids {
            assert!(store.find(id).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn clone_shares_worker() {
        let store = SessionStore::spawn();
        let clone = store.clone();

        let session = store.generate("google").await.unwrap();

        assert!(clone.find(&session.id).await.unwrap().is_some());
    }
}
