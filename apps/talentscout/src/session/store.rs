use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::models::SessionState;

/// In-memory session registry shared by all handlers. Nothing is persisted.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> SessionState {
        let session = SessionState::new();
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        info!("Session {} created", session.id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionState, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        if self.sessions.write().await.remove(&id).is_none() {
            return Err(not_found(id));
        }
        info!("Session {id} removed");
        Ok(())
    }

    /// Replaces the session with a fresh one under the same id. Works on exited sessions too.
    pub async fn reset(&self, id: Uuid) -> Result<SessionState, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        *session = SessionState {
            id,
            ..SessionState::new()
        };
        info!("Session {id} reset");
        Ok(session.clone())
    }

    /// Applies `f` to a session that has not exited and bumps `updated_at` on success.
    pub async fn update_active<F, T>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut SessionState) -> Result<T, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        if session.is_exited() {
            return Err(AppError::SessionEnded(id));
        }
        apply(session, f)
    }

    /// Like `update_active` but also reaches exited sessions. Used to settle work that
    /// started before the session ended; `f` decides what may still change.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut SessionState) -> Result<T, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        apply(session, f)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn apply<F, T>(session: &mut SessionState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&mut SessionState) -> Result<T, AppError>,
{
    // Bumped before `f` runs so snapshots taken inside it carry the new timestamp.
    let previous = session.updated_at;
    session.updated_at = Utc::now();
    f(session).map_err(|e| {
        session.updated_at = previous;
        e
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
