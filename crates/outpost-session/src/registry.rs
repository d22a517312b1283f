//! The session registry: maps live connections to their sessions.
//!
//! One registry per server. It is not thread-safe by itself — the
//! server owns it behind a single lock and drives it from the
//! connection handler tasks. Sessions inside it are only ever touched
//! through the registry, which keeps each session's state owned by one
//! handling context at a time.

use std::collections::HashMap;

use outpost_transport::ConnectionId;

use crate::{
    PlayerSession, SessionContext, SessionError, SessionSender,
    SessionStatus,
};

/// Owns every live (or recently live) session, keyed by connection id.
pub struct SessionRegistry {
    sessions: HashMap<ConnectionId, PlayerSession>,
    ctx: SessionContext,
}

impl SessionRegistry {
    /// Creates an empty registry; every session it creates will share
    /// the given context.
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            sessions: HashMap::new(),
            ctx,
        }
    }

    /// Creates the session for a freshly accepted connection. The new
    /// session enters the lobby immediately.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyConnected`] if a session already
    /// exists under this id — connection ids are never reused, so that
    /// is a server-side bug, not a client condition.
    pub fn create(
        &mut self,
        conn_id: ConnectionId,
        sender: SessionSender,
    ) -> Result<&PlayerSession, SessionError> {
        if self.sessions.contains_key(&conn_id) {
            return Err(SessionError::AlreadyConnected(conn_id));
        }

        let session =
            PlayerSession::connect(self.ctx.clone(), conn_id, sender);
        self.sessions.insert(conn_id, session);

        tracing::info!(%conn_id, "session created");
        Ok(self.sessions.get(&conn_id).expect("just inserted"))
    }

    /// Routes one inbound session-scoped frame to the owning session.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] for an unknown connection.
    /// Frame-level problems never surface here; the session drops them
    /// locally.
    pub fn handle_message(
        &mut self,
        conn_id: ConnectionId,
        frame: &[u8],
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(&conn_id)
            .ok_or(SessionError::NotFound(conn_id))?;
        session.handle_message(frame);
        Ok(())
    }

    /// Delivers the transport's disconnect notification: the session
    /// becomes `Disconnected` and releases its attached entity. Safe to
    /// call more than once for the same connection.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the session was already
    /// reaped (or never existed).
    pub fn disconnect(
        &mut self,
        conn_id: ConnectionId,
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(&conn_id)
            .ok_or(SessionError::NotFound(conn_id))?;
        session.on_disconnect();
        Ok(())
    }

    /// Removes every disconnected session, returning the reaped ids.
    ///
    /// Disconnect and reap are separate steps so higher layers can
    /// react to a disconnect (e.g. announce it) before the record is
    /// deleted.
    pub fn reap(&mut self) -> Vec<ConnectionId> {
        let dead: Vec<ConnectionId> = self
            .sessions
            .iter()
            .filter(|(_, s)| s.status() == SessionStatus::Disconnected)
            .map(|(id, _)| *id)
            .collect();
        for id in &dead {
            self.sessions.remove(id);
            tracing::debug!(conn_id = %id, "session reaped");
        }
        dead
    }

    /// Looks up a session by connection id.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<&PlayerSession> {
        self.sessions.get(conn_id)
    }

    /// Mutable lookup, for driving attach/detach and round setup.
    pub fn get_mut(
        &mut self,
        conn_id: &ConnectionId,
    ) -> Option<&mut PlayerSession> {
        self.sessions.get_mut(conn_id)
    }

    /// The ids of every session currently in the registry. Round setup
    /// uses this to walk the lobby when assigning roles and bodies.
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.sessions.keys().copied().collect()
    }

    /// Number of sessions (any status).
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
