//! The per-connection session: state machine, entity binding, routing.
//!
//! One `PlayerSession` exists per live (or recently live) connection.
//! All of its handlers run to completion on the owning connection's
//! task — no suspension points, no locks on other sessions. Outbound
//! messages go through an unbounded channel drained by a single writer
//! task, which preserves program order toward the peer.

use std::sync::Arc;

use outpost_protocol::{
    ClientMessage, EntityId, GuiComponent, ServerMessage,
};
use outpost_transport::ConnectionId;
use outpost_world::{ControlKind, RunLevel, WorldEntity};

use crate::{SessionContext, SessionError};

/// Channel end a session pushes outbound messages into. The other end
/// is drained by the connection's writer task.
pub type SessionSender = tokio::sync::mpsc::UnboundedSender<ServerMessage>;

/// Where a session is in its lifecycle.
///
/// ```text
///   Connected ──(auto)──→ InLobby ──(joingame)──→ InGame
///       │                    │                      │
///       └────────────────────┴──────(disconnect)────┴──→ Disconnected
///
///   Zombie: created without a connection; never advances.
/// ```
///
/// `Zombie` and `Disconnected` are terminal — a reconnecting peer gets
/// a brand-new session under a fresh connection id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Placeholder session created without a real peer.
    Zombie,
    /// Transport accepted the peer; about to enter the lobby.
    Connected,
    /// Peer is in the lobby.
    InLobby,
    /// Peer has joined the running game.
    InGame,
    /// Transport reported the peer gone. Cleanup only; never reused.
    Disconnected,
}

/// An opaque job/role assignment. Set by round setup, read-only from
/// the session's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAssignment {
    /// Human-readable role title.
    pub title: String,
}

/// The outbound half of a connection: where encoded messages go and
/// which peer they belong to.
struct Outbound {
    conn_id: ConnectionId,
    sender: SessionSender,
}

/// Server-side record of one connected participant.
///
/// Owns the connection's protocol status and at most one attached world
/// entity. Ownership of the attachment is exclusive: an entity is
/// controlled by at most one session, enforced here by detaching before
/// every attach.
pub struct PlayerSession {
    ctx: SessionContext,
    /// `None` for zombie sessions; such a session never sends anything.
    connection: Option<Outbound>,
    attached: Option<Arc<dyn WorldEntity>>,
    name: String,
    status: SessionStatus,
    assigned_role: Option<JobAssignment>,
}

impl PlayerSession {
    /// Creates a session for a freshly accepted connection.
    ///
    /// The server places every new peer into the lobby before any
    /// explicit request, so this advances Connected → InLobby
    /// immediately and emits exactly one lobby notification.
    pub fn connect(
        ctx: SessionContext,
        conn_id: ConnectionId,
        sender: SessionSender,
    ) -> Self {
        let mut session = Self {
            ctx,
            connection: Some(Outbound { conn_id, sender }),
            attached: None,
            name: String::new(),
            status: SessionStatus::Connected,
            assigned_role: None,
        };
        tracing::info!(%conn_id, "player connected");
        session.join_lobby();
        session
    }

    /// Creates a placeholder session with no peer behind it.
    ///
    /// Used for internal/system actors. A zombie session never sends
    /// outbound messages and never advances out of
    /// [`SessionStatus::Zombie`].
    pub fn zombie(ctx: SessionContext) -> Self {
        Self {
            ctx,
            connection: None,
            attached: None,
            name: String::new(),
            status: SessionStatus::Zombie,
            assigned_role: None,
        }
    }

    // -- Inbound ----------------------------------------------------------

    /// Decodes and routes one session-scoped inbound frame (envelope
    /// family byte already stripped).
    ///
    /// Never fails toward the caller: malformed frames are logged at
    /// warn and dropped, unknown discriminants are a forward-compatible
    /// no-op.
    pub fn handle_message(&mut self, frame: &[u8]) {
        match ClientMessage::decode(frame) {
            Ok(ClientMessage::Verb { verb, target }) => {
                self.dispatch_verb(&verb, target);
            }
            Ok(ClientMessage::JoinLobby) => self.join_lobby(),
            Err(e) if e.is_unknown_discriminant() => {
                tracing::debug!(
                    conn = ?self.connection_id(),
                    error = %e,
                    "ignoring unrecognized session message"
                );
            }
            Err(e) => {
                tracing::warn!(
                    conn = ?self.connection_id(),
                    error = %e,
                    "dropping malformed session message"
                );
            }
        }
    }

    /// Routes a verb either to the session itself (global scope) or to
    /// the entity it targets.
    ///
    /// Unrecognized global verbs and unresolvable targets are dropped;
    /// neither terminates the session's processing.
    pub fn dispatch_verb(&mut self, verb: &str, target: EntityId) {
        tracing::debug!(verb, %target, "dispatching verb");

        if target.is_global() {
            match verb {
                "joingame" => self.join_game(),
                "save" => {
                    self.ctx.persistence().save_world();
                    self.ctx.persistence().save_map();
                }
                _ => {
                    tracing::debug!(verb, "ignoring unknown global verb");
                }
            }
        } else {
            match self.ctx.entities().get(target) {
                Some(entity) => entity.handle_verb(verb),
                None => {
                    let err = SessionError::TargetNotFound(target);
                    tracing::warn!(error = %err, "dropping verb dispatch");
                }
            }
        }
    }

    // -- Entity attachment ------------------------------------------------

    /// Binds this session to a world entity it will control.
    ///
    /// Any previous attachment is detached first — last attach wins,
    /// never an error. Grants the Input, Mover and Actor capabilities
    /// and notifies the peer with exactly one attach message carrying
    /// the entity's id.
    pub fn attach(&mut self, entity: Arc<dyn WorldEntity>) {
        self.detach();

        entity.set_controller(self.connection_id());
        for kind in ControlKind::ALL {
            entity.add_capability(self.ctx.capabilities().provide(kind));
        }

        let id = entity.id();
        self.attached = Some(entity);
        self.send(ServerMessage::Attach(id));
    }

    /// Withdraws control from the attached entity without ending it:
    /// clears the controller reference and removes the three control
    /// capabilities. No-op when nothing is attached.
    pub fn release_control(&mut self) {
        if let Some(entity) = self.attached.take() {
            entity.set_controller(None);
            for kind in ControlKind::ALL {
                entity.remove_capability(kind);
            }
        }
    }

    /// Releases the attached entity and fires its death hook.
    ///
    /// Losing player control ends the controlled body under this
    /// server's rules; callers that only want to withdraw control use
    /// [`release_control`](Self::release_control). Safe to call
    /// redundantly and from disconnect handling.
    pub fn detach(&mut self) {
        if let Some(entity) = self.attached.take() {
            entity.set_controller(None);
            entity.kill();
            for kind in ControlKind::ALL {
                entity.remove_capability(kind);
            }
        }
    }

    // -- State transitions ------------------------------------------------

    /// (Re-)enters the lobby and notifies the peer. Idempotent; safe to
    /// request repeatedly. No-op on zombie sessions.
    pub fn join_lobby(&mut self) {
        if self.connection.is_none() {
            return;
        }
        self.send(ServerMessage::JoinLobby);
        self.status = SessionStatus::InLobby;
    }

    /// Moves the session into the game, gated on the server run-level.
    ///
    /// Precondition failures (no connection, already in game, run-level
    /// not `Game`) are a silent no-op toward the peer; they surface only
    /// as debug events for diagnosability.
    pub fn join_game(&mut self) {
        if self.connection.is_none()
            || self.status == SessionStatus::InGame
        {
            tracing::debug!(
                status = ?self.status,
                "join-game ignored"
            );
            return;
        }
        let run_level = self.ctx.run_level().get();
        if run_level != RunLevel::Game {
            tracing::debug!(
                ?run_level,
                "join-game ignored outside Game run-level"
            );
            return;
        }

        self.send(ServerMessage::JoinGame);
        self.status = SessionStatus::InGame;
    }

    /// Handles the transport reporting this peer gone.
    ///
    /// Terminal: the session performs cleanup and is never reused.
    /// Safe to deliver more than once — the second delivery finds
    /// nothing left to release.
    pub fn on_disconnect(&mut self) {
        if self.status != SessionStatus::Disconnected {
            tracing::info!(
                conn = ?self.connection_id(),
                "player disconnected"
            );
        }
        self.status = SessionStatus::Disconnected;
        self.detach();
    }

    // -- Identity ---------------------------------------------------------

    /// Sets the display name and propagates it to the attached entity,
    /// if any.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        tracing::info!(
            conn = ?self.connection_id(),
            name,
            "player set name"
        );
        if let Some(entity) = &self.attached {
            entity.set_display_name(name);
        }
    }

    /// Assigns a job/role. Called by round setup, not by the session.
    pub fn assign_role(&mut self, role: JobAssignment) {
        self.assigned_role = Some(role);
    }

    // -- Outbound ---------------------------------------------------------

    /// Queues an outbound message for this session's own connection.
    ///
    /// Dropped silently when the connection is gone or was never there:
    /// a session must tolerate being asked to send after disconnect.
    pub fn send(&self, msg: ServerMessage) {
        let Some(conn) = &self.connection else {
            return;
        };
        if conn.sender.send(msg).is_err() {
            tracing::debug!(
                conn = %conn.conn_id,
                "dropping outbound message, transport gone"
            );
        }
    }

    /// Constructs a UI component message addressed to the peer's GUI.
    /// The caller appends the component payload, then hands the message
    /// to [`send`](Self::send).
    pub fn gui_message(&self, component: GuiComponent) -> ServerMessage {
        ServerMessage::gui(component)
    }

    // -- Accessors --------------------------------------------------------

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The display name, empty until set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The id of the entity this session controls, if any.
    pub fn attached_entity(&self) -> Option<EntityId> {
        self.attached.as_ref().map(|e| e.id())
    }

    /// The transport connection id; `None` for zombie sessions.
    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.connection.as_ref().map(|c| c.conn_id)
    }

    /// The assigned job/role, if round setup has assigned one.
    pub fn assigned_role(&self) -> Option<&JobAssignment> {
        self.assigned_role.as_ref()
    }
}

// =========================================================================
// Tests
// =========================================================================
