//! Message types for the Outpost wire protocol.
//!
//! Every frame starts with a [`NetMessage`] family byte. Frames in the
//! `PlayerSession` family carry a [`SessionMessage`] sub-type byte next,
//! frames in the `PlayerUi` family a [`UiMessage`] byte. The byte values
//! are part of the wire contract and must not be renumbered.

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a world entity.
///
/// Newtype over the wire representation (`i32`, little-endian). The value
/// `0` is reserved: a verb targeted at [`EntityId::GLOBAL`] is addressed to
/// the session itself, not to any entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub i32);

impl EntityId {
    /// The reserved sentinel meaning "session/global scope".
    pub const GLOBAL: EntityId = EntityId(0);

    /// Returns `true` if this is the global-scope sentinel.
    pub fn is_global(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Discriminants
// ---------------------------------------------------------------------------

/// The outer envelope byte identifying a frame's message family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NetMessage {
    /// Session-scoped messages (verbs, lobby protocol, attach notices).
    PlayerSession = 0x01,
    /// Bare join-game notification, no further payload.
    JoinGame = 0x02,
    /// UI component messages.
    PlayerUi = 0x03,
}

impl NetMessage {
    /// Parses a family byte. Unknown bytes return `None` so callers can
    /// skip unrecognized families without erroring.
    pub fn from_byte(byte: u8) -> Option<NetMessage> {
        match byte {
            0x01 => Some(NetMessage::PlayerSession),
            0x02 => Some(NetMessage::JoinGame),
            0x03 => Some(NetMessage::PlayerUi),
            _ => None,
        }
    }

    /// The wire value of this family.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Sub-type byte for frames in the `PlayerSession` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionMessage {
    /// A verb request (client → server) — named action plus target id.
    Verb = 0x01,
    /// Lobby entry (both directions): request from the client,
    /// notification from the server.
    JoinLobby = 0x02,
    /// Attach notification (server → client) carrying an entity id.
    AttachToEntity = 0x03,
}

impl SessionMessage {
    pub fn from_byte(byte: u8) -> Option<SessionMessage> {
        match byte {
            0x01 => Some(SessionMessage::Verb),
            0x02 => Some(SessionMessage::JoinLobby),
            0x03 => Some(SessionMessage::AttachToEntity),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Sub-type byte for frames in the `PlayerUi` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UiMessage {
    /// A message addressed to one GUI component on the client.
    ComponentMessage = 0x01,
}

impl UiMessage {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// The GUI component a [`ServerMessage::Gui`] frame is addressed to.
///
/// Closed enumeration; the byte value rides on the wire after the
/// [`UiMessage::ComponentMessage`] sub-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GuiComponent {
    Chat = 0x01,
    Inventory = 0x02,
    HealthHud = 0x03,
    JobSelect = 0x04,
}

impl GuiComponent {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// An inbound session-scoped message, decoded from a `PlayerSession` frame
/// with the family byte already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// A named action request, optionally targeted at an entity.
    /// `target` of [`EntityId::GLOBAL`] means session/global scope.
    Verb { verb: String, target: EntityId },

    /// Request to (re-)enter the lobby. Idempotent on the server side.
    JoinLobby,
}

/// An outbound message constructed by a session for its own connection.
///
/// Construction never fails; encoding (see `codec`) never fails either.
/// Delivery is the transport's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// "You are now controlling this entity."
    Attach(EntityId),

    /// "You are in the lobby."
    JoinLobby,

    /// "You have joined the game." Bare family byte on the wire.
    JoinGame,

    /// A message for one client-side GUI component. The payload is opaque
    /// to the protocol layer and appended by the caller after construction.
    Gui {
        component: GuiComponent,
        payload: Vec<u8>,
    },
}

impl ServerMessage {
    /// Constructs a GUI component message with an empty payload.
    pub fn gui(component: GuiComponent) -> ServerMessage {
        ServerMessage::Gui {
            component,
            payload: Vec::new(),
        }
    }
}
