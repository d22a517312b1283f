//! Player session management for Outpost.
//!
//! This crate owns the lifecycle of one remote participant's connection
//! and routes that participant's intent into the world:
//!
//! 1. **State machine** — connection → lobby → in-game → disconnected
//!    ([`PlayerSession`], [`SessionStatus`])
//! 2. **Entity binding** — a session controls at most one world entity
//!    at a time (attach/detach, capability grants)
//! 3. **Verb routing** — inbound action requests are dispatched either
//!    as session-global commands or to a target entity
//! 4. **Session table** — [`SessionRegistry`] maps live connections to
//!    their sessions
//!
//! # How it fits in the stack
//!
//! ```text
//! Server (above)   ← feeds inbound frames, drains outbound messages
//!     ↕
//! Session (this crate)  ← protocol state, entity binding, routing
//!     ↕
//! World traits (below)  ← entities, capabilities, persistence
//! ```
//!
//! All mutable session state is owned exclusively by the connection's
//! handling context; cross-session effects go through message sends,
//! never through another session's fields.

mod context;
mod error;
mod registry;
mod session;

#[cfg(test)]
pub(crate) mod testutil;

pub use context::SessionContext;
pub use error::SessionError;
pub use registry::SessionRegistry;
pub use session::{
    JobAssignment, PlayerSession, SessionSender, SessionStatus,
};
