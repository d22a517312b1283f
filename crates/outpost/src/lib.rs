//! # Outpost
//!
//! Session server framework for live simulation games.
//!
//! Outpost manages the lifecycle of every remote participant's
//! connection and routes their intent into the simulated world. The
//! embedding game provides the world — entities, capabilities,
//! persistence — through the trait seams in `outpost-world`, and the
//! framework handles transport, sessions, and verb routing.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use outpost::prelude::*;
//!
//! # async fn run(entities: Arc<dyn EntityRegistry>,
//! #              capabilities: Arc<dyn CapabilityProvider>,
//! #              persistence: Arc<dyn Persistence>) -> Result<(), OutpostError> {
//! let server = OutpostServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .run_level(RunLevel::Lobby)
//!     .build(entities, capabilities, persistence)
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::OutpostError;
pub use server::{OutpostServer, OutpostServerBuilder};

/// The user-facing surface, re-exported in one place.
pub mod prelude {
    pub use crate::{OutpostError, OutpostServer, OutpostServerBuilder};
    pub use outpost_protocol::{
        ClientMessage, EntityId, GuiComponent, NetMessage, ServerMessage,
    };
    pub use outpost_session::{
        JobAssignment, PlayerSession, SessionContext, SessionError,
        SessionRegistry, SessionStatus,
    };
    pub use outpost_transport::{Connection, ConnectionId, Transport};
    pub use outpost_world::{
        Capability, CapabilityProvider, ControlKind, EntityRegistry,
        Persistence, RunLevel, RunLevelHandle, WorldEntity,
    };
}
