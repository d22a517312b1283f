//! World-side seams consumed by Outpost sessions.
//!
//! The session layer never owns the simulated world — it controls
//! entities through the traits defined here, and the embedding game
//! provides the implementations. Entities and the registry are shared
//! across many sessions, so every trait takes `&self` and
//! implementations carry their own internal synchronization.
//!
//! ```text
//! Session ──(dyn EntityRegistry)──→ lookup
//!         ──(dyn WorldEntity)─────→ control, verbs, death
//!         ──(dyn CapabilityProvider)→ Input / Mover / Actor capabilities
//!         ──(dyn Persistence)─────→ fire-and-forget saves
//! ```

mod entity;
mod persist;
mod runlevel;

pub use entity::{
    Capability, CapabilityProvider, ControlKind, EntityRegistry, WorldEntity,
};
pub use persist::Persistence;
pub use runlevel::{RunLevel, RunLevelHandle};
