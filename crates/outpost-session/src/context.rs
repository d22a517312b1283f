//! Explicit dependency bundle handed to every session.
//!
//! Sessions reach the world only through this context — there are no
//! process-wide accessors for "the server" or "the registry". That keeps
//! the dependency surface visible at the constructor and makes sessions
//! trivially testable with recording doubles.

use std::sync::Arc;

use outpost_world::{
    CapabilityProvider, EntityRegistry, Persistence, RunLevelHandle,
};

/// Shared collaborators a session needs to do its job.
///
/// Cheap to clone — every field is an `Arc` or an atomic handle. One
/// context is built at server startup and cloned into each session.
#[derive(Clone)]
pub struct SessionContext {
    entities: Arc<dyn EntityRegistry>,
    capabilities: Arc<dyn CapabilityProvider>,
    persistence: Arc<dyn Persistence>,
    run_level: RunLevelHandle,
}

impl SessionContext {
    /// Bundles the world-side collaborators for session construction.
    pub fn new(
        entities: Arc<dyn EntityRegistry>,
        capabilities: Arc<dyn CapabilityProvider>,
        persistence: Arc<dyn Persistence>,
        run_level: RunLevelHandle,
    ) -> Self {
        Self {
            entities,
            capabilities,
            persistence,
            run_level,
        }
    }

    /// The entity registry verbs are routed through.
    pub fn entities(&self) -> &dyn EntityRegistry {
        self.entities.as_ref()
    }

    /// The provider of control capabilities granted on attach.
    pub fn capabilities(&self) -> &dyn CapabilityProvider {
        self.capabilities.as_ref()
    }

    /// The fire-and-forget persistence sink.
    pub fn persistence(&self) -> &dyn Persistence {
        self.persistence.as_ref()
    }

    /// The server's current run-level.
    pub fn run_level(&self) -> &RunLevelHandle {
        &self.run_level
    }
}
