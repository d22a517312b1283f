//! Controllable entities and the capabilities a session grants them.

use std::sync::Arc;

use outpost_protocol::EntityId;
use outpost_transport::ConnectionId;

/// The kinds of control capability a session grants to the entity it
/// controls.
///
/// A closed enumeration rather than a string-keyed factory lookup: the
/// session's dependency surface is exactly these three kinds, and a typo
/// can't produce a silently missing capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Captures raw player input on the entity.
    Input,
    /// Translates input into movement.
    Mover,
    /// Drives the entity's actor/behavior state.
    Actor,
}

impl ControlKind {
    /// Every control capability a session grants on attach, in grant
    /// order.
    pub const ALL: [ControlKind; 3] =
        [ControlKind::Input, ControlKind::Mover, ControlKind::Actor];
}

/// A behavior module attachable to an entity.
///
/// Opaque to the session layer; it only needs to know which slot the
/// capability occupies.
pub trait Capability: Send + Sync {
    /// The slot this capability occupies on an entity.
    fn kind(&self) -> ControlKind;
}

/// Produces control-capability instances for a session to grant.
///
/// Injected into the session at construction; the game decides what a
/// "Mover" actually is.
pub trait CapabilityProvider: Send + Sync {
    /// Returns a fresh capability instance for the given slot.
    fn provide(&self, kind: ControlKind) -> Box<dyn Capability>;
}

/// A controllable object in the simulated world.
///
/// Shared across sessions behind an `Arc`; implementations synchronize
/// internally. All mutating methods are infallible from the session's
/// point of view — what a verb or a death actually does is game logic.
pub trait WorldEntity: Send + Sync {
    /// The entity's unique identifier.
    fn id(&self) -> EntityId;

    /// Records (or clears) the connection currently controlling this
    /// entity.
    fn set_controller(&self, conn: Option<ConnectionId>);

    /// Sets the entity's display name.
    fn set_display_name(&self, name: &str);

    /// Installs a capability in the slot reported by its
    /// [`Capability::kind`], replacing any previous occupant.
    fn add_capability(&self, capability: Box<dyn Capability>);

    /// Removes the capability in the given slot. Must tolerate the slot
    /// already being empty.
    fn remove_capability(&self, kind: ControlKind);

    /// Executes a named player action on this entity.
    fn handle_verb(&self, verb: &str);

    /// Termination hook: the entity's life ends. Called when player
    /// control is withdrawn.
    fn kill(&self);
}

/// Maps entity identifiers to live world entities.
///
/// Read by many sessions concurrently; implementations synchronize
/// internally.
pub trait EntityRegistry: Send + Sync {
    /// Looks up an entity by id. Returns `None` when the id does not
    /// resolve — the caller decides how to report that.
    fn get(&self, id: EntityId) -> Option<Arc<dyn WorldEntity>>;
}
