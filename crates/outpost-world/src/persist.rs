//! Persistence seam: save-to-disk requested by sessions.

/// Fire-and-forget persistence for world state.
///
/// A session triggers saves (the `"save"` global verb) but never waits
/// for or observes the result; failures are the persistence subsystem's
/// to report through its own channels.
pub trait Persistence: Send + Sync {
    /// Requests a save of all world entities.
    fn save_world(&self);

    /// Requests a save of the map.
    fn save_map(&self);
}
