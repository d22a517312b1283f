//! Error types for the session layer.

use outpost_protocol::EntityId;
use outpost_transport::ConnectionId;

/// Errors that can occur in the session layer.
///
/// Malformed or unrecognized inbound data never surfaces here — the
/// session drops those locally by policy. These variants cover the
/// registry's bookkeeping and the one dispatch-level condition that is
/// logged before being dropped.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session exists for the given connection.
    #[error("no session for connection {0}")]
    NotFound(ConnectionId),

    /// The connection already has a live session. Connection ids are
    /// never reused, so this indicates a server-side bug.
    #[error("connection {0} already has a session")]
    AlreadyConnected(ConnectionId),

    /// A verb's target id did not resolve in the entity registry. The
    /// dispatch is logged and dropped; the session keeps processing.
    #[error("verb target {0} does not resolve to an entity")]
    TargetNotFound(EntityId),
}
