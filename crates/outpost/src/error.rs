//! Unified error type for the Outpost framework.

use outpost_protocol::ProtocolError;
use outpost_session::SessionError;
use outpost_transport::TransportError;

/// Top-level error wrapping the crate-specific errors.
///
/// Users of the `outpost` meta-crate deal with this single type; the
/// `#[from]` impls let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum OutpostError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (registry bookkeeping).
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let outpost_err: OutpostError = err.into();
        assert!(matches!(outpost_err, OutpostError::Transport(_)));
        assert!(outpost_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::UnknownDiscriminant(0x7f);
        let outpost_err: OutpostError = err.into();
        assert!(matches!(outpost_err, OutpostError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::NotFound(
            outpost_transport::ConnectionId::new(1),
        );
        let outpost_err: OutpostError = err.into();
        assert!(matches!(outpost_err, OutpostError::Session(_)));
    }
}
