//! Error types for the protocol layer.

/// Errors that can occur while decoding or encoding a frame.
///
/// The session layer maps these onto its drop policies: truncated or
/// non-UTF-8 frames are logged and dropped, unknown discriminants are a
/// forward-compatible no-op. None of them ever disconnect the peer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The frame ended before a required field was fully read.
    #[error("truncated frame: needed {needed} more bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// A string field was not valid UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8(#[source] std::string::FromUtf8Error),

    /// The sub-type discriminant is not one this server understands.
    /// Newer clients may legitimately send these.
    #[error("unknown message discriminant: 0x{0:02x}")]
    UnknownDiscriminant(u8),

    /// A string field exceeds the `u16` length prefix.
    #[error("string field too long: {0} bytes")]
    StringTooLong(usize),
}

impl ProtocolError {
    /// Returns `true` for the unknown-discriminant case, which callers
    /// treat as a silent no-op rather than a malformed frame.
    pub fn is_unknown_discriminant(&self) -> bool {
        matches!(self, ProtocolError::UnknownDiscriminant(_))
    }
}
