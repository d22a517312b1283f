//! Binary codec for the Outpost wire format.
//!
//! Field layout conventions, in read order:
//!
//! - discriminant bytes are single `u8`s
//! - strings are a `u16` little-endian length prefix followed by UTF-8 bytes
//! - entity ids are `i32` little-endian
//!
//! Decoding validates every read against the remaining buffer; a short
//! frame yields [`ProtocolError::Truncated`] instead of a panic.

use bytes::{Buf, BufMut, BytesMut};

use crate::types::{
    ClientMessage, EntityId, NetMessage, ServerMessage, SessionMessage,
    UiMessage,
};
use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Wire primitives
// ---------------------------------------------------------------------------

fn get_u8(buf: &mut &[u8]) -> Result<u8, ProtocolError> {
    if buf.remaining() < 1 {
        return Err(ProtocolError::Truncated {
            needed: 1,
            remaining: 0,
        });
    }
    Ok(buf.get_u8())
}

fn get_i32(buf: &mut &[u8]) -> Result<i32, ProtocolError> {
    if buf.remaining() < 4 {
        return Err(ProtocolError::Truncated {
            needed: 4,
            remaining: buf.remaining(),
        });
    }
    Ok(buf.get_i32_le())
}

fn get_str(buf: &mut &[u8]) -> Result<String, ProtocolError> {
    if buf.remaining() < 2 {
        return Err(ProtocolError::Truncated {
            needed: 2,
            remaining: buf.remaining(),
        });
    }
    let len = buf.get_u16_le() as usize;
    if buf.remaining() < len {
        return Err(ProtocolError::Truncated {
            needed: len,
            remaining: buf.remaining(),
        });
    }
    let raw = buf[..len].to_vec();
    buf.advance(len);
    String::from_utf8(raw).map_err(ProtocolError::InvalidUtf8)
}

fn put_str(buf: &mut BytesMut, s: &str) -> Result<(), ProtocolError> {
    let len = u16::try_from(s.len())
        .map_err(|_| ProtocolError::StringTooLong(s.len()))?;
    buf.put_u16_le(len);
    buf.put_slice(s.as_bytes());
    Ok(())
}

// ---------------------------------------------------------------------------
// ClientMessage
// ---------------------------------------------------------------------------

impl ClientMessage {
    /// Decodes a session-scoped frame with the envelope family byte
    /// already stripped — the first byte is the [`SessionMessage`]
    /// discriminant.
    pub fn decode(frame: &[u8]) -> Result<ClientMessage, ProtocolError> {
        let mut buf = frame;
        let disc = get_u8(&mut buf)?;
        match SessionMessage::from_byte(disc) {
            Some(SessionMessage::Verb) => {
                let verb = get_str(&mut buf)?;
                let target = EntityId(get_i32(&mut buf)?);
                Ok(ClientMessage::Verb { verb, target })
            }
            Some(SessionMessage::JoinLobby) => Ok(ClientMessage::JoinLobby),
            // AttachToEntity is server → client only; an inbound frame
            // claiming it falls through to the unknown case on purpose.
            _ => Err(ProtocolError::UnknownDiscriminant(disc)),
        }
    }

    /// Encodes this message as the client side would send it, without
    /// the envelope family byte. Used by clients and by tests driving a
    /// session directly.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = BytesMut::new();
        match self {
            ClientMessage::Verb { verb, target } => {
                buf.put_u8(SessionMessage::Verb.as_byte());
                put_str(&mut buf, verb)?;
                buf.put_i32_le(target.0);
            }
            ClientMessage::JoinLobby => {
                buf.put_u8(SessionMessage::JoinLobby.as_byte());
            }
        }
        Ok(buf.to_vec())
    }

    /// Encodes this message as a complete wire frame, envelope byte
    /// included.
    pub fn encode_frame(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut frame = vec![NetMessage::PlayerSession.as_byte()];
        frame.extend(self.encode()?);
        Ok(frame)
    }
}

// ---------------------------------------------------------------------------
// ServerMessage
// ---------------------------------------------------------------------------

impl ServerMessage {
    /// Encodes this message as a complete wire frame: family byte,
    /// sub-type byte, then family-specific payload, in that order.
    ///
    /// Encoding never fails — outbound messages carry no variable-length
    /// string fields.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::new();
        match self {
            ServerMessage::Attach(id) => {
                buf.put_u8(NetMessage::PlayerSession.as_byte());
                buf.put_u8(SessionMessage::AttachToEntity.as_byte());
                buf.put_i32_le(id.0);
            }
            ServerMessage::JoinLobby => {
                buf.put_u8(NetMessage::PlayerSession.as_byte());
                buf.put_u8(SessionMessage::JoinLobby.as_byte());
            }
            ServerMessage::JoinGame => {
                buf.put_u8(NetMessage::JoinGame.as_byte());
            }
            ServerMessage::Gui { component, payload } => {
                buf.put_u8(NetMessage::PlayerUi.as_byte());
                buf.put_u8(UiMessage::ComponentMessage.as_byte());
                buf.put_u8(component.as_byte());
                buf.put_slice(payload);
            }
        }
        buf.to_vec()
    }
}

// =========================================================================
// Tests
// =========================================================================
