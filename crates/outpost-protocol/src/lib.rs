//! Wire protocol for Outpost.
//!
//! This crate defines the messages that travel between a client and its
//! server-side session, and the binary codec that puts them on the wire:
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`], [`NetMessage`],
//!   [`GuiComponent`], [`EntityId`]) — the message structures.
//! - **Codec** — a fixed binary layout: discriminant bytes, length-prefixed
//!   UTF-8 strings, little-endian `i32` fields.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during decoding.
//!
//! The protocol layer sits between transport (raw frames) and session
//! (player state). It doesn't know about connections or entities beyond
//! their ids — it only knows how to read and write bytes.
//!
//! ```text
//! Transport (frames) → Protocol (messages) → Session (player context)
//! ```

mod codec;
mod error;
mod types;

pub use error::ProtocolError;
pub use types::{
    ClientMessage, EntityId, GuiComponent, NetMessage, ServerMessage,
    SessionMessage, UiMessage,
};
