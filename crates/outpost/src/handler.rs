//! Per-connection handler: session creation, frame routing, teardown.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`], plus a writer task that drains the session's
//! outbound channel onto the socket. The single writer preserves the
//! session's program order toward its peer.

use std::sync::Arc;

use outpost_protocol::NetMessage;
use outpost_session::SessionRegistry;
use outpost_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::{mpsc, Mutex};

use crate::OutpostError;

/// Drop guard that delivers the disconnect notification when the
/// handler exits, even if it panics. `Drop` is synchronous, so the
/// async registry access runs in a fire-and-forget task.
struct SessionGuard {
    conn_id: ConnectionId,
    sessions: Arc<Mutex<SessionRegistry>>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let sessions = Arc::clone(&self.sessions);
        tokio::spawn(async move {
            let mut sessions = sessions.lock().await;
            let _ = sessions.disconnect(conn_id);
            sessions.reap();
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    sessions: Arc<Mutex<SessionRegistry>>,
) -> Result<(), OutpostError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, mut rx) = mpsc::unbounded_channel();
    {
        let mut sessions = sessions.lock().await;
        sessions.create(conn_id, tx)?;
    }
    let _guard = SessionGuard {
        conn_id,
        sessions: Arc::clone(&sessions),
    };

    // Writer: encode outbound messages and put them on the wire. Ends
    // when the session is reaped (sender dropped) or the peer is gone.
    let writer_conn = conn.clone();
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let frame = msg.encode();
            if let Err(e) = writer_conn.send(&frame).await {
                tracing::debug!(
                    conn_id = %writer_conn.id(),
                    error = %e,
                    "outbound send failed, stopping writer"
                );
                break;
            }
        }
    });

    // Reader: route inbound frames until the transport reports the
    // peer gone.
    loop {
        match conn.recv().await {
            Ok(Some(frame)) => {
                route_frame(&sessions, conn_id, &frame).await;
            }
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        }
    }

    writer.abort();
    // _guard drops here → disconnect fires, entity is released.
    Ok(())
}

/// Peels the envelope family byte off one inbound frame and routes it.
///
/// Only the `PlayerSession` family is client → server; anything else —
/// unknown families included — is ignored for forward compatibility.
async fn route_frame(
    sessions: &Arc<Mutex<SessionRegistry>>,
    conn_id: ConnectionId,
    frame: &[u8],
) {
    let Some((&family, rest)) = frame.split_first() else {
        tracing::debug!(%conn_id, "ignoring empty frame");
        return;
    };

    match NetMessage::from_byte(family) {
        Some(NetMessage::PlayerSession) => {
            let mut sessions = sessions.lock().await;
            if let Err(e) = sessions.handle_message(conn_id, rest) {
                tracing::warn!(
                    %conn_id,
                    error = %e,
                    "failed to route session frame"
                );
            }
        }
        Some(other) => {
            tracing::debug!(
                %conn_id,
                family = ?other,
                "ignoring inbound frame for server-to-client family"
            );
        }
        None => {
            tracing::debug!(
                %conn_id,
                family = format_args!("0x{family:02x}"),
                "ignoring unknown message family"
            );
        }
    }
}
