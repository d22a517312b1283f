//! `OutpostServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → session → world.
//! The embedding game supplies the world-side collaborators; the server
//! owns the session registry and the run-level.

use std::sync::Arc;

use outpost_session::{SessionContext, SessionRegistry};
use outpost_transport::{Transport, WebSocketTransport};
use outpost_world::{
    CapabilityProvider, EntityRegistry, Persistence, RunLevel,
    RunLevelHandle,
};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::OutpostError;

/// Builder for configuring and starting an Outpost server.
///
/// # Example
///
/// ```rust,ignore
/// let server = OutpostServer::builder()
///     .bind("0.0.0.0:8080")
///     .run_level(RunLevel::Lobby)
///     .build(entities, capabilities, persistence)
///     .await?;
/// server.run().await
/// ```
pub struct OutpostServerBuilder {
    bind_addr: String,
    run_level: RunLevel,
}

impl OutpostServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            run_level: RunLevel::Init,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the run-level the server starts in.
    pub fn run_level(mut self, level: RunLevel) -> Self {
        self.run_level = level;
        self
    }

    /// Binds the transport and assembles the server around the given
    /// world-side collaborators.
    pub async fn build(
        self,
        entities: Arc<dyn EntityRegistry>,
        capabilities: Arc<dyn CapabilityProvider>,
        persistence: Arc<dyn Persistence>,
    ) -> Result<OutpostServer, OutpostError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let run_level = RunLevelHandle::new(self.run_level);
        let ctx = SessionContext::new(
            entities,
            capabilities,
            persistence,
            run_level.clone(),
        );
        let sessions = Arc::new(Mutex::new(SessionRegistry::new(ctx)));

        Ok(OutpostServer {
            transport,
            sessions,
            run_level,
        })
    }
}

impl Default for OutpostServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Outpost server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct OutpostServer {
    transport: WebSocketTransport,
    sessions: Arc<Mutex<SessionRegistry>>,
    run_level: RunLevelHandle,
}

impl OutpostServer {
    /// Creates a new builder.
    pub fn builder() -> OutpostServerBuilder {
        OutpostServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// A handle to the server's run-level. Round management flips this
    /// between `Lobby` and `Game`; live sessions observe it on their
    /// next join-game request.
    pub fn run_level(&self) -> RunLevelHandle {
        self.run_level.clone()
    }

    /// Shared access to the session registry, for round setup code
    /// that assigns roles or attaches entities to sessions.
    pub fn sessions(&self) -> Arc<Mutex<SessionRegistry>> {
        Arc::clone(&self.sessions)
    }

    /// Runs the accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task per
    /// peer. Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), OutpostError> {
        tracing::info!("Outpost server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let sessions = Arc::clone(&self.sessions);
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_connection(conn, sessions).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
