//! A minimal Outpost deployment: a lobby that starts a round once two
//! players have connected.
//!
//! The world is a handful of in-memory bodies. When the round starts,
//! each lobby session gets a body attached and the run-level flips to
//! `Game`, after which `joingame` verbs succeed.
//!
//! Run it, then point a WebSocket client at ws://127.0.0.1:8080.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use outpost::prelude::*;
use tracing::info;

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

struct Body {
    id: EntityId,
    controller: Mutex<Option<ConnectionId>>,
    name: Mutex<String>,
    capabilities: Mutex<Vec<Box<dyn Capability>>>,
}

impl Body {
    fn new(id: EntityId) -> Self {
        Self {
            id,
            controller: Mutex::new(None),
            name: Mutex::new(String::new()),
            capabilities: Mutex::new(Vec::new()),
        }
    }
}

impl WorldEntity for Body {
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_controller(&self, conn: Option<ConnectionId>) {
        *self.controller.lock().unwrap() = conn;
    }

    fn set_display_name(&self, name: &str) {
        *self.name.lock().unwrap() = name.to_string();
    }

    fn add_capability(&self, capability: Box<dyn Capability>) {
        self.capabilities.lock().unwrap().push(capability);
    }

    fn remove_capability(&self, kind: ControlKind) {
        self.capabilities
            .lock()
            .unwrap()
            .retain(|c| c.kind() != kind);
    }

    fn handle_verb(&self, verb: &str) {
        let controller = *self.controller.lock().unwrap();
        let caps = self.capabilities.lock().unwrap().len();
        info!(
            body = %self.id,
            verb,
            controller = ?controller,
            capabilities = caps,
            "body received verb"
        );
    }

    fn kill(&self) {
        let name = self.name.lock().unwrap().clone();
        info!(body = %self.id, name, "body died");
    }
}

#[derive(Default)]
struct World {
    bodies: Mutex<Vec<Arc<Body>>>,
}

impl World {
    fn spawn(&self, id: EntityId) -> Arc<Body> {
        let body = Arc::new(Body::new(id));
        self.bodies.lock().unwrap().push(body.clone());
        body
    }
}

impl EntityRegistry for World {
    fn get(&self, id: EntityId) -> Option<Arc<dyn WorldEntity>> {
        self.bodies
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .map(|b| b as Arc<dyn WorldEntity>)
    }
}

struct ControlCapability(ControlKind);

impl Capability for ControlCapability {
    fn kind(&self) -> ControlKind {
        self.0
    }
}

struct Capabilities;

impl CapabilityProvider for Capabilities {
    fn provide(&self, kind: ControlKind) -> Box<dyn Capability> {
        Box::new(ControlCapability(kind))
    }
}

struct SaveLog {
    saves: AtomicUsize,
}

impl Persistence for SaveLog {
    fn save_world(&self) {
        let n = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        info!(total = n, "world save requested");
    }

    fn save_map(&self) {
        info!("map save requested");
    }
}

// ---------------------------------------------------------------------------
// Round setup
// ---------------------------------------------------------------------------

const PLAYERS_TO_START: usize = 2;

/// Waits for enough lobby sessions, then gives each one a body and
/// opens the game.
async fn round_setup(
    world: Arc<World>,
    sessions: Arc<tokio::sync::Mutex<SessionRegistry>>,
    run_level: RunLevelHandle,
) {
    loop {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let mut sessions = sessions.lock().await;
        if sessions.len() < PLAYERS_TO_START {
            continue;
        }

        info!(players = sessions.len(), "starting round");
        for (n, conn_id) in
            sessions.connection_ids().into_iter().enumerate()
        {
            let body = world.spawn(EntityId(n as i32 + 1));
            if let Some(session) = sessions.get_mut(&conn_id) {
                session.assign_role(JobAssignment {
                    title: "Crew".to_string(),
                });
                session.attach(body);
            }
        }
        run_level.set(RunLevel::Game);
        return;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let world = Arc::new(World::default());
    let save_log = Arc::new(SaveLog {
        saves: AtomicUsize::new(0),
    });

    let server = OutpostServer::builder()
        .bind("127.0.0.1:8080")
        .run_level(RunLevel::Lobby)
        .build(world.clone(), Arc::new(Capabilities), save_log)
        .await?;

    info!(addr = %server.local_addr()?, "lobby server up");

    tokio::spawn(round_setup(
        world,
        server.sessions(),
        server.run_level(),
    ));

    server.run().await?;
    Ok(())
}
