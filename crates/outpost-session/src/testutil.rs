//! Recording test doubles for the world-side seams.
//!
//! Entities record every call they receive into a log so tests can
//! assert both what happened and in which order. The log can be shared
//! between entities to check cross-entity ordering (e.g. that a
//! re-attach releases the old body before granting the new one).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use outpost_protocol::{EntityId, ServerMessage};
use outpost_transport::ConnectionId;
use outpost_world::{
    Capability, CapabilityProvider, ControlKind, EntityRegistry,
    Persistence, RunLevel, RunLevelHandle, WorldEntity,
};
use tokio::sync::mpsc;

use crate::{PlayerSession, SessionContext, SessionSender};

/// One observable call on a [`RecordingEntity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntityEvent {
    Controller(Option<ConnectionId>),
    Name(String),
    CapabilityAdded(ControlKind),
    CapabilityRemoved(ControlKind),
    Verb(String),
    Killed,
}

pub(crate) type SharedLog = Arc<Mutex<Vec<(EntityId, EntityEvent)>>>;

/// A world entity that records every call.
pub(crate) struct RecordingEntity {
    id: EntityId,
    log: SharedLog,
}

impl RecordingEntity {
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            log: Self::shared_log(),
        }
    }

    pub(crate) fn with_log(id: EntityId, log: SharedLog) -> Self {
        Self { id, log }
    }

    pub(crate) fn shared_log() -> SharedLog {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(&self, event: EntityEvent) {
        self.log.lock().unwrap().push((self.id, event));
    }

    /// The events recorded against this entity, in order.
    pub(crate) fn events(&self) -> Vec<EntityEvent> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == self.id)
            .map(|(_, ev)| ev.clone())
            .collect()
    }

    pub(crate) fn kill_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|ev| matches!(ev, EntityEvent::Killed))
            .count()
    }
}

impl WorldEntity for RecordingEntity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_controller(&self, conn: Option<ConnectionId>) {
        self.record(EntityEvent::Controller(conn));
    }

    fn set_display_name(&self, name: &str) {
        self.record(EntityEvent::Name(name.to_string()));
    }

    fn add_capability(&self, capability: Box<dyn Capability>) {
        self.record(EntityEvent::CapabilityAdded(capability.kind()));
    }

    fn remove_capability(&self, kind: ControlKind) {
        self.record(EntityEvent::CapabilityRemoved(kind));
    }

    fn handle_verb(&self, verb: &str) {
        self.record(EntityEvent::Verb(verb.to_string()));
    }

    fn kill(&self) {
        self.record(EntityEvent::Killed);
    }
}

/// A capability that is nothing but its slot.
struct StubCapability(ControlKind);

impl Capability for StubCapability {
    fn kind(&self) -> ControlKind {
        self.0
    }
}

/// Provides [`StubCapability`] instances.
pub(crate) struct StubProvider;

impl CapabilityProvider for StubProvider {
    fn provide(&self, kind: ControlKind) -> Box<dyn Capability> {
        Box::new(StubCapability(kind))
    }
}

/// Counts save requests.
#[derive(Default)]
pub(crate) struct RecordingPersistence {
    world: Mutex<usize>,
    map: Mutex<usize>,
}

impl RecordingPersistence {
    pub(crate) fn world_saves(&self) -> usize {
        *self.world.lock().unwrap()
    }

    pub(crate) fn map_saves(&self) -> usize {
        *self.map.lock().unwrap()
    }
}

impl Persistence for RecordingPersistence {
    fn save_world(&self) {
        *self.world.lock().unwrap() += 1;
    }

    fn save_map(&self) {
        *self.map.lock().unwrap() += 1;
    }
}

/// In-memory entity registry for tests.
#[derive(Default)]
pub(crate) struct EntityMap {
    entities: Mutex<HashMap<EntityId, Arc<RecordingEntity>>>,
}

impl EntityRegistry for EntityMap {
    fn get(&self, id: EntityId) -> Option<Arc<dyn WorldEntity>> {
        self.entities
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .map(|e| e as Arc<dyn WorldEntity>)
    }
}

/// The world-side collaborators backing a test session.
pub(crate) struct TestWorld {
    entities: Arc<EntityMap>,
    persistence: Arc<RecordingPersistence>,
    pub(crate) run_level: RunLevelHandle,
}

impl TestWorld {
    /// Builds a [`SessionContext`] over this world.
    pub(crate) fn context(&self) -> SessionContext {
        SessionContext::new(
            self.entities.clone(),
            Arc::new(StubProvider),
            self.persistence.clone(),
            self.run_level.clone(),
        )
    }

    /// Registers a new recording entity with its own log.
    pub(crate) fn spawn(&self, id: EntityId) -> Arc<RecordingEntity> {
        let entity = Arc::new(RecordingEntity::new(id));
        self.entities
            .entities
            .lock()
            .unwrap()
            .insert(id, entity.clone());
        entity
    }

    /// Registers a new recording entity writing into a shared log.
    pub(crate) fn spawn_logged(
        &self,
        id: EntityId,
        log: SharedLog,
    ) -> Arc<RecordingEntity> {
        let entity = Arc::new(RecordingEntity::with_log(id, log));
        self.entities
            .entities
            .lock()
            .unwrap()
            .insert(id, entity.clone());
        entity
    }
}

/// Creates a test world at the given run-level. The persistence double
/// is also returned directly since most tests only assert on it.
pub(crate) fn test_context(
    run_level: RunLevel,
) -> (TestWorld, Arc<RecordingPersistence>) {
    let persistence = Arc::new(RecordingPersistence::default());
    let world = TestWorld {
        entities: Arc::new(EntityMap::default()),
        persistence: persistence.clone(),
        run_level: RunLevelHandle::new(run_level),
    };
    (world, persistence)
}

/// Connects a session over the test world, returning the receiving end
/// of its outbound channel.
pub(crate) fn connected_session(
    world: &TestWorld,
    conn_id: u64,
) -> (PlayerSession, mpsc::UnboundedReceiver<ServerMessage>) {
    let (tx, rx): (SessionSender, _) = mpsc::unbounded_channel();
    let session = PlayerSession::connect(
        world.context(),
        ConnectionId::new(conn_id),
        tx,
    );
    (session, rx)
}

/// Drains every message currently queued on the outbound channel.
pub(crate) fn drain(
    rx: &mut mpsc::UnboundedReceiver<ServerMessage>,
) -> Vec<ServerMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}
