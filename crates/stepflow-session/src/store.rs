//! In-memory session store
//!
//! Sessions are kept in a process-wide map behind a lock. Every session gets
//! the flows bag registered when it is created, so flow storage never has to
//! check for it lazily.

use crate::attribute_bag::NamespacedAttributeBag;
use crate::flow_storage::SessionFlowStorage;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use stepflow_core::{FlowError, FlowSettings};
use tracing::{debug, info};
use uuid::Uuid;

/// Session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(SessionId)
            .map_err(|e| FlowError::Storage(format!("Invalid session id \"{}\": {}", value, e)))
    }
}

/// Creates the bag holding flow state in every session
pub struct SessionFlowsBag;

impl SessionFlowsBag {
    /// Build an empty flows bag named after the configured storage key
    pub fn create(settings: &FlowSettings) -> NamespacedAttributeBag {
        NamespacedAttributeBag::new(settings.storage_key.clone(), settings.namespace_character)
    }
}

#[derive(Debug, Default)]
struct Session {
    bags: HashMap<String, NamespacedAttributeBag>,
}

/// Thread-safe in-memory session store
///
/// Cloning is cheap and every clone sees the same sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    settings: Arc<FlowSettings>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new(settings: FlowSettings) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            settings: Arc::new(settings),
        }
    }

    /// Settings the store was created with
    #[inline]
    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Name of the bag flow state is kept in
    #[inline]
    pub fn flows_bag_name(&self) -> &str {
        &self.settings.storage_key
    }

    /// Start a new session with the flows bag registered
    pub fn create_session(&self) -> SessionId {
        let id = SessionId::new();
        let flows = SessionFlowsBag::create(&self.settings);

        let mut session = Session::default();
        session.bags.insert(flows.name().to_string(), flows);
        self.sessions.write().insert(id, session);

        info!(session_id = %id, "Session created");
        id
    }

    /// Whether a session exists
    pub fn has_session(&self, id: &SessionId) -> bool {
        self.sessions.read().contains_key(id)
    }

    /// Drop a session and everything stored in it
    pub fn destroy_session(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            info!(session_id = %id, "Session destroyed");
        }
        removed
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Register an additional bag in a session
    pub fn register_bag(&self, id: &SessionId, bag: NamespacedAttributeBag) -> Result<(), FlowError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(id).ok_or_else(|| Self::missing_session(id))?;
        if session.bags.contains_key(bag.name()) {
            return Err(FlowError::Storage(format!(
                "Bag \"{}\" is already registered in session {}",
                bag.name(),
                id
            )));
        }
        debug!(session_id = %id, bag = %bag.name(), "Bag registered");
        session.bags.insert(bag.name().to_string(), bag);
        Ok(())
    }

    /// Read from a bag of a session
    pub fn read_bag<R>(
        &self,
        id: &SessionId,
        bag: &str,
        f: impl FnOnce(&NamespacedAttributeBag) -> R,
    ) -> Result<R, FlowError> {
        let sessions = self.sessions.read();
        let session = sessions.get(id).ok_or_else(|| Self::missing_session(id))?;
        let bag = session
            .bags
            .get(bag)
            .ok_or_else(|| Self::missing_bag(id, bag))?;
        Ok(f(bag))
    }

    /// Modify a bag of a session
    pub fn write_bag<R>(
        &self,
        id: &SessionId,
        bag: &str,
        f: impl FnOnce(&mut NamespacedAttributeBag) -> R,
    ) -> Result<R, FlowError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(id).ok_or_else(|| Self::missing_session(id))?;
        let bag = session
            .bags
            .get_mut(bag)
            .ok_or_else(|| Self::missing_bag(id, bag))?;
        Ok(f(bag))
    }

    /// Flow storage over the flows bag of a session
    pub fn flow_storage(&self, id: &SessionId) -> Result<SessionFlowStorage, FlowError> {
        if !self.has_session(id) {
            return Err(Self::missing_session(id));
        }
        Ok(SessionFlowStorage::new(self.clone(), *id))
    }

    fn missing_session(id: &SessionId) -> FlowError {
        FlowError::Storage(format!("Session {} does not exist", id))
    }

    fn missing_bag(id: &SessionId, bag: &str) -> FlowError {
        FlowError::Storage(format!("Bag \"{}\" is not registered in session {}", bag, id))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(FlowSettings::default())
    }
}
