use crate::store::{SessionId, SessionStore};
use serde_json::Value;
use stepflow_core::{FlowError, FlowStorage};

/// [`FlowStorage`] over the flows bag of one session
///
/// Keys live at `<domain>/<key>` in the bag, so clearing a domain is a single
/// prefix removal.
#[derive(Debug, Clone)]
pub struct SessionFlowStorage {
    store: SessionStore,
    session: SessionId,
    domain: Option<String>,
}

impl SessionFlowStorage {
    pub(crate) fn new(store: SessionStore, session: SessionId) -> Self {
        Self {
            store,
            session,
            domain: None,
        }
    }

    /// Session this storage writes to
    #[inline]
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    fn path(&self, key: &str) -> Result<String, FlowError> {
        let domain = self
            .domain
            .as_deref()
            .ok_or_else(|| FlowError::Storage("storage is not initialized".to_string()))?;
        let separator = self.store.settings().namespace_character;
        Ok(format!("{}{}{}", domain, separator, key))
    }

    fn bag(&self) -> &str {
        self.store.flows_bag_name()
    }
}

impl FlowStorage for SessionFlowStorage {
    fn initialize(&mut self, domain: &str) {
        self.domain = Some(domain.to_string());
    }

    fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    fn has(&self, key: &str) -> Result<bool, FlowError> {
        let path = self.path(key)?;
        self.store.read_bag(&self.session, self.bag(), |bag| bag.has(&path))
    }

    fn get(&self, key: &str) -> Result<Option<Value>, FlowError> {
        let path = self.path(key)?;
        self.store.read_bag(&self.session, self.bag(), |bag| bag.get(&path))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), FlowError> {
        let path = self.path(key)?;
        self.store
            .write_bag(&self.session, self.bag(), |bag| bag.set(&path, value))?
    }

    fn remove(&mut self, key: &str) -> Result<Option<Value>, FlowError> {
        let path = self.path(key)?;
        self.store
            .write_bag(&self.session, self.bag(), |bag| bag.remove(&path))
    }

    fn clear(&mut self) -> Result<(), FlowError> {
        let domain = self
            .domain
            .clone()
            .ok_or_else(|| FlowError::Storage("storage is not initialized".to_string()))?;
        self.store
            .write_bag(&self.session, self.bag(), |bag| bag.clear_prefix(&domain))?;
        Ok(())
    }
}
