//! Session storage for the Stepflow navigation core
//!
//! This crate provides the session side of flow storage: a namespaced
//! attribute bag addressed by `/`-delimited paths, the flows bag every session
//! carries, a thread-safe in-memory session store, and the `FlowStorage`
//! implementation contexts use to persist their history into a session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Namespaced attribute bag
pub mod attribute_bag;
pub use attribute_bag::NamespacedAttributeBag;

/// Sessions and their bags
pub mod store;
pub use store::{SessionFlowsBag, SessionId, SessionStore};

/// Flow storage backed by a session
pub mod flow_storage;
pub use flow_storage::SessionFlowStorage;
