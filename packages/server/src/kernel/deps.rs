//! Server dependencies (using traits for testability)
//!
//! Central dependency container shared by all route handlers. The record
//! store is a trait object so tests can swap in an in-memory store.

use std::sync::Arc;

use crate::kernel::forwarder::BackendForwarder;
use crate::kernel::BaseRecordStore;

#[derive(Clone)]
pub struct ServerDeps {
    /// Read side of the persisted companies/contacts.
    pub records: Arc<dyn BaseRecordStore>,
    /// Outbound relay to the lead-generation backend.
    pub forwarder: Arc<BackendForwarder>,
}

impl ServerDeps {
    pub fn new(records: Arc<dyn BaseRecordStore>, forwarder: Arc<BackendForwarder>) -> Self {
        Self { records, forwarder }
    }
}
