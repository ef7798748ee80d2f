// TestDependencies - in-memory implementations for testing
//
// Lets route and gateway tests run without a database.

use anyhow::Result;
use async_trait::async_trait;
use pipeline_core::{Company, Contact};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::BaseRecordStore;

// =============================================================================
// In-memory record store
// =============================================================================

/// Record store backed by plain vectors.
///
/// Counts reads so tests can assert that nothing is cached.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    companies: Arc<Mutex<Vec<Company>>>,
    contacts: Arc<Mutex<Vec<Contact>>>,
    failure: Arc<Mutex<Option<String>>>,
    reads: Arc<AtomicUsize>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_companies(self, companies: Vec<Company>) -> Self {
        *self.companies.lock().unwrap() = companies;
        self
    }

    pub fn with_contacts(self, contacts: Vec<Contact>) -> Self {
        *self.contacts.lock().unwrap() = contacts;
        self
    }

    /// Make every subsequent read fail with `message`.
    pub fn failing(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Add a company after construction, as a scan would.
    pub fn push_company(&self, company: Company) {
        self.companies.lock().unwrap().push(company);
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BaseRecordStore for InMemoryRecordStore {
    async fn fetch_companies(&self) -> Result<Vec<Company>> {
        self.check()?;
        let mut companies = self.companies.lock().unwrap().clone();
        companies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(companies)
    }

    async fn fetch_contacts(&self) -> Result<Vec<Contact>> {
        self.check()?;
        Ok(self.contacts.lock().unwrap().clone())
    }

    async fn ping(&self) -> Result<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(()),
        }
    }
}
