// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names (e.g., BaseRecordStore)

use anyhow::Result;
use async_trait::async_trait;
use pipeline_core::{Company, Contact};

// =============================================================================
// Record Store Trait (Infrastructure - read access to persisted records)
// =============================================================================

/// Read-only access to the records the lead-generation backend persists.
///
/// Implementations must not cache: every call is a fresh read.
#[async_trait]
pub trait BaseRecordStore: Send + Sync {
    /// All companies, newest `created_at` first.
    async fn fetch_companies(&self) -> Result<Vec<Company>>;

    /// All contacts, in no particular order.
    async fn fetch_contacts(&self) -> Result<Vec<Contact>>;

    /// Cheap connectivity probe for health checks.
    async fn ping(&self) -> Result<()>;
}
