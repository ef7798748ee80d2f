use anyhow::Result;
use async_trait::async_trait;
use pipeline_core::{Company, Contact};
use sqlx::PgPool;

use crate::domains::companies::CompanyRecord;
use crate::domains::contacts::ContactRecord;
use crate::kernel::BaseRecordStore;

/// Record store over the backend's Postgres tables.
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseRecordStore for PostgresRecordStore {
    async fn fetch_companies(&self) -> Result<Vec<Company>> {
        CompanyRecord::find_all_newest_first(&self.pool)
            .await?
            .into_iter()
            .map(CompanyRecord::into_company)
            .collect()
    }

    async fn fetch_contacts(&self) -> Result<Vec<Contact>> {
        let contacts = ContactRecord::find_all(&self.pool).await?;
        Ok(contacts.into_iter().map(Contact::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
