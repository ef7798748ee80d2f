use anyhow::Result;
use pipeline_core::Contact;
use sqlx::PgPool;
use uuid::Uuid;

/// Row of the backend's `contacts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactRecord {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    #[sqlx(default)]
    pub position: Option<String>,
    #[sqlx(default)]
    pub linkedin_url: Option<String>,
    #[sqlx(default)]
    pub email: Option<String>,
    #[sqlx(default)]
    pub is_primary_decision_maker: Option<bool>,
    #[sqlx(default)]
    pub status: Option<String>,
}

impl ContactRecord {
    /// All contacts, unordered.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let contacts = sqlx::query_as::<_, Self>("SELECT * FROM contacts")
            .fetch_all(pool)
            .await?;
        Ok(contacts)
    }
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Self {
            id: record.id,
            company_id: record.company_id,
            full_name: record.full_name,
            position: record.position.unwrap_or_default(),
            linkedin_url: record.linkedin_url,
            email: record.email,
            is_primary_decision_maker: record.is_primary_decision_maker.unwrap_or(false),
            status: record.status,
        }
    }
}
