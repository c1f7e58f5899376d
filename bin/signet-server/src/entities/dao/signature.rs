use chrono::{DateTime, Utc};

/// A row in the `signatures` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureRecord {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
