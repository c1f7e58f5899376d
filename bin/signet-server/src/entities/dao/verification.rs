use chrono::{DateTime, Utc};

/// A row in the `verifications` table.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRecord {
    pub id: String,
    /// `NULL` once the referenced signature is deleted.
    pub signature_id: Option<String>,
    pub query_image_url: String,
    pub is_authentic: bool,
    pub similarity_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
