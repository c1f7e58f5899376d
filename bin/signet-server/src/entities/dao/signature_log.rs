use chrono::{DateTime, Utc};
use signet_types::LogKind;

/// A row in the `signature_logs` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureLogRecord {
    pub id: String,
    pub signature_id: String,
    /// Stored in the `type` column.
    pub kind: LogKind,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
