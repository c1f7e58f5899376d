use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::signature::Signature;

/// One verification attempt as written by the external processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub id: String,
    /// Baseline the candidate was compared against; `None` once that
    /// signature has been deleted.
    pub signature_id: Option<String>,
    pub query_image_url: String,
    pub is_authentic: bool,
    pub similarity_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /verifications/{id}`: the verification with its baseline embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VerificationDetail {
    #[serde(flatten)]
    pub verification: Verification,
    pub signature: Option<Signature>,
}
