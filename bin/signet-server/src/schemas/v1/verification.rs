use signet_types::{Verification, VerificationDetail};

use crate::entities::{SignatureRecord, VerificationRecord};

impl VerificationRecord {
    pub fn to_response(&self) -> Verification {
        Verification {
            id: self.id.clone(),
            signature_id: self.signature_id.clone(),
            query_image_url: self.query_image_url.clone(),
            is_authentic: self.is_authentic,
            similarity_score: self.similarity_score,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Embed the baseline for `GET /verifications/{id}`.
    pub fn to_detail(&self, signature: Option<&SignatureRecord>) -> VerificationDetail {
        VerificationDetail {
            verification: self.to_response(),
            signature: signature.map(SignatureRecord::to_response),
        }
    }
}
