use signet_types::{Signature, SignatureDetail, SignatureLog};

use crate::entities::{SignatureLogRecord, SignatureRecord, VerificationRecord};

impl SignatureRecord {
    pub fn to_response(&self) -> Signature {
        Signature {
            id: self.id.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Expand the record with its relations for `GET /signatures/{id}`.
    pub fn to_detail(
        &self,
        logs: &[SignatureLogRecord],
        verifications: &[VerificationRecord],
    ) -> SignatureDetail {
        SignatureDetail {
            signature: self.to_response(),
            logs: logs.iter().map(SignatureLogRecord::to_response).collect(),
            verifications: verifications
                .iter()
                .map(VerificationRecord::to_response)
                .collect(),
        }
    }
}

impl SignatureLogRecord {
    pub fn to_response(&self) -> SignatureLog {
        SignatureLog {
            id: self.id.clone(),
            signature_id: self.signature_id.clone(),
            kind: self.kind,
            image_url: self.image_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
