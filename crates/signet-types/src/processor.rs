//! Response shapes of the external processing service.
//!
//! The processor is not part of this workspace; these types only describe the
//! envelopes the dashboard client reads back after an upload.

use serde::{Deserialize, Serialize};

/// Envelope wrapped around every processor reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: String,
}

/// Payload of `POST {processor}/signatures/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReceipt {
    pub signature_id: String,
}

/// Payload of `POST {processor}/signatures/verify`.
///
/// `transaction_id` is the identifier of the verification row the processor
/// wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReceipt {
    pub transaction_id: String,
    pub is_authentic: bool,
    pub similarity_score: f64,
}
