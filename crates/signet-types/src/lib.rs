//! Wire types shared by `signet-server` and `signet-client`.
//!
//! Everything here is serialized with camelCase field names, which is the
//! shape both the REST query layer and the external processor speak.

pub mod processor;
pub mod signature;
pub mod verification;

pub use processor::{ApiResponse, RegisterReceipt, VerifyReceipt};
pub use signature::{LogKind, Signature, SignatureDetail, SignatureLog};
pub use verification::{Verification, VerificationDetail};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body returned by the query layer for any non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
