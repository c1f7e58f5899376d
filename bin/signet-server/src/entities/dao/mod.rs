pub mod signature;
pub mod signature_log;
pub mod verification;

pub use signature::SignatureRecord;
pub use signature_log::SignatureLogRecord;
pub use verification::VerificationRecord;
