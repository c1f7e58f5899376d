use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::verification::Verification;

/// Kind of derived artefact the external processor produced for a signature.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogKind {
    /// Contour / edge visualization drawn over the original.
    Vis,
    /// Region-of-interest crop around the ink.
    Roi,
    /// Scale and orientation normalized form.
    Normalized,
}

/// A registered baseline signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub id: String,
    pub name: String,
    /// URL of the original uploaded image.
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A derived image tied to one signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignatureLog {
    pub id: String,
    pub signature_id: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /signatures/{id}`: the signature with its relations expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SignatureDetail {
    #[serde(flatten)]
    pub signature: Signature,
    pub logs: Vec<SignatureLog>,
    pub verifications: Vec<Verification>,
}
