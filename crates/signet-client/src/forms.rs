//! Upload forms and their client-side validation.

use std::path::Path;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::error::{ClientError, FieldError};

/// File extensions the upload forms accept.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

pub const UNSUPPORTED_IMAGE: &str = "Only .jpeg, .jpg and .png images are accepted";

/// An image file read into memory, ready for a multipart part.
///
/// Serializes as its metadata only; validation errors attach the field value
/// as a parameter and must not carry the image itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: &'static str,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Reject anything that is not a `.jpeg`, `.jpg` or `.png` file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ClientError> {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).ok_or_else(|| {
            ClientError::Validation(vec![FieldError::new("signature_image", UNSUPPORTED_IMAGE)])
        })?;
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Check the name before touching the disk.
        if content_type_for(&file_name).is_none() {
            return Err(ClientError::Validation(vec![FieldError::new(
                "signature_image",
                UNSUPPORTED_IMAGE,
            )]));
        }
        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, bytes)
    }
}

fn content_type_for(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// Baseline registration: a signatory name plus one image.
#[derive(Debug, Clone, Default, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1, message = "Signatory name is required"))]
    pub signatory_name: String,
    #[validate(required(message = "Signature image is required"))]
    pub signature_image: Option<ImageUpload>,
}

impl RegistrationForm {
    pub fn new(signatory_name: impl Into<String>, signature_image: Option<ImageUpload>) -> Self {
        Self {
            signatory_name: signatory_name.into(),
            signature_image,
        }
    }

    /// Validate, returning the name and image when the form may be submitted.
    pub fn ready(&self) -> Result<(&str, &ImageUpload), Vec<FieldError>> {
        self.validate().map_err(field_errors)?;
        match &self.signature_image {
            Some(image) => Ok((&self.signatory_name, image)),
            None => Err(vec![FieldError::new(
                "signature_image",
                "Signature image is required",
            )]),
        }
    }
}

/// Candidate verification: one image to compare against the registry.
#[derive(Debug, Clone, Default, Validate)]
pub struct VerificationForm {
    #[validate(required(message = "Test signature image is required"))]
    pub signature_image: Option<ImageUpload>,
}

impl VerificationForm {
    pub fn new(signature_image: Option<ImageUpload>) -> Self {
        Self { signature_image }
    }

    pub fn ready(&self) -> Result<&ImageUpload, Vec<FieldError>> {
        self.validate().map_err(field_errors)?;
        self.signature_image.as_ref().ok_or_else(|| {
            vec![FieldError::new(
                "signature_image",
                "Test signature image is required",
            )]
        })
    }
}

/// Flatten `validator`'s map into a list ordered by field name.
fn field_errors(errors: ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
