//! Uploads to the external signature processor.
//!
//! The processor analyses the image, writes the resulting rows into the
//! registry database and answers with an [`ApiResponse`] envelope. Uploads
//! are never retried.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use signet_types::{ApiResponse, RegisterReceipt, VerifyReceipt};
use tracing::{debug, info};

use crate::api::{ErrorPayload, build_client, decode_with};
use crate::error::ClientError;
use crate::forms::ImageUpload;

#[derive(Debug, Clone)]
pub struct ProcessorClient {
    client: Client,
    base_url: String,
}

impl ProcessorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(build_client(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// `POST {base}/signatures/register` with `signatory_name` and
    /// `signature_image`.
    pub async fn register(
        &self,
        signatory_name: &str,
        image: &ImageUpload,
    ) -> Result<RegisterReceipt, ClientError> {
        let form = Form::new()
            .text("signatory_name", signatory_name.to_owned())
            .part("signature_image", image_part(image)?);
        let receipt: RegisterReceipt = self.submit("/signatures/register", form).await?;
        info!(signature_id = %receipt.signature_id, "signature registered");
        Ok(receipt)
    }

    /// `POST {base}/signatures/verify` with `signature_image`.
    pub async fn verify(&self, image: &ImageUpload) -> Result<VerifyReceipt, ClientError> {
        let form = Form::new().part("signature_image", image_part(image)?);
        let receipt: VerifyReceipt = self.submit("/signatures/verify", form).await?;
        info!(
            transaction_id = %receipt.transaction_id,
            is_authentic = receipt.is_authentic,
            similarity_score = receipt.similarity_score,
            "signature verified"
        );
        Ok(receipt)
    }

    async fn submit<T: DeserializeOwned>(&self, endpoint: &str, form: Form) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "upload");
        let resp = self.client.post(&url).multipart(form).send().await?;
        let envelope: ApiResponse<T> = decode_with(resp, ErrorPayload::message).await?;
        Ok(envelope.data)
    }
}

fn image_part(image: &ImageUpload) -> Result<Part, ClientError> {
    Ok(Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(image.content_type)?)
}
