//! Read access to the query layer's REST endpoints.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use signet_types::{Signature, SignatureDetail, Verification, VerificationDetail};
use tracing::debug;

use crate::error::ClientError;

/// Thin typed wrapper over `GET {base}/signatures…` and `GET {base}/verifications…`.
#[derive(Debug, Clone)]
pub struct QueryApi {
    client: Client,
    base_url: String,
}

impl QueryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(build_client(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_signatures(&self) -> Result<Vec<Signature>, ClientError> {
        self.get_json("/signatures").await
    }

    pub async fn get_signature(&self, id: &str) -> Result<SignatureDetail, ClientError> {
        self.get_json(&format!("/signatures/{id}")).await
    }

    pub async fn list_verifications(&self) -> Result<Vec<Verification>, ClientError> {
        self.get_json("/verifications").await
    }

    pub async fn get_verification(&self, id: &str) -> Result<VerificationDetail, ClientError> {
        self.get_json(&format!("/verifications/{id}")).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "query");
        let resp = self.client.get(&url).send().await?;
        decode(resp).await
    }
}

pub(crate) fn build_client() -> Client {
    Client::builder()
        .user_agent(concat!("signet-client/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// Error body shapes: the query layer sends `error`, the processor `message`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorPayload {
    /// Query layer: `message`, then `error`.
    pub(crate) fn text(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or(self.error.filter(|e| !e.is_empty()))
    }

    /// Processor: only `message` is meant for the user.
    pub(crate) fn message(self) -> Option<String> {
        self.message.filter(|m| !m.is_empty())
    }
}

/// Turn a response into `T`, or into the matching [`ClientError`] for non-2xx.
pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    decode_with(resp, ErrorPayload::text).await
}

/// Like [`decode`], with `pick` choosing the error text from the body.
pub(crate) async fn decode_with<T: DeserializeOwned>(
    resp: Response,
    pick: fn(ErrorPayload) -> Option<String>,
) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }

    let message = pick(serde_json::from_slice::<ErrorPayload>(&body).unwrap_or_default());
    debug!(status = status.as_u16(), ?message, "request rejected");

    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(
            message.unwrap_or_else(|| "Not found".to_owned()),
        ));
    }
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
