pub mod signatures;
pub mod verifications;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use utoipa::OpenApi;

use crate::state::AppState;

/// Routes nested under `/api/v1`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .merge(signatures::router())
        .merge(verifications::router())
}

async fn index() -> &'static str {
    "signet query layer"
}

#[derive(OpenApi)]
#[openapi()]
pub struct V1Api;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut doc = V1Api::openapi();
    doc.merge(signatures::SignaturesApi::openapi());
    doc.merge(verifications::VerificationsApi::openapi());
    doc
}
