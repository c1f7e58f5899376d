use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use signet_types::{ErrorBody, Signature, SignatureDetail, SignatureLog, Verification};
use utoipa::OpenApi;

use crate::entities::{SignatureRecord, SignatureStore, VerificationStore};
use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_signatures, get_signature),
    components(schemas(Signature, SignatureLog, SignatureDetail, Verification, ErrorBody))
)]
pub struct SignaturesApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signatures", get(list_signatures))
        .route("/signatures/{id}", get(get_signature))
}

#[utoipa::path(
    get,
    path = "/api/v1/signatures",
    tag = "signatures",
    responses(
        (status = 200, description = "All signatures, newest first", body = [Signature]),
        (status = 500, description = "Database error", body = ErrorBody),
    )
)]
pub async fn list_signatures(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Signature>>, ServerError> {
    let records = state.store.list_signatures().await?;
    Ok(Json(records.iter().map(SignatureRecord::to_response).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/signatures/{id}",
    tag = "signatures",
    params(
        ("id" = String, Path, description = "Signature identifier")
    ),
    responses(
        (status = 200, description = "Signature with logs and verifications", body = SignatureDetail),
        (status = 404, description = "Signature not found", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody),
    )
)]
pub async fn get_signature(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SignatureDetail>, ServerError> {
    let record = state
        .store
        .get_signature(&id)
        .await?
        .ok_or_else(ServerError::signature_not_found)?;

    let logs = state.store.list_signature_logs(&id).await?;
    let verifications = state.store.list_verifications_for_signature(&id).await?;

    Ok(Json(record.to_detail(&logs, &verifications)))
}
