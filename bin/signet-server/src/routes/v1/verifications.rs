use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use signet_types::{ErrorBody, Signature, Verification, VerificationDetail};
use tracing::warn;
use utoipa::OpenApi;

use crate::entities::{SignatureStore, VerificationRecord, VerificationStore};
use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_verifications, get_verification),
    components(schemas(Verification, VerificationDetail, Signature, ErrorBody))
)]
pub struct VerificationsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/verifications", get(list_verifications))
        .route("/verifications/{id}", get(get_verification))
}

#[utoipa::path(
    get,
    path = "/api/v1/verifications",
    tag = "verifications",
    responses(
        (status = 200, description = "All verifications, newest first", body = [Verification]),
        (status = 500, description = "Database error", body = ErrorBody),
    )
)]
pub async fn list_verifications(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Verification>>, ServerError> {
    let records = state.store.list_verifications().await?;
    Ok(Json(records.iter().map(VerificationRecord::to_response).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/verifications/{id}",
    tag = "verifications",
    params(
        ("id" = String, Path, description = "Verification identifier")
    ),
    responses(
        (status = 200, description = "Verification with its baseline signature", body = VerificationDetail),
        (status = 404, description = "Verification not found", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody),
    )
)]
pub async fn get_verification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VerificationDetail>, ServerError> {
    let record = state
        .store
        .get_verification(&id)
        .await?
        .ok_or_else(ServerError::verification_not_found)?;

    let signature = match record.signature_id.as_deref() {
        Some(signature_id) => {
            let found = state.store.get_signature(signature_id).await?;
            if found.is_none() {
                warn!(verification = %id, signature = %signature_id, "verification references a missing signature");
            }
            found
        }
        None => None,
    };

    Ok(Json(record.to_detail(signature.as_ref())))
}
