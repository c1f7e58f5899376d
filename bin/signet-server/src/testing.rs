//! Fixtures shared by the unit tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use signet_types::LogKind;

use crate::config::Config;
use crate::entities::{SignatureLogRecord, SignatureRecord, SqliteStore, VerificationRecord};
use crate::state::AppState;

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

pub async fn memory_store() -> SqliteStore {
    SqliteStore::connect("sqlite::memory:")
        .await
        .expect("in-memory store")
}

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".to_owned(),
        database_url: "sqlite::memory:".to_owned(),
        log_level: "debug".to_owned(),
        log_json: false,
        cors_allowed_origins: None,
        enable_swagger: true,
    }
}

pub fn app_state(store: SqliteStore) -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(test_config()),
        store: Arc::new(store),
    })
}

pub fn signature(id: &str, name: &str, created_at: DateTime<Utc>) -> SignatureRecord {
    SignatureRecord {
        id: id.to_owned(),
        name: name.to_owned(),
        image_url: format!("https://storage.test/{id}/original.png"),
        created_at,
        updated_at: created_at,
    }
}

pub fn log(id: &str, signature_id: &str, kind: LogKind, created_at: DateTime<Utc>) -> SignatureLogRecord {
    SignatureLogRecord {
        id: id.to_owned(),
        signature_id: signature_id.to_owned(),
        kind,
        image_url: format!("https://storage.test/{signature_id}/{kind}.png"),
        created_at,
        updated_at: created_at,
    }
}

pub fn verification(
    id: &str,
    signature_id: Option<&str>,
    is_authentic: bool,
    similarity_score: f64,
    created_at: DateTime<Utc>,
) -> VerificationRecord {
    VerificationRecord {
        id: id.to_owned(),
        signature_id: signature_id.map(str::to_owned),
        query_image_url: format!("https://storage.test/queries/{id}.png"),
        is_authentic,
        similarity_score,
        created_at,
        updated_at: created_at,
    }
}
