//! Shared fixtures for client tests: throw-away HTTP servers and sample rows.

use std::path::{Path, PathBuf};

use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use signet_types::{LogKind, Signature, SignatureDetail, SignatureLog, Verification};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_735_689_600 + secs, 0).unwrap()
}

pub fn signature(id: &str, name: &str) -> Signature {
    Signature {
        id: id.into(),
        name: name.into(),
        image_url: format!("https://storage.test/{id}/original.png"),
        created_at: at(0),
        updated_at: at(0),
    }
}

pub fn log(id: &str, signature_id: &str, kind: LogKind, url: &str) -> SignatureLog {
    SignatureLog {
        id: id.into(),
        signature_id: signature_id.into(),
        kind,
        image_url: url.into(),
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn verification(id: &str, signature_id: Option<&str>, authentic: bool) -> Verification {
    Verification {
        id: id.into(),
        signature_id: signature_id.map(Into::into),
        query_image_url: format!("https://storage.test/{id}/query.png"),
        is_authentic: authentic,
        similarity_score: if authentic { 0.91 } else { 0.12 },
        created_at: at(2),
        updated_at: at(2),
    }
}

pub fn detail(signature: Signature, logs: Vec<SignatureLog>) -> SignatureDetail {
    SignatureDetail {
        signature,
        logs,
        verifications: vec![],
    }
}

/// Write a small fake image into `dir` and return its path.
pub fn image_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"\x89PNG\r\n\x1a\nfake").unwrap();
    path
}
