//! Persistence layer.
//!
//! [`SqliteStore`] owns the connection pool; each concern is a trait
//! ([`SignatureStore`], [`VerificationStore`]) implemented for it, so a
//! different backend only has to provide those impls.
//!
//! Trait methods use `impl Future` in their signatures, no `async-trait`.

pub mod dao;
pub mod signature;
pub mod verification;

pub use dao::{SignatureLogRecord, SignatureRecord, VerificationRecord};
pub use signature::SignatureStore;
pub use verification::VerificationStore;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// SQLite-backed store for signatures, signature logs and verifications.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g. `"sqlite://signet.db"`
    /// or `"sqlite::memory:"` for tests. Foreign keys are enforced on every
    /// connection; the cascade and set-null rules depend on it.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives and dies with its connection, so keep
        // exactly one and never recycle it.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Round-trip a trivial query to prove the database is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Render a timestamp the way every `*_at` column stores it.
///
/// Fixed millisecond width keeps lexical and chronological order identical,
/// matching the `strftime('%Y-%m-%dT%H:%M:%fZ')` column defaults.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(raw: &str, column: &'static str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        tracing::warn!(raw = %raw, column, error = %e, "failed to parse timestamp; using now");
        Utc::now()
    })
}
