use std::future::Future;

use signet_types::LogKind;

use crate::entities::dao::{SignatureLogRecord, SignatureRecord};
use crate::entities::{SqliteStore, format_timestamp, parse_timestamp};

/// Signatures and the derived artefacts attached to them.
///
/// The HTTP surface only reads. `insert_*` and `delete_signature` describe
/// the rows the external processor writes and are how the schema-level
/// cascade rules get exercised.
pub trait SignatureStore: Send + Sync + 'static {
    fn insert_signature(
        &self,
        record: SignatureRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Fails with a foreign-key violation if the parent signature is missing.
    fn insert_signature_log(
        &self,
        record: SignatureLogRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn get_signature(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<SignatureRecord>, sqlx::Error>> + Send;

    /// All signatures, newest first.
    fn list_signatures(&self)
    -> impl Future<Output = Result<Vec<SignatureRecord>, sqlx::Error>> + Send;

    /// Logs belonging to `signature_id`, oldest first.
    fn list_signature_logs(
        &self,
        signature_id: &str,
    ) -> impl Future<Output = Result<Vec<SignatureLogRecord>, sqlx::Error>> + Send;

    /// Returns `true` if a row was removed. Logs cascade; verifications keep
    /// their row with `signature_id` set to `NULL`.
    fn delete_signature(&self, id: &str) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}

type SignatureRow = (String, String, String, String, String);
type SignatureLogRow = (String, String, String, String, String, String);

fn signature_from_row(
    (id, name, image_url, created_at, updated_at): SignatureRow,
) -> SignatureRecord {
    SignatureRecord {
        id,
        name,
        image_url,
        created_at: parse_timestamp(&created_at, "created_at"),
        updated_at: parse_timestamp(&updated_at, "updated_at"),
    }
}

fn signature_log_from_row(
    (id, signature_id, kind, image_url, created_at, updated_at): SignatureLogRow,
) -> Result<SignatureLogRecord, sqlx::Error> {
    let kind = kind
        .parse::<LogKind>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "type".to_owned(),
            source: Box::new(e),
        })?;
    Ok(SignatureLogRecord {
        id,
        signature_id,
        kind,
        image_url,
        created_at: parse_timestamp(&created_at, "created_at"),
        updated_at: parse_timestamp(&updated_at, "updated_at"),
    })
}

impl SignatureStore for SqliteStore {
    async fn insert_signature(&self, record: SignatureRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO signatures (id, name, image_url, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.image_url)
        .bind(format_timestamp(&record.created_at))
        .bind(format_timestamp(&record.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_signature_log(&self, record: SignatureLogRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO signature_logs (id, signature_id, image_url, type, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&record.id)
        .bind(&record.signature_id)
        .bind(&record.image_url)
        .bind(record.kind.as_ref())
        .bind(format_timestamp(&record.created_at))
        .bind(format_timestamp(&record.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_signature(&self, id: &str) -> Result<Option<SignatureRecord>, sqlx::Error> {
        let row: Option<SignatureRow> = sqlx::query_as(
            "SELECT id, name, image_url, created_at, updated_at \
             FROM signatures WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(signature_from_row))
    }

    async fn list_signatures(&self) -> Result<Vec<SignatureRecord>, sqlx::Error> {
        let rows: Vec<SignatureRow> = sqlx::query_as(
            "SELECT id, name, image_url, created_at, updated_at \
             FROM signatures ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(signature_from_row).collect())
    }

    async fn list_signature_logs(
        &self,
        signature_id: &str,
    ) -> Result<Vec<SignatureLogRecord>, sqlx::Error> {
        let rows: Vec<SignatureLogRow> = sqlx::query_as(
            "SELECT id, signature_id, type, image_url, created_at, updated_at \
             FROM signature_logs WHERE signature_id = ?1 ORDER BY created_at ASC, id ASC",
        )
        .bind(signature_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(signature_log_from_row).collect()
    }

    async fn delete_signature(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM signatures WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
