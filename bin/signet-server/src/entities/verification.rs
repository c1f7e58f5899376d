use std::future::Future;

use crate::entities::dao::VerificationRecord;
use crate::entities::{SqliteStore, format_timestamp, parse_timestamp};

/// Verification attempts. Score and verdict are written once by the external
/// processor and never recomputed here.
pub trait VerificationStore: Send + Sync + 'static {
    fn insert_verification(
        &self,
        record: VerificationRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn get_verification(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<VerificationRecord>, sqlx::Error>> + Send;

    /// All verifications, newest first.
    fn list_verifications(
        &self,
    ) -> impl Future<Output = Result<Vec<VerificationRecord>, sqlx::Error>> + Send;

    /// Verifications compared against `signature_id`, oldest first.
    fn list_verifications_for_signature(
        &self,
        signature_id: &str,
    ) -> impl Future<Output = Result<Vec<VerificationRecord>, sqlx::Error>> + Send;
}

type VerificationRow = (String, Option<String>, String, bool, f64, String, String);

fn verification_from_row(
    (id, signature_id, query_image_url, is_authentic, similarity_score, created_at, updated_at): VerificationRow,
) -> VerificationRecord {
    VerificationRecord {
        id,
        signature_id,
        query_image_url,
        is_authentic,
        similarity_score,
        created_at: parse_timestamp(&created_at, "created_at"),
        updated_at: parse_timestamp(&updated_at, "updated_at"),
    }
}

impl VerificationStore for SqliteStore {
    async fn insert_verification(&self, record: VerificationRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO verifications \
             (id, signature_id, query_image_url, is_authentic, similarity_score, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&record.id)
        .bind(&record.signature_id)
        .bind(&record.query_image_url)
        .bind(record.is_authentic)
        .bind(record.similarity_score)
        .bind(format_timestamp(&record.created_at))
        .bind(format_timestamp(&record.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_verification(&self, id: &str) -> Result<Option<VerificationRecord>, sqlx::Error> {
        let row: Option<VerificationRow> = sqlx::query_as(
            "SELECT id, signature_id, query_image_url, is_authentic, similarity_score, created_at, updated_at \
             FROM verifications WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(verification_from_row))
    }

    async fn list_verifications(&self) -> Result<Vec<VerificationRecord>, sqlx::Error> {
        let rows: Vec<VerificationRow> = sqlx::query_as(
            "SELECT id, signature_id, query_image_url, is_authentic, similarity_score, created_at, updated_at \
             FROM verifications ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(verification_from_row).collect())
    }

    async fn list_verifications_for_signature(
        &self,
        signature_id: &str,
    ) -> Result<Vec<VerificationRecord>, sqlx::Error> {
        let rows: Vec<VerificationRow> = sqlx::query_as(
            "SELECT id, signature_id, query_image_url, is_authentic, similarity_score, created_at, updated_at \
             FROM verifications WHERE signature_id = ?1 ORDER BY created_at ASC, id ASC",
        )
        .bind(signature_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(verification_from_row).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::SignatureStore;
    use crate::testing::{at, memory_store, signature, verification};

    #[tokio::test]
    async fn round_trips_verdict_and_score() {
        let store = memory_store().await;
        store.insert_signature(signature("sig_1", "One", at(1))).await.unwrap();
        store
            .insert_verification(verification("ver_1", Some("sig_1"), false, 0.1234, at(2)))
            .await
            .unwrap();

        let got = store.get_verification("ver_1").await.unwrap().unwrap();
        assert_eq!(got.signature_id.as_deref(), Some("sig_1"));
        assert!(!got.is_authentic);
        assert_eq!(got.similarity_score, 0.1234);
        assert_eq!(got.created_at, at(2));
    }

    #[tokio::test]
    async fn verification_without_baseline_is_allowed() {
        let store = memory_store().await;
        store
            .insert_verification(verification("ver_x", None, false, 0.0, at(1)))
            .await
            .unwrap();
        let got = store.get_verification("ver_x").await.unwrap().unwrap();
        assert_eq!(got.signature_id, None);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filter_matches_fk() {
        let store = memory_store().await;
        store.insert_signature(signature("sig_1", "One", at(1))).await.unwrap();
        store.insert_signature(signature("sig_2", "Two", at(1))).await.unwrap();
        store
            .insert_verification(verification("v1", Some("sig_1"), true, 0.5, at(10)))
            .await
            .unwrap();
        store
            .insert_verification(verification("v2", Some("sig_2"), false, 0.1, at(30)))
            .await
            .unwrap();
        store
            .insert_verification(verification("v3", Some("sig_1"), true, 0.6, at(20)))
            .await
            .unwrap();

        let all = store.list_verifications().await.unwrap();
        let ids: Vec<_> = all.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["v2", "v3", "v1"]);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let for_one = store.list_verifications_for_signature("sig_1").await.unwrap();
        let ids: Vec<_> = for_one.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["v1", "v3"]);
    }
}
