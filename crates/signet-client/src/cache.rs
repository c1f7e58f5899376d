//! Keyed cache in front of the query layer.
//!
//! Entries go stale after [`STALE_AFTER`] and are re-fetched on the next read;
//! entries nobody has read for [`EVICT_AFTER`] are dropped on the next insert.
//! A failed fetch is retried once when the error is transient.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ClientError;

pub const STALE_AFTER: Duration = Duration::from_secs(5 * 60);
pub const EVICT_AFTER: Duration = Duration::from_secs(10 * 60);
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Identifies one read query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Signatures,
    Signature(String),
    Verifications,
    Verification(String),
}

impl QueryKey {
    /// Key segments, e.g. `["signature", "sig_1"]`.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            QueryKey::Signatures => vec!["signatures"],
            QueryKey::Signature(id) => vec!["signature", id],
            QueryKey::Verifications => vec!["verifications"],
            QueryKey::Verification(id) => vec!["verification", id],
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.segments())
    }
}

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
    last_used: Instant,
}

pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Entry>>,
    stale_after: Duration,
    evict_after: Duration,
    retry_delay: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_after: STALE_AFTER,
            evict_after: EVICT_AFTER,
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn stale_after(mut self, d: Duration) -> Self {
        self.stale_after = d;
        self
    }

    pub fn evict_after(mut self, d: Duration) -> Self {
        self.evict_after = d;
        self
    }

    pub fn retry_delay(mut self, d: Duration) -> Self {
        self.retry_delay = d;
        self
    }

    /// Return the cached value for `key` if it is still fresh, otherwise run
    /// `fetcher` and cache its result.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Arc<T>, ClientError>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        if let Some(hit) = self.fresh::<T>(&key).await {
            debug!(%key, "cache hit");
            return Ok(hit);
        }

        let value = Arc::new(self.fetch_with_retry(&key, &fetcher).await?);
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| now.duration_since(e.last_used) < self.evict_after);
        entries.insert(
            key,
            Entry {
                value: value.clone(),
                fetched_at: now,
                last_used: now,
            },
        );
        Ok(value)
    }

    /// Drop `key` so the next read goes to the network.
    pub async fn invalidate(&self, key: &QueryKey) {
        if self.entries.write().await.remove(key).is_some() {
            debug!(%key, "cache invalidated");
        }
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn fresh<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(key)?;
        let now = Instant::now();
        if now.duration_since(entry.fetched_at) >= self.stale_after {
            return None;
        }
        entry.last_used = now;
        match entry.value.clone().downcast::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%key, "cached value has unexpected type; refetching");
                None
            }
        }
    }

    async fn fetch_with_retry<T, F, Fut>(&self, key: &QueryKey, fetcher: &F) -> Result<T, ClientError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        match fetcher().await {
            Err(e) if e.is_transient() => {
                warn!(%key, error = %e, "query failed; retrying once");
                tokio::time::sleep(self.retry_delay).await;
                fetcher().await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing_test::traced_test;

    use super::*;

    fn counted(calls: &AtomicUsize) -> impl Fn() -> std::future::Ready<Result<usize, ClientError>> + '_ {
        move || std::future::ready(Ok(calls.fetch_add(1, Ordering::SeqCst) + 1))
    }

    #[test]
    fn keys_render_as_segments() {
        assert_eq!(QueryKey::Signatures.to_string(), r#"["signatures"]"#);
        assert_eq!(
            QueryKey::Verification("ver_1".into()).to_string(),
            r#"["verification", "ver_1"]"#
        );
    }

    #[tokio::test]
    async fn fresh_entries_are_served_from_cache() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache.fetch(QueryKey::Signatures, counted(&calls)).await.unwrap();
        let second = cache.fetch(QueryKey::Signatures, counted(&calls)).await.unwrap();

        assert_eq!((*first, *second), (1, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn keys_are_cached_independently() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);

        cache
            .fetch(QueryKey::Signature("a".into()), counted(&calls))
            .await
            .unwrap();
        cache
            .fetch(QueryKey::Signature("b".into()), counted(&calls))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn stale_entries_are_refetched() {
        let cache = QueryCache::new().stale_after(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        cache.fetch(QueryKey::Verifications, counted(&calls)).await.unwrap();
        let again = cache.fetch(QueryKey::Verifications, counted(&calls)).await.unwrap();

        assert_eq!(*again, 2);
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);

        cache.fetch(QueryKey::Signatures, counted(&calls)).await.unwrap();
        cache.invalidate(&QueryKey::Signatures).await;
        assert!(!cache.contains(&QueryKey::Signatures).await);

        let again = cache.fetch(QueryKey::Signatures, counted(&calls)).await.unwrap();
        assert_eq!(*again, 2);
    }

    #[tokio::test]
    async fn unused_entries_are_evicted_on_insert() {
        let cache = QueryCache::new().evict_after(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        cache.fetch(QueryKey::Signatures, counted(&calls)).await.unwrap();
        cache.fetch(QueryKey::Verifications, counted(&calls)).await.unwrap();

        assert!(!cache.contains(&QueryKey::Signatures).await);
        assert!(cache.contains(&QueryKey::Verifications).await);
    }

    #[tokio::test]
    #[traced_test]
    async fn transient_failure_is_retried_once() {
        let cache = QueryCache::new().retry_delay(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        let value = cache
            .fetch(QueryKey::Signatures, || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(if n == 0 {
                    Err(ClientError::Api {
                        status: 503,
                        message: None,
                    })
                } else {
                    Ok(n)
                })
            })
            .await
            .unwrap();

        assert_eq!(*value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(logs_contain("retrying once"));
    }

    #[tokio::test]
    async fn second_transient_failure_is_returned() {
        let cache = QueryCache::new().retry_delay(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        let err = cache
            .fetch(QueryKey::Verifications, || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Err::<(), _>(ClientError::Api {
                    status: 500,
                    message: None,
                }))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 500, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!cache.contains(&QueryKey::Verifications).await);
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let cache = QueryCache::new().retry_delay(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        let err = cache
            .fetch(QueryKey::Signature("nope".into()), || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Err::<(), _>(ClientError::NotFound(
                    "Signature not found".into(),
                )))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::NotFound(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
