//! Dashboard behaviour: cached reads with list guards, and form submission.

use std::sync::Arc;

use signet_types::{Signature, SignatureDetail, Verification, VerificationDetail};
use tracing::warn;

use crate::api::QueryApi;
use crate::cache::{QueryCache, QueryKey};
use crate::config::ClientConfig;
use crate::error::{ClientError, FieldError};
use crate::forms::{RegistrationForm, VerificationForm};
use crate::navigation::Route;
use crate::notify::{self, Notification, Notifier};
use crate::processor::ProcessorClient;
use crate::search::{self, Searchable};

/// Result of entering a list route.
#[derive(Debug, Clone, PartialEq)]
pub enum Entered<T> {
    Show(T),
    /// The list is empty; go to the form that creates its first row.
    Redirect(Route),
}

/// Result of submitting an upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The processor accepted the upload; show the new record.
    Navigate(Route),
    /// Validation failed and no request was sent.
    Invalid(Vec<FieldError>),
    /// The upload failed; a notification has been raised.
    Stay,
}

pub struct Dashboard<N> {
    api: QueryApi,
    processor: ProcessorClient,
    cache: QueryCache,
    notifier: N,
}

impl<N: Notifier> Dashboard<N> {
    pub fn new(config: &ClientConfig, notifier: N) -> Self {
        Self {
            api: QueryApi::new(&config.api_base_url),
            processor: ProcessorClient::new(&config.processor_base_url),
            cache: QueryCache::new(),
            notifier,
        }
    }

    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn signatures(&self) -> Result<Arc<Vec<Signature>>, ClientError> {
        let api = &self.api;
        self.cache
            .fetch(QueryKey::Signatures, move || api.list_signatures())
            .await
    }

    pub async fn signature(&self, id: &str) -> Result<Arc<SignatureDetail>, ClientError> {
        let api = &self.api;
        self.cache
            .fetch(QueryKey::Signature(id.to_owned()), move || api.get_signature(id))
            .await
    }

    pub async fn verifications(&self) -> Result<Arc<Vec<Verification>>, ClientError> {
        let api = &self.api;
        self.cache
            .fetch(QueryKey::Verifications, move || api.list_verifications())
            .await
    }

    pub async fn verification(&self, id: &str) -> Result<Arc<VerificationDetail>, ClientError> {
        let api = &self.api;
        self.cache
            .fetch(QueryKey::Verification(id.to_owned()), move || {
                api.get_verification(id)
            })
            .await
    }

    /// Signatures matching `query`, or a redirect to registration when none
    /// exist at all.
    pub async fn enter_signatures(&self, query: &str) -> Result<Entered<Vec<Signature>>, ClientError> {
        let all = self.signatures().await?;
        Ok(guarded(&all, query, Route::Register))
    }

    /// Verifications matching `query`, or a redirect to the verify form when
    /// none exist at all.
    pub async fn enter_verifications(
        &self,
        query: &str,
    ) -> Result<Entered<Vec<Verification>>, ClientError> {
        let all = self.verifications().await?;
        Ok(guarded(&all, query, Route::Verify))
    }

    pub async fn submit_registration(&self, form: &RegistrationForm) -> SubmitOutcome {
        let (name, image) = match form.ready() {
            Ok(ready) => ready,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        self.notifier.notify(Notification::loading(notify::REGISTER_LOADING));
        match self.processor.register(name, image).await {
            Ok(receipt) => {
                self.notifier.notify(Notification::success(notify::REGISTER_SUCCESS));
                self.cache.invalidate(&QueryKey::Signatures).await;
                SubmitOutcome::Navigate(Route::Signature(receipt.signature_id))
            }
            Err(ClientError::Api { status, .. }) => {
                warn!(status, "processor rejected registration");
                self.notifier.notify(Notification::error(notify::REGISTER_REJECTED));
                SubmitOutcome::Stay
            }
            Err(e) => {
                warn!(error = %e, "registration upload failed");
                self.notifier.notify(Notification::error(notify::REGISTER_FAILED));
                SubmitOutcome::Stay
            }
        }
    }

    pub async fn submit_verification(&self, form: &VerificationForm) -> SubmitOutcome {
        let image = match form.ready() {
            Ok(image) => image,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        self.notifier.notify(Notification::loading(notify::VERIFY_LOADING));
        match self.processor.verify(image).await {
            Ok(receipt) => {
                self.notifier.notify(Notification::success(notify::VERIFY_SUCCESS));
                self.cache.invalidate(&QueryKey::Verifications).await;
                SubmitOutcome::Navigate(Route::Verification(receipt.transaction_id))
            }
            Err(ClientError::Api { status, message }) => {
                warn!(status, ?message, "processor rejected verification");
                let text = message.unwrap_or_else(|| notify::VERIFY_REJECTED.to_owned());
                self.notifier.notify(Notification::error(text));
                SubmitOutcome::Stay
            }
            Err(e) => {
                warn!(error = %e, "verification upload failed");
                self.notifier.notify(Notification::error(notify::VERIFY_FAILED));
                SubmitOutcome::Stay
            }
        }
    }
}

fn guarded<T: Searchable + Clone>(all: &[T], query: &str, empty: Route) -> Entered<Vec<T>> {
    if all.is_empty() {
        return Entered::Redirect(empty);
    }
    Entered::Show(search::filter(all, query).into_iter().cloned().collect())
}
