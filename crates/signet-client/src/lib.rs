//! signet-client – dashboard-side access to the signet query layer and the
//! external signature processor.
//!
//! [`Dashboard`] is the entry point: it reads through a [`QueryCache`], applies
//! the list route guards, and turns upload forms into processor requests with
//! user-facing notifications.

pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod gallery;
pub mod navigation;
pub mod notify;
pub mod processor;
pub mod search;

#[cfg(test)]
mod testing;

pub use api::QueryApi;
pub use cache::{QueryCache, QueryKey};
pub use config::ClientConfig;
pub use dashboard::{Dashboard, Entered, SubmitOutcome};
pub use error::{ClientError, FieldError};
pub use forms::{ImageUpload, RegistrationForm, VerificationForm};
pub use gallery::{GallerySlot, SignatureGallery};
pub use navigation::Route;
pub use notify::{Level, Notification, Notifier};
pub use processor::ProcessorClient;
