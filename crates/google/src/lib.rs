//! Google Cloud adapters for Beacon.
//!
//! - [`credentials`] -- service-account OAuth2 token source.
//! - [`fcm::FcmMessenger`] -- FCM HTTP v1 [`MessagingProvider`](beacon_core::ports::MessagingProvider).
//! - [`firestore::FirestoreProfileStore`] -- Firestore REST [`ProfileStore`](beacon_core::ports::ProfileStore).

use std::time::Duration;

pub mod credentials;
pub mod error;
pub mod fcm;
pub mod firestore;

pub use credentials::{AccessTokenSource, ServiceAccountKey, ServiceAccountTokenSource, StaticTokenSource};
pub use error::GoogleError;
pub use fcm::{FcmConfig, FcmMessenger};
pub use firestore::{FirestoreConfig, FirestoreProfileStore};

/// HTTP request timeout for a single Google API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by the token source and API adapters.
pub fn http_client() -> Result<reqwest::Client, GoogleError> {
    Ok(reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}
