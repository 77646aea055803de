//! Collaborator seams injected into the dispatcher.
//!
//! Adapters (Postgres, Firestore, FCM, in-memory) implement these traits and
//! are held as `Arc<dyn ...>` so tests can substitute doubles.

use async_trait::async_trait;

use crate::notification::{PushMessage, RecipientRecord};
use crate::types::MessageId;

/// Error raised by a collaborator. Its `Display` output is what callers see
/// inside an `internal` failure.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Read-only access to user profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the recipient record for `receiver_id`, or `None` if no profile exists.
    async fn find_recipient(&self, receiver_id: &str)
        -> Result<Option<RecipientRecord>, PortError>;

    /// Cheap reachability probe used by the health route.
    async fn ping(&self) -> Result<(), PortError> {
        Ok(())
    }
}

/// Outbound push delivery.
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Send one message, returning the provider-assigned message id.
    async fn send(&self, message: &PushMessage) -> Result<MessageId, PortError>;
}
