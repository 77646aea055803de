//! Beacon domain layer.
//!
//! - [`dispatcher::NotificationDispatcher`] -- the test-notification operation.
//! - [`ports`] -- profile store and messaging provider traits.
//! - [`notification`] -- request, recipient, payload, and receipt types.
//! - [`memory::MemoryProfileStore`] -- in-process profile store.

pub mod dispatcher;
pub mod error;
pub mod memory;
pub mod notification;
pub mod ports;
pub mod types;
