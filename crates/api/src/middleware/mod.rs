//! Request extractors.
//!
//! - [`auth::Caller`] -- Optional caller identity from a JWT Bearer token.

pub mod auth;
