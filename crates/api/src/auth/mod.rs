//! Caller authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.

pub mod jwt;
