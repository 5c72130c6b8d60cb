//! Platform - Cross-cutting infrastructure utilities
//!
//! Shared building blocks with no domain knowledge:
//! - Cryptographic primitives (hashing, HMAC, random bytes)
//! - Outbound mail collaborator

pub mod crypto;
pub mod mailer;
