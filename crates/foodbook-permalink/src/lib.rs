//! # foodbook-permalink
//!
//! Stateless, HMAC-signed capability tokens ("permalink grants") that
//! give time-boxed access to a single resource without a session.
//!
//! A grant is the tuple `(resource_id, expires, signature)` where
//! `signature = HMAC-SHA256(secret, "{resource_id}:{expires}")` in
//! lowercase hex. Nothing is stored server-side: a grant is verifiable
//! from its own three fields plus the shared secret, and expiry is the
//! only thing that ends its life.

pub mod crypto;
pub mod error;
pub mod grant;

pub use error::PermalinkError;
pub use grant::{PermalinkAuthority, PermalinkGrant};
