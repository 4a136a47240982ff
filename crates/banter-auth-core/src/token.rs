//! Opaque session token minting and hashing
//!
//! Tokens are random opaque strings handed to the client once; only their
//! SHA-256 hash is persisted, so a leaked sessions table cannot be replayed.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Mint a fresh opaque session token.
///
/// Two v4 UUIDs concatenated in simple form: 64 hex characters carrying
/// 244 bits of randomness.
pub fn mint_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Hash a token for storage.
///
/// SHA-256, hex encoded. The original token cannot be recovered from the
/// hash.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
