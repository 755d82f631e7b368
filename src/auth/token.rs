//! Opaque bearer token service.
//!
//! Tokens are plain random strings with no decodable structure: 32 bytes of
//! OS entropy, base64 URL-safe encoded. The server keeps only a SHA-256
//! digest of each token, so the plaintext handed out at issue time is never
//! retrievable again. Resolution is a hash lookup joined to the owning user;
//! logout deletes every row for the user, which invalidates all of their
//! sessions at once.

use crate::error::AppError;
use crate::models::User;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

/// Token size in bytes (32 bytes = 256 bits of entropy).
const TOKEN_BYTES: usize = 32;

/// Generates a cryptographically random opaque token string.
pub fn random_token() -> String {
    let mut buffer = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}

/// Hashes a token for storage and lookup. Single-pass SHA-256, hex-encoded;
/// tokens are already high-entropy so no stretching is needed.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issues a fresh token for `user_id`, persisting only its hash.
/// Returns the plaintext — the one and only time it exists outside the
/// client.
pub async fn issue_token(pool: &PgPool, user_id: i32) -> Result<String, AppError> {
    let token = random_token();

    sqlx::query("INSERT INTO tokens (user_id, token_hash) VALUES ($1, $2)")
        .bind(user_id)
        .bind(hash_token(&token))
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolves a presented token to its live user. Returns `Ok(None)` when the
/// token is unknown or has been revoked; unknown and revoked are
/// indistinguishable by design.
pub async fn resolve_token(pool: &PgPool, token: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.id, u.name, u.email, u.created_at
         FROM tokens t
         JOIN users u ON u.id = t.user_id
         WHERE t.token_hash = $1",
    )
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Deletes every token belonging to `user_id`. Idempotent: revoking a user
/// with no live tokens is a no-op.
pub async fn revoke_all_tokens(pool: &PgPool, user_id: i32) -> Result<(), AppError> {
    sqlx::query("DELETE FROM tokens WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_opaque() {
        let first = random_token();
        let second = random_token();

        assert_ne!(first, second);
        // 32 bytes of entropy encode to 43 base64url characters.
        assert_eq!(first.len(), 43);
        assert!(!first.contains('='));
    }

    #[test]
    fn test_token_hash_is_deterministic_and_one_way() {
        let token = random_token();

        assert_eq!(hash_token(&token), hash_token(&token));
        assert_ne!(hash_token(&token), token);
        // SHA-256 digest, hex-encoded.
        assert_eq!(hash_token(&token).len(), 64);

        let other = random_token();
        assert_ne!(hash_token(&token), hash_token(&other));
    }
}
