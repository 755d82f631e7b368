use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user account as returned by the API.
///
/// The bcrypt digest lives only in the `users.password_hash` column and is
/// deliberately absent here, so a `User` can never serialize it. `Clone` is
/// required because the auth middleware stores the resolved user in request
/// extensions for handlers to read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
