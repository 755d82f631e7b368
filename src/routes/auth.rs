use crate::{
    auth::{
        hash_password, issue_token, revoke_all_tokens, verify_password, AuthResponse,
        AuthenticatedUser, LoginRequest, RegisterRequest,
    },
    error::{is_unique_violation, AppError},
    models::User,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Private row type for login: the only place the stored digest is read.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i32,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// Register a new user.
///
/// Creates the account, issues a bearer token, and returns both with 201.
/// A duplicate email answers 409; the unique index on `users.email` is the
/// authority, so concurrent registrations of the same address cannot both
/// succeed.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let password_hash = hash_password(&register_data.password)?;

    let result = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash)
         VALUES ($1, $2, $3)
         RETURNING id, name, email, created_at",
    )
    .bind(&register_data.name)
    .bind(&register_data.email)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await;

    let user = match result {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::Conflict("Email already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let token = issue_token(pool.get_ref(), user.id).await?;

    Ok(HttpResponse::Created().json(AuthResponse { user, token }))
}

/// Login a user.
///
/// Issues an additional bearer token on success; previously issued tokens
/// stay valid until logout. An unknown email and a wrong password produce
/// the same generic 401 so accounts cannot be enumerated.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, name, email, password_hash, created_at
         FROM users WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    match row {
        Some(row) => {
            if verify_password(&login_data.password, &row.password_hash)? {
                let user = row.into_user();
                let token = issue_token(pool.get_ref(), user.id).await?;
                Ok(HttpResponse::Ok().json(AuthResponse { user, token }))
            } else {
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}

/// Logout the authenticated user.
///
/// Revokes every live token of the caller, so all other sessions are
/// invalidated as well.
#[post("/logout")]
pub async fn logout(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    revoke_all_tokens(pool.get_ref(), user.0.id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Logged out" })))
}

/// Return the authenticated user's own record.
#[get("/profile")]
pub async fn profile(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(user.0)
}
