use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::User;

/// Extracts the authenticated user from request extensions.
///
/// `AuthMiddleware` resolves the bearer token and inserts the `User` into
/// the request extensions; this extractor hands that request-scoped context
/// to handlers. If no user is present (middleware not applied, or an
/// internal wiring error), the extractor answers 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<User>().cloned() {
            Some(user) => ready(Ok(AuthenticatedUser(user))),
            None => {
                let err = AppError::Unauthorized("Unauthenticated".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: 123,
            name: "Sample".to_string(),
            email: "sample@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(sample_user());

        let mut payload = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(extracted.is_ok());
        let AuthenticatedUser(user) = extracted.unwrap();
        assert_eq!(user.id, 123);
        assert_eq!(user.email, "sample@example.com");
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();
        // No user inserted into extensions

        let mut payload = Payload::None;
        let result = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let err = result.unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
