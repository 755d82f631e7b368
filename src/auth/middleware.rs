use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;

use crate::auth::token::resolve_token;
use crate::error::AppError;

/// Routes that never require a bearer token.
const PUBLIC_PATHS: [&str; 3] = ["/health", "/register", "/login"];

/// Bearer-token authentication middleware.
///
/// For every non-public request it extracts the `Authorization: Bearer`
/// header, resolves the token against the database, and stores the resolved
/// `User` in the request extensions for handlers and extractors. A missing,
/// malformed, or unresolvable token short-circuits with 401 before the
/// handler runs.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    // Rc so the inner service can be carried into the async resolution future.
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if PUBLIC_PATHS.contains(&req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_owned);

            let token = match token {
                Some(token) => token,
                None => {
                    return Err(AppError::Unauthorized("Missing bearer token".into()).into());
                }
            };

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("Database pool not configured".into())
                })?;

            match resolve_token(pool.get_ref(), &token).await? {
                Some(user) => {
                    req.extensions_mut().insert(user);
                    service.call(req).await
                }
                None => Err(AppError::Unauthorized("Invalid or revoked token".into()).into()),
            }
        })
    }
}
