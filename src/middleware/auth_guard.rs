/// Authentication Guard Middleware
///
/// Protects routes behind a bearer access token. A request with no token is
/// rejected 401 (unauthenticated); a request with a present but
/// invalid/expired token is rejected 403 (forbidden). On success the
/// resolved subject is injected into request extensions for downstream
/// handlers.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::{verify_token, TokenKind};
use crate::configuration::TokenSettings;
use crate::error::{AppError, AuthError};

/// Subject resolved by the guard, available to handlers via
/// `web::ReqData<CurrentUser>`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: i64,
}

/// Guard middleware for protected routes
///
/// Must be applied to routes that require authentication.
pub struct AuthGuard {
    token_config: TokenSettings,
}

impl AuthGuard {
    pub fn new(token_config: TokenSettings) -> Self {
        Self { token_config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(AuthGuardService {
            service: Rc::new(service),
            token_config: self.token_config.clone(),
        }))
    }
}

pub struct AuthGuardService<S> {
    service: Rc<S>,
    token_config: TokenSettings,
}

impl<S> AuthGuardService<S> {
    /// Resolve the subject from the request's bearer token.
    fn authenticate(&self, req: &ServiceRequest) -> Result<CurrentUser, AppError> {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;

        let claims = verify_token(token, TokenKind::Access, &self.token_config)?;
        let user_id = claims.user_id()?;

        Ok(CurrentUser { user_id })
    }
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
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
        match self.authenticate(&req) {
            Ok(current_user) => {
                req.extensions_mut().insert(current_user);

                tracing::debug!(user_id = current_user.user_id, "Access token validated");

                let service = self.service.clone();
                Box::pin(async move { service.call(req).await })
            }
            Err(err) => {
                // 401 for a missing token, 403 for a rejected one; the
                // response body stays generic either way.
                let response = err.error_response();
                Box::pin(async move {
                    Err(actix_web::error::InternalError::from_response("Unauthorized", response)
                        .into())
                })
            }
        }
    }
}
