/// Bearer-token authentication middleware
///
/// Verifies the credential and attaches the derived `Identity` to the
/// request before any handler or repository access runs. Routes wrapped in
/// `RequireAuth` fail with 401 when the credential is absent, malformed, or
/// expired; handlers receive the identity through the `Identity` extractor.
use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderMap},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::Identity;
use crate::security::jwt;

fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthenticated("invalid Authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Unauthenticated("expected Bearer authorization scheme".to_string())
        })
}

/// Middleware factory holding the shared verification secret
pub struct RequireAuth {
    secret: Rc<String>,
}

impl RequireAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Rc::new(secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
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
        let service = self.service.clone();
        let secret = self.secret.clone();

        Box::pin(async move {
            // Token copied out before extensions_mut; holding an immutable
            // borrow of the request across the mutable one panics at runtime.
            let token = bearer_token(req.headers())?;
            let identity = jwt::verify_token(&token, &secret)?;
            req.extensions_mut().insert(identity);

            service.call(req).await
        })
    }
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    /// Prefers an identity attached by `RequireAuth`; on routes outside a
    /// wrapped scope the credential is verified here directly, so a handler
    /// taking `Identity` is authenticated either way.
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(identity) = req.extensions().get::<Identity>().cloned() {
            return ready(Ok(identity));
        }

        let verified = match req.app_data::<web::Data<AppState>>() {
            Some(state) => bearer_token(req.headers())
                .and_then(|token| jwt::verify_token(&token, &state.jwt_secret)),
            None => Err(AppError::Unauthenticated(
                "identity missing from request".to_string(),
            )),
        };
        ready(verified.map_err(Error::from))
    }
}
