//! Tower middleware guarding a route with an ability expression.
//!
//! `GateLayer` and `GateService` wrap any inner service. The request must
//! carry an [`AuthenticatedUser`] in its extensions; the gate then decides:
//! allowed requests pass through, everything else gets a JSON error.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use permgate_core::{Gate, PermissionChecker};
use tower::{Layer, Service};

use crate::{AuthenticatedUser, GateError};

/// Tower `Layer` that requires an ability on every request.
#[derive(Clone)]
pub struct GateLayer {
    gate: Arc<Gate<AuthenticatedUser>>,
    ability: Arc<str>,
}

impl GateLayer {
    /// Guard with `ability` using a shared gate.
    pub fn new(gate: Arc<Gate<AuthenticatedUser>>, ability: impl Into<String>) -> Self {
        Self {
            gate,
            ability: Arc::from(ability.into()),
        }
    }

    /// Guard with `ability` using a gate that has no host rules.
    pub fn from_checker(checker: PermissionChecker, ability: impl Into<String>) -> Self {
        Self::new(Arc::new(Gate::new(checker)), ability)
    }

    /// The guarded ability expression.
    pub fn ability(&self) -> &str {
        &self.ability
    }
}

impl<S> Layer<S> for GateLayer {
    type Service = GateService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GateService {
            inner,
            gate: self.gate.clone(),
            ability: self.ability.clone(),
        }
    }
}

/// Tower `Service` that checks the ability before forwarding requests.
#[derive(Clone)]
pub struct GateService<S> {
    inner: S,
    gate: Arc<Gate<AuthenticatedUser>>,
    ability: Arc<str>,
}

impl<S> GateService<S> {
    fn decide(&self, req: &Request<Body>) -> Result<(), GateError> {
        let user = req
            .extensions()
            .get::<AuthenticatedUser>()
            .ok_or(GateError::Unauthenticated)?;
        self.gate.authorize(user, &self.ability).map_err(|err| {
            let err = GateError::from(err);
            match &err {
                GateError::Misconfigured(source) => {
                    log::error!("Gate for '{}' is misconfigured: {source}", self.ability);
                }
                _ => log::info!("User '{}' denied '{}'", user.subject, self.ability),
            }
            err
        })
    }
}

impl<S> Service<Request<Body>> for GateService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let decision = self.decide(&req);

        Box::pin(async move {
            match decision {
                Ok(()) => {
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(err) => Ok(error_response(&err)),
            }
        })
    }
}

/// Build a JSON error response for a refused request.
fn error_response(err: &GateError) -> axum::response::Response {
    let body = serde_json::json!({
        "error": {
            "category": err.category(),
            "message": err.to_string(),
        }
    });

    (
        err.status(),
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response()
}
