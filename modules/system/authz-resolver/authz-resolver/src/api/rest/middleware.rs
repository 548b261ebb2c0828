//! Axum middleware and extractor for [`RequestScope`].

use std::sync::Arc;

use authz_resolver_sdk::AccessChecker;
use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::StatusCode;
use http::request::Parts;
use wf_security::SecurityContext;

use crate::domain::{Authorizer, RequestScope};

/// Request extension an outer layer may insert to replace the default checker
/// for this request.
#[derive(Clone)]
pub struct CheckerOverride(pub Arc<dyn AccessChecker>);

/// Builds the [`RequestScope`] for each request.
///
/// Reads the `SecurityContext` placed by the authentication layer (anonymous
/// if none) and honours a [`CheckerOverride`] extension when present.
///
/// ```ignore
/// let router = Router::new()
///     .route("/projects/{id}", get(get_project))
///     .layer(axum::middleware::from_fn_with_state(authorizer, authz_scope_middleware));
/// ```
pub async fn authz_scope_middleware(
    State(authorizer): State<Authorizer>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = req
        .extensions()
        .get::<SecurityContext>()
        .cloned()
        .unwrap_or_else(SecurityContext::anonymous);

    let mut scope = authorizer.scope(ctx);
    if let Some(CheckerOverride(checker)) = req.extensions().get::<CheckerOverride>() {
        scope = scope.with_override(checker.clone());
    }

    req.extensions_mut().insert(scope);
    next.run(req).await
}

impl<S> FromRequestParts<S> for RequestScope
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RequestScope>().cloned().ok_or_else(|| {
            tracing::error!("RequestScope not found - authz_scope_middleware not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "authorization scope not configured",
            )
        })
    }
}
