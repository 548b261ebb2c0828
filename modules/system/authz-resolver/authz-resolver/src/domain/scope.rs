//! Checker selection and the system-originator bypass.

use std::sync::Arc;

use async_trait::async_trait;
use authz_resolver_sdk::{AccessChecker, AuthzError, CheckOptions, DecisionPoint, OwnershipStore};
use wf_security::{ResourceId, SecurityContext};

use super::{FailClosedChecker, PolicyCheckClient, Service};
use crate::config::{AuthzResolverConfig, CheckerMode};

fn system_bypass(ctx: &SecurityContext, id: ResourceId, action: &str) -> bool {
    if ctx.is_system() {
        tracing::debug!(
            originator = %ctx.originator(),
            resource = %id,
            action,
            "system originator, authorization skipped"
        );
        return true;
    }
    false
}

/// Holds the default checker. Built once and injected at router construction.
///
/// System originators are granted access before any checker runs. Without
/// configuration the default checker fails closed.
#[derive(Clone)]
pub struct Authorizer {
    default: Arc<dyn AccessChecker>,
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new(Arc::new(FailClosedChecker))
    }
}

impl Authorizer {
    #[must_use]
    pub fn new(default: Arc<dyn AccessChecker>) -> Self {
        Self { default }
    }

    /// Select the default checker from config.
    #[must_use]
    pub fn from_config(
        cfg: &AuthzResolverConfig,
        store: Arc<dyn OwnershipStore>,
        pdp: Arc<dyn DecisionPoint>,
    ) -> Self {
        match cfg.checker {
            CheckerMode::FailClosed => Self::default(),
            CheckerMode::Policy => {
                let svc = Arc::new(Service::new(store, pdp, cfg.policy.clone()));
                Self::new(Arc::new(PolicyCheckClient::new(svc)))
            }
        }
    }

    #[must_use]
    pub fn default_checker(&self) -> &Arc<dyn AccessChecker> {
        &self.default
    }

    /// Scope for one request, using the default checker.
    #[must_use]
    pub fn scope(&self, ctx: SecurityContext) -> RequestScope {
        RequestScope {
            ctx,
            default: self.default.clone(),
            override_checker: None,
        }
    }
}

#[async_trait]
impl AccessChecker for Authorizer {
    async fn check(
        &self,
        ctx: &SecurityContext,
        id: ResourceId,
        action: &str,
        opts: &CheckOptions,
    ) -> Result<(), AuthzError> {
        if system_bypass(ctx, id, action) {
            return Ok(());
        }
        self.default.check(ctx, id, action, opts).await
    }
}

/// Identity and checker of one request.
///
/// Inserted into request extensions by
/// [`authz_scope_middleware`](crate::authz_scope_middleware) and extracted by
/// handlers. An override, when installed, is preferred over the default.
#[derive(Clone)]
pub struct RequestScope {
    ctx: SecurityContext,
    default: Arc<dyn AccessChecker>,
    override_checker: Option<Arc<dyn AccessChecker>>,
}

impl RequestScope {
    #[must_use]
    pub fn context(&self) -> &SecurityContext {
        &self.ctx
    }

    /// Install a request-scoped checker.
    #[must_use]
    pub fn with_override(mut self, checker: Arc<dyn AccessChecker>) -> Self {
        self.override_checker = Some(checker);
        self
    }

    /// The checker this scope consults.
    #[must_use]
    pub fn checker(&self) -> &Arc<dyn AccessChecker> {
        self.override_checker.as_ref().unwrap_or(&self.default)
    }

    /// Check `action` on `id` for this request's identity.
    ///
    /// # Errors
    ///
    /// See [`AccessChecker::check`].
    pub async fn check(
        &self,
        id: ResourceId,
        action: &str,
        opts: &CheckOptions,
    ) -> Result<(), AuthzError> {
        if system_bypass(&self.ctx, id, action) {
            return Ok(());
        }
        self.checker().check(&self.ctx, id, action, opts).await
    }
}
