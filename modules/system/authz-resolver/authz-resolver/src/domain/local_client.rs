//! [`AccessChecker`] backed by the policy check service.

use std::sync::Arc;

use async_trait::async_trait;
use authz_resolver_sdk::{AccessChecker, AuthzError, CheckOptions};
use wf_security::{ResourceId, SecurityContext};

use super::{DomainError, Service};

/// Local client wrapping the service.
pub struct PolicyCheckClient {
    svc: Arc<Service>,
}

impl PolicyCheckClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AuthzError {
    if e.is_fault() {
        tracing::error!(operation = op, error = ?e, "authz_resolver call failed");
    }
    e.into()
}

#[async_trait]
impl AccessChecker for PolicyCheckClient {
    async fn check(
        &self,
        ctx: &SecurityContext,
        id: ResourceId,
        action: &str,
        opts: &CheckOptions,
    ) -> Result<(), AuthzError> {
        self.svc
            .check(ctx, id, action, opts)
            .await
            .map_err(|e| log_and_convert("check", e))
    }
}
