//! Fail-closed default checker.

use async_trait::async_trait;
use authz_resolver_sdk::{AccessChecker, AuthzError, CheckOptions};
use wf_security::{ResourceId, SecurityContext};

/// Checker used when nothing has been configured. Denies everything with
/// `NotImplemented`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailClosedChecker;

#[async_trait]
impl AccessChecker for FailClosedChecker {
    async fn check(
        &self,
        _ctx: &SecurityContext,
        id: ResourceId,
        action: &str,
        _opts: &CheckOptions,
    ) -> Result<(), AuthzError> {
        tracing::warn!(resource = %id, action, "no authorization checker configured");
        Err(AuthzError::NotImplemented)
    }
}
