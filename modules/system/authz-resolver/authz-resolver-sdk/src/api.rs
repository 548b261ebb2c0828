//! Public API trait for authorization checks.

use async_trait::async_trait;
use wf_security::{ResourceId, SecurityContext};

use crate::error::AuthzError;
use crate::options::CheckOptions;

/// Authorization check consumed by request handlers.
///
/// ```ignore
/// scope
///     .check(build_id.into(), actions::builds::GET, &CheckOptions::new())
///     .await?;
/// ```
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// Decide whether `ctx` may perform `action` on `id`.
    ///
    /// `id` may be invalid (e.g. a project that does not exist yet); its kind
    /// is still reported to the decision point.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if `ctx` carries no valid subject
    /// - `Unauthorized`, or `NotFound` when requested in `opts`, on denial
    /// - `InvalidArgument` for a malformed action or unhandled resource kind
    /// - `Decision` / `Store` when a collaborator fails
    /// - `NotImplemented` when no checker has been configured
    async fn check(
        &self,
        ctx: &SecurityContext,
        id: ResourceId,
        action: &str,
        opts: &CheckOptions,
    ) -> Result<(), AuthzError>;
}
