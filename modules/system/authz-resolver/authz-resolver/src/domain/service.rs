//! Policy check: input builder, decision point, verdict translation.

use std::sync::Arc;

use authz_resolver_sdk::{CheckOptions, DecisionPoint, OwnershipStore, PdpError};
use wf_security::{ResourceId, SecurityContext};

use super::error::DomainError;
use super::input::PolicyInputBuilder;

/// Policy check service.
pub struct Service {
    builder: PolicyInputBuilder,
    pdp: Arc<dyn DecisionPoint>,
    policy: String,
}

impl Service {
    #[must_use]
    pub fn new(
        store: Arc<dyn OwnershipStore>,
        pdp: Arc<dyn DecisionPoint>,
        policy: impl Into<String>,
    ) -> Self {
        Self {
            builder: PolicyInputBuilder::new(store),
            pdp,
            policy: policy.into(),
        }
    }

    #[must_use]
    pub fn input_builder(&self) -> &PolicyInputBuilder {
        &self.builder
    }

    /// Run one check.
    ///
    /// A `false` decision is logged at `warn` with the full input and the raw
    /// decision. Allows are only traced.
    ///
    /// # Errors
    ///
    /// - input assembly errors, see [`PolicyInputBuilder::build`]
    /// - `Decision` if the decision point fails or returns a non-boolean
    /// - `Denied` on a `false` decision
    #[tracing::instrument(skip_all, fields(resource = %id, action = action, policy = %self.policy))]
    pub async fn check(
        &self,
        ctx: &SecurityContext,
        id: ResourceId,
        action: &str,
        opts: &CheckOptions,
    ) -> Result<(), DomainError> {
        let input = self.builder.build(ctx, id, action, opts).await?;
        let decision = self.pdp.decide(&self.policy, &input).await?;

        let Some(allowed) = decision.as_bool() else {
            return Err(PdpError::NotBoolean(decision).into());
        };

        if allowed {
            tracing::trace!("access allowed");
            return Ok(());
        }

        tracing::warn!(
            input = %serde_json::to_string(&input).unwrap_or_default(),
            decision = %decision,
            "access denied"
        );
        Err(DomainError::Denied {
            id,
            as_not_found: opts.forbidden_as_not_found(),
        })
    }
}
