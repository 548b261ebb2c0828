//! Service implementation for the static authz plugin.

use std::collections::HashSet;

use authz_resolver_sdk::{PolicyInput, actions};
use wf_security::{ADMIN_ROLE, Kind, OrgId};

use crate::config::{AuthzMode, StaticAuthzPluginConfig};

/// Static decision service.
#[derive(Debug, Clone)]
pub struct Service {
    mode: AuthzMode,
    policies: HashSet<String>,
}

impl Default for Service {
    fn default() -> Self {
        Self::from_config(&StaticAuthzPluginConfig::default())
    }
}

impl Service {
    #[must_use]
    pub fn from_config(cfg: &StaticAuthzPluginConfig) -> Self {
        Self {
            mode: cfg.mode,
            policies: cfg.policies.iter().cloned().collect(),
        }
    }

    #[must_use]
    pub fn knows_policy(&self, policy: &str) -> bool {
        self.policies.contains(policy)
    }

    /// Decide one input.
    #[must_use]
    pub fn evaluate(&self, input: &PolicyInput) -> bool {
        match self.mode {
            AuthzMode::AllowAll => true,
            AuthzMode::DenyAll => false,
            AuthzMode::Baseline => baseline(input),
        }
    }
}

fn baseline(input: &PolicyInput) -> bool {
    if input.kind == Kind::User && input.action_type == actions::READ {
        return true;
    }

    let orgs = orgs_in_scope(input);
    if orgs.is_empty() {
        // Own user only counts when nothing ties the check to an org.
        if input.resource_id == Some(input.authn.user_id.as_resource()) {
            return true;
        }
        tracing::debug!("no org in scope");
        return false;
    }

    let needs_admin = input.action_type == actions::DELETE
        || (input.action_type == actions::WRITE && input.kind == Kind::Org);

    orgs.iter().all(|org| {
        let Some(m) = input.membership(org) else {
            tracing::debug!(%org, "not a member");
            return false;
        };
        if !m.is_active() {
            tracing::debug!(%org, "membership not active");
            return false;
        }
        if needs_admin && !m.has_role(ADMIN_ROLE) {
            tracing::debug!(%org, "admin role required");
            return false;
        }
        true
    })
}

/// Orgs the check touches. For creations, `org_id` fields of top-level data
/// objects count too, since the new resource has no owner yet.
fn orgs_in_scope(input: &PolicyInput) -> HashSet<OrgId> {
    let mut orgs = input.associated_org_ids.clone();
    if input.action_type == actions::CREATE {
        orgs.extend(
            input
                .data
                .values()
                .filter_map(|v| v.get("org_id")?.as_str()?.parse::<OrgId>().ok())
                .filter(OrgId::is_valid),
        );
    }
    orgs
}
