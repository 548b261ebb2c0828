//! [`DecisionPoint`] implementation for the static authz plugin.

use async_trait::async_trait;
use authz_resolver_sdk::{DecisionPoint, PdpError, PolicyInput};

use super::service::Service;

#[async_trait]
impl DecisionPoint for Service {
    async fn decide(
        &self,
        policy: &str,
        input: &PolicyInput,
    ) -> Result<serde_json::Value, PdpError> {
        if !self.knows_policy(policy) {
            return Err(PdpError::UnknownPolicy(policy.to_owned()));
        }
        Ok(serde_json::Value::Bool(self.evaluate(input)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use authz_resolver_sdk::AuthnInput;
    use std::collections::{BTreeMap, HashSet};
    use wf_security::{Kind, UserId};

    fn read_user_input() -> PolicyInput {
        PolicyInput {
            authn: AuthnInput {
                user_id: UserId::generate(),
                orgs: BTreeMap::new(),
            },
            kind: Kind::User,
            action_type: "read".to_owned(),
            action: "get".to_owned(),
            resource_id: None,
            resource_org_id: None,
            resource_project_id: None,
            data: serde_json::Map::new(),
            associated_org_ids: HashSet::new(),
            associated_project_ids: HashSet::new(),
            associations: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn plugin_trait_returns_boolean() {
        let service = Service::default();
        let plugin: &dyn DecisionPoint = &service;

        let decision = plugin
            .decide("authz/allow", &read_user_input())
            .await
            .unwrap();
        assert_eq!(decision, serde_json::Value::Bool(true));
    }

    #[tokio::test]
    async fn unknown_policy_is_an_error() {
        let service = Service::default();
        let err = service
            .decide("authz/other", &read_user_input())
            .await
            .unwrap_err();
        assert!(matches!(err, PdpError::UnknownPolicy(ref p) if p == "authz/other"));
    }
}
