//! Policy input assembly.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use authz_resolver_sdk::{
    AssociationInfo, AuthnInput, CheckOptions, Membership, MembershipStatus, OwnershipStore,
    PolicyInput, actions,
};
use wf_security::{
    ADMIN_ROLE, DEFAULT_ORG_ID, DEFAULT_USER_ID, Kind, OrgId, ProjectId, ResourceId,
    SecurityContext, UserId,
};

use super::error::DomainError;
use super::resolver::OwnershipResolver;

/// Builds [`PolicyInput`] payloads. Reads the store, never writes it.
pub struct PolicyInputBuilder {
    store: Arc<dyn OwnershipStore>,
    resolver: OwnershipResolver,
}

impl PolicyInputBuilder {
    #[must_use]
    pub fn new(store: Arc<dyn OwnershipStore>) -> Self {
        Self {
            resolver: OwnershipResolver::new(store.clone()),
            store,
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &OwnershipResolver {
        &self.resolver
    }

    /// Assemble the input for one check.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if `ctx` has no valid subject (nothing is queried)
    /// - `InvalidArgument` for an empty action name, an unhandled kind or an
    ///   association whose id has the wrong kind
    /// - store errors from membership or ownership lookups
    pub async fn build(
        &self,
        ctx: &SecurityContext,
        id: ResourceId,
        action: &str,
        opts: &CheckOptions,
    ) -> Result<PolicyInput, DomainError> {
        if !ctx.is_authenticated() {
            return Err(DomainError::Unauthenticated);
        }
        let user_id = ctx.subject_id();

        let (action_type, action_name) = actions::split(action);
        if action_name.is_empty() {
            return Err(DomainError::InvalidArgument(format!(
                "empty action name in '{action}'"
            )));
        }

        let orgs = self.memberships(user_id).await?;

        let mut associated_org_ids = HashSet::new();
        let mut associated_project_ids = HashSet::new();

        let (resource_id, resource_org_id, resource_project_id) = if id.is_valid() {
            let org = self.resolver.org_of(id).await?;
            let project = self.resolver.project_of(id).await?;
            associated_org_ids.extend(org);
            associated_project_ids.extend(project);
            (Some(id), org, project)
        } else {
            (None, None, None)
        };

        let mut associations = BTreeMap::new();
        for &(name, assoc_id) in opts.associations() {
            if !name.accepts(assoc_id.kind()) {
                return Err(DomainError::InvalidArgument(format!(
                    "association '{name}' does not accept a {} id",
                    assoc_id.kind()
                )));
            }
            if !assoc_id.is_valid() {
                continue;
            }

            let org_id = self.resolver.org_of(assoc_id).await?;
            let project_id = if assoc_id.kind() == Kind::Project {
                Some(ProjectId::from_uuid(assoc_id.uuid()))
            } else {
                self.resolver.project_of(assoc_id).await?
            };

            associated_org_ids.extend(org_id);
            associated_project_ids.extend(project_id);
            associations.insert(
                name,
                AssociationInfo {
                    id: assoc_id,
                    org_id,
                    project_id,
                },
            );
        }

        Ok(PolicyInput {
            authn: AuthnInput { user_id, orgs },
            kind: id.kind(),
            action_type: action_type.to_owned(),
            action: action_name.to_owned(),
            resource_id,
            resource_org_id,
            resource_project_id,
            data: opts.data_map().clone(),
            associated_org_ids,
            associated_project_ids,
            associations,
        })
    }

    async fn memberships(&self, user: UserId) -> Result<BTreeMap<OrgId, Membership>, DomainError> {
        if user == DEFAULT_USER_ID {
            return Ok(BTreeMap::from([(
                DEFAULT_ORG_ID,
                Membership {
                    status: MembershipStatus::Active,
                    roles: BTreeSet::from([ADMIN_ROLE.to_owned()]),
                },
            )]));
        }

        let members = self.store.get_orgs_for_user(user).await?;
        Ok(members
            .into_iter()
            .map(|m| (m.org_id, Membership::from(m)))
            .collect())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::test_support::{CatsFixture, InMemoryOwnershipStore};
    use authz_resolver_sdk::{Association, Project};

    fn ctx(user: UserId) -> SecurityContext {
        SecurityContext::builder().subject_id(user).build()
    }

    fn setup() -> (Arc<InMemoryOwnershipStore>, PolicyInputBuilder, CatsFixture) {
        let store = Arc::new(InMemoryOwnershipStore::default());
        let fixture = CatsFixture::install(&store);
        let builder = PolicyInputBuilder::new(store.clone());
        (store, builder, fixture)
    }

    #[tokio::test]
    async fn anonymous_fails_before_any_lookup() {
        let (store, builder, _) = setup();
        let err = builder
            .build(
                &SecurityContext::anonymous(),
                ProjectId::generate().as_resource(),
                "read:get",
                &CheckOptions::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn empty_action_name_is_invalid() {
        let (_, builder, f) = setup();
        for action in ["", "read:"] {
            let err = builder
                .build(
                    &ctx(f.zumi),
                    f.cats.as_resource(),
                    action,
                    &CheckOptions::new(),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidArgument(_)), "{action}");
        }
    }

    #[tokio::test]
    async fn action_without_type() {
        let (_, builder, f) = setup();
        let input = builder
            .build(&ctx(f.zumi), f.cats.as_resource(), "get", &CheckOptions::new())
            .await
            .unwrap();
        assert_eq!(input.action_type, "");
        assert_eq!(input.action, "get");
    }

    #[tokio::test]
    async fn resource_ownership_seeds_sets() {
        let (store, builder, f) = setup();
        let project = ProjectId::generate();
        store.add_project(project, f.cats);
        let build = ResourceId::generate(Kind::Build);
        store.add_resource(build, Some(project));

        let input = builder
            .build(&ctx(f.zumi), build, "read:get", &CheckOptions::new())
            .await
            .unwrap();

        assert_eq!(input.kind, Kind::Build);
        assert_eq!(input.resource_id, Some(build));
        assert_eq!(input.resource_org_id, Some(f.cats));
        assert_eq!(input.resource_project_id, Some(project));
        assert_eq!(input.associated_org_ids, HashSet::from([f.cats]));
        assert_eq!(input.associated_project_ids, HashSet::from([project]));
        assert!(input.membership(&f.cats).unwrap().has_role(ADMIN_ROLE));
    }

    #[tokio::test]
    async fn invalid_resource_keeps_kind_only() {
        let (_, builder, f) = setup();
        let input = builder
            .build(
                &ctx(f.shoogy),
                ProjectId::INVALID.as_resource(),
                "create:create",
                &CheckOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(input.kind, Kind::Project);
        assert_eq!(input.resource_id, None);
        assert!(input.associated_org_ids.is_empty());
        assert!(input.authn.orgs.is_empty());
    }

    #[tokio::test]
    async fn associations_are_resolved_and_merged() {
        let (store, builder, f) = setup();
        let other_org = OrgId::generate();
        let project = ProjectId::generate();
        store.add_project(project, other_org);
        let session = ResourceId::generate(Kind::Session);
        store.add_resource(session, Some(project));

        let opts = CheckOptions::new()
            .association(Association::Project, project)
            .association(Association::Subject, session)
            .association(Association::Org, OrgId::INVALID);
        let input = builder
            .build(&ctx(f.zumi), f.cats.as_resource(), "write:update", &opts)
            .await
            .unwrap();

        assert_eq!(input.associated_org_ids, HashSet::from([f.cats, other_org]));
        assert_eq!(input.associated_project_ids, HashSet::from([project]));
        assert_eq!(
            input.associations[&Association::Project],
            AssociationInfo {
                id: project.as_resource(),
                org_id: Some(other_org),
                project_id: Some(project),
            }
        );
        assert_eq!(
            input.associations[&Association::Subject].project_id,
            Some(project)
        );
        assert!(!input.associations.contains_key(&Association::Org));
    }

    #[tokio::test]
    async fn association_kind_mismatch_is_invalid() {
        let (_, builder, f) = setup();
        let opts =
            CheckOptions::new().association(Association::Project, ResourceId::generate(Kind::Build));
        let err = builder
            .build(&ctx(f.zumi), f.cats.as_resource(), "read:get", &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn default_user_gets_default_org_admin_without_lookup() {
        let (store, builder, _) = setup();
        let input = builder
            .build(
                &SecurityContext::default_user(),
                ResourceId::generate(Kind::Integration),
                "read:get",
                &CheckOptions::new(),
            )
            .await
            .unwrap();

        let m = input.membership(&DEFAULT_ORG_ID).unwrap();
        assert!(m.is_active());
        assert!(m.has_role(ADMIN_ROLE));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn build_is_idempotent() {
        let (store, builder, f) = setup();
        let project = Project {
            id: ProjectId::generate(),
            org_id: f.cats,
            name: "litter".to_owned(),
        };
        store.add_project(project.id, f.cats);
        let opts = CheckOptions::new()
            .data("project", &project)
            .association(Association::Project, project.id);

        let first = builder
            .build(&ctx(f.zumi), project.id.as_resource(), "write:update", &opts)
            .await
            .unwrap();
        let second = builder
            .build(&ctx(f.zumi), project.id.as_resource(), "write:update", &opts)
            .await
            .unwrap();
        assert_eq!(first, second);
    }
}
