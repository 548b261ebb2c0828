//! In-memory [`OwnershipStore`] for development and tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use authz_resolver_sdk::{MembershipStatus, OrgMember, OwnershipStore, StoreError};
use parking_lot::RwLock;
use wf_security::{ADMIN_ROLE, OrgId, ProjectId, ResourceId, UserId};

#[derive(Default)]
struct Inner {
    members: Vec<OrgMember>,
    projects: HashMap<ProjectId, OrgId>,
    resources: HashMap<ResourceId, Option<ProjectId>>,
    failure: Option<String>,
}

/// Store backed by in-process maps. Counts lookups so callers can assert that
/// a path did not touch storage.
#[derive(Default)]
pub struct InMemoryOwnershipStore {
    inner: RwLock<Inner>,
    lookups: AtomicUsize,
}

impl InMemoryOwnershipStore {
    pub fn add_member(&self, org_id: OrgId, user_id: UserId, status: MembershipStatus, roles: &[&str]) {
        self.inner.write().members.push(OrgMember {
            org_id,
            user_id,
            status,
            roles: roles.iter().map(|r| (*r).to_owned()).collect::<BTreeSet<_>>(),
        });
    }

    pub fn add_project(&self, project: ProjectId, org: OrgId) {
        self.inner.write().projects.insert(project, org);
    }

    pub fn add_resource(&self, id: ResourceId, project: Option<ProjectId>) {
        self.inner.write().resources.insert(id, project);
    }

    /// Make every following lookup fail with an internal error.
    pub fn fail_with(&self, msg: &str) {
        self.inner.write().failure = Some(msg.to_owned());
    }

    /// Number of lookups served so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn begin(&self) -> Result<(), StoreError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        match &self.inner.read().failure {
            Some(msg) => Err(StoreError::Internal(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OwnershipStore for InMemoryOwnershipStore {
    async fn get_orgs_for_user(&self, user: UserId) -> Result<Vec<OrgMember>, StoreError> {
        self.begin()?;
        Ok(self
            .inner
            .read()
            .members
            .iter()
            .filter(|m| m.user_id == user)
            .cloned()
            .collect())
    }

    async fn get_org_id_of(&self, project: ProjectId) -> Result<OrgId, StoreError> {
        self.begin()?;
        self.inner
            .read()
            .projects
            .get(&project)
            .copied()
            .ok_or_else(|| StoreError::NotFound(project.to_string()))
    }

    async fn get_project_id_of(&self, id: ResourceId) -> Result<Option<ProjectId>, StoreError> {
        self.begin()?;
        self.inner
            .read()
            .resources
            .get(&id)
            .copied()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Org "cats" with admin "zumi"; "shoogy" belongs to no org.
pub struct CatsFixture {
    pub cats: OrgId,
    pub zumi: UserId,
    pub shoogy: UserId,
}

impl CatsFixture {
    #[must_use]
    pub fn install(store: &InMemoryOwnershipStore) -> Self {
        let fixture = Self {
            cats: OrgId::generate(),
            zumi: UserId::generate(),
            shoogy: UserId::generate(),
        };
        store.add_member(
            fixture.cats,
            fixture.zumi,
            MembershipStatus::Active,
            &[ADMIN_ROLE],
        );
        fixture
    }
}
