//! Ownership resolution: resource id to owning org and project.

use std::collections::HashMap;
use std::sync::Arc;

use authz_resolver_sdk::OwnershipStore;
use wf_security::{Kind, OrgId, ProjectId, ResourceId};

use super::error::DomainError;

/// How a kind reaches its owning org and project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// The id is the org.
    Org,
    /// The id is the project; the org is a column of it.
    Project,
    /// The resource references a project.
    ProjectScoped,
    /// No owning org or project.
    Unowned,
}

/// Resolves the owning org and project of any resource id.
///
/// Dispatch is a `Kind -> Strategy` registry built once in [`Self::new`].
/// Kinds without a strategy are rejected as unhandled.
pub struct OwnershipResolver {
    store: Arc<dyn OwnershipStore>,
    strategies: HashMap<Kind, Strategy>,
}

impl OwnershipResolver {
    #[must_use]
    pub fn new(store: Arc<dyn OwnershipStore>) -> Self {
        let strategies = HashMap::from([
            (Kind::Org, Strategy::Org),
            (Kind::Project, Strategy::Project),
            (Kind::Build, Strategy::ProjectScoped),
            (Kind::Session, Strategy::ProjectScoped),
            (Kind::Connection, Strategy::ProjectScoped),
            (Kind::Trigger, Strategy::ProjectScoped),
            (Kind::Deployment, Strategy::ProjectScoped),
            (Kind::Event, Strategy::ProjectScoped),
            (Kind::Integration, Strategy::Unowned),
            (Kind::User, Strategy::Unowned),
        ]);
        Self { store, strategies }
    }

    fn strategy(&self, kind: Kind) -> Result<Strategy, DomainError> {
        self.strategies
            .get(&kind)
            .copied()
            .ok_or_else(|| DomainError::InvalidArgument(format!("unhandled kind {kind}")))
    }

    /// Owning org of `id`. `None` for invalid ids and unowned kinds.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an unhandled kind, `NotFound` when a referenced
    /// row is missing, `Store` for other store faults.
    #[tracing::instrument(level = "trace", skip_all, fields(%id))]
    pub async fn org_of(&self, id: ResourceId) -> Result<Option<OrgId>, DomainError> {
        if !id.is_valid() {
            return Ok(None);
        }
        match self.strategy(id.kind())? {
            Strategy::Org => Ok(Some(OrgId::from_uuid(id.uuid()))),
            Strategy::Project => self.org_of_project(ProjectId::from_uuid(id.uuid())).await,
            Strategy::ProjectScoped => match self.project_of(id).await? {
                Some(project) => self.org_of_project(project).await,
                None => Ok(None),
            },
            Strategy::Unowned => Ok(None),
        }
    }

    /// Owning project of `id`. `None` for invalid ids, orgs and unowned kinds.
    ///
    /// # Errors
    ///
    /// Same as [`Self::org_of`].
    #[tracing::instrument(level = "trace", skip_all, fields(%id))]
    pub async fn project_of(&self, id: ResourceId) -> Result<Option<ProjectId>, DomainError> {
        if !id.is_valid() {
            return Ok(None);
        }
        match self.strategy(id.kind())? {
            Strategy::Project => Ok(Some(ProjectId::from_uuid(id.uuid()))),
            Strategy::ProjectScoped => Ok(self
                .store
                .get_project_id_of(id)
                .await?
                .filter(ProjectId::is_valid)),
            Strategy::Org | Strategy::Unowned => Ok(None),
        }
    }

    async fn org_of_project(&self, project: ProjectId) -> Result<Option<OrgId>, DomainError> {
        let org = self.store.get_org_id_of(project).await?;
        Ok(Some(org).filter(OrgId::is_valid))
    }
}
