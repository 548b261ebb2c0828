//! Narrow lookup contract the resolver consumes from storage.

use async_trait::async_trait;
use wf_security::{OrgId, ProjectId, ResourceId, UserId};

use crate::error::StoreError;
use crate::models::OrgMember;

#[async_trait]
pub trait OwnershipStore: Send + Sync {
    /// All org memberships of `user`, in any status.
    ///
    /// # Errors
    ///
    /// `Internal` on store failure. An unknown user yields an empty list.
    async fn get_orgs_for_user(&self, user: UserId) -> Result<Vec<OrgMember>, StoreError>;

    /// Owning org of a project.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project does not exist.
    async fn get_org_id_of(&self, project: ProjectId) -> Result<OrgId, StoreError>;

    /// Project referenced by a project-scoped resource.
    ///
    /// `Ok(None)` when the resource exists but references no project.
    ///
    /// # Errors
    ///
    /// `NotFound` if the resource does not exist.
    async fn get_project_id_of(&self, id: ResourceId) -> Result<Option<ProjectId>, StoreError>;
}
