//! Domain models shared between the resolver, decision points and stores.
//!
//! [`PolicyInput`] is the payload handed to a decision point. Its serialized
//! shape is the contract with external policy engines, so field names are
//! stable snake_case.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use wf_security::{Kind, OrgId, ProjectId, ResourceId, UserId};

use crate::associations::Association;

/// Status of an identity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Invited,
    Disabled,
}

/// Status of an org membership.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    #[default]
    Active,
    Invited,
}

/// An identity. Auto-provisioned on first authenticated contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_org_id: Option<OrgId>,
}

/// An organization. `name` is globally unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Org {
    pub id: OrgId,
    pub name: String,
    pub display_name: String,
}

/// A project. Always belongs to exactly one organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub org_id: OrgId,
    pub name: String,
}

/// A user's membership in an organization, as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrgMember {
    pub org_id: OrgId,
    pub user_id: UserId,
    pub status: MembershipStatus,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

/// Membership entry inside [`AuthnInput`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Membership {
    pub status: MembershipStatus,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl Membership {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

impl From<OrgMember> for Membership {
    fn from(m: OrgMember) -> Self {
        Self {
            status: m.status,
            roles: m.roles,
        }
    }
}

/// Identity part of the policy input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthnInput {
    pub user_id: UserId,
    #[serde(default)]
    pub orgs: BTreeMap<OrgId, Membership>,
}

/// Resolved ownership of one named association.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociationInfo {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<OrgId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

/// Payload for a single policy decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyInput {
    pub authn: AuthnInput,
    /// Kind of the checked resource id (present even when the id is invalid).
    pub kind: Kind,
    /// Part of the action before the first `:`; empty when there is none.
    pub action_type: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_org_id: Option<OrgId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_project_id: Option<ProjectId>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub associated_org_ids: HashSet<OrgId>,
    #[serde(default)]
    pub associated_project_ids: HashSet<ProjectId>,
    #[serde(default)]
    pub associations: BTreeMap<Association, AssociationInfo>,
}

impl PolicyInput {
    /// Membership of the acting identity in `org`, if any.
    #[must_use]
    pub fn membership(&self, org: &OrgId) -> Option<&Membership> {
        self.authn.orgs.get(org)
    }
}
