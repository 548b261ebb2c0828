#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Security primitives shared by the authorization core and the storage layer.
//!
//! - [`ids`] - kind-tagged resource ids ([`ResourceId`], [`OrgId`], [`ProjectId`], ...)
//! - [`SecurityContext`] - acting identity and request [`Originator`]
//! - [`constants`] - default organization and user sentinels

pub mod constants;
pub mod context;
pub mod ids;
pub mod originator;

pub use constants::{ADMIN_ROLE, DEFAULT_ORG_ID, DEFAULT_USER_ID};
pub use context::{SecurityContext, SecurityContextBuilder};
pub use ids::{
    BuildId, ConnectionId, DeploymentId, EnvId, EventId, IdParseError, IntegrationId, Kind,
    OrgId, ProjectId, ResourceId, SessionId, TriggerId, UserId,
};
pub use originator::Originator;
