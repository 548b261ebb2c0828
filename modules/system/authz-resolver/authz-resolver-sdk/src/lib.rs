#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Authz Resolver SDK
//!
//! Public contracts of the authorization core:
//!
//! - [`AccessChecker`] - check API consumed by request handlers
//! - [`DecisionPoint`] - contract for policy decision points
//! - [`OwnershipStore`] - lookups the resolver needs from storage
//! - [`PolicyInput`] - the payload a decision point evaluates
//! - [`CheckOptions`] - per-call data, associations and denial mapping
//! - [`actions`] - the `type:name` action vocabulary
//! - [`AuthzError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use authz_resolver_sdk::{AccessChecker, CheckOptions, actions};
//!
//! checker
//!     .check(
//!         &ctx,
//!         project_id.into(),
//!         actions::projects::UPDATE,
//!         &CheckOptions::new().convert_forbidden_to_not_found(),
//!     )
//!     .await?;
//! ```

pub mod actions;
pub mod api;
pub mod associations;
pub mod error;
pub mod models;
pub mod options;
pub mod plugin_api;
pub mod store;

pub use api::AccessChecker;
pub use associations::Association;
pub use error::{AuthzError, PdpError, StoreError};
pub use models::{
    AssociationInfo, AuthnInput, Membership, MembershipStatus, Org, OrgMember, PolicyInput,
    Project, User, UserStatus,
};
pub use options::{CheckOptions, IntoDataValue};
pub use plugin_api::DecisionPoint;
pub use store::OwnershipStore;
