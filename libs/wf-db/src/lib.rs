#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Storage-side ownership enforcement.
//!
//! - [`ownership::entity`] - the ownership ledger, one owner per created entity
//! - [`OwnershipChecker`] - parent-ownership verification at creation time,
//!   strict or permissive
//! - [`create_with_ownership`] - verify, insert and record in one transaction
//! - [`OwnerScopeExt`] - restrict `Select` queries to rows the caller owns
//! - [`migrations::Migrator`] - schema for the ledger

pub mod error;
pub mod migrations;
pub mod ownership;

pub use error::OwnershipError;
pub use ownership::checker::{
    OwnershipChecker, OwnershipMode, PermissiveOwnership, StrictOwnership,
    create_with_ownership, ensure_owner, owner_of,
};
pub use ownership::scope::{OwnedEntity, OwnerScopeExt};
