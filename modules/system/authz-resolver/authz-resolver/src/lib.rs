//! Authz Resolver
//!
//! Resolves the org/project ownership chain of any resource, assembles the
//! policy input, asks a [`DecisionPoint`](authz_resolver_sdk::DecisionPoint)
//! and translates the answer. [`Authorizer`] carries the default checker and
//! the system-originator bypass; [`authz_scope_middleware`] exposes it per
//! request as a [`RequestScope`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod test_support;

pub use api::rest::middleware::{CheckerOverride, authz_scope_middleware};
pub use config::{AuthzResolverConfig, CheckerMode, OwnershipMode};
pub use domain::{Authorizer, FailClosedChecker, OwnershipResolver, RequestScope};
