#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Authz Plugin
//!
//! In-process [`DecisionPoint`](authz_resolver_sdk::DecisionPoint) for
//! development and testing. It is not a rule language.
//!
//! ## Mode: `baseline` (default)
//!
//! - reads on users are allowed
//! - any action on one's own user is allowed when the check touches no org
//! - otherwise every org the check touches must be an active membership of
//!   the subject; `create` actions also count `org_id` fields of `data`
//!   objects
//! - `delete` actions, and `write` actions on orgs, need the `admin` role
//! - a check that touches no org is denied
//!
//! `allow_all` and `deny_all` ignore the input.
//!
//! ## Configuration
//!
//! ```yaml
//! static_authz_plugin:
//!   mode: baseline
//!   policies: ["authz/allow"]
//! ```

pub mod config;
pub mod domain;

pub use config::{AuthzMode, StaticAuthzPluginConfig};
pub use domain::Service;
