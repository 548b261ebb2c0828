//! Configuration for the authz resolver.

use std::path::Path;
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use wf_db::OwnershipChecker;

pub use wf_db::OwnershipMode;

/// Prefix of environment overrides, e.g. `WF_AUTHZ__POLICY=authz/allow`.
pub const ENV_PREFIX: &str = "WF_AUTHZ__";

/// Which checker an [`Authorizer`](crate::Authorizer) starts with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckerMode {
    /// Every non-system check fails with `NotImplemented`.
    #[default]
    FailClosed,
    /// Checks go through the decision point.
    Policy,
}

/// Configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthzResolverConfig {
    /// Policy name passed to the decision point.
    pub policy: String,
    pub checker: CheckerMode,
    /// Strictness of the storage-level ownership checker.
    pub ownership: OwnershipMode,
}

impl Default for AuthzResolverConfig {
    fn default() -> Self {
        Self {
            policy: "authz/allow".to_owned(),
            checker: CheckerMode::default(),
            ownership: OwnershipMode::default(),
        }
    }
}

impl AuthzResolverConfig {
    /// Storage-level ownership checker for the configured mode.
    #[must_use]
    pub fn ownership_checker(&self) -> Arc<dyn OwnershipChecker> {
        self.ownership.checker()
    }

    /// Load defaults, then the optional YAML file, then `WF_AUTHZ__*` env vars.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a value has the wrong
    /// shape. A missing file is ignored.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()
    }
}
