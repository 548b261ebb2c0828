//! Configuration for the static authz plugin.

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthzPluginConfig {
    /// Decision mode.
    pub mode: AuthzMode,

    /// Policy names this plugin answers for. Others are unknown.
    pub policies: Vec<String>,
}

impl Default for StaticAuthzPluginConfig {
    fn default() -> Self {
        Self {
            mode: AuthzMode::Baseline,
            policies: vec!["authz/allow".to_owned()],
        }
    }
}

/// Decision mode.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthzMode {
    /// Membership and role based rules.
    #[default]
    Baseline,
    /// Allow every request.
    AllowAll,
    /// Deny every request.
    DenyAll,
}
