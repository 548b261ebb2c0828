use serde::{Deserialize, Serialize};

/// Who initiated the current request.
///
/// `Api` is every external caller. The remaining variants are the closed set
/// of trusted internal callers ("system originators"): authorization checks
/// and owner scoping are skipped for them. Adding a variant here widens the
/// bypass for the whole platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Originator {
    /// External request that came in through the public API.
    #[default]
    Api,
    /// Event dispatcher routing incoming events to triggers and sessions.
    Dispatcher,
    /// Cron-style scheduler.
    Scheduler,
    /// Startup data migrations.
    Migration,
    /// Session execution worker.
    Worker,
    /// Other in-process callers acting on behalf of the platform.
    Internal,
}

impl Originator {
    /// The system originators, in declaration order.
    pub const SYSTEM: [Self; 5] = [
        Self::Dispatcher,
        Self::Scheduler,
        Self::Migration,
        Self::Worker,
        Self::Internal,
    ];

    /// Whether this originator bypasses authorization.
    #[must_use]
    pub const fn is_system(self) -> bool {
        match self {
            Self::Api => false,
            Self::Dispatcher
            | Self::Scheduler
            | Self::Migration
            | Self::Worker
            | Self::Internal => true,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Dispatcher => "dispatcher",
            Self::Scheduler => "scheduler",
            Self::Migration => "migration",
            Self::Worker => "worker",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for Originator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
