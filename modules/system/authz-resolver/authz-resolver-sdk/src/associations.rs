//! Named associations between a check and other resources.

use std::fmt;

use serde::{Deserialize, Serialize};
use wf_security::Kind;

/// Closed set of association names a caller may attach to a check.
///
/// Typed names only accept ids of the matching kind. `Subject` accepts any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Association {
    Subject,
    Org,
    Project,
    User,
    Build,
    Deployment,
    Session,
    Connection,
    Trigger,
    Event,
}

impl Association {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Org => "org",
            Self::Project => "project",
            Self::User => "user",
            Self::Build => "build",
            Self::Deployment => "deployment",
            Self::Session => "session",
            Self::Connection => "connection",
            Self::Trigger => "trigger",
            Self::Event => "event",
        }
    }

    /// Kind an id must have under this name; `None` means any kind.
    #[must_use]
    pub const fn expected_kind(self) -> Option<Kind> {
        match self {
            Self::Subject => None,
            Self::Org => Some(Kind::Org),
            Self::Project => Some(Kind::Project),
            Self::User => Some(Kind::User),
            Self::Build => Some(Kind::Build),
            Self::Deployment => Some(Kind::Deployment),
            Self::Session => Some(Kind::Session),
            Self::Connection => Some(Kind::Connection),
            Self::Trigger => Some(Kind::Trigger),
            Self::Event => Some(Kind::Event),
        }
    }

    #[must_use]
    pub fn accepts(self, kind: Kind) -> bool {
        self.expected_kind().is_none_or(|k| k == kind)
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
