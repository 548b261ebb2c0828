//! Resource identifiers.
//!
//! Every resource id carries its [`Kind`], so ownership resolution can
//! dispatch on the id alone. A nil UUID is the *invalid* id: callers may pass
//! it around freely (e.g. "no project yet") and consumers short-circuit on
//! [`ResourceId::is_valid`] instead of querying.
//!
//! Text form is `<prefix>_<uuid simple>`, for example
//! `prj_3f2a9c0e5b8d4c1fa0e1d2c3b4a59687`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Closed set of resource kinds known to the authorization core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "org")]
    Org,
    #[serde(rename = "prj")]
    Project,
    #[serde(rename = "bld")]
    Build,
    #[serde(rename = "con")]
    Connection,
    #[serde(rename = "dep")]
    Deployment,
    #[serde(rename = "env")]
    Env,
    #[serde(rename = "evt")]
    Event,
    #[serde(rename = "ses")]
    Session,
    #[serde(rename = "trg")]
    Trigger,
    #[serde(rename = "int")]
    Integration,
    #[serde(rename = "usr")]
    User,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Org,
        Self::Project,
        Self::Build,
        Self::Connection,
        Self::Deployment,
        Self::Env,
        Self::Event,
        Self::Session,
        Self::Trigger,
        Self::Integration,
        Self::User,
    ];

    /// Short prefix used in the text form of ids.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Project => "prj",
            Self::Build => "bld",
            Self::Connection => "con",
            Self::Deployment => "dep",
            Self::Env => "env",
            Self::Event => "evt",
            Self::Session => "ses",
            Self::Trigger => "trg",
            Self::Integration => "int",
            Self::User => "usr",
        }
    }

    /// Look up a kind by its id prefix.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.prefix() == prefix)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Failure to parse or convert an id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("malformed id '{0}': expected <prefix>_<uuid>")]
    Malformed(String),

    #[error("unknown id prefix '{0}'")]
    UnknownPrefix(String),

    #[error("invalid uuid in id '{0}'")]
    InvalidUuid(String),

    #[error("expected a {expected} id, got a {actual} id")]
    KindMismatch { expected: Kind, actual: Kind },
}

/// Kind-tagged resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    kind: Kind,
    uuid: Uuid,
}

impl ResourceId {
    #[must_use]
    pub const fn new(kind: Kind, uuid: Uuid) -> Self {
        Self { kind, uuid }
    }

    /// The invalid id of the given kind.
    #[must_use]
    pub const fn invalid(kind: Kind) -> Self {
        Self::new(kind, Uuid::nil())
    }

    /// A fresh random id of the given kind.
    #[must_use]
    pub fn generate(kind: Kind) -> Self {
        Self::new(kind, Uuid::new_v4())
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !self.uuid.is_nil()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.prefix(), self.uuid.simple())
    }
}

impl FromStr for ResourceId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, raw) = s
            .split_once('_')
            .ok_or_else(|| IdParseError::Malformed(s.to_owned()))?;
        let kind =
            Kind::from_prefix(prefix).ok_or_else(|| IdParseError::UnknownPrefix(prefix.to_owned()))?;
        let uuid = Uuid::parse_str(raw).map_err(|_| IdParseError::InvalidUuid(s.to_owned()))?;
        Ok(Self::new(kind, uuid))
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Declares a kind-specific id newtype convertible to and from [`ResourceId`].
macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            pub const KIND: Kind = $kind;
            pub const INVALID: Self = Self(Uuid::nil());

            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn uuid(&self) -> Uuid {
                self.0
            }

            #[must_use]
            pub const fn is_valid(&self) -> bool {
                !self.0.is_nil()
            }

            #[must_use]
            pub const fn as_resource(&self) -> ResourceId {
                ResourceId::new(Self::KIND, self.0)
            }
        }

        impl From<$name> for ResourceId {
            fn from(id: $name) -> Self {
                id.as_resource()
            }
        }

        impl TryFrom<ResourceId> for $name {
            type Error = IdParseError;

            fn try_from(id: ResourceId) -> Result<Self, Self::Error> {
                if id.kind() == Self::KIND {
                    Ok(Self(id.uuid()))
                } else {
                    Err(IdParseError::KindMismatch {
                        expected: Self::KIND,
                        actual: id.kind(),
                    })
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.as_resource(), f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<ResourceId>()?.try_into()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.as_resource().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let id = ResourceId::deserialize(deserializer)?;
                Self::try_from(id).map_err(serde::de::Error::custom)
            }
        }
    };
}

typed_id!(
    /// Organization id.
    OrgId => Kind::Org
);
typed_id!(
    /// Project id.
    ProjectId => Kind::Project
);
typed_id!(
    /// User (identity) id.
    UserId => Kind::User
);
typed_id!(BuildId => Kind::Build);
typed_id!(ConnectionId => Kind::Connection);
typed_id!(DeploymentId => Kind::Deployment);
typed_id!(EnvId => Kind::Env);
typed_id!(EventId => Kind::Event);
typed_id!(SessionId => Kind::Session);
typed_id!(TriggerId => Kind::Trigger);
typed_id!(IntegrationId => Kind::Integration);
