//! Error types for the authz resolver.

use thiserror::Error;

/// Errors returned by an authorization check.
///
/// Authorization failures (`Unauthenticated`, `Unauthorized`, and the
/// `NotFound` remap of a denial) are terminal for the request and must not be
/// retried. Collaborator faults are wrapped in `Decision` and `Store`.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// No valid identity in scope.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Identity present but access was denied.
    #[error("unauthorized")]
    Unauthorized,

    /// The resource does not exist, or a denial was remapped to hide it.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed action, unhandled resource kind or bad association.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Uniqueness violation reported by the store.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// No check function has been configured. Never an implicit allow.
    #[error("authorization is not implemented")]
    NotImplemented,

    /// The policy decision point failed or violated its protocol.
    #[error("policy decision failed: {0}")]
    Decision(#[from] PdpError),

    /// The store failed for a reason other than absence or conflict.
    #[error("store error: {0}")]
    Store(String),
}

impl AuthzError {
    /// Whether this error is a genuine authorization denial.
    #[must_use]
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Unauthorized)
    }
}

/// Errors produced by a policy decision point.
#[derive(Debug, Error)]
pub enum PdpError {
    /// The decision value was not a JSON boolean.
    #[error("decision: not a boolean (got {0})")]
    NotBoolean(serde_json::Value),

    /// The decision point has no policy under the requested name.
    #[error("unknown policy '{0}'")]
    UnknownPolicy(String),

    /// The decision point cannot be reached.
    #[error("decision point unavailable: {0}")]
    Unavailable(String),

    /// Any other decision point failure.
    #[error("decision point internal error: {0}")]
    Internal(String),
}

/// Errors produced by the ownership store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for AuthzError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::AlreadyExists(what) => Self::AlreadyExists(what),
            StoreError::Internal(msg) => Self::Store(msg),
        }
    }
}
