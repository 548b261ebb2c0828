//! Domain errors for the authz resolver.

use authz_resolver_sdk::{AuthzError, PdpError, StoreError};
use wf_security::ResourceId;

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("no authenticated subject")]
    Unauthenticated,

    #[error("access to {id} denied")]
    Denied { id: ResourceId, as_not_found: bool },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error(transparent)]
    Decision(#[from] PdpError),

    #[error("store: {0}")]
    Store(String),
}

impl DomainError {
    /// Whether this error is a collaborator fault rather than a verdict.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Decision(_) | Self::Store(_))
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::AlreadyExists(what) => Self::AlreadyExists(what),
            StoreError::Internal(msg) => Self::Store(msg),
        }
    }
}

impl From<DomainError> for AuthzError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthenticated => Self::Unauthenticated,
            DomainError::Denied {
                id,
                as_not_found: true,
            } => Self::NotFound(id.to_string()),
            DomainError::Denied { .. } => Self::Unauthorized,
            DomainError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            DomainError::NotFound(what) => Self::NotFound(what),
            DomainError::AlreadyExists(what) => Self::AlreadyExists(what),
            DomainError::Decision(e) => Self::Decision(e),
            DomainError::Store(msg) => Self::Store(msg),
        }
    }
}
