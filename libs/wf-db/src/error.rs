use sea_orm::DbErr;
use wf_security::ResourceId;

/// Errors from ownership checks and ledger access.
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    /// The context carries no resolvable acting identity.
    #[error("unknown user")]
    UnknownUser,

    /// The acting identity does not own `entity`.
    #[error("not the owner of {entity}")]
    Unauthorized { entity: ResourceId },

    #[error("no ownership record for {0}")]
    NotFound(ResourceId),

    /// A uniqueness constraint rejected the write.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl OwnershipError {
    /// Map a write error, surfacing uniqueness violations as `AlreadyExists`.
    pub(crate) fn from_write(e: DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => Self::AlreadyExists(msg),
            _ => Self::Db(e),
        }
    }
}
