use crate::constants::DEFAULT_USER_ID;
use crate::ids::UserId;
use crate::originator::Originator;

/// `SecurityContext` carries the acting identity for a request or operation.
///
/// Built by the authentication layer and passed through the request
/// lifecycle. The authorization core reads the subject for policy checks and
/// ownership comparisons, and the originator for the system bypass.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    /// Authenticated user. `UserId::INVALID` when nobody is authenticated.
    subject_id: UserId,
    /// Origin of the request; system originators bypass authorization.
    #[serde(default)]
    originator: Originator,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Create an anonymous API `SecurityContext` with no subject.
    #[must_use]
    pub fn anonymous() -> Self {
        SecurityContextBuilder::default().build()
    }

    /// Context for a trusted internal caller acting without a user.
    #[must_use]
    pub fn system(originator: Originator) -> Self {
        Self::builder().originator(originator).build()
    }

    /// Context for the default user in single-tenant deployments.
    #[must_use]
    pub fn default_user() -> Self {
        Self::builder().subject_id(DEFAULT_USER_ID).build()
    }

    #[must_use]
    pub fn subject_id(&self) -> UserId {
        self.subject_id
    }

    /// Whether a valid subject is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.subject_id.is_valid()
    }

    #[must_use]
    pub fn originator(&self) -> Originator {
        self.originator
    }

    /// Whether the request comes from a system originator.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.originator.is_system()
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<UserId>,
    originator: Originator,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: UserId) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn originator(mut self, originator: Originator) -> Self {
        self.originator = originator;
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject_id: self.subject_id.unwrap_or(UserId::INVALID),
            originator: self.originator,
        }
    }
}
