//! Domain layer for the authz resolver.

pub mod error;
pub mod fail_closed;
pub mod input;
pub mod local_client;
pub mod resolver;
pub mod scope;
pub mod service;

pub use error::DomainError;
pub use fail_closed::FailClosedChecker;
pub use input::PolicyInputBuilder;
pub use local_client::PolicyCheckClient;
pub use resolver::OwnershipResolver;
pub use scope::{Authorizer, RequestScope};
pub use service::Service;
