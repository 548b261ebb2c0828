//! Domain layer for the static authz plugin.

mod client;
pub mod service;

pub use service::Service;
