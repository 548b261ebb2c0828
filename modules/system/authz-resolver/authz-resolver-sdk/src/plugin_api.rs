//! Decision point contract.

use async_trait::async_trait;

use crate::error::PdpError;
use crate::models::PolicyInput;

/// A policy decision point: evaluates a named policy against an input.
///
/// Implementations return the raw decision value; the caller rejects anything
/// that is not a JSON boolean. Dropping the returned future cancels the call.
/// Timeouts belong to the implementation; callers never retry.
#[async_trait]
pub trait DecisionPoint: Send + Sync {
    /// # Errors
    ///
    /// - `UnknownPolicy` if `policy` is not loaded
    /// - `Unavailable` / `Internal` for engine faults
    async fn decide(&self, policy: &str, input: &PolicyInput)
    -> Result<serde_json::Value, PdpError>;
}
