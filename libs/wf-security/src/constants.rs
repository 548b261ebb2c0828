//! Sentinel identities for single-tenant and legacy operation.
//!
//! Neither sentinel is ever created or deleted through normal flows.

use uuid::Uuid;

use crate::ids::{OrgId, UserId};

/// The default organization. Membership lookups for it short-circuit.
pub const DEFAULT_ORG_ID: OrgId =
    OrgId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001));

/// The default user, implicitly an admin of [`DEFAULT_ORG_ID`].
pub const DEFAULT_USER_ID: UserId =
    UserId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0002));

/// Role granted to the default user in the default organization.
pub const ADMIN_ROLE: &str = "admin";
