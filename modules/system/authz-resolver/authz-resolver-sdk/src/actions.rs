//! Action vocabulary.
//!
//! Actions are written `type:name`. The type is what baseline rules look at
//! (`create`, `read`, `write`, `delete`); the name identifies the operation.

/// Split an action on its first `:`. A missing separator yields an empty type.
#[must_use]
pub fn split(action: &str) -> (&str, &str) {
    action.split_once(':').unwrap_or(("", action))
}

pub const CREATE: &str = "create";
pub const READ: &str = "read";
pub const WRITE: &str = "write";
pub const DELETE: &str = "delete";

pub mod orgs {
    pub const CREATE: &str = "create:create";
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const UPDATE: &str = "write:update";
    pub const DELETE: &str = "delete:delete";
    pub const ADD_MEMBER: &str = "write:add_member";
    pub const REMOVE_MEMBER: &str = "write:remove_member";
    pub const LIST_MEMBERS: &str = "read:list_members";
}

pub mod projects {
    pub const CREATE: &str = "create:create";
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const UPDATE: &str = "write:update";
    pub const DELETE: &str = "delete:delete";
}

pub mod builds {
    pub const CREATE: &str = "create:create";
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const DOWNLOAD: &str = "read:download";
    pub const DELETE: &str = "delete:delete";
}

pub mod deployments {
    pub const CREATE: &str = "create:create";
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const ACTIVATE: &str = "write:activate";
    pub const DEACTIVATE: &str = "write:deactivate";
    pub const DELETE: &str = "delete:delete";
}

pub mod sessions {
    pub const START: &str = "create:start";
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const EVENTS: &str = "read:events";
    pub const STOP: &str = "write:stop";
    pub const SIGNAL: &str = "write:signal";
    pub const DELETE: &str = "delete:delete";
}

pub mod connections {
    pub const CREATE: &str = "create:create";
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const UPDATE: &str = "write:update";
    pub const REFRESH: &str = "write:refresh";
    pub const DELETE: &str = "delete:delete";
}

pub mod triggers {
    pub const CREATE: &str = "create:create";
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const UPDATE: &str = "write:update";
    pub const DELETE: &str = "delete:delete";
}

pub mod events {
    pub const INGEST: &str = "create:ingest";
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const REDELIVER: &str = "write:redeliver";
}

pub mod vars {
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const SET: &str = "write:set";
    pub const DELETE: &str = "delete:delete";
}

pub mod users {
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
    pub const UPDATE: &str = "write:update";
}

pub mod integrations {
    pub const GET: &str = "read:get";
    pub const LIST: &str = "read:list";
}
