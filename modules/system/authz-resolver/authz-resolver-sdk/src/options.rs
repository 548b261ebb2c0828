//! Per-call options for [`AccessChecker::check`](crate::AccessChecker::check).

use serde_json::{Map, Value};
use uuid::Uuid;
use wf_security::{OrgId, ProjectId, ResourceId, UserId};

use crate::associations::Association;
use crate::models::{Org, Project, User};

/// Converts typed values into auxiliary data for the decision point.
pub trait IntoDataValue {
    fn into_data_value(self) -> Value;
}

impl IntoDataValue for Value {
    #[inline]
    fn into_data_value(self) -> Value {
        self
    }
}

impl IntoDataValue for Uuid {
    #[inline]
    fn into_data_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl IntoDataValue for String {
    #[inline]
    fn into_data_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoDataValue for &str {
    #[inline]
    fn into_data_value(self) -> Value {
        Value::String(self.to_owned())
    }
}

impl IntoDataValue for i64 {
    #[inline]
    fn into_data_value(self) -> Value {
        Value::Number(self.into())
    }
}

impl IntoDataValue for bool {
    #[inline]
    fn into_data_value(self) -> Value {
        Value::Bool(self)
    }
}

macro_rules! id_data_value {
    ($($ty:ty),*) => {
        $(
            impl IntoDataValue for $ty {
                #[inline]
                fn into_data_value(self) -> Value {
                    Value::String(self.to_string())
                }
            }
        )*
    };
}

id_data_value!(ResourceId, OrgId, ProjectId, UserId);

macro_rules! model_data_value {
    ($($ty:ty),*) => {
        $(
            impl IntoDataValue for &$ty {
                fn into_data_value(self) -> Value {
                    serde_json::to_value(self).unwrap_or_default()
                }
            }
        )*
    };
}

model_data_value!(Project, Org, User);

/// Options for a single check.
///
/// ```ignore
/// checker
///     .check(
///         &ctx,
///         ProjectId::INVALID.into(),
///         actions::projects::CREATE,
///         &CheckOptions::new().data("project", &project),
///     )
///     .await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    data: Map<String, Value>,
    associations: Vec<(Association, ResourceId)>,
    convert_forbidden_to_not_found: bool,
}

impl CheckOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a key into the auxiliary data. Later keys overwrite earlier ones.
    #[must_use]
    pub fn data(mut self, key: impl Into<String>, value: impl IntoDataValue) -> Self {
        self.data.insert(key.into(), value.into_data_value());
        self
    }

    /// Register a named association. Invalid ids are ignored at build time.
    #[must_use]
    pub fn association(mut self, name: Association, id: impl Into<ResourceId>) -> Self {
        self.associations.push((name, id.into()));
        self
    }

    /// Report a denial as `NotFound` instead of `Unauthorized`.
    #[must_use]
    pub fn convert_forbidden_to_not_found(mut self) -> Self {
        self.convert_forbidden_to_not_found = true;
        self
    }

    #[must_use]
    pub fn data_map(&self) -> &Map<String, Value> {
        &self.data
    }

    #[must_use]
    pub fn associations(&self) -> &[(Association, ResourceId)] {
        &self.associations
    }

    #[must_use]
    pub fn forbidden_as_not_found(&self) -> bool {
        self.convert_forbidden_to_not_found
    }
}
