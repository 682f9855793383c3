use {
    crate::{display_json, from_str_json},
    serde::{Deserialize, Serialize},
};

/// The resource types a [Condition] compares against.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ResourceTypes {
    resource_type: Vec<String>,
}

impl ResourceTypes {
    pub fn new<I, S>(resource_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resource_type: resource_types.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn resource_type(&self) -> &[String] {
        &self.resource_type
    }
}

/// A predicate narrowing a statement to resources of matching types.
///
/// Exactly one operator is active per condition.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// Matches resources whose type is exactly one of the given types.
    StringEquals(ResourceTypes),

    /// Matches resources whose type matches one of the given wildcard patterns, e.g. `AWS::EC2::*`.
    StringLike(ResourceTypes),
}

impl Condition {
    pub fn string_equals<I, S>(resource_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringEquals(ResourceTypes::new(resource_types))
    }

    pub fn string_like<I, S>(resource_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringLike(ResourceTypes::new(resource_types))
    }

    /// The name of the operator as it appears in the in-memory document.
    pub fn operator(&self) -> &'static str {
        match self {
            Self::StringEquals(_) => "stringEquals",
            Self::StringLike(_) => "stringLike",
        }
    }

    pub fn resource_types(&self) -> &[String] {
        match self {
            Self::StringEquals(rt) | Self::StringLike(rt) => rt.resource_type(),
        }
    }
}

display_json!(Condition);
from_str_json!(Condition);
