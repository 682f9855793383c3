use crate::serutil::StringLikeList;

/// One resource identifier or an ordered list of them.
///
/// Identifiers are passed to the service as given; they are not validated here.
pub type ResourceList = StringLikeList<String>;

/// The resource identifier that matches every resource in the stack.
pub const ANY_RESOURCE: &str = "*";

/// Returns the identifier for a resource by its logical ID, e.g. `LogicalResourceId/MyBucket`.
pub fn logical_resource_id<S: AsRef<str>>(logical_id: S) -> String {
    format!("LogicalResourceId/{}", logical_id.as_ref())
}

impl From<&str> for ResourceList {
    fn from(v: &str) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<Vec<&str>> for ResourceList {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(str::to_string).collect())
    }
}
