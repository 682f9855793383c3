use {
    crate::{serutil::StringLikeList, StackPolicyError},
    log::debug,
    serde::{
        de::{self, Deserializer, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// One action or an ordered list of actions.
pub type ActionList = StringLikeList<Action>;

/// An update operation that a stack policy statement can allow or deny.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Action {
    /// `Update:Modify`: updates that modify a resource in place, with or without interruption.
    Modify,

    /// `Update:Replace`: updates that recreate a resource with a new physical ID.
    Replace,

    /// `Update:Delete`: updates that remove a resource from the stack.
    Delete,

    /// `Update:*`: all update actions.
    Any,
}

impl Action {
    /// All actions, in their canonical order.
    pub const ALL: [Action; 4] = [Self::Modify, Self::Replace, Self::Delete, Self::Any];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modify => "Update:Modify",
            Self::Replace => "Update:Replace",
            Self::Delete => "Update:Delete",
            Self::Any => "Update:*",
        }
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl FromStr for Action {
    type Err = StackPolicyError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        match Self::ALL.iter().find(|action| action.as_str() == v) {
            Some(action) => Ok(*action),
            None => {
                debug!("Action '{v}' is not a stack update action.");
                Err(StackPolicyError::InvalidAction(v.to_string()))
            }
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

struct ActionVisitor;

impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("Update:Modify, Update:Replace, Update:Delete, or Update:*")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Action::from_str(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ActionVisitor)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
