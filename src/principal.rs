use {
    crate::{display_json, StackPolicyError},
    log::debug,
    serde::{
        de::{self, Deserializer, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The principal of a stack policy statement.
///
/// Stack policies apply to every principal, so the only value is the wildcard. The type makes the field
/// mandatory in a statement rather than expressing a choice.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Principal {
    #[default]
    Any,
}

impl Principal {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "*",
        }
    }
}

impl FromStr for Principal {
    type Err = StackPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            Ok(Self::Any)
        } else {
            debug!("Principal '{s}' is not the wildcard.");
            Err(StackPolicyError::InvalidPrincipal(s.to_string()))
        }
    }
}

struct PrincipalVisitor;

impl<'de> Visitor<'de> for PrincipalVisitor {
    type Value = Principal;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("\"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Principal::from_str(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(PrincipalVisitor)
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

display_json!(Principal);
