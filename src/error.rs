use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug, Eq, PartialEq)]
pub enum StackPolicyError {
    InvalidAction(String),
    InvalidEffect(String),
    InvalidId(String),
    InvalidPrincipal(String),
    Serialization(String),
}

impl Display for StackPolicyError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAction(action) => write!(f, "Invalid action: {}", action),
            Self::InvalidEffect(effect) => write!(f, "Invalid effect: {}", effect),
            Self::InvalidId(id) => write!(f, "Invalid id: {:?}", id),
            Self::InvalidPrincipal(principal) => write!(f, "Invalid principal: {}", principal),
            Self::Serialization(msg) => write!(f, "Serialization failed: {}", msg),
        }
    }
}

impl Error for StackPolicyError {}

impl From<serde_json::Error> for StackPolicyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
