#![warn(clippy::all)]
pub(crate) mod action;
pub(crate) mod condition;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod node;
pub(crate) mod policy;
pub(crate) mod principal;
pub(crate) mod resource;
pub(crate) mod scope;
pub(crate) mod statement;
pub mod wire;

#[macro_use]
pub(crate) mod serutil;

pub use {
    action::{Action, ActionList},
    condition::{Condition, ResourceTypes},
    effect::Effect,
    error::StackPolicyError,
    node::StackPolicy,
    policy::{StackPolicyDocument, StackPolicyDocumentBuilder, StackPolicyDocumentBuilderError},
    principal::Principal,
    resource::{logical_resource_id, ResourceList, ANY_RESOURCE},
    scope::{NoTokens, Resolution, Scope, TokenResolver},
    serutil::{ListKind, StringLikeList},
    statement::{
        ActionClause, ResourceClause, Statement, StatementBuilder, StatementBuilderError, StatementKind,
    },
};
