use {
    crate::{display_json, from_str_json, Action, ActionList, Condition, Effect, Principal, ResourceList},
    derive_builder::Builder,
    log::debug,
    serde::{
        de::{self, Deserializer, MapAccess, Visitor},
        ser::{SerializeMap, Serializer},
        Deserialize, Serialize,
    },
    std::fmt::{Formatter, Result as FmtResult},
};

/// Which actions a statement applies to.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ActionClause {
    /// The statement applies to the listed actions (`action`).
    Action(ActionList),

    /// The statement applies to every action except this one (`notAction`).
    NotAction(Action),
}

impl ActionClause {
    #[inline]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Action(_) => "action",
            Self::NotAction(_) => "notAction",
        }
    }
}

impl From<ActionList> for ActionClause {
    fn from(actions: ActionList) -> Self {
        Self::Action(actions)
    }
}

impl From<Action> for ActionClause {
    fn from(action: Action) -> Self {
        Self::Action(ActionList::Single(action))
    }
}

impl From<Vec<Action>> for ActionClause {
    fn from(actions: Vec<Action>) -> Self {
        Self::Action(ActionList::List(actions))
    }
}

/// Which resources a statement applies to.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ResourceClause {
    /// The statement applies to the listed resources (`resource`).
    Resource(ResourceList),

    /// The statement applies to every resource except the listed ones (`notResource`).
    NotResource(ResourceList),
}

impl ResourceClause {
    #[inline]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Resource(_) => "resource",
            Self::NotResource(_) => "notResource",
        }
    }

    #[inline]
    pub fn resources(&self) -> &ResourceList {
        match self {
            Self::Resource(r) | Self::NotResource(r) => r,
        }
    }
}

impl From<ResourceList> for ResourceClause {
    fn from(resources: ResourceList) -> Self {
        Self::Resource(resources)
    }
}

impl From<&str> for ResourceClause {
    fn from(resource: &str) -> Self {
        Self::Resource(resource.into())
    }
}

impl From<String> for ResourceClause {
    fn from(resource: String) -> Self {
        Self::Resource(resource.into())
    }
}

impl From<Vec<&str>> for ResourceClause {
    fn from(resources: Vec<&str>) -> Self {
        Self::Resource(resources.into())
    }
}

impl From<Vec<String>> for ResourceClause {
    fn from(resources: Vec<String>) -> Self {
        Self::Resource(resources.into())
    }
}

/// The four statement shapes, named by the fields they carry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StatementKind {
    ActionResource,
    ActionNotResource,
    NotActionResource,
    NotActionNotResource,
}

/// One allow/deny rule within a stack policy.
///
/// A statement carries exactly one of `action`/`notAction` and exactly one of `resource`/`notResource`; the
/// [ActionClause] and [ResourceClause] types make any other combination unrepresentable.
#[derive(Builder, Clone, Debug, Eq, Hash, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Statement {
    effect: Effect,

    #[builder(default)]
    principal: Principal,

    #[builder(setter(into))]
    action: ActionClause,

    #[builder(setter(into))]
    resource: ResourceClause,

    #[builder(setter(into, strip_option), default)]
    condition: Option<Condition>,
}

impl Statement {
    pub fn builder() -> StatementBuilder {
        StatementBuilder::default()
    }

    /// A statement with `action` and `resource`.
    pub fn action_resource<A, R>(effect: Effect, action: A, resource: R) -> Self
    where
        A: Into<ActionList>,
        R: Into<ResourceList>,
    {
        Self::with_clauses(effect, ActionClause::Action(action.into()), ResourceClause::Resource(resource.into()))
    }

    /// A statement with `action` and `notResource`.
    pub fn action_not_resource<A, R>(effect: Effect, action: A, not_resource: R) -> Self
    where
        A: Into<ActionList>,
        R: Into<ResourceList>,
    {
        Self::with_clauses(
            effect,
            ActionClause::Action(action.into()),
            ResourceClause::NotResource(not_resource.into()),
        )
    }

    /// A statement with `notAction` and `resource`.
    pub fn not_action_resource<R>(effect: Effect, not_action: Action, resource: R) -> Self
    where
        R: Into<ResourceList>,
    {
        Self::with_clauses(effect, ActionClause::NotAction(not_action), ResourceClause::Resource(resource.into()))
    }

    /// A statement with `notAction` and `notResource`.
    pub fn not_action_not_resource<R>(effect: Effect, not_action: Action, not_resource: R) -> Self
    where
        R: Into<ResourceList>,
    {
        Self::with_clauses(
            effect,
            ActionClause::NotAction(not_action),
            ResourceClause::NotResource(not_resource.into()),
        )
    }

    fn with_clauses(effect: Effect, action: ActionClause, resource: ResourceClause) -> Self {
        Self {
            effect,
            principal: Principal::Any,
            action,
            resource,
            condition: None,
        }
    }

    /// Returns this statement narrowed by the given condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[inline]
    pub fn kind(&self) -> StatementKind {
        match (&self.action, &self.resource) {
            (ActionClause::Action(_), ResourceClause::Resource(_)) => StatementKind::ActionResource,
            (ActionClause::Action(_), ResourceClause::NotResource(_)) => StatementKind::ActionNotResource,
            (ActionClause::NotAction(_), ResourceClause::Resource(_)) => StatementKind::NotActionResource,
            (ActionClause::NotAction(_), ResourceClause::NotResource(_)) => StatementKind::NotActionNotResource,
        }
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn principal(&self) -> Principal {
        self.principal
    }

    #[inline]
    pub fn action_clause(&self) -> &ActionClause {
        &self.action
    }

    #[inline]
    pub fn resource_clause(&self) -> &ResourceClause {
        &self.resource
    }

    #[inline]
    pub fn action(&self) -> Option<&ActionList> {
        match &self.action {
            ActionClause::Action(actions) => Some(actions),
            ActionClause::NotAction(_) => None,
        }
    }

    #[inline]
    pub fn not_action(&self) -> Option<Action> {
        match &self.action {
            ActionClause::Action(_) => None,
            ActionClause::NotAction(action) => Some(*action),
        }
    }

    #[inline]
    pub fn resource(&self) -> Option<&ResourceList> {
        match &self.resource {
            ResourceClause::Resource(resources) => Some(resources),
            ResourceClause::NotResource(_) => None,
        }
    }

    #[inline]
    pub fn not_resource(&self) -> Option<&ResourceList> {
        match &self.resource {
            ResourceClause::Resource(_) => None,
            ResourceClause::NotResource(resources) => Some(resources),
        }
    }

    #[inline]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

display_json!(Statement);
from_str_json!(Statement);

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(None)?;
        state.serialize_entry("effect", &self.effect)?;
        match &self.action {
            ActionClause::Action(actions) => state.serialize_entry("action", actions)?,
            ActionClause::NotAction(action) => state.serialize_entry("notAction", action)?,
        }
        state.serialize_entry("principal", &self.principal)?;
        state.serialize_entry(self.resource.key(), self.resource.resources())?;
        if let Some(condition) = &self.condition {
            state.serialize_entry("condition", condition)?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StatementVisitor {})
    }
}

const STATEMENT_FIELDS: &[&str] = &["effect", "action", "notAction", "principal", "resource", "notResource", "condition"];

struct StatementVisitor;
impl<'de> Visitor<'de> for StatementVisitor {
    type Value = Statement;

    fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
        formatter.write_str("a map of statement properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Statement, A::Error> {
        let mut builder = Statement::builder();
        let mut effect_seen = false;
        let mut action_seen = false;
        let mut not_action_seen = false;
        let mut principal_seen = false;
        let mut resource_seen = false;
        let mut not_resource_seen = false;
        let mut condition_seen = false;

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "effect" => {
                    if effect_seen {
                        return Err(de::Error::duplicate_field("effect"));
                    }

                    effect_seen = true;
                    builder.effect(access.next_value::<Effect>()?);
                }
                "action" => {
                    if action_seen {
                        return Err(de::Error::duplicate_field("action"));
                    }
                    if not_action_seen {
                        debug!("Statement sets both action and notAction.");
                        return Err(de::Error::custom("action and notAction cannot both be set"));
                    }

                    action_seen = true;
                    builder.action(access.next_value::<ActionList>()?);
                }
                "notAction" => {
                    if not_action_seen {
                        return Err(de::Error::duplicate_field("notAction"));
                    }
                    if action_seen {
                        debug!("Statement sets both action and notAction.");
                        return Err(de::Error::custom("action and notAction cannot both be set"));
                    }

                    not_action_seen = true;
                    builder.action(ActionClause::NotAction(access.next_value::<Action>()?));
                }
                "principal" => {
                    if principal_seen {
                        return Err(de::Error::duplicate_field("principal"));
                    }

                    principal_seen = true;
                    builder.principal(access.next_value::<Principal>()?);
                }
                "resource" => {
                    if resource_seen {
                        return Err(de::Error::duplicate_field("resource"));
                    }
                    if not_resource_seen {
                        debug!("Statement sets both resource and notResource.");
                        return Err(de::Error::custom("resource and notResource cannot both be set"));
                    }

                    resource_seen = true;
                    builder.resource(ResourceClause::Resource(access.next_value::<ResourceList>()?));
                }
                "notResource" => {
                    if not_resource_seen {
                        return Err(de::Error::duplicate_field("notResource"));
                    }
                    if resource_seen {
                        debug!("Statement sets both resource and notResource.");
                        return Err(de::Error::custom("resource and notResource cannot both be set"));
                    }

                    not_resource_seen = true;
                    builder.resource(ResourceClause::NotResource(access.next_value::<ResourceList>()?));
                }
                "condition" => {
                    if condition_seen {
                        return Err(de::Error::duplicate_field("condition"));
                    }

                    condition_seen = true;
                    builder.condition(access.next_value::<Condition>()?);
                }
                _ => return Err(de::Error::unknown_field(&key, STATEMENT_FIELDS)),
            }
        }

        if !principal_seen {
            return Err(de::Error::missing_field("principal"));
        }

        builder.build().map_err(|e| match e {
            StatementBuilderError::ValidationError(s) => {
                let msg2 = s.replace('.', ";").trim_end_matches(|c| c == ';').to_string();
                de::Error::custom(StatementBuilderError::ValidationError(msg2))
            }
            _ => de::Error::custom(e),
        })
    }
}

impl StatementBuilder {
    /// Sets `notAction`, replacing any `action` or `notAction` set earlier.
    pub fn not_action(&mut self, action: Action) -> &mut Self {
        self.action = Some(ActionClause::NotAction(action));
        self
    }

    /// Sets `notResource`, replacing any `resource` or `notResource` set earlier.
    pub fn not_resource<R: Into<ResourceList>>(&mut self, resources: R) -> &mut Self {
        self.resource = Some(ResourceClause::NotResource(resources.into()));
        self
    }

    fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::with_capacity(3);
        if self.effect.is_none() {
            errors.push("effect must be set.");
        }

        if self.action.is_none() {
            errors.push("Either action or notAction must be set.");
        }

        if self.resource.is_none() {
            errors.push("Either resource or notResource must be set.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            debug!("Statement validation failed: {errors:?}");
            Err(errors.join(" "))
        }
    }
}
