use {
    crate::StackPolicyError,
    log::debug,
    serde_json::Value,
    std::{
        collections::BTreeMap,
        fmt::{Display, Formatter, Result as FmtResult},
        sync::Arc,
    },
};

const TOKEN_PREFIX: &str = "${Token[";
const TOKEN_SUFFIX: &str = "]}";

/// The result of asking a [TokenResolver] about a string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The string is not a known token; it is kept as-is.
    Unresolved,

    /// The string is a token standing for this value.
    Value(Value),

    /// The string is a token standing for "no value"; whatever holds it is omitted.
    Absent,
}

/// Resolves placeholder strings embedded in a value tree.
pub trait TokenResolver {
    fn resolve_token(&self, _candidate: &str) -> Resolution {
        Resolution::Unresolved
    }
}

/// A resolver that knows no tokens.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoTokens;

impl TokenResolver for NoTokens {}

/// A node in a tree of identifiers that owns stack policies and the tokens they may reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Scope {
    id: String,
    parent: Option<Arc<Scope>>,
    tokens: BTreeMap<String, Option<Value>>,
}

impl Scope {
    /// Creates the root of a scope tree.
    pub fn root<S: Into<String>>(id: S) -> Result<Self, StackPolicyError> {
        Ok(Self {
            id: validate_id(id.into())?,
            parent: None,
            tokens: BTreeMap::new(),
        })
    }

    /// Creates a scope beneath `parent`.
    pub fn child<S: Into<String>>(parent: &Arc<Scope>, id: S) -> Result<Self, StackPolicyError> {
        Ok(Self {
            id: validate_id(id.into())?,
            parent: Some(parent.clone()),
            tokens: BTreeMap::new(),
        })
    }

    /// Registers a token that resolves to `value`.
    pub fn with_token<N: Into<String>, V: Into<Value>>(mut self, name: N, value: V) -> Self {
        self.tokens.insert(name.into(), Some(value.into()));
        self
    }

    /// Registers a token that resolves to no value.
    pub fn with_absent_token<N: Into<String>>(mut self, name: N) -> Self {
        self.tokens.insert(name.into(), None);
        self
    }

    /// The placeholder string for the token `name`, suitable for embedding in a document.
    pub fn token<N: AsRef<str>>(name: N) -> String {
        format!("{}{}{}", TOKEN_PREFIX, name.as_ref(), TOKEN_SUFFIX)
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn parent(&self) -> Option<&Arc<Scope>> {
        self.parent.as_ref()
    }

    /// The IDs from the root to this scope, joined with `/`.
    pub fn path(&self) -> String {
        match &self.parent {
            None => self.id.clone(),
            Some(parent) => format!("{}/{}", parent.path(), self.id),
        }
    }

    fn lookup(&self, name: &str) -> Option<&Option<Value>> {
        match self.tokens.get(name) {
            Some(value) => Some(value),
            None => self.parent.as_ref().and_then(|parent| parent.lookup(name)),
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.path())
    }
}

impl TokenResolver for Scope {
    fn resolve_token(&self, candidate: &str) -> Resolution {
        let name = match candidate.strip_prefix(TOKEN_PREFIX).and_then(|rest| rest.strip_suffix(TOKEN_SUFFIX)) {
            Some(name) => name,
            None => return Resolution::Unresolved,
        };

        match self.lookup(name) {
            Some(Some(value)) => Resolution::Value(value.clone()),
            Some(None) => Resolution::Absent,
            None => {
                debug!("Token {name:?} is not registered in scope {}", self.path());
                Resolution::Unresolved
            }
        }
    }
}

impl<R: TokenResolver + ?Sized> TokenResolver for &R {
    fn resolve_token(&self, candidate: &str) -> Resolution {
        (**self).resolve_token(candidate)
    }
}

impl<R: TokenResolver + ?Sized> TokenResolver for Arc<R> {
    fn resolve_token(&self, candidate: &str) -> Resolution {
        (**self).resolve_token(candidate)
    }
}

fn validate_id(id: String) -> Result<String, StackPolicyError> {
    if id.is_empty() || id.contains('/') {
        debug!("Scope id {id:?} is empty or contains '/'.");
        Err(StackPolicyError::InvalidId(id))
    } else {
        Ok(id)
    }
}
