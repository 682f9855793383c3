use {
    crate::{display_json, from_str_json, Statement},
    derive_builder::Builder,
    serde::{
        de::{self, Deserializer, MapAccess, Visitor},
        ser::{SerializeMap, Serializer},
        Deserialize, Serialize,
    },
    std::{
        fmt::{Formatter, Result as FmtResult},
        ops::Index,
        slice::Iter,
    },
};

/// The top-level structure for holding a stack policy.
///
/// Statements are kept in the order given; the service evaluates them in that order.
///
/// This does not directly derive Deserialize/Serialize to prevent serde from allowing this to be represented as an
/// array.
#[derive(Builder, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct StackPolicyDocument {
    /// The statements of the policy.
    #[builder(setter(into), default)]
    statement: Vec<Statement>,
}

impl StackPolicyDocumentBuilder {
    /// Appends a statement after any already set.
    pub fn push_statement(&mut self, statement: Statement) -> &mut Self {
        self.statement.get_or_insert_with(Vec::new).push(statement);
        self
    }
}

impl StackPolicyDocument {
    #[inline]
    pub fn builder() -> StackPolicyDocumentBuilder {
        StackPolicyDocumentBuilder::default()
    }

    #[inline]
    pub fn new(statement: Vec<Statement>) -> Self {
        Self {
            statement,
        }
    }

    #[inline]
    pub fn statement(&self) -> &[Statement] {
        &self.statement
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Statement> {
        self.statement.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statement.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statement.len()
    }
}

impl From<Vec<Statement>> for StackPolicyDocument {
    fn from(statement: Vec<Statement>) -> Self {
        Self::new(statement)
    }
}

impl FromIterator<Statement> for StackPolicyDocument {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for StackPolicyDocument {
    type Output = Statement;

    fn index(&self, index: usize) -> &Self::Output {
        &self.statement[index]
    }
}

impl<'a> IntoIterator for &'a StackPolicyDocument {
    type Item = &'a Statement;
    type IntoIter = Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

display_json!(StackPolicyDocument);
from_str_json!(StackPolicyDocument);

struct StackPolicyDocumentVisitor;

impl<'de> Visitor<'de> for StackPolicyDocumentVisitor {
    type Value = StackPolicyDocument;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        formatter.write_str("stack policy")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut statement = None;

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "statement" => {
                    if statement.is_some() {
                        return Err(de::Error::duplicate_field("statement"));
                    }
                    statement = Some(access.next_value::<Vec<Statement>>()?);
                }
                _ => return Err(de::Error::unknown_field(&key, &["statement"])),
            }
        }

        match statement {
            Some(statement) => Ok(StackPolicyDocument::new(statement)),
            None => Err(de::Error::missing_field("statement")),
        }
    }
}

impl<'de> Deserialize<'de> for StackPolicyDocument {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<StackPolicyDocument, D::Error> {
        d.deserialize_map(StackPolicyDocumentVisitor)
    }
}

impl Serialize for StackPolicyDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(1))?;
        state.serialize_entry("statement", &self.statement)?;
        state.end()
    }
}
