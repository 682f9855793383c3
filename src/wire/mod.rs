//! Conversion of camelCase value trees into the PascalCase wire format.
//!
//! The walk is schema-agnostic: it knows nothing about statements or conditions, only objects, arrays,
//! scalars, and absent values. Trees are assumed to be acyclic, which always holds for [serde_json::Value].

#[cfg(test)]
mod tests;

use {
    crate::{NoTokens, Resolution, StackPolicyError, TokenResolver},
    log::trace,
    serde::Serialize,
    serde_json::{Map, Value},
    std::borrow::Cow,
};

/// The shape of a node in a value tree, as seen by the wire transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    /// A string, number, boolean, or null.
    Scalar(&'a Value),
    Absent,
}

impl<'a> Shape<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => Self::Absent,
            Some(Value::Object(map)) => Self::Object(map),
            Some(Value::Array(items)) => Self::Array(items),
            Some(scalar) => Self::Scalar(scalar),
        }
    }
}

/// Rewrites a lower-camel-case key to upper-camel-case by uppercasing its first character.
///
/// Keys that already start with an uppercase letter or a non-letter are returned unchanged, so applying this
/// twice is the same as applying it once.
pub fn pascal_case_key(key: &str) -> Cow<'_, str> {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            let mut result = String::with_capacity(key.len());
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
            Cow::Owned(result)
        }
        _ => Cow::Borrowed(key),
    }
}

/// Returns a copy of `value` with every object key, at every depth, rewritten by [pascal_case_key].
///
/// String scalars are offered to `resolver` first. A resolved token is replaced by its value (whose keys are
/// rewritten too, without resolving tokens inside it again); a token resolving to no value is treated as absent.
/// Absent values are dropped: an object loses the key, an array loses the element. Returns `None` only when
/// `value` itself is absent.
pub fn capitalize_keys<R: TokenResolver + ?Sized>(value: Option<&Value>, resolver: &R) -> Option<Value> {
    match Shape::of(value) {
        Shape::Absent => None,
        Shape::Scalar(Value::String(s)) => match resolver.resolve_token(s) {
            Resolution::Unresolved => Some(Value::String(s.clone())),
            Resolution::Value(resolved) => {
                trace!("Resolved token {s:?} to {resolved}");
                capitalize_keys(Some(&resolved), &NoTokens)
            }
            Resolution::Absent => {
                trace!("Token {s:?} resolved to no value");
                None
            }
        },
        Shape::Scalar(scalar) => Some(scalar.clone()),
        Shape::Array(items) => {
            Some(Value::Array(items.iter().filter_map(|item| capitalize_keys(Some(item), resolver)).collect()))
        }
        Shape::Object(map) => {
            let mut result = Map::with_capacity(map.len());
            for (key, value) in map {
                match capitalize_keys(Some(value), resolver) {
                    Some(value) => {
                        let key = pascal_case_key(key).into_owned();
                        if result.contains_key(&key) {
                            trace!("Key {key:?} appears more than once after case conversion; the last one wins");
                        }
                        result.insert(key, value);
                    }
                    None => trace!("Dropping key {key:?} with no value"),
                }
            }
            Some(Value::Object(result))
        }
    }
}

/// Serializes `value` and converts the result to the PascalCase wire format.
///
/// A value that serializes to a token resolving to no value produces `null`.
pub fn to_wire<T, R>(value: &T, resolver: &R) -> Result<Value, StackPolicyError>
where
    T: Serialize + ?Sized,
    R: TokenResolver + ?Sized,
{
    let tree = serde_json::to_value(value)?;
    Ok(capitalize_keys(Some(&tree), resolver).unwrap_or(Value::Null))
}
