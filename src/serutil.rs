use {
    log::debug,
    serde::{
        de::{self, Deserializer, SeqAccess, Visitor},
        ser::{SerializeSeq, Serializer},
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        marker::PhantomData,
        ops::Index,
        slice::Iter,
        str::FromStr,
    },
};

/// Implement Display for a given class by formatting it as pretty-printed JSON.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl std::fmt::Display for $cls {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let buf = Vec::new();
                let serde_formatter = ::serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = ::serde_json::Serializer::with_formatter(buf, serde_formatter);
                match ::serde::Serialize::serialize(self, &mut ser) {
                    Ok(()) => (),
                    Err(e) => {
                        ::log::error!("Failed to serialize: {}", e);
                        return Err(::std::fmt::Error {});
                    }
                };
                match std::str::from_utf8(&ser.into_inner()) {
                    Ok(s) => write!(f, "{}", s),
                    Err(e) => {
                        ::log::error!("JSON serialization contained non-UTF-8 characters: {}", e);
                        Err(::std::fmt::Error {})
                    }
                }
            }
        }
    };
}

/// Implement FromStr for a given class by parsing it as JSON.
#[macro_export]
macro_rules! from_str_json {
    ($cls:ident) => {
        impl ::std::str::FromStr for $cls {
            type Err = ::serde_json::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match ::serde_json::from_str::<Self>(s) {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        ::log::debug!("Failed to parse: {}: {:?}", s, e);
                        Err(e)
                    }
                }
            }
        }
    };
}

/// Whether a [StringLikeList] was given as a bare string or as a JSON array.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ListKind {
    Single,
    List,
}

/// A JSON field that may be a single string-encoded element or a list of them.
///
/// The shape given at construction is kept: a bare string serializes as a bare string, and a list of one
/// element serializes as a list of one element. Equality is shape-sensitive for the same reason.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum StringLikeList<E> {
    Single(E),
    List(Vec<E>),
}

impl<E> StringLikeList<E> {
    #[inline]
    pub fn kind(&self) -> ListKind {
        match self {
            Self::Single(_) => ListKind::Single,
            Self::List(_) => ListKind::List,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(v) => v.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(v) => v.len(),
        }
    }

    pub fn iter(&self) -> Iter<'_, E> {
        match self {
            Self::Single(v) => std::slice::from_ref(v).iter(),
            Self::List(v) => v.iter(),
        }
    }

    pub fn to_vec(&self) -> Vec<&E> {
        self.iter().collect()
    }
}

impl<E> From<E> for StringLikeList<E> {
    fn from(v: E) -> Self {
        Self::Single(v)
    }
}

impl<E> From<Vec<E>> for StringLikeList<E> {
    fn from(v: Vec<E>) -> Self {
        Self::List(v)
    }
}

impl<E> Index<usize> for StringLikeList<E> {
    type Output = E;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Self::Single(v) => {
                if index == 0 {
                    v
                } else {
                    panic!("index out of bounds: the len is 1 but the index is {}", index);
                }
            }
            Self::List(v) => &v[index],
        }
    }
}

impl<'a, E> IntoIterator for &'a StringLikeList<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Display> Display for StringLikeList<E> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Single(v) => write!(f, "{}", v),
            Self::List(v) => {
                let mut first = true;
                f.write_str("[")?;
                for e in v {
                    if first {
                        first = false;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                f.write_str("]")
            }
        }
    }
}

struct StringLikeListVisitor<E> {
    phantom: PhantomData<E>,
}

impl<'de, E> Visitor<'de> for StringLikeListVisitor<E>
where
    E: FromStr,
    E::Err: Display,
{
    type Value = StringLikeList<E>;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("string or list of strings")
    }

    fn visit_str<SE: de::Error>(self, v: &str) -> Result<Self::Value, SE> {
        match E::from_str(v) {
            Ok(e) => Ok(StringLikeList::Single(e)),
            Err(e) => {
                debug!("Failed to parse list element {v:?}: {e}");
                Err(SE::custom(e))
            }
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = match access.size_hint() {
            Some(size) => Vec::with_capacity(size),
            None => Vec::new(),
        };

        while let Some(item) = access.next_element::<String>()? {
            match E::from_str(&item) {
                Ok(e) => result.push(e),
                Err(e) => {
                    debug!("Failed to parse list element {item:?}: {e}");
                    return Err(de::Error::custom(e));
                }
            }
        }

        Ok(StringLikeList::List(result))
    }
}

impl<'de, E> Deserialize<'de> for StringLikeList<E>
where
    E: FromStr,
    E::Err: Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StringLikeListVisitor {
            phantom: PhantomData,
        })
    }
}

impl<E: Display> Serialize for StringLikeList<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(v) => serializer.serialize_str(&v.to_string()),
            Self::List(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for e in v {
                    seq.serialize_element(&e.to_string())?;
                }
                seq.end()
            }
        }
    }
}
