use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

///
/// Access
///
/// Whether a property can be written back through a mutator.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
#[serde(rename_all = "snake_case")]
pub enum Access {
    ReadOnly,
    #[default]
    Writable,
}

impl Access {
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Writable)
    }
}

///
/// TypeRef
///
/// Declared type of a property or parameter. Types are compared by name; the
/// engine never interprets them beyond nullability.
///
/// Serialized as a single string, `"int"` or `"int?"` for the nullable form.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TypeRef {
    pub name: String,
    pub nullable: bool,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
        }
    }

    /// Parse the compact `name` / `name?` form.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.strip_suffix('?') {
            Some(name) => Self::nullable(name.trim_end()),
            None => Self::new(text),
        }
    }

    /// How closely `other` agrees with this type.
    #[must_use]
    pub fn agreement(&self, other: &Self) -> TypeAgreement {
        if self.name != other.name {
            TypeAgreement::Mismatch
        } else if self.nullable == other.nullable {
            TypeAgreement::Exact
        } else {
            TypeAgreement::Nullability
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        Ok(Self::parse(&text))
    }
}

///
/// TypeAgreement
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TypeAgreement {
    Exact,
    Nullability,
    Mismatch,
}
