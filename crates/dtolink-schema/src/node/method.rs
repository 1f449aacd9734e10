use crate::{
    prelude::*,
    validate::naming::{validate_ident, validate_unique},
};
use std::fmt;

///
/// Param
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Param {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

///
/// Method
///
/// A public mutator on an entity: a name plus its ordered parameters.
/// Overloads are separate `Method` values sharing a name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Method {
    pub name: String,

    #[serde(default)]
    pub params: Vec<Param>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

// Renders as a signature, e.g. `Order(decimal amount, string status)`.
impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")
    }
}

impl ValidateNode for Method {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident("method", &self.name) {
            errs.add(e);
        }

        for param in &self.params {
            if let Err(e) = validate_ident("parameter", &param.name) {
                errs.add(e);
            }
            if param.ty.name.trim().is_empty() {
                err!(errs, "parameter '{}' has an empty type name", param.name);
            }
        }

        validate_unique("parameter", self.params.iter().map(|p| p.name.as_str()), &mut errs);

        errs.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_renders_as_signature() {
        let method = Method::new("Order")
            .with_param("amount", "decimal")
            .with_param("note", "string?");

        assert_eq!(method.to_string(), "Order(decimal amount, string? note)");
        assert_eq!(Method::new("Touch").to_string(), "Touch()");
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        let method = Method::new("Set").with_param("x", "int").with_param("x", "int");
        let errs = method.validate().unwrap_err();

        assert_eq!(errs.len(), 1);
        assert!(errs.to_string().contains("duplicate parameter 'x'"));
    }
}
