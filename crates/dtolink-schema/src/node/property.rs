use crate::{
    prelude::*,
    validate::naming::{validate_ident, validate_unique},
};

///
/// Property
///
/// One named, typed member of an entity or a DTO.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default)]
    pub access: Access,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>, access: Access) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            access,
        }
    }

    pub fn writable(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self::new(name, ty, Access::Writable)
    }

    pub fn read_only(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self::new(name, ty, Access::ReadOnly)
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.access.is_writable()
    }
}

impl ValidateNode for Property {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident("property", &self.name) {
            errs.add(e);
        }
        if self.ty.name.trim().is_empty() {
            err!(errs, "property '{}' has an empty type name", self.name);
        }

        errs.result()
    }
}

// Validate each property and reject duplicate names within one owner.
pub(crate) fn validate_properties(properties: &[Property], errs: &mut ErrorTree) {
    for property in properties {
        if let Err(e) = property.validate() {
            errs.merge_for(property.name.clone(), e);
        }
    }

    validate_unique("property", properties.iter().map(|p| p.name.as_str()), errs);
}
