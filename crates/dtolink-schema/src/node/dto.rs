use crate::{
    node::property::validate_properties,
    prelude::*,
    validate::naming::validate_ident,
};

///
/// Dto
///
/// Descriptor of a flat external data shape linked to one entity.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Dto {
    pub name: String,

    /// Name of the entity this DTO reads from and writes to.
    pub links_to: String,

    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Dto {
    pub fn new(name: impl Into<String>, links_to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links_to: links_to.into(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn writable_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| p.is_writable())
    }
}

impl ValidateNode for Dto {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident("dto", &self.name) {
            errs.add(e);
        }
        if let Err(e) = validate_ident("linked entity", &self.links_to) {
            errs.add(e);
        }

        validate_properties(&self.properties, &mut errs);

        errs.result()
    }
}
