use crate::{
    node::property::validate_properties,
    prelude::*,
    validate::naming::{validate_ident, validate_unique},
};

///
/// Entity
///
/// Descriptor of a persistent entity: its properties, which of them form
/// the key, and the public mutators that can apply new values.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,

    #[serde(default)]
    pub properties: Vec<Property>,

    /// Key property names, in key order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_key: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,

    /// Explicit override for method-based updates. When absent, an entity
    /// supports them iff it declares at least one mutator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_updates: Option<bool>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            primary_key: Vec::new(),
            methods: Vec::new(),
            method_updates: None,
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key.push(name.into());
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub const fn with_method_updates(mut self, enabled: bool) -> Self {
        self.method_updates = Some(enabled);
        self
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Key properties in key order. Unknown key names are skipped; schema
    /// validation reports them.
    pub fn key_properties(&self) -> impl Iterator<Item = &Property> {
        self.primary_key.iter().filter_map(|key| self.property(key))
    }

    /// Mutators whose name is exactly `name`, in declaration order.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Method> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    #[must_use]
    pub fn supports_method_updates(&self) -> bool {
        self.method_updates.unwrap_or(!self.methods.is_empty())
    }
}

impl ValidateNode for Entity {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident("entity", &self.name) {
            errs.add(e);
        }

        validate_properties(&self.properties, &mut errs);

        // primary key
        for key in &self.primary_key {
            if self.property(key).is_none() {
                err!(errs, "key property '{key}' is not a property of the entity");
            }
        }
        validate_unique("key property", self.primary_key.iter().map(String::as_str), &mut errs);

        // methods
        for (index, method) in self.methods.iter().enumerate() {
            if let Err(e) = method.validate() {
                errs.merge_for(format!("{}#{index}", method.name), e);
            }
        }

        errs.result()
    }
}
