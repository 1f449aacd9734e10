use crate::{Error, node::NodeError, prelude::*, validate::validate_schema};
use std::collections::BTreeMap;

///
/// Schema
///
/// Explicit registration container for entity and DTO descriptors, keyed by
/// name. Populated during setup, validated once, then only read.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schema {
    entities: BTreeMap<String, Entity>,
    dtos: BTreeMap<String, Dto>,
}

///
/// SchemaDef
/// On-disk form: flat lists, converted through the registration API so
/// duplicates are caught the same way.
///

#[derive(Debug, Default, Deserialize, Serialize)]
struct SchemaDef {
    #[serde(default)]
    entities: Vec<Entity>,

    #[serde(default)]
    dtos: Vec<Dto>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document of the form `{ "entities": [...], "dtos": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let def: SchemaDef = serde_json::from_str(json)?;

        let mut schema = Self::new();
        for entity in def.entities {
            schema.insert_entity(entity)?;
        }
        for dto in def.dtos {
            schema.insert_dto(dto)?;
        }

        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        let def = SchemaDef {
            entities: self.entities.values().cloned().collect(),
            dtos: self.dtos.values().cloned().collect(),
        };

        Ok(serde_json::to_string_pretty(&def)?)
    }

    pub fn insert_entity(&mut self, entity: Entity) -> Result<(), NodeError> {
        if self.entities.contains_key(&entity.name) {
            return Err(NodeError::EntityAlreadyRegistered(entity.name));
        }
        self.entities.insert(entity.name.clone(), entity);

        Ok(())
    }

    pub fn insert_dto(&mut self, dto: Dto) -> Result<(), NodeError> {
        if self.dtos.contains_key(&dto.name) {
            return Err(NodeError::DtoAlreadyRegistered(dto.name));
        }
        self.dtos.insert(dto.name.clone(), dto);

        Ok(())
    }

    pub fn get_entity(&self, name: &str) -> Result<&Entity, NodeError> {
        self.entities
            .get(name)
            .ok_or_else(|| NodeError::EntityNotFound(name.to_string()))
    }

    pub fn get_dto(&self, name: &str) -> Result<&Dto, NodeError> {
        self.dtos
            .get(name)
            .ok_or_else(|| NodeError::DtoNotFound(name.to_string()))
    }

    /// Entities in name order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// DTOs in name order.
    pub fn dtos(&self) -> impl Iterator<Item = &Dto> {
        self.dtos.values()
    }

    /// Validate every node and the links between them.
    pub fn validate(&self) -> Result<(), Error> {
        validate_schema(self).map_err(Error::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERS: &str = r#"{
        "entities": [
            {
                "name": "Order",
                "properties": [
                    { "name": "OrderId", "type": "int", "access": "read_only" },
                    { "name": "Amount", "type": "decimal" }
                ],
                "primary_key": ["OrderId"],
                "methods": [
                    { "name": "Order", "params": [{ "name": "amount", "type": "decimal" }] }
                ]
            }
        ],
        "dtos": [
            {
                "name": "OrderDto",
                "links_to": "Order",
                "properties": [
                    { "name": "OrderId", "type": "int", "access": "read_only" },
                    { "name": "Amount", "type": "decimal" }
                ]
            }
        ]
    }"#;

    #[test]
    fn json_schema_loads_and_validates() {
        let schema = Schema::from_json(ORDERS).unwrap();
        schema.validate().unwrap();

        let entity = schema.get_entity("Order").unwrap();
        assert_eq!(entity.key_properties().count(), 1);
        assert_eq!(entity.methods[0].to_string(), "Order(decimal amount)");

        let dto = schema.get_dto("OrderDto").unwrap();
        assert_eq!(dto.writable_properties().count(), 1);
    }

    #[test]
    fn json_round_trip_preserves_nodes() {
        let schema = Schema::from_json(ORDERS).unwrap();
        let again = Schema::from_json(&schema.to_json().unwrap()).unwrap();

        assert_eq!(schema, again);
    }

    #[test]
    fn duplicate_entities_are_rejected() {
        let mut schema = Schema::new();
        schema.insert_entity(Entity::new("Order")).unwrap();
        let err = schema.insert_entity(Entity::new("Order")).unwrap_err();

        assert!(matches!(err, NodeError::EntityAlreadyRegistered(name) if name == "Order"));
    }

    #[test]
    fn dangling_dto_link_is_reported() {
        let mut schema = Schema::new();
        schema.insert_dto(Dto::new("GhostDto", "Ghost")).unwrap();

        let Err(Error::Validation(errs)) = schema.validate() else {
            panic!("expected a validation error");
        };
        assert_eq!(
            errs.to_string(),
            "dto:GhostDto: linked entity 'Ghost' is not registered"
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Schema::from_json("{"), Err(Error::Json(_))));
    }
}
