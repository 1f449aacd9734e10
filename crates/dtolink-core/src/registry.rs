use crate::{
    decode::{DecodedDto, DtoDecoder},
    error::DecodeError,
    status::DecodeStatus,
};
use dtolink_config::{DecoderConfig, UpdateMethods};
use dtolink_schema::node::{Dto, Entity, Schema};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info};

///
/// DtoRegistryBuilder
///
/// Setup-phase registry. DTOs are decoded as they are registered; a DTO is
/// only kept when its own decode was clean. Registering a name again
/// replaces the earlier result.
///

#[derive(Debug, Default)]
pub struct DtoRegistryBuilder {
    decoder: DtoDecoder,
    dtos: BTreeMap<String, Arc<DecodedDto>>,
    status: DecodeStatus,
}

impl DtoRegistryBuilder {
    #[must_use]
    pub fn new(decoder: DtoDecoder) -> Self {
        Self {
            decoder,
            dtos: BTreeMap::new(),
            status: DecodeStatus::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::new(DtoDecoder::from_config(config))
    }

    /// Decode `dto` against `entity` and keep it if nothing went wrong.
    ///
    /// Returns this DTO's own status; it is also folded into the builder's.
    pub fn register_dto(
        &mut self,
        dto: &Dto,
        entity: &Entity,
        update_methods: Option<&UpdateMethods>,
    ) -> DecodeStatus {
        let outcome = self.decoder.decode(dto, entity, update_methods);
        self.record(&dto.name, Some(outcome.dto), outcome.status)
    }

    /// Register one DTO by name, resolving it and its entity from `schema`.
    pub fn register_from_schema(
        &mut self,
        schema: &Schema,
        dto_name: &str,
        update_methods: Option<&UpdateMethods>,
    ) -> DecodeStatus {
        let Ok(dto) = schema.get_dto(dto_name) else {
            let status = DecodeStatus::from(DecodeError::UnknownDto(dto_name.to_string()));
            return self.record(dto_name, None, status);
        };

        match schema.get_entity(&dto.links_to) {
            Ok(entity) => self.register_dto(dto, entity, update_methods),
            Err(_) => {
                let status = DecodeStatus::from(DecodeError::UnknownEntity {
                    dto: dto.name.clone(),
                    entity: dto.links_to.clone(),
                });
                self.record(&dto.name, None, status)
            }
        }
    }

    /// Register every DTO in `schema`, in name order, with its configured
    /// update methods. Returns the combined status of this pass.
    pub fn register_all(&mut self, schema: &Schema, config: &DecoderConfig) -> DecodeStatus {
        let mut pass = DecodeStatus::new();
        for dto in schema.dtos() {
            let status =
                self.register_from_schema(schema, &dto.name, config.update_methods_for(&dto.name));
            pass.combine(status);
        }

        pass
    }

    fn record(
        &mut self,
        name: &str,
        decoded: Option<DecodedDto>,
        status: DecodeStatus,
    ) -> DecodeStatus {
        match decoded {
            Some(decoded) if status.is_valid() => {
                self.dtos.insert(name.to_string(), Arc::new(decoded));
            }
            _ => {
                // a failed re-registration must not leave the earlier result behind
                self.dtos.remove(name);
            }
        }
        debug!(dto = %name, errors = status.len(), "registered dto");

        self.status.combine(status.clone());

        status
    }

    /// Everything recorded so far.
    #[must_use]
    pub const fn status(&self) -> &DecodeStatus {
        &self.status
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.dtos.contains_key(name)
    }

    /// End the setup phase.
    #[must_use]
    pub fn freeze(self) -> (DtoRegistry, DecodeStatus) {
        info!(
            dtos = self.dtos.len(),
            errors = self.status.len(),
            "dto registry frozen"
        );

        (DtoRegistry { dtos: self.dtos }, self.status)
    }
}

///
/// DtoRegistry
///
/// Read-only decoded DTOs, keyed by DTO name. Share it behind an `Arc`.
///

#[derive(Clone, Debug, Default)]
pub struct DtoRegistry {
    dtos: BTreeMap<String, Arc<DecodedDto>>,
}

impl DtoRegistry {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DecodedDto> {
        self.dtos.get(name).map(AsRef::as_ref)
    }

    /// Shared handle to a decoded DTO, for holding beyond the registry borrow.
    #[must_use]
    pub fn get_shared(&self, name: &str) -> Option<Arc<DecodedDto>> {
        self.dtos.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.dtos.contains_key(name)
    }

    /// Decoded DTOs in name order.
    pub fn iter(&self) -> impl Iterator<Item = &DecodedDto> {
        self.dtos.values().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dtos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dtos.is_empty()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use dtolink_config::DtoConfig;
    use dtolink_schema::node::{Method, Property};

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .insert_entity(
                Entity::new("Order")
                    .with_property(Property::read_only("OrderId", "int"))
                    .with_property(Property::writable("Status", "string"))
                    .with_key("OrderId")
                    .with_method(Method::new("Order").with_param("status", "string")),
            )
            .unwrap();
        schema
            .insert_dto(
                Dto::new("OrderDto", "Order")
                    .with_property(Property::read_only("OrderId", "int"))
                    .with_property(Property::writable("Status", "string")),
            )
            .unwrap();
        schema
            .insert_dto(
                Dto::new("OrderSummaryDto", "Order")
                    .with_property(Property::read_only("OrderId", "int")),
            )
            .unwrap();
        schema
    }

    const fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn frozen_registry_is_shareable() {
        assert_send_sync::<DtoRegistry>();
        assert_send_sync::<Arc<DecodedDto>>();
    }

    #[test]
    fn register_all_decodes_every_dto() {
        let mut builder = DtoRegistryBuilder::default();
        let pass = builder.register_all(&schema(), &DecoderConfig::default());
        let (registry, status) = builder.freeze();

        assert!(pass.is_valid());
        assert!(status.is_valid());
        assert_eq!(registry.len(), 2);
        assert!(registry.get("OrderDto").unwrap().has_bindings());
        assert!(!registry.get("OrderSummaryDto").unwrap().has_bindings());

        let names: Vec<&str> = registry.iter().map(DecodedDto::dto_name).collect();
        assert_eq!(names, ["OrderDto", "OrderSummaryDto"]);
    }

    #[test]
    fn failing_dto_is_reported_and_left_out() {
        let config = DecoderConfig::new().with_dto(
            "OrderDto",
            DtoConfig::with_update_methods(UpdateMethods::parse("Cancel").unwrap()),
        );
        let mut builder = DtoRegistryBuilder::from_config(&config);
        let pass = builder.register_all(&schema(), &config);
        let (registry, status) = builder.freeze();

        assert_eq!(pass, status);
        assert!(matches!(
            status.errors(),
            [DecodeError::MethodNotFound { method, .. }] if method == "Cancel"
        ));
        assert!(!registry.contains("OrderDto"));
        assert!(registry.contains("OrderSummaryDto"));
    }

    #[test]
    fn unknown_names_are_errors() {
        let mut schema = schema();
        schema.insert_dto(Dto::new("GhostDto", "Ghost")).unwrap();

        let mut builder = DtoRegistryBuilder::default();
        let ghost = builder.register_from_schema(&schema, "GhostDto", None);
        let missing = builder.register_from_schema(&schema, "NopeDto", None);

        assert!(matches!(
            ghost.errors(),
            [DecodeError::UnknownEntity { entity, .. }] if entity == "Ghost"
        ));
        assert_eq!(missing.errors(), [DecodeError::UnknownDto("NopeDto".to_string())]);
        assert_eq!(builder.status().len(), 2);
        assert!(!builder.contains("GhostDto"));
    }

    #[test]
    fn last_registration_wins() {
        let schema = schema();
        let dto = schema.get_dto("OrderDto").unwrap();
        let entity = schema.get_entity("Order").unwrap();
        let mut builder = DtoRegistryBuilder::default();

        builder.register_dto(dto, entity, None);
        assert!(builder.contains("OrderDto"));

        let bad = UpdateMethods::parse("Cancel").unwrap();
        builder.register_dto(dto, entity, Some(&bad));
        assert!(!builder.contains("OrderDto"));

        builder.register_dto(dto, entity, None);
        let (registry, status) = builder.freeze();

        assert!(registry.contains("OrderDto"));
        assert_eq!(status.len(), 1);
    }

    #[test]
    fn shared_handles_outlive_the_borrow() {
        let mut builder = DtoRegistryBuilder::default();
        builder.register_all(&schema(), &DecoderConfig::default());
        let (registry, _) = builder.freeze();

        let shared = registry.get_shared("OrderDto").unwrap();
        drop(registry);

        assert_eq!(shared.entity_name(), "Order");
        assert_eq!(shared.key_mirrors().count(), 1);
    }
}
