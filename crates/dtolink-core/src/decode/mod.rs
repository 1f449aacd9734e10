//! DTO decoding: key-mirror detection plus the three-tier update method
//! resolution (explicit configuration, DTO-name convention, fallback scan).

mod convention;
mod resolve;
mod select;


pub use convention::{DTO_NAME_SUFFIXES, method_name_from_dto};
pub use select::MethodRequest;

use crate::{
    error::DecodeError,
    matcher::{BestPropertyMatch, ConventionNameMatcher, MethodMatch, NameMatcher, name_matcher_for},
    status::DecodeStatus,
};
use dtolink_config::{DecoderConfig, UpdateMethods};
use dtolink_schema::{
    node::{Dto, Entity, Property},
    types::{Access, TypeRef},
};
use resolve::ResolveContext;
use std::sync::Arc;
use tracing::debug;

///
/// DtoPropertyDescriptor
///
/// One DTO property as decoded against its entity.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DtoPropertyDescriptor {
    name: String,
    ty: TypeRef,
    access: Access,
    is_key_mirror: bool,
}

impl DtoPropertyDescriptor {
    fn new(property: &Property, is_key_mirror: bool) -> Self {
        Self {
            name: property.name.clone(),
            ty: property.ty.clone(),
            access: property.access,
            is_key_mirror,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn ty(&self) -> &TypeRef {
        &self.ty
    }

    #[must_use]
    pub const fn access(&self) -> Access {
        self.access
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.access.is_writable()
    }

    /// True when the property mirrors one of the entity's key properties.
    #[must_use]
    pub const fn is_key_mirror(&self) -> bool {
        self.is_key_mirror
    }
}

///
/// DecodedDto
///
/// Immutable result of decoding one DTO. Every binding in `methods` scored
/// perfect; an empty list means the DTO is read-only.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedDto {
    dto_name: String,
    entity_name: String,
    properties: Vec<DtoPropertyDescriptor>,
    methods: Vec<MethodMatch>,
}

impl DecodedDto {
    #[must_use]
    pub fn dto_name(&self) -> &str {
        &self.dto_name
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Properties in DTO declaration order.
    #[must_use]
    pub fn properties(&self) -> &[DtoPropertyDescriptor] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&DtoPropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn key_mirrors(&self) -> impl Iterator<Item = &DtoPropertyDescriptor> {
        self.properties.iter().filter(|p| p.is_key_mirror)
    }

    pub fn writable_properties(&self) -> impl Iterator<Item = &DtoPropertyDescriptor> {
        self.properties.iter().filter(|p| p.is_writable())
    }

    /// Accepted update method bindings.
    #[must_use]
    pub fn methods(&self) -> &[MethodMatch] {
        &self.methods
    }

    #[must_use]
    pub fn has_bindings(&self) -> bool {
        !self.methods.is_empty()
    }
}

///
/// DecodeOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodeOutcome {
    pub dto: DecodedDto,
    pub status: DecodeStatus,
}

///
/// DtoDecoder
///

#[derive(Clone, Debug)]
pub struct DtoDecoder {
    matcher: Arc<dyn NameMatcher>,
}

impl Default for DtoDecoder {
    fn default() -> Self {
        Self::new(Arc::new(ConventionNameMatcher))
    }
}

impl DtoDecoder {
    #[must_use]
    pub fn new(matcher: Arc<dyn NameMatcher>) -> Self {
        Self { matcher }
    }

    #[must_use]
    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::new(name_matcher_for(config.name_matcher))
    }

    #[must_use]
    pub fn matcher(&self) -> &dyn NameMatcher {
        self.matcher.as_ref()
    }

    /// Decode `dto` against `entity`.
    ///
    /// Method matching runs only when the entity supports method updates or
    /// explicit update methods are configured. A DTO linked to a different
    /// entity gets its properties decoded but no bindings, and an error.
    #[must_use]
    pub fn decode(
        &self,
        dto: &Dto,
        entity: &Entity,
        update_methods: Option<&UpdateMethods>,
    ) -> DecodeOutcome {
        let mut status = DecodeStatus::new();
        let matcher = self.matcher();

        let keys: Vec<&Property> = entity.key_properties().collect();
        let properties: Vec<DtoPropertyDescriptor> = dto
            .properties
            .iter()
            .map(|property| {
                let best = BestPropertyMatch::find(property, keys.iter().copied(), matcher);
                DtoPropertyDescriptor::new(property, best.is_key_mirror())
            })
            .collect();

        let methods = if dto.links_to != entity.name {
            status.add(DecodeError::EntityMismatch {
                dto: dto.name.clone(),
                links_to: dto.links_to.clone(),
                entity: entity.name.clone(),
            });
            Vec::new()
        } else if entity.supports_method_updates() || update_methods.is_some() {
            let ctx = ResolveContext::new(dto, entity, matcher);
            match update_methods {
                Some(names) => ctx.resolve_explicit(names, &mut status),
                None => ctx.resolve_by_convention(),
            }
        } else {
            Vec::new()
        };

        debug!(
            dto = %dto.name,
            entity = %entity.name,
            key_mirrors = properties.iter().filter(|p| p.is_key_mirror).count(),
            bindings = methods.len(),
            errors = status.len(),
            "decoded dto"
        );

        DecodeOutcome {
            dto: DecodedDto {
                dto_name: dto.name.clone(),
                entity_name: entity.name.clone(),
                properties,
                methods,
            },
            status,
        }
    }
}
