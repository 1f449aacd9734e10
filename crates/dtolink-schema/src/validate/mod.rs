//! Schema validation orchestration.

pub mod naming;

use crate::{
    error::ErrorTree,
    node::{Schema, ValidateNode},
};

/// Run full schema validation in a staged, deterministic order.
pub(crate) fn validate_schema(schema: &Schema) -> Result<(), ErrorTree> {
    // Phase 1: validate each node (local invariants).
    let mut errors = validate_nodes(schema);

    // Phase 2: enforce schema-wide invariants.
    validate_links(schema, &mut errors);

    errors.result()
}

// Validate every entity and DTO, routing errors by node name.
fn validate_nodes(schema: &Schema) -> ErrorTree {
    let mut errors = ErrorTree::new();

    for entity in schema.entities() {
        if let Err(e) = entity.validate() {
            errors.merge_for(format!("entity:{}", entity.name), e);
        }
    }
    for dto in schema.dtos() {
        if let Err(e) = dto.validate() {
            errors.merge_for(format!("dto:{}", dto.name), e);
        }
    }

    errors
}

// Every DTO must link to an entity declared in the same schema.
fn validate_links(schema: &Schema, errors: &mut ErrorTree) {
    for dto in schema.dtos() {
        if schema.get_entity(&dto.links_to).is_err() {
            errors.add_for(
                format!("dto:{}", dto.name),
                format!("linked entity '{}' is not registered", dto.links_to),
            );
        }
    }
}
