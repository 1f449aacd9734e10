//! ## Crate layout
//! - `config`: decoder configuration loaded from TOML.
//! - `core`: name scoring, method grading, DTO decoding and the registry.
//! - `schema`: entity and DTO descriptors, JSON loading and validation.
//! - `setup`: one-call registration that fails loudly on any decode error.
//!
//! The `prelude` module carries the types needed to describe a schema and
//! read back decoded DTOs.

pub use dtolink_config as config;
pub use dtolink_core as core;
pub use dtolink_schema as schema;

pub mod error;
pub mod setup;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::{DecoderConfig, DtoConfig, NameMatcherKind, UpdateMethods},
        core::{
            prelude::*,
            registry::{DtoRegistry, DtoRegistryBuilder},
            status::DecodeStatus,
        },
        schema::{
            node::{Dto, Entity, Method, Param, Property, Schema},
            types::{Access, TypeRef},
        },
        setup::{register_single_dto, setup},
    };
}
