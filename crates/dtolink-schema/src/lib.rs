//! Descriptor schema for DtoLink: the statically declared shape of entities
//! and DTOs that the matching engine decodes.
//!
//! Nothing in here is discovered at runtime. Descriptors are built through
//! the registration API on [`node::Schema`] or deserialized from JSON, then
//! validated once before any decoding happens.

pub mod error;
pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for entity, DTO, property, method and parameter identifiers.
pub const MAX_IDENT_LEN: usize = 64;

use crate::{error::ErrorTree, node::NodeError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{Access, TypeAgreement, TypeRef},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("schema validation failed:\n{0}")]
    Validation(ErrorTree),

    #[error("schema json is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    NodeError(#[from] NodeError),
}
