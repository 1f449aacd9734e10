//! Matching engine for DtoLink: decides which DTO properties mirror an
//! entity's key and which entity mutator applies a DTO's writable values.
//!
//! The engine only decides. It never executes a mutation, and it never looks
//! beyond the DTO/entity pair it is handed.
#![warn(unreachable_pub)]

pub mod decode;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod status;

use thiserror::Error as ThisError;

///
/// Prelude
///
/// Domain vocabulary only; no registries or error types.
///

pub mod prelude {
    pub use crate::{
        decode::{DecodedDto, DtoDecoder, DtoPropertyDescriptor},
        matcher::{MatchScore, MethodMatch, NameMatcher, Provenance},
    };
}
