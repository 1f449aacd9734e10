mod dto;
mod entity;
mod method;
mod property;
mod schema;

pub use dto::*;
pub use entity::*;
pub use method::*;
pub use property::*;
pub use schema::*;

use crate::{ThisError, error::ErrorTree};

///
/// NodeError
///

#[derive(Debug, ThisError)]
pub enum NodeError {
    #[error("entity '{0}' not found")]
    EntityNotFound(String),

    #[error("dto '{0}' not found")]
    DtoNotFound(String),

    #[error("entity '{0}' already registered")]
    EntityAlreadyRegistered(String),

    #[error("dto '{0}' already registered")]
    DtoAlreadyRegistered(String),
}

///
/// ValidateNode
///
/// Local invariants of a single descriptor. Cross-node checks live in
/// `validate`, which sees the whole schema.
///

pub trait ValidateNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}
