use crate::setup::SetupError;
use dtolink_config::ConfigError;
use dtolink_core::error::SelectError;
use thiserror::Error as ThisError;

///
/// Error
/// Public error type; one variant per layer.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] dtolink_schema::Error),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

impl From<dtolink_schema::node::NodeError> for Error {
    fn from(err: dtolink_schema::node::NodeError) -> Self {
        Self::Schema(err.into())
    }
}
