//! One-call registration helpers. Unlike the builder, these treat any
//! decode error as fatal and report every one of them.

use crate::Error;
use dtolink_config::{DecoderConfig, load_config};
use dtolink_core::{
    decode::DecodedDto,
    error::DecodeError,
    registry::{DtoRegistry, DtoRegistryBuilder},
    status::DecodeStatus,
};
use dtolink_schema::node::Schema;
use std::{fs, path::Path, sync::Arc};
use thiserror::Error as ThisError;
use tracing::warn;

///
/// SetupError
///

#[derive(Debug, ThisError)]
pub enum SetupError {
    #[error("SETUP FAILED with {count} errors:\n{status}")]
    Failed { count: usize, status: DecodeStatus },

    #[error("failed to read schema '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl SetupError {
    fn failed(status: DecodeStatus) -> Self {
        warn!(errors = status.len(), "setup failed");

        Self::Failed {
            count: status.len(),
            status,
        }
    }

    /// Decode errors behind a failed setup, if that is what this is.
    #[must_use]
    pub const fn status(&self) -> Option<&DecodeStatus> {
        match self {
            Self::Failed { status, .. } => Some(status),
            Self::Io { .. } => None,
        }
    }
}

/// Decode a single DTO against the schema's entities, failing on any error.
pub fn register_single_dto(
    schema: &Schema,
    dto_name: &str,
    config: &DecoderConfig,
) -> Result<Arc<DecodedDto>, Error> {
    let mut builder = DtoRegistryBuilder::from_config(config);
    builder
        .register_from_schema(schema, dto_name, config.update_methods_for(dto_name))
        .into_result()
        .map_err(SetupError::failed)?;

    let (registry, _) = builder.freeze();
    registry.get_shared(dto_name).ok_or_else(|| {
        let status = DecodeStatus::from(DecodeError::UnknownDto(dto_name.to_string()));
        SetupError::failed(status).into()
    })
}

/// Validate `schema`, then decode and register every DTO in it.
pub fn setup(schema: &Schema, config: &DecoderConfig) -> Result<DtoRegistry, Error> {
    schema.validate()?;

    let mut builder = DtoRegistryBuilder::from_config(config);
    builder.register_all(schema, config);

    let (registry, status) = builder.freeze();
    status.into_result().map_err(SetupError::failed)?;

    Ok(registry)
}

/// `setup` from a JSON schema file and a TOML config file.
pub fn setup_from_files(
    schema_path: impl AsRef<Path>,
    config_path: impl AsRef<Path>,
) -> Result<DtoRegistry, Error> {
    let schema_path = schema_path.as_ref();
    let json = fs::read_to_string(schema_path).map_err(|source| SetupError::Io {
        path: schema_path.display().to_string(),
        source,
    })?;

    let schema = Schema::from_json(&json)?;
    let config = load_config(config_path)?;

    setup(&schema, &config)
}
