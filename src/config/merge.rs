//! MergeService: orchestrates sources and deserializes to SyllabusConfig.

use super::sources::{environment, explicit_file, global_file};
use super::SyllabusConfig;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use std::path::Path;

pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<SyllabusConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        let loaded: SyllabusConfig = config.try_deserialize()?;
        Ok(loaded)
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ApiError> {
    let defaults = SyllabusConfig::default();
    let builder = Config::builder()
        .set_default("countdown.target", defaults.countdown.target)?
        .set_default("storage.schema_version", defaults.storage.schema_version)?;
    Ok(builder)
}
