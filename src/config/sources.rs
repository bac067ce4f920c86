//! Configuration sources.

pub mod global_file {
    //! Global file: `$XDG_CONFIG_HOME/syllabus/config.toml`, optional.

    use crate::config::xdg;
    use crate::error::ApiError;
    use config::builder::DefaultState;
    use config::{ConfigBuilder, File};

    pub fn add_to_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ApiError> {
        match xdg::config_home() {
            Ok(home) => {
                let path = home.join("syllabus").join("config.toml");
                Ok(builder.add_source(File::from(path).required(false)))
            }
            Err(e) => {
                tracing::debug!("Skipping global config file: {}", e);
                Ok(builder)
            }
        }
    }
}

pub mod explicit_file {
    //! File named with `--config`; must exist.

    use crate::error::ApiError;
    use config::builder::DefaultState;
    use config::{ConfigBuilder, File};
    use std::path::Path;

    pub fn add_to_builder(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
    ) -> Result<ConfigBuilder<DefaultState>, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Ok(builder.add_source(File::from(path.to_path_buf()).required(true)))
    }
}

pub mod environment {
    //! Environment variable source: SYLLABUS__ prefix with __ separator.

    use crate::error::ApiError;
    use config::builder::DefaultState;
    use config::{ConfigBuilder, Environment};

    pub fn add_to_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ApiError> {
        Ok(builder.add_source(
            Environment::with_prefix("SYLLABUS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        ))
    }
}
