//! Configuration for the high/low classifier: column mapping, thresholds and
//! cleaning tokens, logging settings, layered TOML + environment loading, and
//! the CLI override structs (behind the `clap` feature).

use std::path::Path;

// Declare the modules that make up this crate.
pub mod analysis_config;
pub mod error;
pub mod logging;
pub mod overrides;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use analysis_config::{AnalysisConfig, Cleaning, ColumnMapping, Thresholds};
pub use logging::init_tracing;
pub use overrides::{ColumnOverrides, ThresholdOverrides};
pub use error::ConfigError;
pub use settings::{Config, LoggingConfig};

/// Name of the configuration file looked up in the working directory when no
/// explicit path is given. Its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "highlow.toml";

/// Prefix of the environment variables that override file settings,
/// e.g. `HIGHLOW_ANALYSIS__THRESHOLDS__BOUND_THRESHOLD=10`.
pub const ENV_PREFIX: &str = "HIGHLOW";

/// Loads the application configuration.
///
/// Sources are layered in order: built-in defaults, the TOML file (the given
/// path, which must exist, or an optional `highlow.toml`), then `HIGHLOW_*`
/// environment variables. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => tracing::debug!(path = %path.display(), "Loading configuration file"),
        None => tracing::debug!(file = DEFAULT_CONFIG_FILE, "Looking for optional configuration file"),
    }
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::BreakoutBasis;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write temp config");
        file
    }

    #[test]
    fn partial_file_keeps_defaults_for_everything_else() {
        let file = toml_file(
            r#"
            [analysis.columns]
            current_price = "LTP"

            [analysis.thresholds]
            bound_threshold = 12.5
            breakout_basis = "current_price"

            [logging]
            level = "debug"
            "#,
        );

        let config = load_config(Some(file.path())).expect("config loads");

        let mut expected = Config::default();
        expected.analysis.columns.current_price = Some("LTP".to_string());
        expected.analysis.thresholds.bound_threshold = dec!(12.5);
        expected.analysis.thresholds.breakout_basis = BreakoutBasis::CurrentPrice;
        expected.logging.level = "debug".to_string();
        assert_eq!(config, expected);
    }

    #[test]
    fn explicit_path_must_exist() {
        let missing = Path::new("/definitely/not/here/highlow.toml");
        assert!(matches!(
            load_config(Some(missing)),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let file = toml_file(
            r#"
            [analysis.thresholds]
            near_low_threshold = -3
            "#,
        );
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
