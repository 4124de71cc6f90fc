//! Layered configuration for the `matstract` binary
//!
//! Sources, later ones winning: built-in defaults, `matstract.toml` in the
//! working directory (or the file given with `--config`), then environment
//! variables such as `MATSTRACT__NORMALIZE__MAX_DENOMINATOR=500`. A `.env`
//! file is loaded into the environment first.

use std::path::Path;

use config::{ConfigError, Environment, File};
use matstract_formula::{DEFAULT_MAX_DENOMINATOR, DEFAULT_MAX_DEPTH};
use serde::Deserialize;

/// Largest accepted `parser.max_depth`. Parsing, flattening and dropping a
/// tree all recurse once per nesting level.
pub const MAX_PARSER_DEPTH: usize = 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub parser: ParserConfig,
    pub normalize: NormalizeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Deepest allowed parenthesis nesting
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    /// Denominator bound for fractional amounts
    pub max_denominator: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default level for matstract targets when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("matstract").required(false),
        };

        config::Config::builder()
            .set_default("parser.max_depth", DEFAULT_MAX_DEPTH as u64)?
            .set_default("normalize.max_denominator", u64::from(DEFAULT_MAX_DENOMINATOR))?
            .set_default("logging.level", "warn")?
            .set_default("logging.json", false)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("MATSTRACT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.parser.max_depth == 0 {
            return Err("parser.max_depth must be at least 1".to_string());
        }
        if self.parser.max_depth > MAX_PARSER_DEPTH {
            return Err(format!(
                "parser.max_depth must be at most {MAX_PARSER_DEPTH}, got {}",
                self.parser.max_depth
            ));
        }
        if self.normalize.max_denominator == 0 {
            return Err("normalize.max_denominator must be at least 1".to_string());
        }
        if self.logging.level.trim().is_empty() {
            return Err("logging.level must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parser: ParserConfig {
                max_depth: DEFAULT_MAX_DEPTH,
            },
            normalize: NormalizeConfig {
                max_denominator: DEFAULT_MAX_DENOMINATOR,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                json: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = Config::default();
        config.normalize.max_denominator = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.parser.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_depth_is_capped() {
        let mut config = Config::default();
        config.parser.max_depth = MAX_PARSER_DEPTH;
        assert!(config.validate().is_ok());

        config.parser.max_depth = MAX_PARSER_DEPTH + 1;
        let err = config.validate().unwrap_err();
        assert!(err.contains("at most 1024"), "{err}");

        config.parser.max_depth = 1_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("matstract-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[normalize]\nmax_denominator = 50\n\n[logging]\njson = true").unwrap();
        drop(file);

        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.normalize.max_denominator, 50);
        assert!(config.logging.json);
        assert_eq!(config.parser.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = Path::new("/nonexistent/matstract.toml");
        assert!(Config::load(Some(path)).is_err());
    }
}
