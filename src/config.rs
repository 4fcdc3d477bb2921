//! Runtime configuration
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. a TOML file (`--config`, or `lhdice.toml` in the working directory)
//! 3. environment variables prefixed with `LHDICE_`

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::system::DEFAULT_MAX_DICE;

/// File read when no `--config` is given; skipped if absent
pub const DEFAULT_CONFIG_FILE: &str = "lhdice.toml";

/// Prefix of environment overrides, e.g. `LHDICE_BIND_ADDR`
pub const ENV_PREFIX: &str = "LHDICE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Locale document to use instead of the bundled Japanese data
    pub locale_path: Option<PathBuf>,
    /// Fixed RNG seed for reproducible rolls
    pub seed: Option<u64>,
    /// Largest dice count a check roll accepts
    pub max_dice: u32,
    /// tracing filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Emit log lines as JSON
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            locale_path: None,
            seed: None,
            max_dice: DEFAULT_MAX_DICE,
            log_filter: "lhdice=info,tower_http=debug".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Layer defaults, the config file and the environment.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let file = match path {
            Some(path) if !path.is_file() => {
                return Err(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Self::figment(&file).extract()
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_dice, 100);
        assert!(config.seed.is_none());
        assert!(config.locale_path.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_toml(
            r#"
bind_addr = "0.0.0.0:9000"
seed = 7
max_dice = 20
log_json = true
"#,
        );
        let config = Config::figment(file.path()).extract::<Config>().unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_dice, 20);
        assert!(config.log_json);
        assert_eq!(config.log_filter, Config::default().log_filter);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/lhdice.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lhdice.toml"));
    }

    #[test]
    fn test_bad_value_rejected() {
        let file = write_toml("max_dice = \"lots\"\n");
        assert!(Config::figment(file.path()).extract::<Config>().is_err());
    }
}
