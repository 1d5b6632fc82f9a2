//! Configuration loading with multi-source merging.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use learnloop_tutor::{Level, TutorConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "learnloop.toml";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file `{}` does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub host: String,

    /// Port the HTTP server listens on.
    pub port: u16,

    /// Level used when a submission does not name one.
    pub default_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7860,
            default_level: Level::Beginner,
        }
    }
}

/// Values given on the command line. Only the ones that are set override the other sources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl AppConfig {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Command line overrides
    /// 2. `PORT`
    /// 3. `LEARNLOOP_*` environment variables
    /// 4. Explicit config path, or `./learnloop.toml` if it exists
    /// 5. Default values
    pub fn load(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    figment = figment.merge(Toml::file(path));
                }
            },
        }

        figment
            .merge(Env::prefixed("LEARNLOOP_"))
            .merge(Env::raw().only(&["PORT"]))
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(|err| ConfigError::Invalid(Box::new(err)))
    }

    /// The part of the configuration the tutor needs.
    pub fn tutor(&self) -> TutorConfig {
        TutorConfig::with_default_level(self.default_level)
    }

    /// The address to bind to, as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Loads from the jail's working directory, with errors in the form `Jail` expects.
    fn load(overrides: ConfigOverrides) -> figment::Result<AppConfig> {
        AppConfig::load(None, overrides).map_err(|err| err.to_string().into())
    }

    #[test]
    fn defaults() {
        Jail::expect_with(|_| {
            let config = load(ConfigOverrides::default())?;
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.address(), "0.0.0.0:7860");
            assert_eq!(config.tutor().default_level, Level::Beginner);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_then_port() {
        Jail::expect_with(|jail| {
            jail.create_file("learnloop.toml", r#"
                host = "127.0.0.1"
                port = 8000
                default_level = "Advanced"
            "#)?;
            let config = load(ConfigOverrides::default())?;
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 8000);
            assert_eq!(config.default_level, Level::Advanced);

            jail.set_env("LEARNLOOP_PORT", "8100");
            jail.set_env("LEARNLOOP_DEFAULT_LEVEL", "Intermediate");
            let config = load(ConfigOverrides::default())?;
            assert_eq!(config.port, 8100);
            assert_eq!(config.default_level, Level::Intermediate);

            jail.set_env("PORT", "9000");
            let config = load(ConfigOverrides::default())?;
            assert_eq!(config.port, 9000);
            Ok(())
        });
    }

    #[test]
    fn command_line_wins() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "9000");
            let config = load(ConfigOverrides {
                host: Some("localhost".to_string()),
                port: Some(3000),
            })?;
            assert_eq!(config.host, "localhost");
            assert_eq!(config.port, 3000);
            Ok(())
        });
    }

    #[test]
    fn explicit_file_must_exist() {
        Jail::expect_with(|_| {
            let err = AppConfig::load(Some(Path::new("missing.toml")), ConfigOverrides::default())
                .unwrap_err();
            assert_eq!(err.to_string(), "configuration file `missing.toml` does not exist");
            Ok(())
        });
    }

    #[test]
    fn invalid_port() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "not a port");
            let err = AppConfig::load(None, ConfigOverrides::default()).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }
}
