use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Config file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "askdb.toml";

/// Tables the product-catalog agent is allowed to query.
pub const DEFAULT_INCLUDE_TABLES: [&str; 4] =
    ["products", "users", "purchases", "product_inventory"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAISettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// Falls back to `OPENAI_API_KEY`. Requests fail without one.
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: String,
    /// Upper bound on a single chat completion request.
    pub request_timeout_secs: u64,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            model: "gpt-4o-mini".into(),
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Empty means every table in the database.
    pub include_tables: Vec<String>,
    pub top_k: usize,
    pub sample_rows: usize,
    pub use_query_checker: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            include_tables: DEFAULT_INCLUDE_TABLES.iter().map(|t| t.to_string()).collect(),
            top_k: 5,
            sample_rows: 3,
            use_query_checker: true,
        }
    }
}

impl Settings {
    /// Reads `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or falls back
    /// to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using default settings");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "server.bind",
                reason: e.to_string(),
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;

        if self.openai.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "openai.model",
                reason: "must not be empty".into(),
            });
        }
        if self.openai.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "openai.request_timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.database.top_k == 0 {
            return Err(ConfigError::Invalid {
                key: "database.top_k",
                reason: "must be at least 1".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.bind, "127.0.0.1:8501");
        assert_eq!(settings.openai.model, "gpt-4o-mini");
        assert_eq!(
            settings.database.include_tables,
            vec!["products", "users", "purchases", "product_inventory"]
        );
        assert!(settings.database.use_query_checker);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml(indoc! {r#"
            [openai]
            model = "gpt-4o"

            [database]
            include_tables = []
            top_k = 10
        "#})
        .unwrap();

        assert_eq!(settings.openai.model, "gpt-4o");
        assert_eq!(settings.openai.api_key, None);
        assert!(settings.database.include_tables.is_empty());
        assert_eq!(settings.database.top_k, 10);
        assert_eq!(settings.database.sample_rows, 3);
        assert_eq!(settings.server, ServerSettings::default());
    }

    #[test]
    fn test_invalid_values() {
        let mut settings = Settings::default();
        settings.server.bind = "localhost".into();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { key: "server.bind", .. })
        ));

        let mut settings = Settings::default();
        settings.database.top_k = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { key: "database.top_k", .. })
        ));

        let mut settings = Settings::default();
        settings.openai.request_timeout_secs = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { key: "openai.request_timeout_secs", .. })
        ));

        assert!(Settings::from_toml("[database]\ntop_k = \"five\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join(format!("askdb-{}.toml", uuid::Uuid::new_v4()));
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("askdb-"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("askdb-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nbind = \"0.0.0.0:9000\"\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.bind_addr().unwrap().port(), 9000);
    }
}
