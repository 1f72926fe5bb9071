use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{validate_path, validate_range, validate_required_field, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable naming a TOML config file, used when `--config` is absent.
pub const CONFIG_PATH_ENV: &str = "STATS_CONFIG";

const ENV_URL: &str = "STATS_DB_URL";
const ENV_HOST: &str = "STATS_DB_HOST";
const ENV_PORT: &str = "STATS_DB_PORT";
const ENV_NAME: &str = "STATS_DB_NAME";
const ENV_USER: &str = "STATS_DB_USER";
const ENV_PASSWORD: &str = "STATS_DB_PASSWORD";

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    /// Full connection URL; when set, the individual fields are ignored.
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            database: "statistics_db".to_string(),
            username: "root".to_string(),
            password: String::new(),
            url: None,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Layout of the TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| StatsError::ConfigValidation {
                field: "config".to_string(),
                message: format!("cannot read {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StatsError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replaces `${VAR}` with the variable's value. Unset variables are left as-is.
fn substitute_env_vars(content: &str) -> Result<String> {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StatsError::ConfigValidation {
        field: "toml_parsing".to_string(),
        message: e.to_string(),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

impl DatabaseConfig {
    /// Defaults, then the TOML file (explicit path or `STATS_CONFIG`), then
    /// `STATS_DB_*` environment variables. The result is validated.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => {
                validate_path("config", &path.to_string_lossy())?;
                tracing::debug!("Loading database config from {}", path.display());
                FileConfig::from_file(&path)?.database
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL) {
            self.url = Some(url);
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| StatsError::InvalidConfigValue {
                    field: ENV_PORT.to_string(),
                    value: port.clone(),
                    reason: e.to_string(),
                })?;
        }
        if let Some(database) = lookup(ENV_NAME) {
            self.database = database;
        }
        if let Some(username) = lookup(ENV_USER) {
            self.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        Ok(())
    }

    /// MySQL URL built from the fields, with credentials percent-encoded.
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let invalid = |field: &str, value: &str, reason: String| StatsError::InvalidConfigValue {
            field: field.to_string(),
            value: value.to_string(),
            reason,
        };

        let mut url = Url::parse("mysql://localhost")
            .map_err(|e| invalid("database.url", "mysql://localhost", e.to_string()))?;
        url.set_host(Some(&self.host))
            .map_err(|e| invalid("database.host", &self.host, e.to_string()))?;
        url.set_port(Some(self.port))
            .map_err(|_| invalid("database.port", &self.port.to_string(), "cannot set port".into()))?;
        url.set_username(&self.username)
            .map_err(|_| invalid("database.username", &self.username, "cannot set username".into()))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|_| invalid("database.password", "<redacted>", "cannot set password".into()))?;
        }
        url.set_path(&format!("/{}", self.database));

        Ok(url.to_string())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            return validate_required_field("database.url", url);
        }
        validate_required_field("database.host", &self.host)?;
        validate_required_field("database.username", &self.username)?;
        validate_required_field("database.database", &self.database)?;
        validate_range("database.port", self.port, 1, u16::MAX)?;
        Ok(())
    }
}
