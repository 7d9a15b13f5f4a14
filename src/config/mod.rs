use serde::{Deserialize, Serialize};

use std::{env, fmt, fs, path::Path, time::Duration};

const CONFIG_PATH_VAR: &str = "NOTES_WEB_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const EXAMPLE_CONFIG_FILE: &str = "config.example.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    #[serde(alias = "name")]
    pub dbname: String,
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
}

// Keeps the password out of startup logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ServerEnv {
    #[serde(default = "default_port")]
    port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(
        "config file not found and environment variables are incomplete \
         (tried '{tried}', 'config.yaml', 'config.example.yaml' and environment): {source}"
    )]
    Env {
        tried: String,
        #[source]
        source: envy::Error,
    },
}

const fn default_port() -> u16 {
    80
}

fn default_db_host() -> String {
    "db".to_string()
}

const fn default_db_port() -> u16 {
    5432
}

const fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn load_from_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    parse_yaml(path, &contents)
}

fn parse_yaml(path: &str, contents: &str) -> Result<Config, ConfigError> {
    serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Builds the configuration from `DB_*` and `PORT` variables.
fn load_from_vars<I>(vars: I) -> Result<Config, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: Vec<(String, String)> = vars.into_iter().collect();

    let database = envy::prefixed("DB_").from_iter::<_, DatabaseConfig>(vars.clone())?;
    let server = envy::from_iter::<_, ServerEnv>(vars)?;

    Ok(Config {
        database,
        port: server.port,
    })
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path =
        env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to '{}'",
            config_path,
            DEFAULT_CONFIG_FILE
        );
        return load_from_file(DEFAULT_CONFIG_FILE);
    }

    // Fallback to config.example.yaml
    if Path::new(EXAMPLE_CONFIG_FILE).exists() {
        tracing::warn!(
            "Config file '{}' and '{}' not found, falling back to '{}'\
             \n This file should not be used and should be replaced with actual data",
            config_path,
            DEFAULT_CONFIG_FILE,
            EXAMPLE_CONFIG_FILE
        );
        return load_from_file(EXAMPLE_CONFIG_FILE);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    let config = load_from_vars(env::vars()).map_err(|source| ConfigError::Env {
        tried: config_path,
        source,
    })?;
    tracing::info!("Successfully loaded configuration from environment variables");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn yaml_with_all_fields() {
        let yaml = "
port: 8080
database:
  host: localhost
  port: 5433
  user: notes
  password: secret
  dbname: notes_db
  connect_timeout: 2s
";
        let config = parse_yaml("inline", yaml).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.database.user, "notes");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.dbname, "notes_db");
        assert_eq!(config.database.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn yaml_defaults_host_port_and_timeout() {
        let yaml = "
database:
  user: notes
  password: secret
  dbname: notes_db
";
        let config = parse_yaml("inline", yaml).unwrap();

        assert_eq!(config.port, 80);
        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn yaml_missing_credentials_is_a_parse_error() {
        let err = parse_yaml("broken.yaml", "database:\n  host: db\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == "broken.yaml"));
    }

    #[test]
    fn env_vars_fill_database_and_port() {
        let config = load_from_vars(vars(&[
            ("DB_HOST", "postgres"),
            ("DB_USER", "notes"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "notes_db"),
            ("DB_CONNECT_TIMEOUT", "500ms"),
            ("PORT", "8000"),
            ("HOME", "/root"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.database.host, "postgres");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.dbname, "notes_db");
        assert_eq!(config.database.connect_timeout, Duration::from_millis(500));
    }

    #[test]
    fn env_vars_without_credentials_fail() {
        let result = load_from_vars(vars(&[("DB_HOST", "postgres"), ("PORT", "8000")]));

        assert!(result.is_err());
    }

    #[test]
    fn debug_output_hides_password() {
        let config = load_from_vars(vars(&[
            ("DB_USER", "notes"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "notes_db"),
        ]))
        .unwrap();

        let printed = format!("{:?}", config.database);

        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("notes_db"));
    }
}
