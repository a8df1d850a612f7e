use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "LOOKUP";

pub fn default_config_path() -> PathBuf {
    PathBuf::from("./lookup_config.toml")
}

/// Layers defaults, an optional TOML file and `LOOKUP_*` environment
/// variables, later sources winning.
pub fn get_config(config_path: &Path) -> Result<LookupConfiguration, config::ConfigError> {
    load(config_path, config::Environment::with_prefix(ENV_PREFIX))
}

fn load(
    config_path: &Path,
    env: config::Environment,
) -> Result<LookupConfiguration, config::ConfigError> {
    let f = config::File::from(config_path).required(false);
    let config = config::Config::builder()
        .add_source(f)
        .add_source(env.try_parsing(true))
        .build()?;
    config.try_deserialize::<LookupConfiguration>()
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LookupConfiguration {
    pub server_port: u16,
    pub receive_timeout_ms: u64,
    pub max_queries: u32,
    pub max_consecutive_timeouts: u32,
    pub max_response_size: usize,
}

impl LookupConfiguration {
    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }
}

impl Default for LookupConfiguration {
    fn default() -> Self {
        Self {
            server_port: 53,
            receive_timeout_ms: 5000,
            max_queries: 30,
            max_consecutive_timeouts: 2,
            max_response_size: 512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = load(&path, no_env()).unwrap();
        assert_eq!(config, LookupConfiguration::default());
        assert_eq!(config.receive_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn file_overrides_some_keys() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "max_queries = 10\nreceive_timeout_ms = 250").unwrap();

        let config = load(file.path(), no_env()).unwrap();
        assert_eq!(config.max_queries, 10);
        assert_eq!(config.receive_timeout(), Duration::from_millis(250));
        assert_eq!(config.server_port, 53);
    }

    #[test]
    fn environment_beats_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "server_port = 5300").unwrap();

        let mut vars = HashMap::new();
        vars.insert("LOOKUP_SERVER_PORT".to_string(), "5353".to_string());
        let env = config::Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let config = load(file.path(), env).unwrap();
        assert_eq!(config.server_port, 5353);
    }

    #[test]
    fn bad_value_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "max_queries = \"many\"").unwrap();

        assert!(load(file.path(), no_env()).is_err());
    }
}
