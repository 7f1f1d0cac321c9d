use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to load config from environment: {0}")]
    Env(#[from] envy::Error),
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Unknown store `{0}`, expected `supabase` or `memory`")]
    UnknownStore(String),
    #[error("Invalid listen address `{0}`")]
    ListenAddr(String),
}

/// Where creator records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Supabase { url: String, anon_key: String },
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreName {
    Supabase,
    Memory,
}

impl FromStr for StoreName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(StoreName::Supabase),
            "memory" => Ok(StoreName::Memory),
            _ => Err(ConfigError::UnknownStore(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub store: StoreKind,
    pub creators_table: String,
    pub listen_addr: SocketAddr,
    pub log_dir: String,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    creators_table: Option<String>,
    listen_addr: Option<String>,
    log_dir: Option<String>,
    store: Option<String>,
}

fn default_creators_table() -> String {
    "creators".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn read_file(config_path: Option<&str>) -> Result<PartialServerConfig, ConfigError> {
    let Some(path_str) = config_path else {
        return Ok(PartialServerConfig::default());
    };
    let path = Path::new(path_str);
    if !path.exists() {
        return Ok(PartialServerConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_str.to_string(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path_str.to_string(),
        source,
    })
}

impl ServerConfig {
    pub fn store_label(&self) -> &'static str {
        match self.store {
            StoreKind::Supabase { .. } => "supabase",
            StoreKind::Memory => "memory",
        }
    }

    /// Defaults, then the TOML file, then the process environment (after `.env`).
    pub fn load(config_path: Option<&str>, force_memory: bool) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::load_with_env(config_path, std::env::vars(), force_memory)
    }

    /// Same layering as [`ServerConfig::load`] with the environment supplied by the caller.
    pub fn load_with_env<I>(
        config_path: Option<&str>,
        env: I,
        force_memory: bool,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let file_config = read_file(config_path)?;
        let env_config: PartialServerConfig = envy::from_iter(env)?;

        // Environment overrides file
        let store_name = match env_config.store.or(file_config.store) {
            _ if force_memory => StoreName::Memory,
            Some(raw) => raw.parse()?,
            None => StoreName::Supabase,
        };

        let store = match store_name {
            StoreName::Memory => StoreKind::Memory,
            StoreName::Supabase => StoreKind::Supabase {
                url: env_config
                    .supabase_url
                    .or(file_config.supabase_url)
                    .filter(|v| !v.trim().is_empty())
                    .ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                anon_key: env_config
                    .supabase_anon_key
                    .or(file_config.supabase_anon_key)
                    .filter(|v| !v.trim().is_empty())
                    .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            },
        };

        let listen_addr = env_config
            .listen_addr
            .or(file_config.listen_addr)
            .unwrap_or_else(default_listen_addr);
        let listen_addr = listen_addr
            .parse()
            .map_err(|_| ConfigError::ListenAddr(listen_addr.clone()))?;

        Ok(ServerConfig {
            store,
            creators_table: env_config
                .creators_table
                .or(file_config.creators_table)
                .unwrap_or_else(default_creators_table),
            listen_addr,
            log_dir: env_config
                .log_dir
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_with_memory_store() {
        let config = ServerConfig::load_with_env(None, env(&[("STORE", "memory")]), false).unwrap();
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.creators_table, "creators");
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.log_dir, "logs");
    }

    #[test]
    fn test_supabase_requires_credentials() {
        let err = ServerConfig::load_with_env(None, env(&[]), false).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));

        let err = ServerConfig::load_with_env(
            None,
            env(&[("SUPABASE_URL", "https://x.supabase.co")]),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_ANON_KEY")));
    }

    #[test]
    fn test_force_memory_skips_credentials() {
        let config = ServerConfig::load_with_env(None, env(&[("STORE", "supabase")]), true).unwrap();
        assert_eq!(config.store, StoreKind::Memory);
    }

    #[test]
    fn test_rejects_unknown_store_and_bad_address() {
        let err = ServerConfig::load_with_env(None, env(&[("STORE", "redis")]), false).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStore(_)));

        let err = ServerConfig::load_with_env(
            None,
            env(&[("STORE", "memory"), ("LISTEN_ADDR", "nowhere")]),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ListenAddr(_)));
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let config = ServerConfig::load_with_env(
            Some("/definitely/not/here.toml"),
            env(&[("STORE", "Memory")]),
            false,
        )
        .unwrap();
        assert_eq!(config.store, StoreKind::Memory);
    }
}
