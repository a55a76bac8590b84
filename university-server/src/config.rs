use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ServerError;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:50051";
pub const DEFAULT_SERVER_URI: &str = "http://127.0.0.1:50051";
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub const LISTEN_ADDR_ENV: &str = "UNIVERSITY_LISTEN_ADDR";
pub const SEED_ENV: &str = "UNIVERSITY_SEED";
pub const SERVER_URI_ENV: &str = "UNIVERSITY_SERVER";

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Roster file loaded into the registry before the server accepts calls.
    pub seed: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 50051)),
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Defaults overlaid with `UNIVERSITY_LISTEN_ADDR` and `UNIVERSITY_SEED`.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `from_env` with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let mut config = Self::default();
        if let Some(addr) = lookup(LISTEN_ADDR_ENV).filter(|v| !v.trim().is_empty()) {
            config.listen_addr = parse_listen_addr(&addr)?;
        }
        if let Some(seed) = lookup(SEED_ENV).filter(|v| !v.trim().is_empty()) {
            config.seed = Some(PathBuf::from(seed));
        }
        Ok(config)
    }
}

pub fn parse_listen_addr(value: &str) -> Result<SocketAddr, ServerError> {
    value
        .trim()
        .parse::<SocketAddr>()
        .map_err(|source| ServerError::InvalidAddress {
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_matches_constant() {
        assert_eq!(
            ServerConfig::default().listen_addr,
            parse_listen_addr(DEFAULT_LISTEN_ADDR).expect("parse")
        );
    }

    #[test]
    fn lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            (LISTEN_ADDR_ENV, "127.0.0.1:6000"),
            (SEED_ENV, "/tmp/seed.yaml"),
        ]
        .into_iter()
        .collect();
        let config =
            ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).expect("config");
        assert_eq!(config.listen_addr.port(), 6000);
        assert_eq!(config.seed, Some(PathBuf::from("/tmp/seed.yaml")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = ServerConfig::from_lookup(|_| Some("  ".to_string())).expect("config");
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn invalid_address_is_reported() {
        let err = ServerConfig::from_lookup(|k| {
            (k == LISTEN_ADDR_ENV).then(|| "not-an-addr".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress { .. }), "got: {err}");
        assert!(err.to_string().contains("not-an-addr"));
    }
}
