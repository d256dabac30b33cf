//! Process configuration, read once from the environment at start-up.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEV_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Shared HS256 secret used to verify bearer tokens (`JWT_SECRET`).
    pub jwt_secret: String,

    /// Listen address (`COURIER_BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Seed the in-memory store with an admin and two users (`COURIER_SEED`).
    pub seed: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        let bind_addr = lookup("COURIER_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError {
                var: "COURIER_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let seed = match lookup("COURIER_SEED") {
            None => true,
            Some(raw) => raw.trim().parse::<bool>().map_err(|e| ConfigError {
                var: "COURIER_SEED",
                reason: e.to_string(),
            })?,
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            seed,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.uses_default_secret());
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert!(config.seed);
    }

    #[test]
    fn explicit_values_win() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "prod"),
            ("COURIER_BIND_ADDR", "127.0.0.1:9000"),
            ("COURIER_SEED", "false"),
        ]))
        .unwrap();
        assert_eq!(config.jwt_secret, "prod");
        assert!(!config.uses_default_secret());
        assert_eq!(config.bind_addr.port(), 9000);
        assert!(!config.seed);
    }

    #[test]
    fn malformed_values_are_reported() {
        let err = ApiConfig::from_lookup(lookup(&[("COURIER_BIND_ADDR", "nowhere")])).unwrap_err();
        assert_eq!(err.var, "COURIER_BIND_ADDR");

        let err = ApiConfig::from_lookup(lookup(&[("COURIER_SEED", "maybe")])).unwrap_err();
        assert_eq!(err.var, "COURIER_SEED");
    }
}
