use std::env;

use thiserror::Error;

pub const HOST_VAR: &str = "TOOLS_HOST";
pub const PORT_VAR: &str = "TOOLS_PORT";
// names used by earlier deployments, read when the current ones are unset
pub const LEGACY_HOST_VAR: &str = "DENO_TOOLS_HOST";
pub const LEGACY_PORT_VAR: &str = "DENO_TOOLS_PORT";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8092;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number between 0 and 65535, got {value:?}")]
    InvalidPort { var: &'static str, value: String },
}

/// Bind address, read once before the listener starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (_, host) = get_or(&lookup, [HOST_VAR, LEGACY_HOST_VAR], DEFAULT_HOST);
        let (var, port) = get_or(
            &lookup,
            [PORT_VAR, LEGACY_PORT_VAR],
            &DEFAULT_PORT.to_string(),
        );
        let port = port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
            var,
            value: port.clone(),
        })?;
        Ok(Self { host, port })
    }

    pub fn server_addr(&self) -> String {
        // bare IPv6 literals need brackets to carry a port
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

// first variable that is set wins; the name is returned for error reporting
fn get_or<F>(lookup: &F, vars: [&'static str; 2], default: &str) -> (&'static str, String)
where
    F: Fn(&str) -> Option<String>,
{
    let [current, legacy] = vars;
    if let Some(value) = lookup(current) {
        return (current, value);
    }
    if let Some(value) = lookup(legacy) {
        tracing::warn!("{} is deprecated, set {} instead", legacy, current);
        return (legacy, value);
    }
    tracing::warn!(
        "{} environment variable not set, using default: {}",
        current,
        default
    );
    (current, default.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8092);
        assert_eq!(config.server_addr(), "0.0.0.0:8092");
    }

    #[test]
    fn reads_host_and_port() {
        let config =
            Config::from_lookup(lookup_from(&[(HOST_VAR, "127.0.0.1"), (PORT_VAR, " 9000 ")]))
                .unwrap();
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn reads_legacy_variable_names() {
        let config = Config::from_lookup(lookup_from(&[
            (LEGACY_HOST_VAR, "10.0.0.5"),
            (LEGACY_PORT_VAR, "9100"),
        ]))
        .unwrap();
        assert_eq!(config.server_addr(), "10.0.0.5:9100");
    }

    #[test]
    fn prefers_current_variable_names() {
        let config = Config::from_lookup(lookup_from(&[
            (HOST_VAR, "127.0.0.1"),
            (LEGACY_HOST_VAR, "10.0.0.5"),
            (PORT_VAR, "9000"),
            (LEGACY_PORT_VAR, "9100"),
        ]))
        .unwrap();
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn reports_legacy_port_variable_when_invalid() {
        let err = Config::from_lookup(lookup_from(&[(LEGACY_PORT_VAR, "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                var: LEGACY_PORT_VAR,
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn brackets_ipv6_hosts() {
        let config = Config::from_lookup(lookup_from(&[(HOST_VAR, "::1")])).unwrap();
        assert_eq!(config.server_addr(), "[::1]:8092");
    }

    #[test]
    fn rejects_invalid_port() {
        for bad in ["http", "70000", "-1", ""] {
            let err = Config::from_lookup(lookup_from(&[(PORT_VAR, bad)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidPort {
                    var: PORT_VAR,
                    value: bad.to_string()
                }
            );
        }
    }
}
