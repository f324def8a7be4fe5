//! Server configuration read from `HV_*` environment variables.

use crate::aggregator::DEFAULT_FACET_TIMEOUT;
use crate::error::ConfigError;
use crate::registry::FacetRegistry;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Applied to every facet without an override.
    pub facet_timeout: Duration,
    /// `(facet name, timeout)` in the order they were written.
    pub facet_timeouts: Vec<(String, Duration)>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            facet_timeout: DEFAULT_FACET_TIMEOUT,
            facet_timeouts: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset or blank keys
    /// keep their defaults; anything else must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(host) = get("HV_HOST") {
            config.host = host;
        }
        if let Some(port) = get("HV_PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "HV_PORT".into(),
                    value: port.clone(),
                })?;
        }
        if let Some(ms) = get("HV_FACET_TIMEOUT_MS") {
            config.facet_timeout = parse_timeout("HV_FACET_TIMEOUT_MS", &ms)?;
        }
        if let Some(overrides) = get("HV_FACET_TIMEOUTS") {
            config.facet_timeouts = parse_overrides(&overrides)?;
        }
        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pushes the per-facet overrides into `registry`. Fails on names the
    /// registry does not know.
    pub fn apply(&self, registry: &mut FacetRegistry) -> Result<(), ConfigError> {
        for (name, timeout) in &self.facet_timeouts {
            registry.set_timeout(name, *timeout)?;
        }
        Ok(())
    }
}

fn parse_timeout(key: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidTimeout {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// `Battery=100, CPU=500`
fn parse_overrides(raw: &str) -> Result<Vec<(String, Duration)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, ms) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "HV_FACET_TIMEOUTS".into(),
                    value: entry.to_string(),
                })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::BlankFacetName);
            }
            Ok((name.to_string(), parse_timeout(name, ms)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;
    use crate::registry::{FacetResult, RawPayload, Shaped};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.facet_timeout, Duration::from_millis(2000));
    }

    #[test]
    fn reads_every_key() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HV_HOST", "127.0.0.1"),
            ("HV_PORT", "8080"),
            ("HV_FACET_TIMEOUT_MS", "1500"),
            ("HV_FACET_TIMEOUTS", "Battery=100, Graphics Controllers=5000"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.facet_timeout, Duration::from_millis(1500));
        assert_eq!(
            config.facet_timeouts,
            vec![
                ("Battery".to_string(), Duration::from_millis(100)),
                ("Graphics Controllers".to_string(), Duration::from_millis(5000)),
            ]
        );
    }

    #[test]
    fn rejects_invalid_values() {
        let err = ServerConfig::from_lookup(lookup(&[("HV_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = ServerConfig::from_lookup(lookup(&[("HV_FACET_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));

        let err =
            ServerConfig::from_lookup(lookup(&[("HV_FACET_TIMEOUTS", "Battery")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = ServerConfig::from_lookup(lookup(&[("HV_FACET_TIMEOUTS", "Battery=soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTimeout {
                key: "Battery".into(),
                value: "soon".into()
            }
        );
    }

    fn identity(raw: &RawPayload) -> Result<Shaped, ShapeError> {
        Ok(raw.clone())
    }

    async fn empty() -> FacetResult {
        Ok(serde_json::json!({}))
    }

    #[test]
    fn applies_overrides_to_registry() {
        let mut registry = FacetRegistry::new();
        registry.register("Battery", empty, identity).unwrap();

        let config =
            ServerConfig::from_lookup(lookup(&[("HV_FACET_TIMEOUTS", "Battery=100")])).unwrap();
        config.apply(&mut registry).unwrap();
        assert_eq!(
            registry.get("Battery").unwrap().timeout(),
            Some(Duration::from_millis(100))
        );

        let config =
            ServerConfig::from_lookup(lookup(&[("HV_FACET_TIMEOUTS", "Sensors=100")])).unwrap();
        assert_eq!(
            config.apply(&mut registry),
            Err(ConfigError::UnknownFacet("Sensors".into()))
        );
    }
}
