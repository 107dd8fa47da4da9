//! Demo configuration.

use std::env;

use anyhow::{bail, Context};

/// Configuration for a demo run.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Encoder workers to spawn.
    pub workers: usize,
    /// Timed regions each worker opens.
    pub regions_per_worker: usize,
    /// Whether the host exposes a profiler at all.
    pub host_profiler: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            regions_per_worker: 16,
            host_profiler: true,
        }
    }
}

impl DemoConfig {
    pub const WORKERS_VAR: &'static str = "MEDIA_PROFILER_DEMO_WORKERS";
    pub const REGIONS_VAR: &'static str = "MEDIA_PROFILER_DEMO_REGIONS";
    pub const DISABLE_VAR: &'static str = "MEDIA_PROFILER_DEMO_DISABLE";

    /// Defaults overridden by environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// The disable switch accepts `1`/`true`/`yes`/`on` and
    /// `0`/`false`/`no`/`off` (or empty), case-insensitively.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(workers) = parse_count(&lookup, Self::WORKERS_VAR)? {
            config.workers = workers;
        }
        if let Some(regions) = parse_count(&lookup, Self::REGIONS_VAR)? {
            config.regions_per_worker = regions;
        }
        if let Some(disabled) = parse_switch(&lookup, Self::DISABLE_VAR)? {
            config.host_profiler = !disabled;
        }
        Ok(config)
    }
}

fn parse_count(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
) -> anyhow::Result<Option<usize>> {
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a non-negative integer, got `{value}`"))
        })
        .transpose()
}

fn parse_switch(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
) -> anyhow::Result<Option<bool>> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "" | "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => bail!("{name} must be a boolean, got `{value}`"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_register_a_profiler() {
        let config = DemoConfig::default();
        assert!(config.host_profiler);
        assert!(config.workers > 0);
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = DemoConfig::from_lookup(|_| None).unwrap();
        let defaults = DemoConfig::default();
        assert_eq!(config.workers, defaults.workers);
        assert_eq!(config.regions_per_worker, defaults.regions_per_worker);
        assert!(config.host_profiler);
    }

    #[test]
    fn counts_are_overridden() {
        let config = DemoConfig::from_lookup(lookup(&[
            (DemoConfig::WORKERS_VAR, "2"),
            (DemoConfig::REGIONS_VAR, " 64 "),
        ]))
        .unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.regions_per_worker, 64);
    }

    #[test]
    fn invalid_count_names_the_variable() {
        let error = DemoConfig::from_lookup(lookup(&[(DemoConfig::WORKERS_VAR, "abc")]))
            .unwrap_err()
            .to_string();
        assert!(error.contains(DemoConfig::WORKERS_VAR), "{error}");
        assert!(error.contains("abc"), "{error}");
    }

    #[test]
    fn disable_switch_is_parsed_as_a_boolean() {
        for value in ["1", "true", "YES", "on"] {
            let config =
                DemoConfig::from_lookup(lookup(&[(DemoConfig::DISABLE_VAR, value)])).unwrap();
            assert!(!config.host_profiler, "{value} should disable");
        }
        for value in ["0", "false", "No", "off", ""] {
            let config =
                DemoConfig::from_lookup(lookup(&[(DemoConfig::DISABLE_VAR, value)])).unwrap();
            assert!(config.host_profiler, "{value} should keep the profiler");
        }
    }

    #[test]
    fn invalid_disable_switch_names_the_variable() {
        let error = DemoConfig::from_lookup(lookup(&[(DemoConfig::DISABLE_VAR, "maybe")]))
            .unwrap_err()
            .to_string();
        assert!(error.contains(DemoConfig::DISABLE_VAR), "{error}");
    }
}
