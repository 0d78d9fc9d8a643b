//! Typed environment-variable loading with defaults and duration parsing.

use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("environment variable not found: {var}")]
    NotFound { var: String },

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Builder-style loader over `std::env`, with an optional prefix and
/// per-variable defaults so components can be constructed uniformly whether
/// their config comes from the real environment or test overrides.
pub struct EnvConfigLoader {
    prefix: Option<String>,
    defaults: HashMap<String, String>,
}

impl EnvConfigLoader {
    pub fn new() -> Self {
        Self {
            prefix: None,
            defaults: HashMap::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn default(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(var.into(), value.into());
        self
    }

    fn full_name(&self, var: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{}", var.to_uppercase()),
            None => var.to_uppercase(),
        }
    }

    pub fn get(&self, var: &str) -> Result<String, EnvError> {
        let full = self.full_name(var);
        env::var(&full).or_else(|_| {
            self.defaults
                .get(var)
                .cloned()
                .ok_or(EnvError::NotFound { var: full })
        })
    }

    pub fn get_optional(&self, var: &str) -> Option<String> {
        let full = self.full_name(var);
        env::var(&full).ok().or_else(|| self.defaults.get(var).cloned())
    }

    pub fn get_u32(&self, var: &str) -> Result<u32, EnvError> {
        let value = self.get(var)?;
        value.parse().map_err(|e| EnvError::InvalidValue {
            var: self.full_name(var),
            reason: format!("not an unsigned integer: {e}"),
        })
    }

    pub fn get_f64(&self, var: &str) -> Result<f64, EnvError> {
        let value = self.get(var)?;
        value.parse().map_err(|e| EnvError::InvalidValue {
            var: self.full_name(var),
            reason: format!("not a float: {e}"),
        })
    }

    pub fn get_bool(&self, var: &str) -> Result<bool, EnvError> {
        let value = self.get(var)?;
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(EnvError::InvalidValue {
                var: self.full_name(var),
                reason: format!("not a boolean: {other}"),
            }),
        }
    }

    /// Supports "30s", "5m", "1h", "500ms"; a bare number defaults to seconds.
    pub fn get_duration(&self, var: &str) -> Result<Duration, EnvError> {
        let value = self.get(var)?;
        parse_duration(&value).map_err(|reason| EnvError::InvalidValue {
            var: self.full_name(var),
            reason,
        })
    }
}

impl Default for EnvConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_duration(raw: &str) -> Result<Duration, String> {
    let s = raw.trim().to_lowercase();
    if let Some(num) = s.strip_suffix("ms") {
        return num
            .parse()
            .map(Duration::from_millis)
            .map_err(|e| format!("invalid milliseconds: {e}"));
    }
    if let Some(num) = s.strip_suffix('h') {
        return num
            .parse::<u64>()
            .map(|n| Duration::from_secs(n * 3600))
            .map_err(|e| format!("invalid hours: {e}"));
    }
    if let Some(num) = s.strip_suffix('m') {
        return num
            .parse::<u64>()
            .map(|n| Duration::from_secs(n * 60))
            .map_err(|e| format!("invalid minutes: {e}"));
    }
    if let Some(num) = s.strip_suffix('s') {
        return num
            .parse()
            .map(Duration::from_secs)
            .map_err(|e| format!("invalid seconds: {e}"));
    }
    s.parse()
        .map(Duration::from_secs)
        .map_err(|_| format!("invalid duration format: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applies_when_var_unset() {
        let loader = EnvConfigLoader::new()
            .with_prefix("SEO_CONFIG_TEST_")
            .default("missing_var", "42");
        assert_eq!(loader.get("missing_var").unwrap(), "42");
    }

    #[test]
    fn missing_without_default_errors_with_full_name() {
        let loader = EnvConfigLoader::new().with_prefix("SEO_CONFIG_TEST_");
        let err = loader.get("nope").unwrap_err();
        match err {
            EnvError::NotFound { var } => assert_eq!(var, "SEO_CONFIG_TEST_NOPE"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duration_parses_suffixes() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("7").unwrap(), Duration::from_secs(7));
    }

    #[test]
    fn bool_accepts_common_spellings() {
        let loader = EnvConfigLoader::new().default("flag", "yes");
        assert!(loader.get_bool("flag").unwrap());
    }
}
