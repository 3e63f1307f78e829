//! Configuration loader. Values are read once from the process environment
//! (optionally seeded from a `.env` file) into an immutable `Config` that
//! callers pass to whatever needs it.

use std::fmt;

use serde_json::{json, Value};
use tracing::{debug, warn};

pub const APP_ENV: &str = "APP_ENV";
pub const EXAMPLE_API_KEY: &str = "EXAMPLE_API_KEY";
pub const AWS_ACCESS_KEY: &str = "AWS_ACCESS_KEY";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

const PRODUCTION: &str = "production";
const REDACTED: &str = "<redacted>";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct ExampleServiceConfig {
    pub api_key: Option<String>,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct S3Config {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Runtime settings. Missing variables stay `None`; nothing is validated here
/// and consumers decide what they require.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub production: bool,
    pub example_service: ExampleServiceConfig,
    pub s3: S3Config,
}

impl Config {
    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            production: lookup(APP_ENV).as_deref() == Some(PRODUCTION),
            example_service: ExampleServiceConfig {
                api_key: lookup(EXAMPLE_API_KEY),
            },
            s3: S3Config {
                access_key_id: lookup(AWS_ACCESS_KEY),
                secret_access_key: lookup(AWS_SECRET_ACCESS_KEY),
            },
        }
    }

    /// Reads the current process environment. Non-unicode values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads `.env` from the working directory when present, then reads the
    /// environment. Variables already set in the process take precedence.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(err) if err.not_found() => {}
            Err(err) => warn!(error = %err, "ignoring unreadable .env file"),
        }
        Self::from_env()
    }

    /// JSON view of the configuration with every secret masked.
    pub fn redacted(&self) -> Value {
        json!({
            "production": self.production,
            "exampleService": {
                "apiKey": mask(&self.example_service.api_key),
            },
            "s3": {
                "accessKeyId": mask(&self.s3.access_key_id),
                "secretAccessKey": mask(&self.s3.secret_access_key),
            },
        })
    }
}

fn mask(value: &Option<String>) -> Value {
    match value {
        Some(_) => Value::String(REDACTED.to_string()),
        None => Value::Null,
    }
}

// Secrets never reach log output through `{:?}`.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config {}", self.redacted())
    }
}

impl fmt::Debug for ExampleServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleServiceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| REDACTED))
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_all_named_settings() {
        let config = Config::from_lookup(lookup_from(&[
            (APP_ENV, "production"),
            (EXAMPLE_API_KEY, "example-key"),
            (AWS_ACCESS_KEY, "AKIA123"),
            (AWS_SECRET_ACCESS_KEY, "s3cr3t"),
        ]));

        assert!(config.production);
        assert_eq!(config.example_service.api_key.as_deref(), Some("example-key"));
        assert_eq!(config.s3.access_key_id.as_deref(), Some("AKIA123"));
        assert_eq!(config.s3.secret_access_key.as_deref(), Some("s3cr3t"));
    }

    #[test]
    fn missing_variables_are_absent_not_errors() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert!(!config.production);
    }

    #[test]
    fn only_exact_production_value_sets_the_flag() {
        for value in ["Production", "prod", "", " production"] {
            let config = Config::from_lookup(lookup_from(&[(APP_ENV, value)]));
            assert!(!config.production, "{value:?} should not count as production");
        }
    }

    #[test]
    fn from_env_reads_process_environment() {
        std::env::set_var(EXAMPLE_API_KEY, "from-process-env");
        let config = Config::from_env();
        assert_eq!(config.example_service.api_key.as_deref(), Some("from-process-env"));
        std::env::remove_var(EXAMPLE_API_KEY);
    }

    #[test]
    fn redaction_hides_secret_values() {
        let config = Config::from_lookup(lookup_from(&[
            (EXAMPLE_API_KEY, "example-key"),
            (AWS_SECRET_ACCESS_KEY, "s3cr3t"),
        ]));

        let redacted = config.redacted();
        assert_eq!(redacted["exampleService"]["apiKey"], "<redacted>");
        assert_eq!(redacted["s3"]["secretAccessKey"], "<redacted>");
        assert!(redacted["s3"]["accessKeyId"].is_null());

        let debug = format!("{config:?} {:?}", config.s3);
        assert!(!debug.contains("example-key"));
        assert!(!debug.contains("s3cr3t"));
    }
}
