use crate::error::AppError;
use crate::models::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::Path;
use tracing::debug;

pub mod paths;
pub mod validation;

use crate::constants::{DEFAULT_SERVICE_URL, env_vars};
use paths::{get_config_path, get_log_dir_path};
use validation::{parse_request_ip, validate_config};

/// Client configuration.
/// Validated once when a client is built and treated as immutable afterwards;
/// only the source address can be changed on a live client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Vendor API endpoint. Query parameters are appended directly to it.
    #[serde(default = "default_service_url")]
    pub service_url: String,
    /// API key as shown on the vendor account page.
    #[serde(default)]
    pub api_key: String,
    /// Requested output representation. Defaults to JSON.
    #[serde(default)]
    pub output_type: OutputFormat,
    /// Local address outbound requests are bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_ip: Option<String>,
    /// Seconds to keep results in the cache store. Zero disables writes.
    #[serde(default)]
    pub cache_time: u64,
    /// Attach a content hash and the source URL to decoded responses.
    #[serde(default)]
    pub generate_hash: bool,
    /// Path to the log file used by the command line tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            service_url: default_service_url(),
            api_key: String::new(),
            output_type: OutputFormat::default(),
            request_ip: None,
            cache_time: 0,
            generate_hash: false,
            log_file_path: None,
        }
    }
}

impl ClientConfig {
    /// Default configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        ClientConfig {
            api_key: api_key.into(),
            ..ClientConfig::default()
        }
    }

    /// Loads configuration from the default config file location, falling back
    /// to defaults when no file exists. Environment variables override file values.
    ///
    /// # Environment Variables
    /// - `FOOTBALL_API_SERVICE_URL` - Override service URL
    /// - `FOOTBALL_API_KEY` - Override API key
    /// - `FOOTBALL_API_OUTPUT_TYPE` - Override output type
    /// - `FOOTBALL_API_REQUEST_IP` - Override source address
    /// - `FOOTBALL_API_CACHE_TIME` - Override cache TTL in seconds
    /// - `FOOTBALL_API_GENERATE_HASH` - Override hash generation (`true`/`false`)
    /// - `FOOTBALL_API_LOG_FILE` - Override log file path
    pub fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path())
    }

    /// Like [`ClientConfig::load`] but reading from a specific file
    pub fn load_with_overrides(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path)?
        } else {
            debug!("No config file at {path}, using defaults");
            ClientConfig::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file without consulting the environment.
    pub fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Applies `FOOTBALL_API_*` environment variables on top of current values
    pub fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        if let Ok(service_url) = std::env::var(env_vars::SERVICE_URL) {
            self.service_url = service_url;
        }

        if let Ok(api_key) = std::env::var(env_vars::API_KEY) {
            self.api_key = api_key;
        }

        if let Ok(output_type) = std::env::var(env_vars::OUTPUT_TYPE) {
            self.output_type = output_type.parse()?;
        }

        if let Ok(request_ip) = std::env::var(env_vars::REQUEST_IP) {
            self.request_ip = Some(request_ip);
        }

        if let Ok(cache_time) = std::env::var(env_vars::CACHE_TIME) {
            self.cache_time = cache_time.trim().parse().map_err(|_| {
                AppError::config_error(format!(
                    "{} must be a whole number of seconds, got '{cache_time}'",
                    env_vars::CACHE_TIME
                ))
            })?;
        }

        if let Ok(generate_hash) = std::env::var(env_vars::GENERATE_HASH) {
            self.generate_hash = match generate_hash.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(AppError::config_error(format!(
                        "{} must be true or false, got '{other}'",
                        env_vars::GENERATE_HASH
                    )));
                }
            };
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        Ok(())
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.service_url,
            &self.api_key,
            &self.request_ip,
            &self.log_file_path,
        )
    }

    /// The configured source address, parsed
    pub fn source_address(&self) -> Result<Option<IpAddr>, AppError> {
        self.request_ip.as_deref().map(parse_request_ip).transpose()
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        get_log_dir_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        unsafe {
            for var in [
                env_vars::SERVICE_URL,
                env_vars::API_KEY,
                env_vars::OUTPUT_TYPE,
                env_vars::REQUEST_IP,
                env_vars::CACHE_TIME,
                env_vars::GENERATE_HASH,
                env_vars::LOG_FILE,
            ] {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_content = r#"
service_url = "https://football-api.example.com/api/"
api_key = "abc123"
output_type = "XML"
request_ip = "10.0.0.2"
cache_time = 300
generate_hash = true
"#;
        std::fs::write(&config_path, config_content).unwrap();

        let config = ClientConfig::load_from_path(&config_path.to_string_lossy()).unwrap();

        assert_eq!(config.service_url, "https://football-api.example.com/api/");
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.output_type, OutputFormat::Xml);
        assert_eq!(config.request_ip.as_deref(), Some("10.0.0.2"));
        assert_eq!(config.cache_time, 300);
        assert!(config.generate_hash);
    }

    #[test]
    fn test_config_defaults_for_missing_fields() {
        let config: ClientConfig = toml::from_str("api_key = \"abc\"").unwrap();
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.output_type, OutputFormat::Json);
        assert_eq!(config.cache_time, 0);
        assert!(!config.generate_hash);
        assert_eq!(config.request_ip, None);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "api_key = [unterminated").unwrap();

        let result = ClientConfig::load_from_path(&config_path.to_string_lossy());
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[test]
    fn test_config_load_from_nonexistent_path() {
        let result = ClientConfig::load_from_path("/nonexistent/path/config.toml");
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_config_unknown_output_type_rejected() {
        let result = toml::from_str::<ClientConfig>("api_key = \"a\"\noutput_type = \"PHP\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ClientConfig {
            output_type: OutputFormat::Object,
            cache_time: 60,
            ..ClientConfig::new("abc")
        };
        let toml_string = toml::to_string(&config).unwrap();
        assert!(toml_string.contains("output_type = \"OBJECT\""));
        assert!(!toml_string.contains("request_ip"));
        let deserialized: ClientConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_source_address() {
        let mut config = ClientConfig::new("abc");
        assert_eq!(config.source_address().unwrap(), None);
        config.request_ip = Some("192.168.1.10".to_string());
        assert_eq!(
            config.source_address().unwrap(),
            Some("192.168.1.10".parse().unwrap())
        );
        config.request_ip = Some("eth0".to_string());
        assert!(matches!(config.source_address(), Err(AppError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_environment_variable_override() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "api_key = \"from-file\"\noutput_type = \"JSON\"\n",
        )
        .unwrap();

        unsafe {
            std::env::set_var(env_vars::API_KEY, "from-env");
            std::env::set_var(env_vars::OUTPUT_TYPE, "array");
            std::env::set_var(env_vars::CACHE_TIME, "120");
            std::env::set_var(env_vars::GENERATE_HASH, "true");
        }

        let config = ClientConfig::load_with_overrides(&config_path.to_string_lossy()).unwrap();
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.output_type, OutputFormat::Array);
        assert_eq!(config.cache_time, 120);
        assert!(config.generate_hash);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_environment_values_rejected() {
        clear_env();
        let mut config = ClientConfig::new("abc");

        unsafe { std::env::set_var(env_vars::CACHE_TIME, "soon") };
        assert!(matches!(
            config.apply_env_overrides(),
            Err(AppError::Config(_))
        ));
        clear_env();

        unsafe { std::env::set_var(env_vars::GENERATE_HASH, "maybe") };
        assert!(matches!(
            config.apply_env_overrides(),
            Err(AppError::Config(_))
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_without_file_requires_api_key() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("config.toml");
        let result = ClientConfig::load_with_overrides(&missing.to_string_lossy());
        assert!(matches!(result, Err(AppError::Config(_))));

        unsafe { std::env::set_var(env_vars::API_KEY, "env-key") };
        let config = ClientConfig::load_with_overrides(&missing.to_string_lossy()).unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        clear_env();
    }

    #[test]
    fn test_get_config_path() {
        let path = ClientConfig::get_config_path();
        assert!(path.ends_with("config.toml"));
        assert!(path.contains("football_api"));
    }

    #[test]
    fn test_get_log_dir_path() {
        let path = ClientConfig::get_log_dir_path();
        assert!(path.contains("football_api"));
        assert!(path.ends_with("logs"));
    }
}
