//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Gemini API configuration
    pub gemini: GeminiConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model name used for analysis
    pub model: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request body size in bytes
    pub max_request_size: usize,
    /// Maximum decoded image size in bytes
    pub max_image_bytes: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "8080")
                    .parse()
                    .context("Invalid port number")?,
            },
            gemini: GeminiConfig {
                api_key: std::env::var("GEMINI_API_KEY")
                    .context("GEMINI_API_KEY environment variable not set")?,
                base_url: get_env_or_default(
                    "GEMINI_BASE_URL",
                    "https://generativelanguage.googleapis.com/v1beta",
                ),
                model: get_env_or_default("GEMINI_MODEL", "gemini-2.5-flash"),
                timeout: get_env_or_default("REQUEST_TIMEOUT", "60")
                    .parse()
                    .context("Invalid timeout value")?,
            },
            request: RequestConfig {
                max_request_size: get_env_or_default("MAX_REQUEST_SIZE", "10485760")
                    .parse()
                    .context("Invalid maximum request size")?,
                max_image_bytes: get_env_or_default("MAX_IMAGE_BYTES", "7340032")
                    .parse()
                    .context("Invalid maximum image size")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // Basic API key validation - ensure no whitespace and minimum length
        if self.gemini.api_key.is_empty() {
            anyhow::bail!("Gemini API key cannot be empty");
        }

        if self.gemini.api_key.contains(char::is_whitespace) {
            anyhow::bail!("Gemini API key cannot contain whitespace characters");
        }

        if self.gemini.api_key.len() < 8 {
            anyhow::bail!("Gemini API key must be at least 8 characters long");
        }

        // Validate URL format
        if !self.gemini.base_url.starts_with("http") {
            anyhow::bail!("Invalid Gemini base URL format, should start with 'http'");
        }

        // Validate model name
        if self.gemini.model.is_empty() {
            anyhow::bail!("Gemini model name cannot be empty");
        }

        // Validate timeout value
        if self.gemini.timeout == 0 {
            anyhow::bail!("Timeout value cannot be 0");
        }

        // Validate size limits
        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        if self.request.max_image_bytes == 0 {
            anyhow::bail!("Maximum image size cannot be 0");
        }

        if self.request.max_image_bytes > self.request.max_request_size {
            anyhow::bail!("Maximum image size cannot exceed maximum request size");
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            server: ServerConfig {
                host: "localhost".to_string(),
                port: 8080,
            },
            gemini: GeminiConfig {
                api_key: "test-key-1234".to_string(),
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-2.5-flash".to_string(),
                timeout: 60,
            },
            request: RequestConfig {
                max_request_size: 10 * 1024 * 1024,
                max_image_bytes: 7 * 1024 * 1024,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_settings_pass_validation() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_whitespace_api_key_rejected() {
        let mut settings = valid_settings();
        settings.gemini.api_key = "bad key with spaces".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_image_limit_cannot_exceed_body_limit() {
        let mut settings = valid_settings();
        settings.request.max_image_bytes = settings.request.max_request_size + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut settings = valid_settings();
        settings.gemini.base_url = "generativelanguage.googleapis.com".to_string();
        assert!(settings.validate().is_err());
    }
}
