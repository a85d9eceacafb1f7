//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. menubot.toml configuration file
//! 3. Defaults
//!
//! `${VAR_NAME}` references inside the configuration file are expanded from
//! the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

/// Main configuration for menubot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    pub whatsapp: WhatsAppConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the webhook server
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// WhatsApp Cloud API credentials and endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Token echoed back during the webhook subscription handshake
    pub verify_token: String,

    /// Bearer token for the Graph API
    pub access_token: String,

    /// App secret; when set, webhook payload signatures are verified
    pub app_secret: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Session lifecycle tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inactivity timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long before expiry the inactivity warning is sent; absent
    /// disables the warning
    pub warning_lead_secs: Option<u64>,

    /// Delay for the wizard follow-up reminder; absent disables it
    pub reminder_delay_secs: Option<u64>,

    /// Period of the background expired-session sweep in seconds
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            warning_lead_secs: Some(default_warning_lead_secs()),
            reminder_delay_secs: Some(default_reminder_delay_secs()),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl SessionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn warning_lead(&self) -> Option<Duration> {
        self.warning_lead_secs.map(Duration::from_secs)
    }

    pub fn reminder_delay(&self) -> Option<Duration> {
        self.reminder_delay_secs.map(Duration::from_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn default_port() -> u16 {
    3000
}

fn default_api_version() -> String {
    "v18.0".to_string()
}

fn default_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

// 10 minutes, matching the product's session window.
fn default_timeout_secs() -> u64 {
    600
}

fn default_warning_lead_secs() -> u64 {
    60
}

// 48 hours.
fn default_reminder_delay_secs() -> u64 {
    48 * 60 * 60
}

fn default_sweep_interval_secs() -> u64 {
    300
}

impl Config {
    /// Expand `${VAR_NAME}` references from the environment. Unknown
    /// variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file, expanding `${VAR}` references
    /// and applying environment overrides on top.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded = Self::expand_env_vars(&toml_content);

        let mut config: Config = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from the default path (`./menubot.toml`), falling
    /// back to environment variables only.
    pub fn load() -> Result<Self> {
        if Path::new("menubot.toml").exists() {
            return Self::from_toml_file("menubot.toml");
        }

        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let verify_token = std::env::var("VERIFY_TOKEN")
            .map_err(|_| Error::Config("VERIFY_TOKEN not set".to_string()))?;
        let access_token = std::env::var("ACCESS_TOKEN")
            .map_err(|_| Error::Config("ACCESS_TOKEN not set".to_string()))?;

        let mut config = Config {
            server: ServerConfig::default(),
            whatsapp: WhatsAppConfig {
                verify_token,
                access_token,
                app_secret: None,
                api_version: default_api_version(),
                base_url: default_base_url(),
            },
            session: SessionConfig::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Environment variables take precedence over file values
    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(token) = std::env::var("VERIFY_TOKEN") {
            if !token.is_empty() {
                self.whatsapp.verify_token = token;
            }
        }
        if let Ok(token) = std::env::var("ACCESS_TOKEN") {
            if !token.is_empty() {
                self.whatsapp.access_token = token;
            }
        }
        if let Ok(secret) = std::env::var("WHATSAPP_APP_SECRET") {
            if !secret.is_empty() {
                self.whatsapp.app_secret = Some(secret);
            }
        }
        if let Ok(version) = std::env::var("WHATSAPP_API_VERSION") {
            if !version.is_empty() {
                self.whatsapp.api_version = version;
            }
        }
        if let Ok(url) = std::env::var("WHATSAPP_BASE_URL") {
            if !url.is_empty() {
                self.whatsapp.base_url = url;
            }
        }

        if let Ok(secs) = std::env::var("SESSION_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.session.timeout_secs = s;
            }
        }
        if let Ok(secs) = std::env::var("SESSION_WARNING_LEAD_SECS") {
            if let Ok(s) = secs.parse() {
                self.session.warning_lead_secs = Some(s);
            }
        }
        if let Ok(secs) = std::env::var("SESSION_REMINDER_DELAY_SECS") {
            if let Ok(s) = secs.parse() {
                self.session.reminder_delay_secs = Some(s);
            }
        }
        if let Ok(secs) = std::env::var("SESSION_SWEEP_INTERVAL_SECS") {
            if let Ok(s) = secs.parse() {
                self.session.sweep_interval_secs = s;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.whatsapp.verify_token.is_empty() {
            return Err(Error::Config("verify_token must not be empty".to_string()));
        }
        if self.whatsapp.access_token.is_empty() {
            return Err(Error::Config("access_token must not be empty".to_string()));
        }
        if self.session.timeout_secs == 0 {
            return Err(Error::Config("session timeout must be positive".to_string()));
        }
        Ok(())
    }
}
