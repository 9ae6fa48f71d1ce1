//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Application configuration, read from `config.yaml`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub monitor: MonitorConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    /// Command prefix of the admin command, e.g. `/km_admin`
    pub prefix: String,
    /// Platform segment of session ids, e.g. `aiocqhttp`
    pub platform: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MonitorConfig {
    /// JSON file holding keywords, whitelist and admin id
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub onebot: Option<OneBotConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OneBotConfig {
    pub enabled: bool,
    pub api_base: String,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "keyword-monitor".to_string(),
                prefix: "/km_admin".to_string(),
                platform: "aiocqhttp".to_string(),
            },
            monitor: MonitorConfig {
                state_file: PathBuf::from("config.json"),
            },
            adapters: AdaptersConfig {
                onebot: Some(OneBotConfig {
                    enabled: false,
                    api_base: "http://127.0.0.1:5700".to_string(),
                    access_token: None,
                }),
                console: Some(ConsoleConfig {
                    enabled: true,
                }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.trim().is_empty() || self.bot.prefix.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue(format!("prefix '{}'", self.bot.prefix)));
        }
        if self.bot.platform.is_empty() || self.bot.platform.contains(':') {
            return Err(ConfigError::InvalidValue(format!("platform '{}'", self.bot.platform)));
        }
        Ok(())
    }

    /// OneBot settings, if that adapter is switched on
    pub fn onebot(&self) -> Option<&OneBotConfig> {
        self.adapters.onebot.as_ref().filter(|o| o.enabled)
    }

    /// Apply environment overrides on top of `self`
    pub fn with_env(mut self) -> Self {
        if let Ok(prefix) = std::env::var("MONITOR_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Ok(path) = std::env::var("MONITOR_STATE_FILE") {
            self.monitor.state_file = PathBuf::from(path);
        }

        if let Ok(api_base) = std::env::var("ONEBOT_API_BASE") {
            let onebot = self.adapters.onebot.get_or_insert_with(|| OneBotConfig {
                enabled: true,
                api_base: api_base.clone(),
                access_token: None,
            });
            onebot.api_base = api_base;
            onebot.enabled = true;
        }

        if let Ok(token) = std::env::var("ONEBOT_ACCESS_TOKEN") {
            if let Some(ref mut onebot) = self.adapters.onebot {
                onebot.access_token = Some(token);
            }
        }

        self
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }
}
