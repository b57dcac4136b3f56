//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::errors::ConfigError;
use crate::domain::entities::PrefixMap;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub gatekeeper: GatekeeperConfig,
    pub modules: ModulesConfig,
    pub prefixes: PrefixesConfig,
    pub notices: NoticesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub default_prefix: String,
}

/// The single-tenant allow-list: the one guild the bot may stay in, and the
/// channel its audit trail goes to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GatekeeperConfig {
    pub safe_guild: u64,
    pub log_channel: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModulesConfig {
    pub commands_dir: PathBuf,
    pub events_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PrefixesConfig {
    pub file: PathBuf,
}

/// Rendering of the generic failure notice the error boundary sends.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoticesConfig {
    pub failure_title: String,
    pub failure_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "gatewarden".to_string(),
                default_prefix: "!".to_string(),
            },
            gatekeeper: GatekeeperConfig {
                safe_guild: 1349034219657236522,
                log_channel: 1349204960708923532,
            },
            modules: ModulesConfig {
                commands_dir: PathBuf::from("./commands"),
                events_dir: PathBuf::from("./events"),
            },
            prefixes: PrefixesConfig {
                file: PathBuf::from("./data/prefixes.json"),
            },
            notices: NoticesConfig {
                failure_title: "❌ Error".to_string(),
                failure_message: "An error occurred while executing this command.".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            config.bot.default_prefix = prefix;
        }

        config
    }

    /// The gateway token, from the CLI override or the `BOT_TOKEN`
    /// environment variable. Consumed once at startup.
    pub fn token(override_token: Option<String>) -> Result<String, ConfigError> {
        override_token
            .or_else(|| std::env::var("BOT_TOKEN").ok())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("BOT_TOKEN".to_string()))
    }
}

/// Load the guild-id → prefix map: a flat JSON object keyed by guild-id
/// strings. A missing file yields an empty map; malformed content or a
/// non-numeric key is fatal.
pub fn load_prefixes(path: impl AsRef<Path>, default: &str) -> Result<PrefixMap, ConfigError> {
    let path = path.as_ref();
    let mut prefixes = PrefixMap::new(default);

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                "Prefix file {} not found, every guild uses '{}'",
                path.display(),
                default
            );
            return Ok(prefixes);
        }
        Err(e) => {
            return Err(ConfigError::Parse(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    let raw: HashMap<String, String> = serde_json::from_str(&content)
        .map_err(|e| ConfigError::Parse(format!("Failed to parse {}: {}", path.display(), e)))?;

    for (guild, prefix) in raw {
        let guild = guild.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(format!("'{}' is not a guild id", guild))
        })?;
        prefixes.insert(guild.into(), prefix);
    }

    Ok(prefixes)
}
