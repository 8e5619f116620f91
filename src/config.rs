use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LORE_PATH: &str = "lore.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set in the environment or .env file!")]
    MissingVar(&'static str),

    #[error("GUILD_ID must be a numeric server id, got '{0}'")]
    InvalidGuildId(String),
}

#[derive(Debug)]
pub struct Config {
    pub guild_id: u64,
    pub bot_token: String,
    pub lore_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let guild_id = required("GUILD_ID")?;
        let bot_token = required("BOT_TOKEN")?;
        let guild_id = match guild_id.trim().parse() {
            Ok(0) | Err(_) => return Err(ConfigError::InvalidGuildId(guild_id)),
            Ok(id) => id,
        };

        let lore_path = lookup("LORE_PATH")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LORE_PATH.to_string())
            .into();

        Ok(Self {
            guild_id,
            bot_token,
            lore_path,
        })
    }
}
