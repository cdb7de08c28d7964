use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate, Weekday};
use serenity::all::{ChannelId, GuildId};
use shuttle_runtime::SecretStore;

use crate::error::ConfigError;

pub const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_EPOCH: &str = "2024-09-16";
const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;
const DEFAULT_KEYWORD: &str = "스터디";

/// Which triggers are allowed to post the weekly announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceTrigger {
    /// In-process cron job only.
    Scheduler,
    /// `GET /execute` only, for an external cron service.
    Http,
    Both,
}

impl AnnounceTrigger {
    pub fn runs_scheduler(self) -> bool {
        matches!(self, Self::Scheduler | Self::Both)
    }

    pub fn serves_execute(self) -> bool {
        matches!(self, Self::Http | Self::Both)
    }
}

impl FromStr for AnnounceTrigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduler" => Ok(Self::Scheduler),
            "http" => Ok(Self::Http),
            "both" => Ok(Self::Both),
            _ => Err("expected one of scheduler, http, both".to_string()),
        }
    }
}

/// Validated bot configuration, built once at startup and shared read-only.
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,

    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,

    pub guild_id: GuildId,
    pub channel_id: ChannelId,

    pub base_url: String,
    pub port: Option<u16>,

    pub epoch: NaiveDate,
    pub utc_offset: FixedOffset,
    pub announce_trigger: AnnounceTrigger,
    pub execute_weekday: Weekday,
    pub quotes_enabled: bool,
    pub keyword: String,
}

impl Config {
    pub fn from_secrets(secrets: &SecretStore) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| secrets.get(key))
    }

    /// Builds the config from any key lookup, failing on the first missing or
    /// malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required =
            |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let discord_token = required("DISCORD_TOKEN")?;
        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;
        let guild_id = GuildId::new(parse_snowflake("GUILD_ID", &required("GUILD_ID")?)?);
        let channel_id = ChannelId::new(parse_snowflake("CHANNEL_ID", &required("CHANNEL_ID")?)?);

        let port = match get("PORT") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .map_err(|e| ConfigError::invalid("PORT", &raw, e))?,
            ),
            None => None,
        };

        let base_url = get("BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{}", port.unwrap_or(DEFAULT_PORT)));

        let epoch_raw = get("STUDY_EPOCH").unwrap_or_else(|| DEFAULT_EPOCH.to_string());
        let epoch = NaiveDate::parse_from_str(epoch_raw.trim(), "%Y-%m-%d")
            .map_err(|e| ConfigError::invalid("STUDY_EPOCH", &epoch_raw, e))?;

        let utc_offset = match get("UTC_OFFSET_HOURS") {
            Some(raw) => {
                let hours = raw
                    .trim()
                    .parse::<i32>()
                    .map_err(|e| ConfigError::invalid("UTC_OFFSET_HOURS", &raw, e))?;
                offset_from_hours(hours)
                    .ok_or_else(|| ConfigError::invalid("UTC_OFFSET_HOURS", &raw, "out of range"))?
            }
            None => offset_from_hours(DEFAULT_UTC_OFFSET_HOURS)
                .ok_or_else(|| ConfigError::invalid("UTC_OFFSET_HOURS", "9", "out of range"))?,
        };

        let announce_trigger = match get("ANNOUNCE_TRIGGER") {
            Some(raw) => raw
                .parse::<AnnounceTrigger>()
                .map_err(|e| ConfigError::invalid("ANNOUNCE_TRIGGER", &raw, e))?,
            None => AnnounceTrigger::Scheduler,
        };

        let execute_weekday = match get("EXECUTE_WEEKDAY") {
            Some(raw) => raw
                .trim()
                .parse::<Weekday>()
                .map_err(|_| ConfigError::invalid("EXECUTE_WEEKDAY", &raw, "not a weekday"))?,
            None => Weekday::Sat,
        };

        let quotes_enabled = match get("WEEKLY_QUOTES") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid("WEEKLY_QUOTES", &raw, "expected a boolean"))?,
            None => true,
        };

        let keyword = get("TRIGGER_KEYWORD")
            .map(|k| k.trim().to_string())
            .unwrap_or_else(|| DEFAULT_KEYWORD.to_string());

        Ok(Self {
            discord_token,
            client_id,
            client_secret,
            token_url: DISCORD_TOKEN_URL.to_string(),
            guild_id,
            channel_id,
            base_url,
            port,
            epoch,
            utc_offset,
            announce_trigger,
            execute_weekday,
            quotes_enabled,
            keyword,
        })
    }

    pub fn redirect_url(&self) -> String {
        format!("{}/callback", self.base_url)
    }
}

fn parse_snowflake(key: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid(key, raw, "snowflake must be non-zero")),
        Ok(id) => Ok(id),
        Err(e) => Err(ConfigError::invalid(key, raw, e)),
    }
}

fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
