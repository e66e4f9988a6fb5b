//! Rostercall configuration system.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, RosterError};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub teams: TeamsConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub flags: FlagsConfig,
}

impl RosterConfig {
    /// Load config from the default path (~/.rostercall/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RosterError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| RosterError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rostercall")
            .join("config.toml")
    }
}

/// Scheduling-source provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub secret: String,
    /// Category of events to scan (the provider's service type id).
    #[serde(default)]
    pub service_type_id: String,
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
}

fn default_provider_base_url() -> String {
    "https://api.planningcenteronline.com/services/v2".into()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            secret: String::new(),
            service_type_id: String::new(),
            base_url: default_provider_base_url(),
        }
    }
}

/// Group-chat sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub bot_id: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_chat_base_url")]
    pub base_url: String,
}

fn default_chat_base_url() -> String {
    "https://api.groupme.com/v3".into()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_id: String::new(),
            access_token: String::new(),
            base_url: default_chat_base_url(),
        }
    }
}

/// Teams of interest and their sign-up links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsConfig {
    /// Team names in announcement order. Matched case-insensitively as
    /// substrings against provider team names; unmatched teams render in a
    /// catch-all section.
    #[serde(default = "default_team_names")]
    pub names: Vec<String>,
    /// Lower-cased team name -> sign-up URL, rendered when open slots exist.
    #[serde(default)]
    pub sign_up_urls: HashMap<String, String>,
}

fn default_team_names() -> Vec<String> {
    vec!["Security".into(), "Medical".into()]
}

impl Default for TeamsConfig {
    fn default() -> Self {
        Self {
            names: default_team_names(),
            sign_up_urls: HashMap::new(),
        }
    }
}

impl TeamsConfig {
    /// Sign-up URL for a team, looked up by lower-cased name.
    pub fn sign_up_url(&self, team: &str) -> Option<&str> {
        self.sign_up_urls
            .get(&team.to_lowercase())
            .map(String::as_str)
            .filter(|u| !u.is_empty())
    }
}

/// Scheduling policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Forward-looking window scanned for events on each tick, in days.
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: i64,
    /// Lead time before an event's earliest service time at which the
    /// roster is announced, in hours.
    #[serde(default = "default_post_lead_hours")]
    pub post_lead_hours: i64,
    /// All calendar-day computations happen in this zone.
    #[serde(default = "default_timezone")]
    pub timezone: chrono_tz::Tz,
    /// Cron cadence for periodic mode (MIN HOUR DOM MON DOW).
    #[serde(default = "default_cron")]
    pub cron: String,
}

fn default_lookahead_days() -> i64 {
    7
}
fn default_post_lead_hours() -> i64 {
    24
}
fn default_timezone() -> chrono_tz::Tz {
    chrono_tz::America::New_York
}
fn default_cron() -> String {
    "0 * * * *".into()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            lookahead_days: default_lookahead_days(),
            post_lead_hours: default_post_lead_hours(),
            timezone: default_timezone(),
            cron: default_cron(),
        }
    }
}

/// Runtime flags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlagsConfig {
    /// When set, the rendered message goes to the log instead of the chat.
    #[serde(default)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RosterConfig::default();
        assert_eq!(config.schedule.lookahead_days, 7);
        assert_eq!(config.schedule.post_lead_hours, 24);
        assert_eq!(config.schedule.timezone, chrono_tz::America::New_York);
        assert_eq!(config.teams.names, vec!["Security", "Medical"]);
        assert!(!config.flags.dry_run);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [provider]
            app_id = "app"
            secret = "shh"
            service_type_id = "12345"

            [schedule]
            lookahead_days = 3
            timezone = "Asia/Tokyo"

            [teams]
            names = ["Security", "Medical", "Parking"]

            [teams.sign_up_urls]
            security = "https://example.com/security"

            [flags]
            dry_run = true
        "#;

        let config: RosterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.service_type_id, "12345");
        assert_eq!(config.schedule.lookahead_days, 3);
        assert_eq!(config.schedule.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(config.teams.names.len(), 3);
        assert_eq!(
            config.teams.sign_up_url("Security"),
            Some("https://example.com/security")
        );
        assert!(config.flags.dry_run);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: RosterConfig = toml::from_str("").unwrap();
        assert_eq!(config.schedule.cron, "0 * * * *");
        assert!(config.provider.base_url.contains("planningcenteronline"));
        assert!(config.chat.base_url.contains("groupme"));
    }

    #[test]
    fn test_sign_up_url_empty_is_none() {
        let mut teams = TeamsConfig::default();
        teams.sign_up_urls.insert("medical".into(), String::new());
        assert_eq!(teams.sign_up_url("Medical"), None);
    }
}
