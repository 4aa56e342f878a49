use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;

use crate::parser::DEFAULT_ROOM_MARKER;

/// Runtime configuration, read once from the environment. A `.env` file in
/// the working directory is honored when present.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord webhook to post the day's events to.
    pub webhook_url: String,
    /// Celcat listWeek URL for the group to watch; its `dt` parameter is
    /// overwritten per run.
    pub list_url: String,
    /// Timezone the target day is resolved in.
    pub timezone: Tz,
    /// Building prefix the site lists rooms under.
    pub room_marker: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let webhook_url = std::env::var("DISCORD_WEBHOOK_URL")
            .context("DISCORD_WEBHOOK_URL environment variable must be set")?;
        let list_url = std::env::var("CELCAT_LIST_URL")
            .context("CELCAT_LIST_URL environment variable must be set")?;

        let tz_name = std::env::var("TZ_NAME").unwrap_or_else(|_| "Europe/Paris".to_string());
        let timezone: Tz = tz_name
            .parse()
            .map_err(|e| anyhow!("invalid TZ_NAME {tz_name:?}: {e}"))?;

        let room_marker = std::env::var("CELCAT_ROOM_MARKER")
            .unwrap_or_else(|_| DEFAULT_ROOM_MARKER.to_string());

        Ok(Config {
            webhook_url,
            list_url,
            timezone,
            room_marker,
        })
    }
}
