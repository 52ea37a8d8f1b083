use crate::temporal::parse_instant;
use anyhow::anyhow;
use chrono::{Local, NaiveDateTime};

pub const LOG_ENV: &str = "TERMSHIFTD_LOG";
pub const NOW_ENV: &str = "TERMSHIFTD_NOW";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Startup settings. The host app launches the sidecar with an environment;
/// there is no config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarConfig {
    pub log_level: String,
    /// Pinned "now" for replays and tests. Wall clock when `None`.
    pub fixed_now: Option<NaiveDateTime>,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            fixed_now: None,
        }
    }
}

impl SidecarConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(level) = lookup(LOG_ENV) {
            let level = level.trim();
            if !level.is_empty() {
                cfg.log_level = level.to_string();
            }
        }

        if let Some(raw) = lookup(NOW_ENV) {
            if !raw.trim().is_empty() {
                let now = parse_instant(&raw).ok_or_else(|| {
                    anyhow!("{} must be YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got `{}`", NOW_ENV, raw)
                })?;
                cfg.fixed_now = Some(now);
            }
        }

        Ok(cfg)
    }

    pub fn now(&self) -> NaiveDateTime {
        self.fixed_now
            .unwrap_or_else(|| Local::now().naive_local())
    }
}
