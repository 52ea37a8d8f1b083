use crate::config::SidecarConfig;
use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: SidecarConfig,
}

impl AppState {
    pub fn new(config: SidecarConfig) -> Self {
        Self { config }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.config.now()
    }
}
