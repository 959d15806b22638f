//! Layered settings: built-in defaults, an optional TOML file, then
//! `FUELPRICES__<SECTION>__<KEY>` environment variables.

use crate::api::DEFAULT_BASE_URL;
use crate::registry::FuelType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Longest window fetched in one request.
    pub max_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// TrueType font used for labels; common system fonts are tried when unset.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DisplaySettings {
    /// Fuel types deselected after the first load.
    #[serde(default)]
    pub hidden: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub api: ApiSettings,
    pub chart: ChartSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_secs", 30_i64)?
            .set_default("api.max_days", 365_i64)?
            .set_default("chart.width", 1000_i64)?
            .set_default("chart.height", 600_i64)?
            .set_default("chart.title", "Τιμές καυσίμων")?;
        if let Some(p) = path {
            builder = builder.add_source(config::File::from(p).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("FUELPRICES")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("display.hidden")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .context("load settings")?
            .try_deserialize()
            .context("invalid settings")?;
        log::debug!("settings: {settings:?}");
        Ok(settings)
    }

    /// Parse `display.hidden` against the registry.
    pub fn hidden_fuel_types(&self) -> Result<Vec<FuelType>> {
        self.display
            .hidden
            .iter()
            .map(|s| s.parse::<FuelType>().map_err(anyhow::Error::from))
            .collect()
    }
}
