pub mod cli;
pub mod toml_config;

use crate::core::feed::USGS_ALL_MONTH;
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{ControlPosition, LatLng, MalformedPolicy, TileLayer, Viewport};
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_range,
    validate_tile_template, validate_url,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_URL: &str = USGS_ALL_MONTH;
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_CENTER: (f64, f64) = (35.52, -102.67);
pub const DEFAULT_ZOOM: u8 = 4;
pub const DEFAULT_CONTAINER_ID: &str = "map";
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const OUTPUT_FORMATS: [&str; 2] = ["html", "geojson"];
pub const MAX_ZOOM: u8 = 19;

pub fn default_output_formats() -> Vec<String> {
    vec!["html".to_string()]
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "quake-map")]
#[command(about = "Render a USGS earthquake feed onto a Leaflet map")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value_t = DEFAULT_CENTER.0, allow_negative_numbers = true)]
    pub center_lat: f64,

    #[arg(long, default_value_t = DEFAULT_CENTER.1, allow_negative_numbers = true)]
    pub center_lon: f64,

    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    #[arg(long, default_value = DEFAULT_CONTAINER_ID)]
    pub container_id: String,

    #[arg(long, default_value = DEFAULT_TILE_URL)]
    pub tile_url: String,

    #[arg(long, default_value = DEFAULT_ATTRIBUTION)]
    pub tile_attribution: String,

    #[arg(long, default_value = "bottomright")]
    pub legend_position: ControlPosition,

    #[arg(long, value_delimiter = ',', default_value = "html")]
    pub formats: Vec<String>,

    #[arg(long, default_value = "abort", help = "What to do with incomplete records: abort or skip")]
    pub on_malformed: MalformedPolicy,

    #[arg(short, long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Validate settings and print a summary without fetching")]
    pub dry_run: bool,

    #[arg(long, help = "Log process CPU and memory per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn feed_url(&self) -> &str {
        &self.feed_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            center: LatLng::new(self.center_lat, self.center_lon),
            zoom: self.zoom,
        }
    }

    fn tile_layer(&self) -> TileLayer {
        TileLayer {
            url_template: self.tile_url.clone(),
            attribution: self.tile_attribution.clone(),
        }
    }

    fn container_id(&self) -> &str {
        &self.container_id
    }

    fn legend_position(&self) -> ControlPosition {
        self.legend_position
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn malformed_policy(&self) -> MalformedPolicy {
        self.on_malformed
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("feed.url", config.feed_url())?;
    validate_path("output.path", config.output_path())?;

    let viewport = config.viewport();
    validate_range("map.center_lat", viewport.center.lat, -90.0, 90.0)?;
    validate_range("map.center_lon", viewport.center.lon, -180.0, 180.0)?;
    validate_range("map.zoom", viewport.zoom, 0, MAX_ZOOM)?;
    validate_non_empty_string("map.container_id", config.container_id())?;

    validate_tile_template("tiles.url_template", &config.tile_layer().url_template)?;
    validate_one_of("output.formats", config.output_formats(), &OUTPUT_FORMATS)?;

    Ok(())
}
