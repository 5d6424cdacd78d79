use crate::config::{
    default_output_formats, validate_settings, DEFAULT_ATTRIBUTION, DEFAULT_CENTER,
    DEFAULT_CONTAINER_ID, DEFAULT_FEED_URL, DEFAULT_TILE_URL, DEFAULT_ZOOM,
};
use crate::core::ConfigProvider;
use crate::domain::model::{ControlPosition, LatLng, MalformedPolicy, TileLayer, Viewport};
use crate::utils::error::{MapError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub feed: Option<FeedConfig>,
    pub map: Option<MapConfig>,
    pub tiles: Option<TilesConfig>,
    pub legend: Option<LegendConfig>,
    pub output: OutputConfig,
    pub error_handling: Option<ErrorHandlingConfig>,
    pub monitoring: Option<MonitoringConfig>,
    #[serde(skip)]
    resolved: Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub container_id: Option<String>,
    /// `[lat, lon]`
    pub center: Option<[f64; 2]>,
    pub zoom: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilesConfig {
    pub url_template: String,
    pub attribution: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub position: Option<ControlPosition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_malformed: Option<MalformedPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

/// Values with defaults filled in, so `ConfigProvider` can hand out borrows.
#[derive(Debug, Clone, Default)]
struct Resolved {
    feed_url: String,
    container_id: String,
    formats: Vec<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| MapError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.resolve();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${FEED_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MapError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn resolve(&mut self) {
        self.resolved = Resolved {
            feed_url: self
                .feed
                .as_ref()
                .map(|f| f.url.clone())
                .unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            container_id: self
                .map
                .as_ref()
                .and_then(|m| m.container_id.clone())
                .unwrap_or_else(|| DEFAULT_CONTAINER_ID.to_string()),
            formats: self
                .output
                .formats
                .clone()
                .unwrap_or_else(default_output_formats),
        };
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn feed_url(&self) -> &str {
        &self.resolved.feed_url
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn viewport(&self) -> Viewport {
        let map = self.map.as_ref();
        let [lat, lon] = map
            .and_then(|m| m.center)
            .unwrap_or([DEFAULT_CENTER.0, DEFAULT_CENTER.1]);
        Viewport {
            center: LatLng::new(lat, lon),
            zoom: map.and_then(|m| m.zoom).unwrap_or(DEFAULT_ZOOM),
        }
    }

    fn tile_layer(&self) -> TileLayer {
        match &self.tiles {
            Some(tiles) => TileLayer {
                url_template: tiles.url_template.clone(),
                attribution: tiles.attribution.clone().unwrap_or_default(),
            },
            None => TileLayer {
                url_template: DEFAULT_TILE_URL.to_string(),
                attribution: DEFAULT_ATTRIBUTION.to_string(),
            },
        }
    }

    fn container_id(&self) -> &str {
        &self.resolved.container_id
    }

    fn legend_position(&self) -> ControlPosition {
        self.legend
            .as_ref()
            .and_then(|l| l.position)
            .unwrap_or_default()
    }

    fn output_formats(&self) -> &[String] {
        &self.resolved.formats
    }

    fn malformed_policy(&self) -> MalformedPolicy {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_malformed)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_toml_uses_defaults() {
        let toml_content = r#"
[output]
path = "./maps"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.feed_url(), DEFAULT_FEED_URL);
        assert_eq!(config.output_path(), "./maps");
        assert_eq!(config.container_id(), "map");
        assert_eq!(config.viewport().zoom, 4);
        assert_eq!(config.output_formats(), &["html".to_string()]);
        assert_eq!(config.legend_position(), ControlPosition::BottomRight);
        assert_eq!(config.malformed_policy(), MalformedPolicy::Abort);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_content = r#"
[feed]
url = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/4.5_week.geojson"

[map]
container_id = "quakes"
center = [-41.3, 174.8]
zoom = 5

[tiles]
url_template = "https://tile.example.org/{z}/{x}/{y}.png"
attribution = "Example tiles"

[legend]
position = "topright"

[output]
path = "./public"
formats = ["html", "geojson"]

[error_handling]
on_malformed = "skip"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.feed_url().ends_with("4.5_week.geojson"));
        assert_eq!(config.container_id(), "quakes");
        assert_eq!(config.viewport().center, LatLng::new(-41.3, 174.8));
        assert_eq!(config.viewport().zoom, 5);
        assert_eq!(config.tile_layer().attribution, "Example tiles");
        assert_eq!(config.legend_position(), ControlPosition::TopRight);
        assert_eq!(config.output_formats().len(), 2);
        assert_eq!(config.malformed_policy(), MalformedPolicy::Skip);
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUAKE_MAP_TEST_FEED", "https://feed.example.com/quakes.geojson");

        let toml_content = r#"
[feed]
url = "${QUAKE_MAP_TEST_FEED}"

[output]
path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.feed_url(), "https://feed.example.com/quakes.geojson");

        std::env::remove_var("QUAKE_MAP_TEST_FEED");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[feed]
url = "invalid-url"

[output]
path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let toml_content = r#"
[output]
path = "./output"

[error_handling]
on_malformed = "retry"
"#;

        let err = TomlConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, MapError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[map]
zoom = 7

[output]
path = "./output"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.viewport().zoom, 7);
    }

    #[test]
    fn test_missing_config_file_reports_system_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TomlConfig::from_file(dir.path().join("absent.toml")).unwrap_err();

        // CLI 以 exit_code 結束，而非固定的 1
        assert!(matches!(err, MapError::IoError(_)));
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().starts_with("System error"));
    }
}
