use serde::{Deserialize, Serialize};
use std::fmt;

/// Root of the upstream GeoJSON feed. Only the fields the map consumes are modeled;
/// everything else in the USGS payload (metadata, bbox, extra properties) is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<EarthquakeFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeFeature {
    #[serde(default)]
    pub id: Option<String>,
    pub properties: QuakeProperties,
    pub geometry: PointGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeProperties {
    #[serde(default)]
    pub place: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub mag: Option<f64>,
}

/// `[longitude, latitude, depth_km]`. Short or null-holed arrays still parse;
/// the feature builder reports the missing member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}

impl PointGeometry {
    pub fn new(longitude: f64, latitude: f64, depth_km: f64) -> Self {
        Self {
            coordinates: vec![Some(longitude), Some(latitude), Some(depth_km)],
        }
    }

    fn member(&self, index: usize) -> Option<f64> {
        self.coordinates.get(index).copied().flatten()
    }

    pub fn longitude(&self) -> Option<f64> {
        self.member(0)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.member(1)
    }

    pub fn depth_km(&self) -> Option<f64> {
        self.member(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// CSS hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(pub &'static str);

impl Color {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Path options in the shape Leaflet's `circleMarker` expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: Color,
    pub color: Color,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    pub position: LatLng,
    pub depth_km: f64,
    pub magnitude: f64,
    pub style: MarkerStyle,
    /// HTML fragment bound as the marker popup.
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayer {
    pub name: String,
    pub markers: Vec<CircleMarker>,
}

impl OverlayLayer {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl ControlPosition {
    pub fn as_leaflet(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}

impl std::str::FromStr for ControlPosition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "topleft" => Ok(ControlPosition::TopLeft),
            "topright" => Ok(ControlPosition::TopRight),
            "bottomleft" => Ok(ControlPosition::BottomLeft),
            "bottomright" => Ok(ControlPosition::BottomRight),
            other => Err(format!("unknown control position: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: ControlPosition,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

/// What to do with a feature that cannot be styled (e.g. `mag: null`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the whole build pass.
    #[default]
    Abort,
    /// Drop the feature and keep going.
    Skip,
}

impl std::str::FromStr for MalformedPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(MalformedPolicy::Abort),
            "skip" => Ok(MalformedPolicy::Skip),
            other => Err(format!("unknown malformed-feature policy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_usgs_feature() {
        let raw = serde_json::json!({
            "type": "Feature",
            "id": "ak0251",
            "properties": {"mag": 1.7, "place": "10 km S of Willow, Alaska", "time": 1700000000000i64, "tsunami": 0},
            "geometry": {"type": "Point", "coordinates": [-150.05, 61.66, 35.2]}
        });

        let feature: EarthquakeFeature = serde_json::from_value(raw).unwrap();

        assert_eq!(feature.id.as_deref(), Some("ak0251"));
        assert_eq!(feature.properties.mag, Some(1.7));
        assert_eq!(feature.properties.time, Some(1700000000000));
        assert_eq!(feature.geometry.latitude(), Some(61.66));
        assert_eq!(feature.geometry.longitude(), Some(-150.05));
        assert_eq!(feature.geometry.depth_km(), Some(35.2));
    }

    #[test]
    fn test_null_magnitude_is_representable() {
        let raw = serde_json::json!({
            "properties": {"mag": null, "place": null, "time": 0},
            "geometry": {"coordinates": [0.0, 0.0, 5.0]}
        });

        let feature: EarthquakeFeature = serde_json::from_value(raw).unwrap();
        assert!(feature.properties.mag.is_none());
        assert!(feature.properties.place.is_none());
    }

    #[test]
    fn test_incomplete_geometry_and_time_still_parse() {
        let raw = serde_json::json!({
            "properties": {"mag": 1.0, "place": "x", "time": null},
            "geometry": {"coordinates": [12.5, -3.0]}
        });

        let feature: EarthquakeFeature = serde_json::from_value(raw).unwrap();
        assert!(feature.properties.time.is_none());
        assert_eq!(feature.geometry.latitude(), Some(-3.0));
        assert!(feature.geometry.depth_km().is_none());
    }

    #[test]
    fn test_null_depth_is_missing() {
        let raw = serde_json::json!({
            "properties": {"mag": 1.0, "time": 0},
            "geometry": {"coordinates": [12.5, -3.0, null]}
        });

        let feature: EarthquakeFeature = serde_json::from_value(raw).unwrap();
        assert!(feature.geometry.depth_km().is_none());
    }

    #[test]
    fn test_non_numeric_coordinates_rejected() {
        let raw = serde_json::json!({
            "properties": {"mag": 1.0, "place": "x", "time": 0},
            "geometry": {"coordinates": ["east", 0.0, 1.0]}
        });

        assert!(serde_json::from_value::<EarthquakeFeature>(raw).is_err());
    }

    #[test]
    fn test_marker_style_uses_leaflet_option_names() {
        let style = MarkerStyle {
            radius: 10.0,
            fill_color: Color("#fcfcfc"),
            color: Color("#000"),
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.8,
        };

        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["fillColor"], "#fcfcfc");
        assert_eq!(json["fillOpacity"], 0.8);
    }

    #[test]
    fn test_control_position_parsing() {
        assert_eq!("bottomright".parse::<ControlPosition>().unwrap(), ControlPosition::BottomRight);
        assert_eq!("TopLeft".parse::<ControlPosition>().unwrap(), ControlPosition::TopLeft);
        assert!("middle".parse::<ControlPosition>().is_err());
    }
}
