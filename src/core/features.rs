use crate::core::render::escape_html;
use crate::domain::model::{
    CircleMarker, EarthquakeFeature, FeatureCollection, LatLng, MalformedPolicy, OverlayLayer,
};
use crate::domain::style::marker_style;
use crate::utils::error::{MapError, Result};
use chrono::DateTime;

pub const OVERLAY_NAME: &str = "Earthquakes";

const UNKNOWN_PLACE: &str = "Unknown location";

/// Turn every feature of the feed into a styled circle marker on a single overlay.
///
/// Under [`MalformedPolicy::Abort`] the first bad feature fails the whole pass and
/// no layer is produced; under [`MalformedPolicy::Skip`] it is logged and dropped.
pub fn build_overlay(collection: &FeatureCollection, policy: MalformedPolicy) -> Result<OverlayLayer> {
    let mut markers = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.iter().enumerate() {
        match build_marker(index, feature) {
            Ok(marker) => markers.push(marker),
            Err(e) if policy == MalformedPolicy::Skip => {
                tracing::warn!("⚠️ Skipping feature: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(
        "Built {} markers from {} features",
        markers.len(),
        collection.features.len()
    );

    Ok(OverlayLayer {
        name: OVERLAY_NAME.to_string(),
        markers,
    })
}

pub fn build_marker(index: usize, feature: &EarthquakeFeature) -> Result<CircleMarker> {
    let malformed = |reason: &str| MapError::MalformedFeature {
        index,
        reason: match &feature.id {
            Some(id) => format!("{} (id {})", reason, id),
            None => reason.to_string(),
        },
    };

    let magnitude = feature
        .properties
        .mag
        .ok_or_else(|| malformed("missing magnitude"))?;

    let lon = feature
        .geometry
        .longitude()
        .ok_or_else(|| malformed("missing longitude"))?;
    let lat = feature
        .geometry
        .latitude()
        .ok_or_else(|| malformed("missing latitude"))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(malformed("latitude out of range"));
    }

    let depth_km = feature
        .geometry
        .depth_km()
        .ok_or_else(|| malformed("missing depth"))?;
    let epoch_millis = feature
        .properties
        .time
        .ok_or_else(|| malformed("missing time"))?;
    let time = format_timestamp(epoch_millis).ok_or_else(|| malformed("time out of range"))?;
    let place = feature.properties.place.as_deref().unwrap_or(UNKNOWN_PLACE);

    Ok(CircleMarker {
        position: LatLng::new(lat, lon),
        depth_km,
        magnitude,
        style: marker_style(magnitude, depth_km),
        popup: popup_html(place, &time, magnitude, depth_km),
    })
}

pub fn popup_html(place: &str, time: &str, magnitude: f64, depth_km: f64) -> String {
    format!(
        "<h3>{}</h3><hr><p>Time: {}</p><p>Magnitude: {}</p><p>Depth: {} km</p>",
        escape_html(place),
        time,
        magnitude,
        depth_km
    )
}

/// Epoch milliseconds to a readable UTC string, e.g. `Tue Nov 14 2023 22:13:20 UTC`.
pub fn format_timestamp(epoch_millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|t| t.format("%a %b %d %Y %H:%M:%S UTC").to_string())
}
