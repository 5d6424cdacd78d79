use crate::core::map::MapDocument;
use crate::domain::model::{CircleMarker, LatLng};
use crate::utils::error::Result;
use serde::Serialize;

const LEAFLET_VERSION: &str = "1.9.4";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageModel<'a> {
    container_id: &'a str,
    center: [f64; 2],
    zoom: u8,
    tile_layers: Vec<PageTileLayer<'a>>,
    overlays: Vec<Vec<&'a CircleMarker>>,
    controls: Vec<PageControl>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageTileLayer<'a> {
    url_template: &'a str,
    attribution: &'a str,
}

#[derive(Serialize)]
struct PageControl {
    position: &'static str,
    html: String,
}

impl<'a> PageModel<'a> {
    fn from_document(map: &'a MapDocument) -> Self {
        let LatLng { lat, lon } = map.viewport.center;
        Self {
            container_id: &map.container_id,
            center: [lat, lon],
            zoom: map.viewport.zoom,
            tile_layers: map
                .tile_layers
                .iter()
                .map(|tiles| PageTileLayer {
                    url_template: tiles.url_template.as_str(),
                    attribution: tiles.attribution.as_str(),
                })
                .collect(),
            overlays: map
                .overlays
                .iter()
                .map(|layer| layer.markers.iter().collect())
                .collect(),
            controls: map
                .controls
                .iter()
                .map(|legend| PageControl {
                    position: legend.position.as_leaflet(),
                    html: legend.to_html(),
                })
                .collect(),
        }
    }
}

/// Self-contained page that hands the map document to Leaflet.
pub fn render_html(map: &MapDocument) -> Result<String> {
    let model = serde_json::to_string(&PageModel::from_document(map))?;
    // 避免資料中的 "</script>" 提前結束 script 區塊
    let model = model.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Earthquakes</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css">
  <style>
    html, body {{ height: 100%; margin: 0; }}
    #{container} {{ height: 100%; }}
    .legend {{ background-color: white; padding: 8px; border: 1px solid gray; line-height: 18px; }}
  </style>
</head>
<body>
  <div id="{container}"></div>
  <script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
  <script>
    const model = {model};
    const myMap = L.map(model.containerId, {{ center: model.center, zoom: model.zoom }});
    model.tileLayers.forEach((t) => L.tileLayer(t.urlTemplate, {{ attribution: t.attribution }}).addTo(myMap));
    model.overlays.forEach((markers) => {{
      L.layerGroup(markers.map((m) =>
        L.circleMarker([m.position.lat, m.position.lon], m.style).bindPopup(m.popup)
      )).addTo(myMap);
    }});
    model.controls.forEach((c) => {{
      const control = L.control({{ position: c.position }});
      control.onAdd = () => {{
        const div = L.DomUtil.create("div", "info legend");
        div.innerHTML = c.html;
        return div;
      }};
      control.addTo(myMap);
    }});
  </script>
</body>
</html>
"#,
        version = LEAFLET_VERSION,
        container = escape_html(&map.container_id),
        model = model,
    ))
}

/// Markers as a GeoJSON FeatureCollection, with the computed style kept in `properties`.
pub fn render_geojson(map: &MapDocument) -> Result<String> {
    let features: Vec<serde_json::Value> = map
        .overlays
        .iter()
        .flat_map(|layer| layer.markers.iter())
        .map(|marker| {
            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.position.lon, marker.position.lat, marker.depth_km],
                },
                "properties": {
                    "magnitude": marker.magnitude,
                    "depth_km": marker.depth_km,
                    "radius": marker.style.radius,
                    "fillColor": marker.style.fill_color,
                    "popup": marker.popup,
                },
            })
        })
        .collect();

    let collection = serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    });

    Ok(serde_json::to_string_pretty(&collection)?)
}
