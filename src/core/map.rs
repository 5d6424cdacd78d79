use crate::domain::model::{Legend, OverlayLayer, TileLayer, Viewport};
use crate::domain::ports::MapSurface;
use serde::Serialize;

/// Owned description of one rendered map: viewport, base tiles, overlays and controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    pub container_id: String,
    pub viewport: Viewport,
    pub tile_layers: Vec<TileLayer>,
    pub overlays: Vec<OverlayLayer>,
    pub controls: Vec<Legend>,
}

impl MapDocument {
    pub fn new(container_id: impl Into<String>, viewport: Viewport) -> Self {
        Self {
            container_id: container_id.into(),
            viewport,
            tile_layers: Vec::new(),
            overlays: Vec::new(),
            controls: Vec::new(),
        }
    }

    /// Viewport plus base tile layer, nothing else.
    pub fn initialize(container_id: impl Into<String>, viewport: Viewport, tiles: TileLayer) -> Self {
        let mut map = Self::new(container_id, viewport);
        map.add_tile_layer(tiles);
        map
    }

    pub fn marker_count(&self) -> usize {
        self.overlays.iter().map(OverlayLayer::len).sum()
    }

    pub fn has_base_layer(&self) -> bool {
        !self.tile_layers.is_empty()
    }
}

impl MapSurface for MapDocument {
    fn add_tile_layer(&mut self, layer: TileLayer) {
        tracing::debug!("Adding tile layer {}", layer.url_template);
        self.tile_layers.push(layer);
    }

    fn add_overlay(&mut self, layer: OverlayLayer) {
        tracing::debug!("Adding overlay '{}' with {} markers", layer.name, layer.len());
        self.overlays.push(layer);
    }

    fn add_control(&mut self, legend: Legend) {
        tracing::debug!("Adding control at {}", legend.position.as_leaflet());
        self.controls.push(legend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LatLng;

    fn tiles() -> TileLayer {
        TileLayer {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "OSM".to_string(),
        }
    }

    #[test]
    fn test_initialize_attaches_base_layer_only() {
        let viewport = Viewport {
            center: LatLng::new(35.52, -102.67),
            zoom: 4,
        };
        let map = MapDocument::initialize("map", viewport, tiles());

        assert_eq!(map.container_id, "map");
        assert_eq!(map.viewport.zoom, 4);
        assert!(map.has_base_layer());
        assert!(map.overlays.is_empty());
        assert!(map.controls.is_empty());
        assert_eq!(map.marker_count(), 0);
    }
}
