use crate::core::features::build_overlay;
use crate::core::legend::attach_legend;
use crate::core::map::MapDocument;
use crate::core::render::{render_geojson, render_html};
use crate::domain::ports::{ConfigProvider, FeedSource, MapSurface, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::RenderMonitor;
use serde::Serialize;

pub const HTML_FILE: &str = "index.html";
pub const GEOJSON_FILE: &str = "earthquakes.geojson";

/// Lifecycle of one fetch-and-render cycle. Both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderState {
    Idle,
    Fetching,
    Rendered,
    FailedLogged,
}

#[derive(Debug, Clone)]
pub struct RenderReport {
    pub state: RenderState,
    pub marker_count: usize,
    pub outputs: Vec<String>,
    pub document: MapDocument,
}

pub struct RenderEngine<F: FeedSource, S: Storage, C: ConfigProvider> {
    feed: F,
    storage: S,
    config: C,
    monitor_enabled: bool,
}

impl<F: FeedSource, S: Storage, C: ConfigProvider> RenderEngine<F, S, C> {
    pub fn new(feed: F, storage: S, config: C) -> Self {
        Self::new_with_monitoring(feed, storage, config, false)
    }

    pub fn new_with_monitoring(feed: F, storage: S, config: C, monitor_enabled: bool) -> Self {
        Self {
            feed,
            storage,
            config,
            monitor_enabled,
        }
    }

    /// Base map and legend. Does not touch the feed.
    pub fn prepare_map(&self) -> MapDocument {
        let mut map = MapDocument::initialize(
            self.config.container_id(),
            self.config.viewport(),
            self.config.tile_layer(),
        );
        attach_legend(&mut map, self.config.legend_position());
        map
    }

    /// Fetch the feed once and attach the earthquake overlay.
    ///
    /// Any failure is logged exactly once and leaves the map without markers.
    pub async fn populate(&self, map: &mut MapDocument) -> RenderState {
        let mut state = RenderState::Idle;
        tracing::debug!("Render state: {:?}", state);

        state = RenderState::Fetching;
        tracing::debug!("Render state: {:?}", state);

        let collection = match self.feed.fetch().await {
            Ok(collection) => collection,
            Err(e) => {
                tracing::error!("❌ Error fetching data: {}", e);
                return RenderState::FailedLogged;
            }
        };
        tracing::info!("Fetched {} earthquakes", collection.features.len());

        match build_overlay(&collection, self.config.malformed_policy()) {
            Ok(layer) => {
                tracing::info!("Built overlay with {} markers", layer.len());
                map.add_overlay(layer);
                state = RenderState::Rendered;
            }
            Err(e) => {
                tracing::error!("❌ Error building earthquake markers: {}", e);
                state = RenderState::FailedLogged;
            }
        }
        state
    }

    pub async fn run(&self) -> Result<RenderReport> {
        let mut monitor = RenderMonitor::new(self.monitor_enabled);

        tracing::info!("🗺️ Preparing map");
        let mut map = self.prepare_map();
        monitor.log_phase("Map prepared");

        tracing::info!("🌐 Fetching {}", self.config.feed_url());
        let state = self.populate(&mut map).await;
        monitor.log_phase("Feed processed");

        tracing::info!("💾 Writing outputs");
        let outputs = self.write_outputs(&map).await?;
        monitor.log_phase("Outputs written");

        Ok(RenderReport {
            state,
            marker_count: map.marker_count(),
            outputs,
            document: map,
        })
    }

    async fn write_outputs(&self, map: &MapDocument) -> Result<Vec<String>> {
        let mut outputs = Vec::new();

        for format in self.config.output_formats() {
            let (file_name, content) = match format.as_str() {
                "html" => (HTML_FILE, render_html(map)?),
                "geojson" => (GEOJSON_FILE, render_geojson(map)?),
                other => {
                    tracing::warn!("Ignoring unknown output format '{}'", other);
                    continue;
                }
            };

            tracing::debug!("Writing {} ({} bytes)", file_name, content.len());
            self.storage.write_file(file_name, content.as_bytes()).await?;
            outputs.push(format!("{}/{}", self.config.output_path(), file_name));
        }

        Ok(outputs)
    }
}
