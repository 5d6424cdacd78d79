use crate::domain::model::{
    ControlPosition, FeatureCollection, Legend, MalformedPolicy, OverlayLayer, TileLayer, Viewport,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn feed_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn viewport(&self) -> Viewport;
    fn tile_layer(&self) -> TileLayer;
    fn container_id(&self) -> &str;
    fn legend_position(&self) -> ControlPosition;
    fn output_formats(&self) -> &[String];
    fn malformed_policy(&self) -> MalformedPolicy;
}

/// Where earthquake data comes from. One call, one collection; no retry.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<FeatureCollection>;
}

/// The slice of a web-map library the renderer drives.
pub trait MapSurface {
    fn add_tile_layer(&mut self, layer: TileLayer);
    fn add_overlay(&mut self, layer: OverlayLayer);
    fn add_control(&mut self, legend: Legend);
}
