pub mod engine;
pub mod features;
pub mod feed;
pub mod legend;
pub mod map;
pub mod render;

pub use crate::domain::model::{FeatureCollection, OverlayLayer};
pub use crate::domain::ports::{ConfigProvider, FeedSource, MapSurface, Storage};
pub use crate::utils::error::Result;
