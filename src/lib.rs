pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    engine::{RenderEngine, RenderReport, RenderState},
    feed::HttpFeedSource,
    map::MapDocument,
};
pub use domain::style::{depth_color, marker_size};
pub use utils::error::{MapError, Result};
