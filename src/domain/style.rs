//! Pure styling rules: magnitude drives marker radius, depth drives fill color.

use crate::domain::model::{Color, MarkerStyle};

/// Shallow to deep, light gray to dark red.
pub const DEPTH_PALETTE: [Color; 6] = [
    Color("#fcfcfc"),
    Color("#7a98f0"),
    Color("#9df5b1"),
    Color("#eff549"),
    Color("#f59c49"),
    Color("#700303"),
];

/// Width in km of each depth bin.
pub const DEPTH_BIN_WIDTH: f64 = 20.0;

pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

pub const MARKER_STROKE: Color = Color("#000");
pub const MARKER_WEIGHT: f64 = 1.0;
pub const MARKER_OPACITY: f64 = 1.0;
pub const MARKER_FILL_OPACITY: f64 = 0.8;

pub fn marker_size(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

/// Radius actually drawn: negative magnitudes collapse to a zero-size marker.
pub fn marker_radius(magnitude: f64) -> f64 {
    marker_size(magnitude).max(0.0)
}

/// Palette slot for a depth: `min(floor(depth / 20), 5)`.
/// Negative and NaN depths share the first slot.
pub fn depth_bin(depth: f64) -> usize {
    let last = DEPTH_PALETTE.len() - 1;
    if !(depth >= 0.0) {
        return 0;
    }
    let bin = (depth / DEPTH_BIN_WIDTH).floor();
    if bin >= last as f64 {
        last
    } else {
        bin as usize
    }
}

pub fn depth_color(depth: f64) -> Color {
    DEPTH_PALETTE[depth_bin(depth)]
}

pub fn marker_style(magnitude: f64, depth: f64) -> MarkerStyle {
    MarkerStyle {
        radius: marker_radius(magnitude),
        fill_color: depth_color(depth),
        color: MARKER_STROKE,
        weight: MARKER_WEIGHT,
        opacity: MARKER_OPACITY,
        fill_opacity: MARKER_FILL_OPACITY,
    }
}
