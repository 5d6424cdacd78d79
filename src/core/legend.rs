use crate::core::render::escape_html;
use crate::domain::model::{ControlPosition, Legend, LegendEntry};
use crate::domain::ports::MapSurface;
use crate::domain::style::DEPTH_PALETTE;

/// Lower edge of each legend label, in km. These do not line up with the
/// 20 km color bins (0, 20, 40...); the published legend has always read this way.
pub const LEGEND_DEPTHS: [i32; 6] = [-10, 10, 30, 50, 70, 90];

pub fn build_legend(position: ControlPosition) -> Legend {
    let entries = LEGEND_DEPTHS
        .iter()
        .enumerate()
        .map(|(i, depth)| {
            let label = match LEGEND_DEPTHS.get(i + 1) {
                Some(next) => format!("{}\u{2013}{}", depth, next),
                None => format!("{}+", depth),
            };
            LegendEntry {
                label,
                color: DEPTH_PALETTE[i],
            }
        })
        .collect();

    Legend { position, entries }
}

pub fn attach_legend<M: MapSurface>(map: &mut M, position: ControlPosition) {
    map.add_control(build_legend(position));
}

impl Legend {
    /// Inner HTML of the legend panel: one swatch and label per depth bin.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style=\"background:{}; width: 18px; height: 18px; float: left; margin-right: 8px;\"></i> {}<br>",
                entry.color,
                escape_html(&entry.label)
            ));
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::MapDocument;
    use crate::domain::model::{Color, LatLng, Viewport};

    #[test]
    fn test_legend_has_six_entries() {
        let legend = build_legend(ControlPosition::BottomRight);
        assert_eq!(legend.entries.len(), 6);
        assert_eq!(legend.position, ControlPosition::BottomRight);
    }

    #[test]
    fn test_legend_labels() {
        let legend = build_legend(ControlPosition::BottomRight);
        let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();

        assert_eq!(
            labels,
            vec!["-10–10", "10–30", "30–50", "50–70", "70–90", "90+"]
        );
    }

    #[test]
    fn test_legend_colors_follow_palette() {
        let legend = build_legend(ControlPosition::TopLeft);
        assert_eq!(legend.entries[0].color, Color("#fcfcfc"));
        assert_eq!(legend.entries[5].color, Color("#700303"));
        for (entry, color) in legend.entries.iter().zip(DEPTH_PALETTE.iter()) {
            assert_eq!(entry.color, *color);
        }
    }

    #[test]
    fn test_legend_html() {
        let html = build_legend(ControlPosition::BottomRight).to_html();
        assert_eq!(html.matches("<br>").count(), 6);
        assert!(html.contains("background:#eff549"));
        assert!(html.contains("</i> 90+<br>"));
    }

    #[test]
    fn test_attach_legend_adds_single_control() {
        let mut map = MapDocument::new(
            "map",
            Viewport {
                center: LatLng::new(0.0, 0.0),
                zoom: 2,
            },
        );
        attach_legend(&mut map, ControlPosition::BottomLeft);

        assert_eq!(map.controls.len(), 1);
        assert_eq!(map.controls[0].position, ControlPosition::BottomLeft);
    }
}
