//! Preview gate: decides whether the heavy chart viewer may be mounted.
//!
//! Nothing is cached. The gate is cheap and is evaluated again whenever a
//! dataset finishes loading or the spec changes.

use serde::Serialize;
use vizboard_model::{Visualisation, VisualisationType};

use crate::lookup::DatasetLookup;
use crate::render::is_renderable;

/// Height of the editor header above the preview.
pub const HEADER_HEIGHT: u32 = 70;

/// Largest preview height for charts.
pub const MAX_PREVIEW_HEIGHT: u32 = 500;

/// Chart width when the caller does not provide one.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 800;

/// Whether the viewer should be mounted for this visualisation.
pub fn should_mount_viewer(visualisation: &Visualisation, datasets: &impl DatasetLookup) -> bool {
    is_renderable(visualisation, datasets)
}

/// Viewer size. `None` lets the viewer size itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewerFrame {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Size of the preview viewer.
///
/// Maps fill their container. Charts use the requested size, or a height
/// capped at [`MAX_PREVIEW_HEIGHT`] that fits below the header and a width
/// of [`DEFAULT_PREVIEW_WIDTH`].
#[must_use]
pub fn viewer_frame(
    visualisation_type: &VisualisationType,
    width: Option<u32>,
    height: Option<u32>,
    window_height: u32,
) -> ViewerFrame {
    if visualisation_type.is_map() {
        return ViewerFrame {
            width: None,
            height: None,
        };
    }
    // An explicit height is kept for charts. Only maps leave sizing to the
    // viewer; a given height does not switch a chart to self-sizing.
    let fitted = window_height
        .saturating_sub(HEADER_HEIGHT)
        .min(MAX_PREVIEW_HEIGHT);
    ViewerFrame {
        width: Some(width.unwrap_or(DEFAULT_PREVIEW_WIDTH)),
        height: Some(height.unwrap_or(fitted)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_frame_is_unsized() {
        let frame = viewer_frame(&VisualisationType::Map, Some(300), Some(200), 900);
        assert_eq!(frame.width, None);
        assert_eq!(frame.height, None);
    }

    #[test]
    fn test_chart_frame_defaults() {
        let frame = viewer_frame(&VisualisationType::Bar, None, None, 1000);
        assert_eq!(frame.width, Some(800));
        assert_eq!(frame.height, Some(500));

        let frame = viewer_frame(&VisualisationType::Bar, None, None, 400);
        assert_eq!(frame.height, Some(330));

        let frame = viewer_frame(&VisualisationType::Line, Some(640), Some(240), 1000);
        assert_eq!(frame.width, Some(640));
        assert_eq!(frame.height, Some(240));
    }

    #[test]
    fn test_explicit_chart_height_is_not_cleared() {
        let chart = viewer_frame(&VisualisationType::Pie, None, Some(120), 900);
        assert_eq!(chart.height, Some(120));
        let map = viewer_frame(&VisualisationType::Map, None, Some(120), 900);
        assert_eq!(map.height, None);
    }
}
