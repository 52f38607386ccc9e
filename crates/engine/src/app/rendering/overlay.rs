use crate::app::{LoopMetricsSnapshot, Rgba};

use super::renderer::fill_rect_clipped;
use super::text::{draw_text_clipped, text_width_px, GLYPH_HEIGHT};
use super::transform::ScreenRectPx;
use super::Viewport;

const TEXT_SCALE: i32 = 2;
const LINE_ADVANCE: i32 = (GLYPH_HEIGHT + 2) * TEXT_SCALE;
const PANEL_INSET: i32 = 4 * TEXT_SCALE;
const PANEL_MARGIN: i32 = 6;
const PANEL_BG_COLOR: Rgba = [10, 12, 16, 200];
const TEXT_COLOR: Rgba = [244, 248, 252, 255];

#[derive(Debug, Clone)]
pub(crate) struct OverlayData {
    pub(crate) metrics: LoopMetricsSnapshot,
    pub(crate) render_fps_cap: Option<u32>,
    pub(crate) entity_count: usize,
}

/// Perf panel anchored to the bottom-left corner of the canvas.
pub(crate) fn draw_overlay(frame: &mut [u8], width: u32, height: u32, data: &OverlayData) {
    if width == 0 || height == 0 {
        return;
    }
    let lines = build_overlay_lines(data);
    let longest = lines
        .iter()
        .map(|line| text_width_px(line, TEXT_SCALE))
        .max()
        .unwrap_or(0);
    let panel_height = lines.len() as i32 * LINE_ADVANCE + PANEL_INSET * 2;
    let panel = ScreenRectPx {
        left: PANEL_MARGIN,
        top: height as i32 - PANEL_MARGIN - panel_height,
        width: longest + PANEL_INSET * 2,
        height: panel_height,
    };
    fill_rect_clipped(frame, Viewport { width, height }, panel, PANEL_BG_COLOR);

    let mut y = panel.top + PANEL_INSET;
    for line in &lines {
        draw_text_clipped(
            frame,
            width,
            height,
            panel.left + PANEL_INSET,
            y,
            line,
            TEXT_COLOR,
            TEXT_SCALE,
        );
        y += LINE_ADVANCE;
    }
}

fn build_overlay_lines(data: &OverlayData) -> Vec<String> {
    let cap = data
        .render_fps_cap
        .map(|value| value.to_string())
        .unwrap_or_else(|| "OFF".to_string());
    vec![
        format!("FPS {:.0}  TPS {:.0}", data.metrics.fps, data.metrics.tps),
        format!("FRAME {:.1} MS", data.metrics.frame_time_ms),
        format!("CAP {cap}  DROP {} MS", data.metrics.dropped_backlog_ms),
        format!("ENTITIES {}", data.entity_count),
    ]
}
