use crate::app::{DrawSpace, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScreenRectPx {
    pub(crate) left: i32,
    pub(crate) top: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl ScreenRectPx {
    pub(crate) fn right(&self) -> i32 {
        self.left + self.width
    }

    pub(crate) fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// Horizontal camera shift only; the world scrolls sideways and never vertically.
pub fn world_to_screen_x(world_x: f32, camera_offset_x: f32) -> i32 {
    (world_x + camera_offset_x).round() as i32
}

pub(crate) fn rect_to_screen_px(
    rect: Rect,
    space: DrawSpace,
    camera_offset_x: f32,
) -> ScreenRectPx {
    let left = match space {
        DrawSpace::World => world_to_screen_x(rect.x, camera_offset_x),
        DrawSpace::Screen => rect.x.round() as i32,
    };
    ScreenRectPx {
        left,
        top: rect.y.round() as i32,
        width: rect.width.round().max(0.0) as i32,
        height: rect.height.round().max(0.0) as i32,
    }
}

pub(crate) fn intersects_viewport(rect: ScreenRectPx, viewport: Viewport) -> bool {
    rect.width > 0
        && rect.height > 0
        && rect.right() > 0
        && rect.bottom() > 0
        && rect.left < viewport.width as i32
        && rect.top < viewport.height as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 720,
        height: 480,
    };

    #[test]
    fn world_rects_follow_camera_offset() {
        let rect = Rect::new(500.0, 330.0, 200.0, 150.0);
        let screen = rect_to_screen_px(rect, DrawSpace::World, -400.0);

        assert_eq!(screen.left, 100);
        assert_eq!(screen.top, 330);
        assert_eq!(screen.width, 200);
        assert_eq!(screen.height, 150);
    }

    #[test]
    fn screen_rects_ignore_camera_offset() {
        let rect = Rect::new(10.0, 5.0, 200.0, 40.0);
        let screen = rect_to_screen_px(rect, DrawSpace::Screen, -1200.0);

        assert_eq!(screen.left, 10);
        assert_eq!(screen.top, 5);
    }

    #[test]
    fn culling_rejects_rects_outside_viewport() {
        let left_of_view =
            rect_to_screen_px(Rect::new(-300.0, 0.0, 200.0, 100.0), DrawSpace::World, 0.0);
        let right_of_view =
            rect_to_screen_px(Rect::new(720.0, 0.0, 10.0, 10.0), DrawSpace::Screen, 0.0);
        let straddling =
            rect_to_screen_px(Rect::new(-100.0, 0.0, 200.0, 100.0), DrawSpace::World, 0.0);

        assert!(!intersects_viewport(left_of_view, VIEWPORT));
        assert!(!intersects_viewport(right_of_view, VIEWPORT));
        assert!(intersects_viewport(straddling, VIEWPORT));
    }

    #[test]
    fn degenerate_rects_are_never_visible() {
        let empty =
            rect_to_screen_px(Rect::new(10.0, 10.0, 0.0, 50.0), DrawSpace::Screen, 0.0);
        assert!(!intersects_viewport(empty, VIEWPORT));
    }
}
