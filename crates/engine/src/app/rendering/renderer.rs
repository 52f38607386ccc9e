use std::path::Path;
use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use tracing::debug;
use winit::window::Window;

use crate::app::{DrawCommand, DrawList, Rgba, SpriteDraw};

use super::overlay::{draw_overlay, OverlayData};
use super::sprites::{LoadedSprite, SpriteCache};
use super::text::draw_text_clipped;
use super::transform::{intersects_viewport, rect_to_screen_px, ScreenRectPx};
use super::Viewport;

/// Software renderer over a fixed logical canvas; `pixels` scales it to the window.
pub struct Renderer {
    pixels: Pixels<'static>,
    canvas: Viewport,
    sprites: SpriteCache,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PaintStats {
    pub(crate) drawn: u32,
    pub(crate) culled: u32,
    pub(crate) missing_sprites: u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>, assets_dir: &Path, canvas: Viewport) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(canvas.width.max(1), canvas.height.max(1), surface)?;
        Ok(Self {
            pixels,
            canvas,
            sprites: SpriteCache::new(assets_dir),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    pub(crate) fn render(
        &mut self,
        draw_list: &DrawList,
        overlay: Option<&OverlayData>,
    ) -> Result<(), Error> {
        let frame = self.pixels.frame_mut();
        let stats = paint_draw_list(frame, self.canvas, &mut self.sprites, draw_list);
        if let Some(data) = overlay {
            draw_overlay(frame, self.canvas.width, self.canvas.height, data);
        }
        debug!(
            drawn = stats.drawn,
            culled = stats.culled,
            missing_sprites = stats.missing_sprites,
            cached_sprites = self.sprites.cached_len(),
            "frame_painted"
        );
        self.pixels.render()
    }
}

pub(crate) fn paint_draw_list(
    frame: &mut [u8],
    canvas: Viewport,
    sprites: &mut SpriteCache,
    draw_list: &DrawList,
) -> PaintStats {
    let mut stats = PaintStats::default();
    clear_frame(frame, draw_list.clear_color());
    let camera_offset_x = draw_list.camera_offset_x();

    for command in draw_list.commands() {
        match command {
            DrawCommand::Sprite(sprite) => {
                let screen = rect_to_screen_px(sprite.rect, sprite.space, camera_offset_x);
                if !intersects_viewport(screen, canvas) {
                    stats.culled += 1;
                    continue;
                }
                match sprites.resolve(&sprite.key) {
                    Some(loaded) => {
                        draw_sprite_in_rect(frame, canvas, screen, loaded, sprite.flip_x);
                        stats.drawn += 1;
                    }
                    None => {
                        stats.missing_sprites += 1;
                        if let Some(color) = fallback_color(sprite) {
                            fill_rect_clipped(frame, canvas, screen, color);
                            stats.drawn += 1;
                        }
                    }
                }
            }
            DrawCommand::FillRect { rect, space, color } => {
                let screen = rect_to_screen_px(*rect, *space, camera_offset_x);
                if !intersects_viewport(screen, canvas) {
                    stats.culled += 1;
                    continue;
                }
                fill_rect_clipped(frame, canvas, screen, *color);
                stats.drawn += 1;
            }
            DrawCommand::Text {
                x,
                y,
                text,
                color,
                scale,
            } => {
                draw_text_clipped(
                    frame,
                    canvas.width,
                    canvas.height,
                    x.round() as i32,
                    y.round() as i32,
                    text,
                    *color,
                    (*scale).min(i32::MAX as u32) as i32,
                );
                stats.drawn += 1;
            }
        }
    }
    stats
}

fn fallback_color(sprite: &SpriteDraw) -> Option<Rgba> {
    sprite.fallback.filter(|color| color[3] > 0)
}

fn clear_frame(frame: &mut [u8], color: Rgba) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
}

pub(crate) fn write_pixel_rgba_clipped(
    frame: &mut [u8],
    width: usize,
    x: i32,
    y: i32,
    color: Rgba,
) {
    if x < 0 || y < 0 {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    if x >= width {
        return;
    }
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    if color[3] == u8::MAX {
        frame[byte_offset..end].copy_from_slice(&color);
    } else {
        blend_into(&mut frame[byte_offset..end], color);
    }
}

fn blend_into(dst: &mut [u8], color: Rgba) {
    let alpha = color[3] as u32;
    let inverse = 255 - alpha;
    for channel in 0..3 {
        let blended = (color[channel] as u32 * alpha + dst[channel] as u32 * inverse) / 255;
        dst[channel] = blended as u8;
    }
    dst[3] = u8::MAX;
}

pub(crate) fn fill_rect_clipped(
    frame: &mut [u8],
    canvas: Viewport,
    rect: ScreenRectPx,
    color: Rgba,
) {
    let left = rect.left.max(0);
    let top = rect.top.max(0);
    let right = rect.right().min(canvas.width as i32);
    let bottom = rect.bottom().min(canvas.height as i32);
    for y in top..bottom {
        for x in left..right {
            write_pixel_rgba_clipped(frame, canvas.width as usize, x, y, color);
        }
    }
}

/// Nearest-neighbour blit of `sprite` stretched to `rect`; fully transparent texels are skipped.
fn draw_sprite_in_rect(
    frame: &mut [u8],
    canvas: Viewport,
    rect: ScreenRectPx,
    sprite: &LoadedSprite,
    flip_x: bool,
) {
    if sprite.width == 0 || sprite.height == 0 || rect.width <= 0 || rect.height <= 0 {
        return;
    }
    let expected_rgba_len = sprite.width as usize * sprite.height as usize * 4;
    if sprite.rgba.len() < expected_rgba_len {
        return;
    }

    let draw_left = rect.left.max(0);
    let draw_top = rect.top.max(0);
    let draw_right = rect.right().min(canvas.width as i32);
    let draw_bottom = rect.bottom().min(canvas.height as i32);
    if draw_left >= draw_right || draw_top >= draw_bottom {
        return;
    }

    let x_ratio = sprite.width as f32 / rect.width as f32;
    let y_ratio = sprite.height as f32 / rect.height as f32;
    let sprite_width = sprite.width as usize;
    let frame_width = canvas.width as usize;

    for out_y in draw_top..draw_bottom {
        let dy = (out_y - rect.top) as f32;
        let src_y = ((dy * y_ratio).floor() as u32).min(sprite.height - 1) as usize;
        let src_row_offset = src_y * sprite_width * 4;
        let dst_row_offset = out_y as usize * frame_width * 4;

        for out_x in draw_left..draw_right {
            let mut dx = out_x - rect.left;
            if flip_x {
                dx = rect.width - 1 - dx;
            }
            let src_x = ((dx as f32 * x_ratio).floor() as u32).min(sprite.width - 1) as usize;
            let src_offset = src_row_offset + src_x * 4;
            let alpha = sprite.rgba[src_offset + 3];
            if alpha == 0 {
                continue;
            }
            let dst_offset = dst_row_offset + out_x as usize * 4;
            frame[dst_offset] = sprite.rgba[src_offset];
            frame[dst_offset + 1] = sprite.rgba[src_offset + 1];
            frame[dst_offset + 2] = sprite.rgba[src_offset + 2];
            frame[dst_offset + 3] = u8::MAX;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DrawSpace, Rect};
    use tempfile::TempDir;

    const CANVAS: Viewport = Viewport {
        width: 8,
        height: 4,
    };

    fn blank_frame(canvas: Viewport) -> Vec<u8> {
        vec![0; canvas.width as usize * canvas.height as usize * 4]
    }

    fn pixel_at(frame: &[u8], canvas: Viewport, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * canvas.width as usize + x) * 4;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    fn two_texel_sprite() -> LoadedSprite {
        // left texel red, right texel fully transparent
        LoadedSprite {
            width: 2,
            height: 1,
            rgba: vec![255, 0, 0, 255, 0, 0, 255, 0],
        }
    }

    fn screen_rect(left: i32, top: i32, width: i32, height: i32) -> ScreenRectPx {
        ScreenRectPx {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn write_pixel_ignores_out_of_bounds_coordinates() {
        let mut frame = blank_frame(CANVAS);
        write_pixel_rgba_clipped(&mut frame, CANVAS.width as usize, -1, 0, [1, 1, 1, 255]);
        write_pixel_rgba_clipped(&mut frame, CANVAS.width as usize, 8, 0, [1, 1, 1, 255]);
        write_pixel_rgba_clipped(&mut frame, CANVAS.width as usize, 0, 4, [1, 1, 1, 255]);

        assert!(frame.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn translucent_fill_blends_with_background() {
        let mut frame = blank_frame(CANVAS);
        clear_frame(&mut frame, [200, 0, 0, 255]);
        fill_rect_clipped(&mut frame, CANVAS, screen_rect(0, 0, 1, 1), [0, 0, 200, 51]);

        let pixel = pixel_at(&frame, CANVAS, 0, 0);
        assert_eq!(pixel, [160, 0, 40, 255]);
    }

    #[test]
    fn sprite_blit_skips_transparent_texels() {
        let mut frame = blank_frame(CANVAS);
        let sprite = two_texel_sprite();
        draw_sprite_in_rect(&mut frame, CANVAS, screen_rect(0, 0, 4, 1), &sprite, false);

        assert_eq!(pixel_at(&frame, CANVAS, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel_at(&frame, CANVAS, 1, 0), [255, 0, 0, 255]);
        assert_eq!(pixel_at(&frame, CANVAS, 2, 0), [0, 0, 0, 0]);
        assert_eq!(pixel_at(&frame, CANVAS, 3, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn flipped_sprite_mirrors_horizontally() {
        let mut frame = blank_frame(CANVAS);
        let sprite = two_texel_sprite();
        draw_sprite_in_rect(&mut frame, CANVAS, screen_rect(0, 0, 4, 1), &sprite, true);

        assert_eq!(pixel_at(&frame, CANVAS, 0, 0), [0, 0, 0, 0]);
        assert_eq!(pixel_at(&frame, CANVAS, 3, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn sprite_partly_off_canvas_is_clipped() {
        let mut frame = blank_frame(CANVAS);
        let sprite = two_texel_sprite();
        draw_sprite_in_rect(&mut frame, CANVAS, screen_rect(-2, 0, 4, 1), &sprite, true);

        assert_eq!(pixel_at(&frame, CANVAS, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel_at(&frame, CANVAS, 1, 0), [255, 0, 0, 255]);
        assert_eq!(pixel_at(&frame, CANVAS, 2, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn missing_sprite_uses_fallback_only_when_given() {
        let temp = TempDir::new().expect("temp");
        let mut sprites = SpriteCache::new(temp.path());
        let mut frame = blank_frame(CANVAS);
        let mut list = DrawList::default();
        list.set_clear_color([0, 0, 0, 255]);
        list.sprite(SpriteDraw {
            key: "character/idle/01".to_string(),
            rect: Rect::new(0.0, 0.0, 2.0, 2.0),
            space: DrawSpace::Screen,
            flip_x: false,
            fallback: Some([9, 9, 9, 255]),
        });
        list.sprite(SpriteDraw {
            key: "coin/01".to_string(),
            rect: Rect::new(4.0, 0.0, 2.0, 2.0),
            space: DrawSpace::Screen,
            flip_x: false,
            fallback: None,
        });

        let stats = paint_draw_list(&mut frame, CANVAS, &mut sprites, &list);

        assert_eq!(stats.missing_sprites, 2);
        assert_eq!(stats.drawn, 1);
        assert_eq!(pixel_at(&frame, CANVAS, 1, 1), [9, 9, 9, 255]);
        assert_eq!(pixel_at(&frame, CANVAS, 4, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn world_space_commands_are_culled_after_camera_shift() {
        let temp = TempDir::new().expect("temp");
        let mut sprites = SpriteCache::new(temp.path());
        let mut frame = blank_frame(CANVAS);
        let mut list = DrawList::default();
        list.set_camera_offset_x(-100.0);
        list.fill_rect(Rect::new(2.0, 0.0, 4.0, 4.0), DrawSpace::World, [1, 2, 3, 255]);
        list.fill_rect(Rect::new(102.0, 0.0, 4.0, 4.0), DrawSpace::World, [4, 5, 6, 255]);

        let stats = paint_draw_list(&mut frame, CANVAS, &mut sprites, &list);

        assert_eq!(stats.culled, 1);
        assert_eq!(stats.drawn, 1);
        assert_eq!(pixel_at(&frame, CANVAS, 3, 0), [4, 5, 6, 255]);
    }
}
