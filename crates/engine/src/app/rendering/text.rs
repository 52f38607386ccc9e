use crate::app::Rgba;

use super::renderer::write_pixel_rgba_clipped;

pub(crate) const GLYPH_WIDTH: i32 = 3;
pub(crate) const GLYPH_HEIGHT: i32 = 5;

type GlyphRows = [u8; GLYPH_HEIGHT as usize];

const UNKNOWN_GLYPH: GlyphRows = [0b111, 0b001, 0b011, 0b000, 0b010];

/// Width in pixels of `text` drawn at `scale`, one glyph column of spacing per character.
pub(crate) fn text_width_px(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * (GLYPH_WIDTH + 1) * scale
}

pub(crate) fn draw_text_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    text: &str,
    color: Rgba,
    scale: i32,
) {
    if width == 0 || height == 0 || scale <= 0 {
        return;
    }
    let mut cursor_x = x;
    for ch in text.chars() {
        let rows = glyph_rows(ch).unwrap_or(UNKNOWN_GLYPH);
        draw_glyph_clipped(frame, width, height, cursor_x, y, rows, color, scale);
        cursor_x += (GLYPH_WIDTH + 1) * scale;
    }
}

fn draw_glyph_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rows: GlyphRows,
    color: Rgba,
    scale: i32,
) {
    for (row_index, row_bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if row_bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            let cell_x = x + col * scale;
            let cell_y = y + row_index as i32 * scale;
            for py in cell_y..cell_y + scale {
                if py < 0 || py >= height as i32 {
                    continue;
                }
                for px in cell_x..cell_x + scale {
                    if px < 0 || px >= width as i32 {
                        continue;
                    }
                    write_pixel_rgba_clipped(frame, width as usize, px, py, color);
                }
            }
        }
    }
}

fn glyph_rows(ch: char) -> Option<GlyphRows> {
    let rows = match ch.to_ascii_uppercase() {
        ' ' => [0, 0, 0, 0, 0],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '*' => [0b000, 0b101, 0b010, 0b101, 0b000],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(frame: &[u8]) -> usize {
        frame.chunks_exact(4).filter(|pixel| pixel[3] != 0).count()
    }

    #[test]
    fn lowercase_renders_like_uppercase() {
        assert_eq!(glyph_rows('g'), glyph_rows('G'));
        assert!(glyph_rows('~').is_none());
    }

    #[test]
    fn text_width_accounts_for_spacing_and_scale() {
        assert_eq!(text_width_px("", 2), 0);
        assert_eq!(text_width_px("12", 1), 8);
        assert_eq!(text_width_px("12", 3), 24);
    }

    #[test]
    fn scaled_glyph_fills_scale_squared_pixels_per_bit() {
        let (width, height) = (16u32, 16u32);
        let mut frame = vec![0u8; (width * height * 4) as usize];
        draw_text_clipped(&mut frame, width, height, 0, 0, "-", [255, 0, 0, 255], 2);

        assert_eq!(lit_pixels(&frame), 3 * 2 * 2);
    }

    #[test]
    fn text_partly_off_screen_is_clipped_without_panic() {
        let (width, height) = (8u32, 8u32);
        let mut frame = vec![0u8; (width * height * 4) as usize];
        draw_text_clipped(&mut frame, width, height, -5, -3, "WIN", [1, 2, 3, 255], 3);
        draw_text_clipped(&mut frame, width, height, 6, 6, "8", [1, 2, 3, 255], 3);

        assert!(lit_pixels(&frame) > 0);
    }
}
