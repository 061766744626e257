//! Synthesized placeholder previews for packages without an embedded thumbnail.

use std::io::Cursor;

use image::{ImageError, ImageFormat, Rgba, RgbaImage};

use super::glyphs::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

pub const PLACEHOLDER_WIDTH: u32 = 512;
pub const PLACEHOLDER_HEIGHT: u32 = 288;

/// Subheading used when no title could be extracted.
pub const MISSING_TITLE: &str = "Preview not available";

const BACKGROUND: Rgba<u8> = Rgba([24, 30, 54, 255]);
const ACCENT: Rgba<u8> = Rgba([0, 173, 181, 255]);
const HEADING_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SUBTITLE_COLOR: Rgba<u8> = Rgba([200, 205, 220, 255]);
const ACCENT_BAR_HEIGHT: u32 = 6;

#[derive(Debug, Clone, Copy)]
struct TextBox {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    scale: u32,
}

const HEADING_BOX: TextBox = TextBox {
    x: 16,
    y: 16,
    width: PLACEHOLDER_WIDTH - 32,
    height: 80,
    scale: 3,
};

const SUBTITLE_BOX: TextBox = TextBox {
    x: 16,
    y: 100,
    width: PLACEHOLDER_WIDTH - 32,
    height: PLACEHOLDER_HEIGHT - 116,
    scale: 2,
};

impl TextBox {
    fn advance(&self) -> u32 {
        (GLYPH_WIDTH + 1) * self.scale
    }

    fn line_height(&self) -> u32 {
        (GLYPH_HEIGHT + 1) * self.scale
    }

    // The trailing column gap of the last glyph may overhang the box.
    fn max_chars(&self) -> usize {
        ((self.width + self.scale) / self.advance()).max(1) as usize
    }

    fn max_lines(&self) -> usize {
        ((self.height + self.scale) / self.line_height()) as usize
    }
}

/// Render the 512×288 placeholder: dark background, accent bar along the
/// bottom, `heading` (the file stem) and `subtitle` or [`MISSING_TITLE`].
pub fn render_placeholder(heading: &str, subtitle: Option<&str>) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, BACKGROUND);

    for y in PLACEHOLDER_HEIGHT - ACCENT_BAR_HEIGHT..PLACEHOLDER_HEIGHT {
        for x in 0..PLACEHOLDER_WIDTH {
            image.put_pixel(x, y, ACCENT);
        }
    }

    draw_text(&mut image, heading, &HEADING_BOX, HEADING_COLOR);
    draw_text(
        &mut image,
        subtitle.unwrap_or(MISSING_TITLE),
        &SUBTITLE_BOX,
        SUBTITLE_COLOR,
    );
    image
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Greedy word wrap; words longer than a line are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(max_chars) {
            let needed = if line_len == 0 { chunk.len() } else { line_len + 1 + chunk.len() };
            if needed > max_chars && line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(chunk);
            line_len += chunk.len();
        }
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

fn draw_text(image: &mut RgbaImage, text: &str, area: &TextBox, color: Rgba<u8>) {
    for (row, line) in wrap(text, area.max_chars())
        .iter()
        .take(area.max_lines())
        .enumerate()
    {
        let y = area.y + row as u32 * area.line_height();
        for (col, ch) in line.chars().enumerate() {
            let x = area.x + col as u32 * area.advance();
            draw_glyph(image, ch, x, y, area.scale, color);
        }
    }
}

fn draw_glyph(image: &mut RgbaImage, ch: char, x: u32, y: u32, scale: u32, color: Rgba<u8>) {
    for (cx, column) in glyph(ch).iter().enumerate() {
        for cy in 0..GLYPH_HEIGHT {
            if (*column >> cy) & 1 == 0 {
                continue;
            }
            let px = x + cx as u32 * scale;
            let py = y + cy * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    if px + dx < image.width() && py + dy < image.height() {
                        image.put_pixel(px + dx, py + dy, color);
                    }
                }
            }
        }
    }
}
