use crate::error::{ReportError, Result};
use fontdue::{Font, FontSettings};
use std::fs;
use std::path::Path;
use tiny_skia::{Color, Pixmap};

/// Glyph rasterizer for labels in PNG exports.
pub struct TextRenderer {
    font: Font,
}

impl TextRenderer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            ReportError::Font {
                path: path.to_path_buf(),
                reason: reason.to_string(),
            }
        })?;
        Ok(TextRenderer { font })
    }

    /// Draws `text` with its baseline at `y`, starting at `x`.
    pub fn draw_text(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) {
        let r = color.red();
        let g = color.green();
        let b = color.blue();
        let a = color.alpha();

        let mut cursor_x = x;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, size);
            if metrics.width == 0 || metrics.height == 0 {
                cursor_x += metrics.advance_width;
                continue;
            }

            let glyph_y = y - metrics.height as f32 - metrics.ymin as f32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = f32::from(bitmap[gy * metrics.width + gx]) / 255.0;
                    if coverage < 0.01 {
                        continue;
                    }

                    #[allow(clippy::cast_possible_wrap)]
                    let px = (cursor_x + metrics.xmin as f32 + gx as f32) as i32;
                    #[allow(clippy::cast_possible_wrap)]
                    let py = (glyph_y + gy as f32) as i32;

                    #[allow(clippy::cast_possible_wrap)]
                    if px < 0
                        || py < 0
                        || px >= pixmap.width() as i32
                        || py >= pixmap.height() as i32
                    {
                        continue;
                    }

                    let idx = (py as u32 * pixmap.width() + px as u32) as usize * 4;
                    let data = pixmap.data_mut();
                    if idx + 3 >= data.len() {
                        continue;
                    }

                    // Premultiplied RGBA, source-over
                    let alpha = coverage * a;
                    let inv = 1.0 - alpha;
                    let blend = |src: f32, dst: u8| {
                        ((src * alpha + f32::from(dst) / 255.0 * inv) * 255.0).min(255.0) as u8
                    };
                    data[idx] = blend(r, data[idx]);
                    data[idx + 1] = blend(g, data[idx + 1]);
                    data[idx + 2] = blend(b, data[idx + 2]);
                    data[idx + 3] = blend(1.0, data[idx + 3]);
                }
            }

            cursor_x += metrics.advance_width;
        }
    }

    pub fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, size).advance_width)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_font_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let result = TextRenderer::from_file(&dir.path().join("absent.ttf"));
        assert!(matches!(result, Err(ReportError::Read { .. })));
    }

    #[test]
    fn test_garbage_font_is_a_font_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"definitely not a font").unwrap();

        match TextRenderer::from_file(&path) {
            Err(ReportError::Font { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("garbage bytes loaded as a font"),
        }
    }
}
