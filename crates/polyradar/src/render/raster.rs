#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    // Label text needs real glyphs; system fonts are good enough for a preview.
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;
    let target = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or(RasterError::PixmapAlloc)?;
    let mut pixmap =
        tiny_skia::Pixmap::new(target.width(), target.height()).ok_or(RasterError::PixmapAlloc)?;

    // resvg ignores CSS `background-color` on the root element, so paint it here.
    if let Some(color) = background.and_then(parse_background) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// `transparent`, `white`, `black`, or `#rgb` / `#rgba` / `#rrggbb` / `#rrggbbaa`.
fn parse_background(text: &str) -> Option<tiny_skia::Color> {
    let text = text.trim();
    let [r, g, b, a] = match text.to_ascii_lowercase().as_str() {
        "transparent" => [0, 0, 0, 0],
        "white" => [255, 255, 255, 255],
        "black" => [0, 0, 0, 255],
        _ => parse_hex_rgba(text.strip_prefix('#')?)?,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

fn parse_hex_rgba(hex: &str) -> Option<[u8; 4]> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let mut rgba = [u8::MAX; 4];
    match hex.len() {
        3 | 4 => {
            for (slot, digit) in rgba.iter_mut().zip(hex.chars()) {
                // `f` -> `ff`
                *slot = digit.to_digit(16)? as u8 * 0x11;
            }
        }
        6 | 8 => {
            for (i, slot) in rgba.iter_mut().take(hex.len() / 2).enumerate() {
                *slot = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).ok()?;
            }
        }
        _ => return None,
    }
    Some(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Series;
    use crate::render::{LayoutOptions, SvgRenderOptions, render_svg};

    #[test]
    fn chart_svg_rasterizes_to_png() {
        let svg = render_svg(
            Series::from([("a", 3.0), ("b", 6.0), ("c", 9.0)]),
            120.0,
            120.0,
            crate::ChartOptions::default(),
            &LayoutOptions::default(),
            &SvgRenderOptions::default(),
        )
        .unwrap();
        let bytes = svg_to_png(
            &svg,
            &RasterOptions {
                scale: 2.0,
                background: Some("#fff".to_string()),
            },
        )
        .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn background_accepts_short_and_long_hex() {
        assert_eq!(parse_hex_rgba("536DFE80"), Some([0x53, 0x6D, 0xFE, 0x80]));
        assert_eq!(parse_hex_rgba("fff"), Some([255, 255, 255, 255]));
        assert_eq!(parse_hex_rgba("0008"), Some([0, 0, 0, 0x88]));
        assert_eq!(parse_hex_rgba("12"), None);
        assert_eq!(parse_hex_rgba("+fffff"), None);

        let c = parse_background(" #536DFE80 ").unwrap();
        assert!((c.alpha() - 128.0 / 255.0).abs() < 1e-3);
        assert!(parse_background("transparent").is_some());
        assert!(parse_background("rebeccapurple").is_none());
    }
}
