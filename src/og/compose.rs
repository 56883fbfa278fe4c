//! Preview composition: background, panel and text

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use std::io::Cursor;
use std::sync::{Arc, LazyLock};

use super::{ImageRequest, OgError, Template};
use crate::content::markdown::escape_html;

/// Canvas width in pixels
pub const WIDTH: u32 = 1200;
/// Canvas height in pixels
pub const HEIGHT: u32 = 600;

const PANEL_MARGIN: u32 = 60;
const PANEL_PADDING: u32 = 48;
const TITLE_SIZE: u32 = 72;
const TITLE_LINE_HEIGHT: u32 = 80;
const BYLINE_SIZE: u32 = 36;
const BYLINE_GAP: u32 = 24;
const MAX_TITLE_LINES: usize = 3;
/// Average bold glyph advance relative to the font size
const GLYPH_WIDTH_RATIO: f32 = 0.56;
const FONT_FAMILY: &str = "Inter, Helvetica, Arial, 'DejaVu Sans', sans-serif";

static FONTS: LazyLock<Arc<fontdb::Database>> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!("Loaded {} font faces for previews", db.len());
    Arc::new(db)
});

/// Render a preview to PNG bytes
///
/// `background` holds the undecoded background image; `None` or bytes that
/// do not decode leave the canvas transparent.
pub fn render_png(
    request: &ImageRequest,
    site_name: &str,
    background: Option<&[u8]>,
) -> Result<Vec<u8>, OgError> {
    let mut canvas = background
        .and_then(|bytes| match image::load_from_memory(bytes) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!("Ignoring undecodable background: {}", e);
                None
            }
        })
        .map(|img| img.resize_to_fill(WIDTH, HEIGHT, FilterType::Triangle).to_rgba8())
        .unwrap_or_else(|| RgbaImage::new(WIDTH, HEIGHT));

    let overlay = rasterize(&overlay_svg(request, site_name))?;
    imageops::overlay(&mut canvas, &overlay, 0, 0);

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// SVG document for everything drawn above the background
pub fn overlay_svg(request: &ImageRequest, site_name: &str) -> String {
    let max_chars = ((WIDTH - 2 * (PANEL_MARGIN + PANEL_PADDING)) as f32
        / (TITLE_SIZE as f32 * GLYPH_WIDTH_RATIO)) as usize;
    let lines = wrap_title(&request.title, max_chars, MAX_TITLE_LINES);

    let byline = match &request.template {
        Template::Generic => None,
        Template::Branded { username: Some(user) } => Some(format!("@{} · {}", user, site_name)),
        Template::Branded { username: None } => Some(site_name.to_string()),
    };

    let (panel_fill, panel_opacity) = match request.template {
        Template::Generic => ("#ffffff", 0.8),
        Template::Branded { .. } => ("#f9fafb", 0.7),
    };

    let text_height = lines.len() as u32 * TITLE_LINE_HEIGHT
        + byline.as_ref().map_or(0, |_| BYLINE_GAP + BYLINE_SIZE);
    let panel_height = text_height + 2 * PANEL_PADDING;
    let panel_y = (HEIGHT.saturating_sub(panel_height)) / 2;
    let text_x = PANEL_MARGIN + PANEL_PADDING;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    svg.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
        PANEL_MARGIN,
        panel_y,
        WIDTH - 2 * PANEL_MARGIN,
        panel_height,
        panel_fill,
        panel_opacity
    ));

    svg.push_str(&format!(
        r##"<text font-family="{}" font-size="{}" font-weight="700" letter-spacing="-1.5" fill="#111827">"##,
        escape_html(FONT_FAMILY),
        TITLE_SIZE
    ));
    for (i, line) in lines.iter().enumerate() {
        // Baseline sits roughly 0.8em below the top of the line box
        let baseline = panel_y + PANEL_PADDING + i as u32 * TITLE_LINE_HEIGHT + TITLE_SIZE * 4 / 5;
        svg.push_str(&format!(
            r#"<tspan x="{}" y="{}">{}</tspan>"#,
            text_x,
            baseline,
            escape_html(line)
        ));
    }
    svg.push_str("</text>");

    if let Some(byline) = byline {
        let baseline = panel_y
            + PANEL_PADDING
            + lines.len() as u32 * TITLE_LINE_HEIGHT
            + BYLINE_GAP
            + BYLINE_SIZE * 4 / 5;
        svg.push_str(&format!(
            r##"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="700" fill="#111827">{}</text>"##,
            text_x,
            baseline,
            escape_html(FONT_FAMILY),
            BYLINE_SIZE,
            escape_html(&byline)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn rasterize(svg: &str) -> Result<RgbaImage, OgError> {
    let options = usvg::Options {
        fontdb: Arc::clone(&FONTS),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| OgError::Render(e.to_string()))?;

    let mut pixmap = Pixmap::new(WIDTH, HEIGHT)
        .ok_or_else(|| OgError::Render("cannot allocate canvas".to_string()))?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; image expects straight alpha
    let mut data = Vec::with_capacity((WIDTH * HEIGHT * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    RgbaImage::from_raw(WIDTH, HEIGHT, data)
        .ok_or_else(|| OgError::Render("overlay has unexpected size".to_string()))
}

/// Greedy word wrap by character count
///
/// Words longer than a line are split. Text beyond `max_lines` is cut and the
/// last line ends with an ellipsis.
fn wrap_title(title: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in title.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(max_chars.saturating_sub(1));
            while chars.last().is_some_and(|c| c.is_whitespace()) {
                chars.pop();
            }
            chars.push('…');
            *last = chars.into_iter().collect();
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, template: Template) -> ImageRequest {
        ImageRequest {
            title: title.to_string(),
            background_url: "/bg.png".to_string(),
            template,
        }
    }

    #[test]
    fn test_wrap_short_title() {
        assert_eq!(wrap_title("Hello", 24, 3), vec!["Hello"]);
        assert!(wrap_title("   ", 24, 3).is_empty());
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_title("Creative ways of using useReducer", 16, 3),
            vec!["Creative ways of", "using useReducer"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_title("abcdefghij", 4, 5), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_truncates_with_ellipsis() {
        let lines = wrap_title("one two three four five six", 5, 2);
        assert_eq!(lines, vec!["one", "two…"]);
    }

    #[test]
    fn test_branded_overlay_has_byline() {
        let svg = overlay_svg(
            &request("Hello", Template::Branded { username: None }),
            "// code-insights.dev",
        );
        assert!(svg.contains(">Hello</tspan>"));
        assert!(svg.contains(">// code-insights.dev</text>"));
        assert!(svg.contains(r#"width="1200" height="600""#));
    }

    #[test]
    fn test_branded_overlay_credits_user() {
        let svg = overlay_svg(
            &request(
                "Hello",
                Template::Branded {
                    username: Some("nakd".to_string()),
                },
            ),
            "// code-insights.dev",
        );
        assert!(svg.contains("@nakd · // code-insights.dev"));
    }

    #[test]
    fn test_generic_overlay_has_no_byline() {
        let svg = overlay_svg(&request("Hello", Template::Generic), "// code-insights.dev");
        assert!(svg.contains(">Hello</tspan>"));
        assert!(!svg.contains("code-insights.dev"));
    }

    #[test]
    fn test_overlay_escapes_title() {
        let svg = overlay_svg(&request("<A & B>", Template::Generic), "");
        assert!(svg.contains("&lt;A &amp; B&gt;"));
        assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
    }

    #[test]
    fn test_render_without_background() {
        let png = render_png(&request("Hello", Template::Generic), "", None).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_undecodable_background_is_blank() {
        let png = render_png(
            &request("Hello", Template::Generic),
            "",
            Some(b"definitely not an image"),
        )
        .unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(2, 2)[3], 0);
    }
}
