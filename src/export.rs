use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::color::svg_color;
use crate::scene::{Glyph, Scene};

/// Render a scene as a standalone SVG document.
///
/// Markers become hollow circles, trails become `<path>` elements; hidden
/// trails are written with `visibility="hidden"`.
pub fn to_svg(scene: &Scene) -> String {
    let mut body = String::new();
    for glyph in &scene.glyphs {
        match glyph {
            Glyph::Marker { at, radius, color } => {
                let (stroke, opacity) = svg_color(*color);
                let _ = writeln!(
                    body,
                    r#"  <circle cx="{}" cy="{}" r="{radius}" fill="none" stroke="{stroke}" stroke-opacity="{opacity}" stroke-width="1"/>"#,
                    at.x, at.y
                );
            }
            Glyph::Trail {
                path,
                color,
                visible,
            } => {
                if path.is_empty() {
                    continue;
                }
                let (stroke, opacity) = svg_color(*color);
                let visibility = if *visible { "visible" } else { "hidden" };
                let _ = writeln!(
                    body,
                    r#"  <path d="{path}" fill="none" stroke="{stroke}" stroke-opacity="{opacity}" stroke-width="1" visibility="{visibility}"/>"#
                );
            }
        }
    }

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n{body}</svg>\n",
        scene.canvas.width, scene.canvas.height
    )
}

/// Write [`to_svg`] output to `path`.
pub fn write_svg(scene: &Scene, path: &Path) -> Result<()> {
    std::fs::write(path, to_svg(scene)).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} glyphs to {}", scene.glyphs.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use eframe::egui::Color32;

    use super::*;
    use crate::geometry::{Canvas, Path as GeoPath, Point};

    fn scene() -> Scene {
        let mut trail = GeoPath::new(Point::new(1.0, 2.0));
        trail.add(Point::new(3.0, 4.0));
        Scene {
            canvas: Canvas::new(1200.0, 600.0),
            glyphs: vec![
                Glyph::Trail {
                    path: trail,
                    color: Color32::from_rgb(0xe4, 0x1a, 0x1c),
                    visible: false,
                },
                Glyph::Marker {
                    at: Point::new(3.0, 4.0),
                    radius: 3.0,
                    color: Color32::from_rgb(0xe4, 0x1a, 0x1c),
                },
                Glyph::Trail {
                    path: GeoPath::default(),
                    color: Color32::BLACK,
                    visible: true,
                },
            ],
        }
    }

    #[test]
    fn svg_contains_circles_and_paths() {
        let svg = to_svg(&scene());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1200" height="600""#));
        assert!(svg.contains(r#"<circle cx="3" cy="4" r="3""#));
        assert!(svg.contains(r#"d="M1 2 L3 4""#));
        assert!(svg.contains(r#"visibility="hidden""#));
        assert!(svg.contains("#e41a1c"));
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn write_svg_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.svg");
        write_svg(&scene(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.trim_end().ends_with("</svg>"));
    }
}
