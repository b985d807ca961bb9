use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color::{ColorMap, MISSING_COLOR, TRAIL_COLOR};
use crate::data::Dataset;
use crate::geometry::{self, Canvas, Path, Point};

// ---------------------------------------------------------------------------
// Layout selection and render options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// Angular walk, one point per row.
    #[default]
    Spiral,
    /// Parallel coordinates driven by the distance column.
    Devise,
    /// Perspective polylines driven by the distance column.
    Perspective,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Spiral, Layout::Devise, Layout::Perspective];

    pub fn label(&self) -> &'static str {
        match self {
            Layout::Spiral => "Spiral",
            Layout::Devise => "Devise",
            Layout::Perspective => "Perspective",
        }
    }

    /// Whether the layout reads a trailing distance column.
    pub fn needs_distance(&self) -> bool {
        !matches!(self, Layout::Spiral)
    }
}

/// Display switches that do not require reloading the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub step: f64,
    pub radius: f64,
    pub show_path: bool,
    pub color_label: bool,
    pub color_features: bool,
}

// ---------------------------------------------------------------------------
// Scene – colored geometry for one frame
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    /// Hollow circle.
    Marker {
        at: Point,
        radius: f64,
        color: Color32,
    },
    /// Polyline; hidden trails are kept so the SVG can toggle them.
    Trail {
        path: Path,
        color: Color32,
        visible: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub canvas: Canvas,
    pub glyphs: Vec<Glyph>,
}

impl Scene {
    /// Lay out every row of `dataset`.
    pub fn build(
        dataset: &Dataset,
        layout: Layout,
        canvas: Canvas,
        options: &RenderOptions,
        colors: &ColorMap,
    ) -> Scene {
        let mut glyphs = Vec::new();
        if dataset.is_empty() {
            return Scene { canvas, glyphs };
        }
        let columns = dataset.columns();

        match layout {
            Layout::Spiral => {
                let start = canvas.center();
                for (i, row) in dataset.rows().iter().enumerate() {
                    let walk = geometry::spiral(row, columns, start, options.step);
                    let color = if options.color_label {
                        colors.label_color(dataset.label(i))
                    } else {
                        colors.primary()
                    };
                    glyphs.push(Glyph::Trail {
                        path: walk.path,
                        color,
                        visible: options.show_path,
                    });
                    glyphs.push(Glyph::Marker {
                        at: walk.point,
                        radius: options.radius,
                        color,
                    });
                }
            }
            Layout::Devise => {
                for row in dataset.rows() {
                    for marker in geometry::parallel(row, columns, canvas, options.radius) {
                        let color = if marker.missing {
                            MISSING_COLOR
                        } else if options.color_features {
                            colors.feature_color(marker.feature)
                        } else {
                            colors.primary()
                        };
                        glyphs.push(Glyph::Marker {
                            at: marker.at,
                            radius: options.radius,
                            color,
                        });
                    }
                }
            }
            Layout::Perspective => {
                for row in dataset.rows() {
                    glyphs.push(Glyph::Trail {
                        path: geometry::perspective(row, columns, canvas),
                        color: TRAIL_COLOR,
                        visible: true,
                    });
                }
            }
        }

        Scene { canvas, glyphs }
    }

    pub fn markers(&self) -> impl Iterator<Item = (Point, f64, Color32)> + '_ {
        self.glyphs.iter().filter_map(|g| match g {
            Glyph::Marker { at, radius, color } => Some((*at, *radius, *color)),
            Glyph::Trail { .. } => None,
        })
    }

    pub fn trails(&self) -> impl Iterator<Item = (&Path, Color32, bool)> + '_ {
        self.glyphs.iter().filter_map(|g| match g {
            Glyph::Trail {
                path,
                color,
                visible,
            } => Some((path, *color, *visible)),
            Glyph::Marker { .. } => None,
        })
    }
}
