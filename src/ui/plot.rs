use eframe::egui::{Color32, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scene plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current scene in the central panel.
///
/// Scene coordinates grow downwards like the SVG canvas, so y is negated.
pub fn scene_plot(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_empty() {
        let text = if state.loading {
            "Loading…"
        } else {
            "No data  (pick a dataset or File → Open…)"
        };
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(text);
        });
        return;
    }

    let scene = state.scene();

    // One Points item per color keeps the plot cheap for thousands of rows.
    let mut groups: Vec<(Color32, f32, Vec<[f64; 2]>)> = Vec::new();
    for (at, radius, color) in scene.markers() {
        let radius = radius as f32;
        match groups.iter_mut().find(|(c, r, _)| *c == color && *r == radius) {
            Some((_, _, pts)) => pts.push([at.x, -at.y]),
            None => groups.push((color, radius, vec![[at.x, -at.y]])),
        }
    }

    Plot::new("scene_plot")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (path, color, visible) in scene.trails() {
                if !visible || path.is_empty() {
                    continue;
                }
                let points: PlotPoints = path.points().map(|p| [p.x, -p.y]).collect();
                plot_ui.line(Line::new(points).color(color).width(1.0));
            }

            for (color, radius, pts) in groups {
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .shape(MarkerShape::Circle)
                        .filled(false)
                        .radius(radius)
                        .color(color),
                );
            }
        });
}
