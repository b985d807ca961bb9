use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::scene::Layout;
use crate::state::{AppState, FeatureOrder};

// ---------------------------------------------------------------------------
// Left side panel – controls and column statistics
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("View");
    ui.separator();

    // ---- Layout ----
    let mut layout = state.layout;
    egui::ComboBox::from_id_salt("layout")
        .selected_text(layout.label())
        .show_ui(ui, |ui: &mut Ui| {
            for l in Layout::ALL {
                ui.selectable_value(&mut layout, l, l.label());
            }
        });
    if layout != state.layout {
        state.set_layout(layout);
    }

    // ---- Dataset ----
    ui.strong("Data");
    let current = state.file.clone();
    let files = state.config.files.clone();
    egui::ComboBox::from_id_salt("file_name")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for file in &files {
                if ui.selectable_label(current == *file, file).clicked() && current != *file {
                    state.select_file(file.clone());
                }
            }
        });

    let mut has_label = state.has_label;
    if ui.checkbox(&mut has_label, "Has label").changed() {
        state.has_label = has_label;
        state.reload();
    }

    let mut scale = state.scale;
    if ui.checkbox(&mut scale, "Scale data").changed() {
        state.set_scale(scale);
    }

    // ---- Feature order ----
    let mut order = state.order;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Sort by");
        egui::ComboBox::from_id_salt("sort_data")
            .selected_text(order.label())
            .show_ui(ui, |ui: &mut Ui| {
                for o in FeatureOrder::ALL {
                    ui.selectable_value(&mut order, o, o.label());
                }
            });
    });
    if order != state.order {
        state.set_order(order);
    }

    ui.separator();

    // ---- Layout-specific options ----
    let mut options = state.options;
    match layout {
        Layout::Spiral => {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Step");
                ui.add(egui::DragValue::new(&mut options.step).range(1.0..=500.0));
            });
            ui.checkbox(&mut options.show_path, "Show path");
            ui.checkbox(&mut options.color_label, "Color label");
            if options.color_label && state.dataset.has_labels() {
                label_legend(ui, state);
            }
        }
        Layout::Devise => {
            ui.checkbox(&mut options.color_features, "Color features");
        }
        Layout::Perspective => {
            let mut p = state.p;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("p");
                ui.add(egui::DragValue::new(&mut p).range(0.1..=10.0).speed(0.1));
            });
            state.set_p(p);
        }
    }
    state.set_options(options);

    ui.separator();
    ui.heading("Columns");
    column_table(ui, state);
}

fn label_legend(ui: &mut Ui, state: &AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, color) in state.colors.legend_entries().iter().enumerate() {
            ui.label(RichText::new(format!("■ {label}")).color(*color));
        }
    });
}

/// Per-column statistics of the displayed dataset.
fn column_table(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_empty() {
        ui.label(if state.loading { "Loading…" } else { "No dataset loaded." });
        return;
    }

    state.dataset.compute_variances();
    let columns = state.dataset.columns();

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto())
            .columns(TableColumn::auto().at_least(50.0), 4)
            .header(18.0, |mut header| {
                for title in ["#", "min", "max", "avg", "var"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for col in columns {
                    body.row(16.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(col.i.to_string());
                        });
                        for v in [col.min, col.max, col.avg(), col.variance_or_nan()] {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{v:.3}"));
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export SVG…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.dataset.is_empty() {
            ui.label(format!(
                "{}: {} rows, {} columns",
                state.source.display(),
                state.dataset.len(),
                state.dataset.columns().len()
            ));
        } else if state.loading {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["csv", "txt", "data", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt", "data"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export SVG")
        .add_filter("SVG", &["svg"])
        .set_file_name("view.svg")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = crate::export::write_svg(state.scene(), &path) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
