use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustySpiralApp {
    pub state: AppState,
}

impl RustySpiralApp {
    /// Build the app and start loading the first catalog entry.
    pub fn new(ctx: &egui::Context, config: Config) -> Self {
        let mut state = AppState::new(config);
        state.set_repaint_context(ctx.clone());
        state.reload();
        Self { state }
    }
}

impl eframe::App for RustySpiralApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls and column statistics ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scene_plot(ui, &mut self.state);
        });
    }
}
