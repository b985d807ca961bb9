use eframe::egui;
use rusty_spiral::app::RustySpiralApp;
use rusty_spiral::config::Config;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|e| {
        log::error!("Invalid config, using defaults: {e:#}");
        Config::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Spiral – Feature Explorer",
        options,
        Box::new(|cc| Ok(Box::new(RustySpiralApp::new(&cc.egui_ctx, config)))),
    )
}
