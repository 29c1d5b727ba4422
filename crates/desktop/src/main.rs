//! Casino Desktop: application entry.

mod app;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (config, lobby) = match app::setup(None) {
        Ok(v) => v,
        Err(e) => {
            log::error!("startup failed: {:#}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Casino",
        options,
        Box::new(move |cc| Box::new(app::CasinoApp::new(cc, &config, lobby))),
    )
}
