mod app;
mod color;
mod state;
mod ui;

use app::NatalityApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let data_path = natality_viewer::dataset_path_from_env();
    log::info!("dataset path: {}", data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Provisional Natality Data Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(NatalityApp::new(data_path)))),
    )
}
