use clap::Parser;
use eframe::egui;
use log::info;

use selset::app::SelsetApp;
use selset::cli::Args;

fn main() -> eframe::Result {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .init();
    info!("selset {} starting", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Selection Set Board")
            .with_inner_size([980.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "selset",
        options,
        Box::new(move |cc| Ok(Box::new(SelsetApp::new(cc, &args)))),
    )
}
