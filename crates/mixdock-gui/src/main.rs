//! mixdock-gui: advanced audio controls + soundboard panels

mod app;
mod panels;

use app::MixdockApp;
use eframe::NativeOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("mixdock=debug".parse().unwrap())
            .add_directive("wgpu=warn".parse().unwrap())
            .add_directive("eframe=warn".parse().unwrap()))
        .init();

    tracing::info!("Starting mixdock");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 560.0])
            .with_min_inner_size([800.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mixdock",
        options,
        Box::new(|cc| Ok(Box::new(MixdockApp::new(cc)))),
    )
}
