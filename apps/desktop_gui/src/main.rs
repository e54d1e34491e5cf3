use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::{ReaderApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the content API serving the blog listing.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let startup = match args.server_url {
        Some(server_url) => StartupConfig { server_url },
        None => StartupConfig::default(),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Blog Reader")
            .with_inner_size([1080.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Blog Reader",
        options,
        Box::new(|_cc| Ok(Box::new(ReaderApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
}
