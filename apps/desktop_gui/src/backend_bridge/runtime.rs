//! Backend worker: owns the tokio runtime and the serial fetch loop.
//!
//! Commands are processed one at a time in queue order, so responses reach
//! the UI in the order their commands were issued. The UI side still treats
//! every response as an unconditional overwrite (last writer wins).

use std::thread;

use client_core::ContentClient;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::PAGE_SIZE;
use crate::ui::app::StartupConfig;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, startup: StartupConfig) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::WorkerFailed {
                    detail: format!("failed to build backend runtime: {err}"),
                });
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = ContentClient::new(startup.server_url);
            tracing::info!(server_url = client.base_url(), "backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadPage { page } => {
                        tracing::info!(page, "backend: load_page");
                        match client.fetch_posts(page, PAGE_SIZE).await {
                            Ok(listing) => {
                                let _ = ui_tx.try_send(UiEvent::PageLoaded {
                                    page,
                                    posts: listing.posts,
                                    total_pages: listing.total_pages,
                                });
                            }
                            Err(err) => {
                                tracing::error!(page, "backend: load_page failed: {err:#}");
                                let _ = ui_tx.try_send(UiEvent::PageLoadFailed { page });
                            }
                        }
                    }
                }
            }
        });
    });
}
