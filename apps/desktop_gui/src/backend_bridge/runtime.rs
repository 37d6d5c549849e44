//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{execute, ClientSettings, HttpUsersApi, UsersApi};
use crossbeam_channel::{Receiver, Sender};
use tokio::runtime::Runtime;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let api = match HttpUsersApi::from_settings(&settings) {
            Ok(api) => api,
            Err(err) => {
                tracing::error!("failed to build users client: {err:#}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        tracing::info!(api_url = %settings.api_url, "backend worker ready");
        serve_commands(&runtime, &api, &cmd_rx, &ui_tx);
        tracing::info!("backend worker stopped");
    });
}

/// Runs queued commands one at a time, in the order they were issued, and
/// reports each outcome back to the UI. Returns once either side hangs up.
pub fn serve_commands<A: UsersApi>(
    runtime: &Runtime,
    api: &A,
    cmd_rx: &Receiver<BackendCommand>,
    ui_tx: &Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "backend command received");
        let outcome = runtime.block_on(execute(api, cmd.into_request()));
        if ui_tx.send(UiEvent::Remote(outcome)).is_err() {
            break;
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
