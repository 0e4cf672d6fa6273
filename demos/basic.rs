//! Standalone demo: opens the palette editor against an in-memory token store.
//!
//! The store holds every `colors/*` token except `colors/c3/950`, so
//! "Replace variables" reports one missing token. Set `RUST_LOG=debug` to
//! see the sync trace.

use std::sync::Arc;

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_ramps::{
    dispatch, palette_editor, Command, Group, MemoryStore, PaletteSignals, Response, Step,
    SyncConfig, TokenKind,
};
use futures::executor::block_on;
use tracing_subscriber::EnvFilter;

fn seeded_store(config: &SyncConfig) -> MemoryStore {
    let store = MemoryStore::new();
    let globals = store.add_collection("globals", "一 Globals", "light");
    for group in Group::ALL {
        for step in Step::ALL {
            if group == Group::C3 && step == Step::S950 {
                continue;
            }
            store.add_token(&globals, &config.token_path(group, step), TokenKind::Color);
        }
    }
    store
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = SyncConfig::default();
    let store = Arc::new(seeded_store(&config));
    let state = PaletteSignals::default();

    let on_replace = move |request| {
        match block_on(dispatch(
            store.as_ref(),
            &config,
            Command::ReplaceVariables(request),
        )) {
            Response::Ok(report) => tracing::info!("{}", report.summary()),
            other => tracing::warn!(response = %other.to_json(), "replace did not complete"),
        }
    };

    floem::Application::new()
        .window(
            move |_| {
                palette_editor(state, on_replace)
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((960.0, 760.0))
                    .title("floem-ramps"),
            ),
        )
        .run();
}
