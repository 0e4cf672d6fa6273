use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use floem_ramps::{
    build_palette, dispatch, plan, synchronize, Collection, Command, Group, HexColor,
    MemoryStore, ModeId, PaletteOptions, Request, Response, Step, StoreError, SyncConfig,
    SyncContext, TokenEntry, TokenId, TokenKind, TokenStore,
};
use futures::executor::block_on;
use pretty_assertions::assert_eq;

/// Forwards to a [`MemoryStore`] and counts index fetches and writes.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    lists: AtomicUsize,
    writes: AtomicUsize,
    /// When set, listing tokens fails as if the host went away.
    offline: bool,
}

#[async_trait]
impl TokenStore for CountingStore {
    async fn find_collection(&self, name: &str) -> Result<Option<Collection>, StoreError> {
        self.inner.find_collection(name).await
    }

    async fn list_tokens(&self, collection: &Collection) -> Result<Vec<TokenEntry>, StoreError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(StoreError::Unavailable("host disconnected".into()));
        }
        self.inner.list_tokens(collection).await
    }

    async fn get_value(
        &self,
        token: &TokenId,
        mode: &ModeId,
    ) -> Result<Option<HexColor>, StoreError> {
        self.inner.get_value(token, mode).await
    }

    async fn set_value(
        &self,
        token: &TokenId,
        mode: &ModeId,
        color: HexColor,
    ) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_value(token, mode, color).await
    }
}

fn palette() -> floem_ramps::Palette {
    build_palette("#639720", "#ffe600", "#007a7a", &PaletteOptions::default())
}

/// Store with a "Globals" collection holding every palette token.
fn full_store(config: &SyncConfig) -> MemoryStore {
    let store = MemoryStore::new();
    let globals = store.add_collection("g", "Globals", "light");
    for group in Group::ALL {
        for step in Step::ALL {
            store.add_token(&globals, &config.token_path(group, step), TokenKind::Color);
        }
    }
    store
}

#[test]
fn updates_existing_and_never_creates() {
    let config = SyncConfig::default();
    let store = MemoryStore::new();
    let globals = store.add_collection("g", "Globals", "light");
    store.add_token(&globals, "colors/c1/500", TokenKind::Color);

    let ctx = block_on(SyncContext::load(&store, &config)).unwrap().unwrap();
    let report = block_on(synchronize(&store, &config, &ctx, &palette()));

    assert_eq!(report.updated, 1);
    assert_eq!(report.missing, 47);
    assert_eq!(report.failed, 0);
    assert!(report.missing_paths.contains(&"colors/c1/600".to_string()));
    assert_eq!(store.token_count(), 1);
    assert_eq!(
        store.value_at("colors/c1/500", "light").map(|c| c.to_hex()),
        Some("#639720".to_string())
    );
}

#[test]
fn full_collection_is_fully_updated() {
    let config = SyncConfig::default();
    let store = full_store(&config);
    let palette = palette();

    let ctx = block_on(SyncContext::load(&store, &config)).unwrap().unwrap();
    let report = block_on(synchronize(&store, &config, &ctx, &palette));

    assert_eq!(report.updated, 48);
    assert_eq!(report.missing, 0);
    assert_eq!(report.summary(), "Variables updated: 48");
    assert_eq!(
        store.value_at("colors/neutral/500", "light"),
        Some(palette.base(Group::Neutral))
    );
}

#[test]
fn paths_match_after_normalization() {
    let config = SyncConfig::default();
    let store = MemoryStore::new();
    let globals = store.add_collection("g", "Globals", "light");
    store.add_token(&globals, " Colors / C1 / 500 ", TokenKind::Color);
    store.add_token(&globals, "colors/c2/500", TokenKind::Number);

    let ctx = block_on(SyncContext::load(&store, &config)).unwrap().unwrap();
    assert_eq!(ctx.len(), 1);
    let report = block_on(synchronize(&store, &config, &ctx, &palette()));
    assert_eq!(report.updated, 1);
    assert_eq!(store.value_at("colors/c2/500", "light"), None);
}

#[test]
fn first_accepted_collection_name_wins() {
    let config = SyncConfig::default();
    let store = MemoryStore::new();
    store.add_collection("plain", "Globals", "light");
    let preferred = store.add_collection("prefixed", "一 Globals", "dark");
    store.add_token(&preferred, "colors/c1/500", TokenKind::Color);

    let ctx = block_on(SyncContext::load(&store, &config)).unwrap().unwrap();
    assert_eq!(ctx.collection.id, "prefixed");

    block_on(synchronize(&store, &config, &ctx, &palette()));
    assert!(store.value_at("colors/c1/500", "dark").is_some());
    assert_eq!(store.value_at("colors/c1/500", "light"), None);
}

#[test]
fn no_accepted_collection() {
    let store = MemoryStore::new();
    store.add_collection("x", "Brand", "light");
    let ctx = block_on(SyncContext::load(&store, &SyncConfig::default())).unwrap();
    assert!(ctx.is_none());
}

#[test]
fn rejected_write_does_not_stop_the_pass() {
    let config = SyncConfig::default();
    let store = full_store(&config);
    store.reject_writes_to("colors/c2/300");

    let ctx = block_on(SyncContext::load(&store, &config)).unwrap().unwrap();
    let report = block_on(synchronize(&store, &config, &ctx, &palette()));

    assert_eq!(report.updated, 47);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(store.value_at("colors/neutral/950", "light").is_some());
    assert_eq!(
        report.summary(),
        "Variables updated: 47 · failed: 1"
    );
}

#[test]
fn plan_lists_only_changed_tokens() {
    let config = SyncConfig::default();
    let store = full_store(&config);
    let palette = palette();
    let ctx = block_on(SyncContext::load(&store, &config)).unwrap().unwrap();

    let before = block_on(plan(&store, &config, &ctx, &palette)).unwrap();
    assert_eq!(before.len(), 48);
    assert_eq!(before[0].path, "colors/c1/25");
    assert_eq!(before[0].before, None);

    block_on(synchronize(&store, &config, &ctx, &palette));
    let after = block_on(plan(&store, &config, &ctx, &palette)).unwrap();
    assert!(after.is_empty());

    let shifted = build_palette("#639721", "#ffe600", "#007a7a", &PaletteOptions::default());
    let changes = block_on(plan(&store, &config, &ctx, &shifted)).unwrap();
    assert!(changes.iter().any(|c| c.path == "colors/c1/500"));
    assert!(changes.iter().all(|c| !c.path.starts_with("colors/c2/")));
}

#[test]
fn store_loaded_from_json() {
    let json = r##"{
        "collections": [{"id": "g", "name": "一 Globals", "default_mode": "m1"}],
        "tokens": {
            "a": {"collection": "g", "path": "colors/c3/500", "values": {"m1": "#000000"}},
            "b": {"collection": "g", "path": "spacing/4", "kind": "number"}
        }
    }"##;
    let store = MemoryStore::from_json(json).unwrap();
    let config = SyncConfig::default();
    let ctx = block_on(SyncContext::load(&store, &config)).unwrap().unwrap();
    let report = block_on(synchronize(&store, &config, &ctx, &palette()));

    assert_eq!(report.updated, 1);
    assert_eq!(
        store.value_at("colors/c3/500", "m1").map(|c| c.to_hex()),
        Some("#007a7a".to_string())
    );
}

#[test]
fn index_is_fetched_once_per_replace() {
    let config = SyncConfig::default();
    let store = CountingStore {
        inner: full_store(&config),
        ..Default::default()
    };
    let request = Request {
        c1: "#639720".into(),
        ..Default::default()
    };

    let resp = block_on(dispatch(&store, &config, Command::ReplaceVariables(request)));

    let Response::Ok(report) = resp else {
        panic!("expected OK, got {resp:?}");
    };
    assert_eq!(report.updated, 48);
    assert_eq!(store.lists.load(Ordering::SeqCst), 1);
    assert_eq!(store.writes.load(Ordering::SeqCst), 48);
}

#[test]
fn unavailable_store_aborts_with_error() {
    let config = SyncConfig::default();
    let store = CountingStore {
        inner: full_store(&config),
        offline: true,
        ..Default::default()
    };

    let resp = block_on(dispatch(
        &store,
        &config,
        Command::ReplaceVariables(Request::default()),
    ));

    assert_eq!(
        resp,
        Response::error("Replace failed: token store unavailable: host disconnected")
    );
    assert_eq!(store.writes.load(Ordering::SeqCst), 0);
}
