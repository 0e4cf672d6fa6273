//! Update-only synchronization of a palette into a host token collection.
//!
//! Tokens are matched by normalized path (`colors/{group}/{step}`). Existing
//! tokens are overwritten in the collection's default mode; missing tokens
//! are counted and never created.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::color::HexColor;
use crate::error::StoreError;
use crate::palette::{Group, Palette};
use crate::ramp::Step;
use crate::store::{Collection, TokenId, TokenKind, TokenStore};

/// Where the palette lives in the host store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// Accepted collection names, tried in order.
    pub collection_names: Vec<String>,
    /// First path segment of every palette token.
    pub path_root: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            collection_names: vec!["一 Globals".to_string(), "Globals".to_string()],
            path_root: "colors".to_string(),
        }
    }
}

impl SyncConfig {
    /// Normalized path of one palette entry.
    pub fn token_path(&self, group: Group, step: Step) -> String {
        normalize_path(&format!("{}/{}/{}", self.path_root, group.key(), step.value()))
    }
}

/// Collapse whitespace around `/`, trim and lower-case.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("/")
        .trim()
        .to_lowercase()
}

/// Everything one sync pass needs, fetched once up front.
#[derive(Debug, Clone)]
pub struct SyncContext {
    pub collection: Collection,
    index: HashMap<String, TokenId>,
}

impl SyncContext {
    /// Find the target collection and index its color tokens by normalized path.
    ///
    /// Returns `Ok(None)` when none of the configured collections exist.
    pub async fn load<S: TokenStore + ?Sized>(
        store: &S,
        config: &SyncConfig,
    ) -> Result<Option<Self>, StoreError> {
        let mut collection = None;
        for name in &config.collection_names {
            if let Some(found) = store.find_collection(name).await? {
                collection = Some(found);
                break;
            }
        }
        let Some(collection) = collection else {
            debug!(names = ?config.collection_names, "no token collection found");
            return Ok(None);
        };

        let tokens = store.list_tokens(&collection).await?;
        let total = tokens.len();
        let mut index = HashMap::with_capacity(total);
        for token in tokens {
            if token.kind != TokenKind::Color {
                continue;
            }
            // First token wins when two paths normalize to the same key.
            index.entry(normalize_path(&token.path)).or_insert(token.id);
        }
        debug!(
            collection = %collection.name,
            tokens = total,
            color_tokens = index.len(),
            "indexed token collection"
        );

        Ok(Some(Self { collection, index }))
    }

    pub fn lookup(&self, normalized_path: &str) -> Option<&TokenId> {
        self.index.get(normalized_path)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Aggregate outcome of a sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub updated: usize,
    pub missing: usize,
    /// Matched tokens whose write was rejected.
    pub failed: usize,
    /// Paths that were not found, in palette order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl SyncReport {
    /// Human-readable one-liner for a host notification.
    pub fn summary(&self) -> String {
        let mut msg = format!("Variables updated: {}", self.updated);
        if self.missing > 0 {
            msg.push_str(&format!(" · not found: {} (not created)", self.missing));
        }
        if self.failed > 0 {
            msg.push_str(&format!(" · failed: {}", self.failed));
        }
        msg
    }
}

/// Write every palette entry to its existing token.
///
/// All 48 entries are attempted even when some writes fail.
pub async fn synchronize<S: TokenStore + ?Sized>(
    store: &S,
    config: &SyncConfig,
    ctx: &SyncContext,
    palette: &Palette,
) -> SyncReport {
    let mode = &ctx.collection.default_mode;
    let mut report = SyncReport::default();

    for (group, step, color) in palette.entries() {
        let path = config.token_path(group, step);
        let Some(id) = ctx.lookup(&path) else {
            report.missing += 1;
            report.missing_paths.push(path);
            continue;
        };
        match store.set_value(id, mode, color).await {
            Ok(()) => report.updated += 1,
            Err(err) => {
                warn!(%path, error = %err, "token update failed");
                report.failed += 1;
                report.errors.push(err.to_string());
            }
        }
    }

    info!(
        collection = %ctx.collection.name,
        updated = report.updated,
        missing = report.missing,
        failed = report.failed,
        "palette synchronized"
    );
    report
}

/// A value a sync pass would change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenChange {
    pub path: String,
    pub before: Option<HexColor>,
    pub after: HexColor,
}

/// Dry run: the matched tokens whose current value differs from the palette.
pub async fn plan<S: TokenStore + ?Sized>(
    store: &S,
    config: &SyncConfig,
    ctx: &SyncContext,
    palette: &Palette,
) -> Result<Vec<TokenChange>, StoreError> {
    let mode = &ctx.collection.default_mode;
    let mut changes = Vec::new();
    for (group, step, color) in palette.entries() {
        let path = config.token_path(group, step);
        let Some(id) = ctx.lookup(&path) else {
            continue;
        };
        let before = store.get_value(id, mode).await?;
        if before != Some(color) {
            changes.push(TokenChange {
                path,
                before,
                after: color,
            });
        }
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_normalization() {
        assert_eq!(normalize_path("Colors / C1 / 500"), "colors/c1/500");
        assert_eq!(normalize_path("  colors/neutral/25  "), "colors/neutral/25");
        assert_eq!(normalize_path("colors/c1 /500"), "colors/c1/500");
    }

    #[test]
    fn config_builds_paths() {
        let config = SyncConfig::default();
        assert_eq!(config.token_path(Group::Neutral, Step::S950), "colors/neutral/950");
        let custom = SyncConfig {
            path_root: "Brand ".into(),
            ..Default::default()
        };
        assert_eq!(custom.token_path(Group::C2, Step::S25), "brand/c2/25");
    }

    #[test]
    fn summary_mentions_missing() {
        let report = SyncReport {
            updated: 47,
            missing: 1,
            ..Default::default()
        };
        assert_eq!(report.summary(), "Variables updated: 47 · not found: 1 (not created)");
    }

    #[test]
    fn config_from_json_keeps_defaults() {
        let config: SyncConfig = serde_json::from_str(r#"{"pathRoot":"tokens"}"#).unwrap();
        assert_eq!(config.path_root, "tokens");
        assert_eq!(config.collection_names, SyncConfig::default().collection_names);
    }
}
