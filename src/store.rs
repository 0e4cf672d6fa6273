//! Capability interface to the host's design-token store.
//!
//! The synchronizer only needs to find a collection, list its tokens and
//! read or write one color. [`MemoryStore`] is an in-process implementation
//! used by tests and the demo.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::StoreError;

/// Opaque token identifier assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub String);

/// Opaque mode identifier (light/dark, brand A/B, …).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModeId(pub String);

/// A named token collection with the mode values are written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub default_mode: ModeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Color,
    Number,
    Text,
    Boolean,
}

/// One token as listed by the host: its id, its raw slash path and its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub id: TokenId,
    pub path: String,
    pub kind: TokenKind,
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Look up a collection by exact name.
    async fn find_collection(&self, name: &str) -> Result<Option<Collection>, StoreError>;

    /// Every token in `collection`, any type.
    async fn list_tokens(&self, collection: &Collection) -> Result<Vec<TokenEntry>, StoreError>;

    /// Current color of a token in `mode`, if it has one.
    async fn get_value(&self, token: &TokenId, mode: &ModeId)
        -> Result<Option<HexColor>, StoreError>;

    /// Overwrite the color of an existing token in `mode`.
    async fn set_value(
        &self,
        token: &TokenId,
        mode: &ModeId,
        color: HexColor,
    ) -> Result<(), StoreError>;
}

/// A token held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub collection: String,
    pub path: String,
    #[serde(default = "default_kind")]
    pub kind: TokenKind,
    /// Values per mode id.
    #[serde(default)]
    pub values: BTreeMap<String, HexColor>,
}

fn default_kind() -> TokenKind {
    TokenKind::Color
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MemoryState {
    collections: Vec<Collection>,
    tokens: BTreeMap<TokenId, StoredToken>,
    #[serde(skip)]
    rejected: HashSet<String>,
}

/// In-process token store.
///
/// Can be loaded from JSON of the shape
/// `{"collections": [...], "tokens": {"<id>": {"collection": "<collection id>", "path": "colors/c1/500", "values": {"<mode>": "#rrggbb"}}}}`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let state: MemoryState = serde_json::from_str(json)?;
        Ok(Self {
            state: Mutex::new(state),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a collection whose default mode is `mode`.
    pub fn add_collection(&self, id: &str, name: &str, mode: &str) -> Collection {
        let collection = Collection {
            id: id.to_string(),
            name: name.to_string(),
            default_mode: ModeId(mode.to_string()),
        };
        self.lock().collections.push(collection.clone());
        collection
    }

    /// Add a token with no values. Ids are derived from insertion order.
    pub fn add_token(&self, collection: &Collection, path: &str, kind: TokenKind) -> TokenId {
        let mut state = self.lock();
        let id = TokenId(format!("token:{}", state.tokens.len()));
        state.tokens.insert(
            id.clone(),
            StoredToken {
                collection: collection.id.clone(),
                path: path.to_string(),
                kind,
                values: BTreeMap::new(),
            },
        );
        id
    }

    /// Make every write to a token with exactly this path fail.
    pub fn reject_writes_to(&self, path: &str) {
        self.lock().rejected.insert(path.to_string());
    }

    /// Value of the first token with exactly this path in `mode`.
    pub fn value_at(&self, path: &str, mode: &str) -> Option<HexColor> {
        self.lock()
            .tokens
            .values()
            .find(|t| t.path == path)
            .and_then(|t| t.values.get(mode).copied())
    }

    pub fn token_count(&self) -> usize {
        self.lock().tokens.len()
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn find_collection(&self, name: &str) -> Result<Option<Collection>, StoreError> {
        Ok(self
            .lock()
            .collections
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list_tokens(&self, collection: &Collection) -> Result<Vec<TokenEntry>, StoreError> {
        let state = self.lock();
        if !state.collections.iter().any(|c| c.id == collection.id) {
            return Err(StoreError::CollectionNotFound(collection.name.clone()));
        }
        Ok(state
            .tokens
            .iter()
            .filter(|(_, t)| t.collection == collection.id)
            .map(|(id, t)| TokenEntry {
                id: id.clone(),
                path: t.path.clone(),
                kind: t.kind,
            })
            .collect())
    }

    async fn get_value(
        &self,
        token: &TokenId,
        mode: &ModeId,
    ) -> Result<Option<HexColor>, StoreError> {
        let state = self.lock();
        let stored = state
            .tokens
            .get(token)
            .ok_or_else(|| StoreError::TokenNotFound(token.0.clone()))?;
        Ok(stored.values.get(&mode.0).copied())
    }

    async fn set_value(
        &self,
        token: &TokenId,
        mode: &ModeId,
        color: HexColor,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        let MemoryState {
            tokens, rejected, ..
        } = &mut *state;
        let stored = tokens
            .get_mut(token)
            .ok_or_else(|| StoreError::TokenNotFound(token.0.clone()))?;
        if rejected.contains(&stored.path) {
            return Err(StoreError::Rejected {
                path: stored.path.clone(),
                reason: "read-only token".to_string(),
            });
        }
        stored.values.insert(mode.0.clone(), color);
        Ok(())
    }
}
