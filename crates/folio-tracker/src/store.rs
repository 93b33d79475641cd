//! Durable client-side key storage.
//!
//! Plays the role browser local storage plays for the embedded tracker: a
//! tiny string key-value store that survives restarts. Only one key is in
//! use today ([`VISITOR_ID_KEY`]); no other client state survives a reload.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};

/// The single durable key: the opaque visitor token.
pub const VISITOR_ID_KEY: &str = "portfolio_visitor_id";

pub trait VisitorStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// JSON-file-backed store. Reads the whole map on every `get` and rewrites
/// it on every `set`; the map holds one key, so this is fine.
pub struct FileVisitorStore {
    path: PathBuf,
}

impl FileVisitorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}

impl VisitorStore for FileVisitorStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string(&map)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("writing visitor store {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryVisitorStore {
    map: Mutex<HashMap<String, String>>,
}

impl VisitorStore for MemoryVisitorStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.map.lock() {
            Ok(map) => map.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}
