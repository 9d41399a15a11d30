//! Snapshot persistence
//!
//! The only durability the engine needs: the two keyed tables (items
//! and users) serialized as one JSON document. Loading is best-effort —
//! a missing file just means "start from seed data".
use crate::auction::AuctionItem;
use crate::registry::User;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<AuctionItem>,
    pub users: Vec<User>,
}

impl Snapshot {
    /// Load a snapshot, or `None` if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
        Ok(Some(snapshot))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        Ok(())
    }
}
