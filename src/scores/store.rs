use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

use super::table::{HighScoreTable, BLOB_LEN};

/// First two bytes of a valid score region
pub const MAGIC: [u8; 2] = [0x57, 0x5a];
/// Format version; bump on any layout change
pub const VERSION: u8 = 1;
/// Total size of the persisted region: `[magic:2][version:1][table blob]`
pub const REGION_LEN: usize = 3 + BLOB_LEN;

/// Byte-addressable persistent region of fixed size.
///
/// The store reads and rewrites the region as a whole; it is small enough
/// that partial addressing buys nothing.
pub trait Storage {
    fn read_region(&mut self) -> Result<Vec<u8>>;
    fn write_region(&mut self, bytes: &[u8]) -> Result<()>;
}

/// File-backed storage region
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for FileStorage {
    fn read_region(&mut self) -> Result<Vec<u8>> {
        if !self.path.exists() {
            // Fresh device; the store treats an empty region as a header
            // mismatch and initializes it
            return Ok(Vec::new());
        }
        fs::read(&self.path).with_context(|| format!("Failed to read scores from {:?}", self.path))
    }

    fn write_region(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }
        fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))
    }
}

/// Persistence round-trip for the high-score table.
///
/// Loading validates the magic/version header; any mismatch resets the
/// table to all-empty and immediately writes the header plus empty table
/// back, so the region is valid again after a single load. Corruption never
/// surfaces to the player beyond an empty leaderboard.
pub struct ScoreStore<S: Storage> {
    storage: S,
}

impl<S: Storage> ScoreStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the table, re-initializing the region on a bad header
    pub fn load(&mut self) -> Result<HighScoreTable> {
        let bytes = self.storage.read_region()?;

        if let Some(table) = decode_region(&bytes) {
            return Ok(table);
        }

        warn!(
            region_len = bytes.len(),
            "score region invalid, resetting to an empty table"
        );
        let table = HighScoreTable::new();
        self.save(&table)?;
        Ok(table)
    }

    /// Write header and table; called right after each accepted insertion
    pub fn save(&mut self, table: &HighScoreTable) -> Result<()> {
        let mut bytes = Vec::with_capacity(REGION_LEN);
        bytes.extend_from_slice(&MAGIC);
        bytes.push(VERSION);
        bytes.extend_from_slice(&table.to_bytes());
        self.storage.write_region(&bytes)
    }
}

fn decode_region(bytes: &[u8]) -> Option<HighScoreTable> {
    if bytes.len() != REGION_LEN {
        return None;
    }
    if bytes[..2] != MAGIC || bytes[2] != VERSION {
        return None;
    }
    HighScoreTable::from_bytes(&bytes[3..])
}
