#![warn(missing_docs)]
//! Deterministic testing surfaces (tile fingerprints, metrics sinks, snapshots).

mod metrics;
mod snapshot;

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tilenoise_field::{NoiseField, TileCoord};

pub use metrics::*;
pub use snapshot::*;

/// CRC32 over the little-endian bit patterns of every cell.
///
/// Two fields share a checksum only if they are bit-identical (up to CRC
/// collisions), which makes it a cheap cross-run determinism check.
pub fn field_checksum(field: &NoiseField) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&(field.width() as u64).to_le_bytes());
    hasher.update(&(field.height() as u64).to_le_bytes());
    for value in field.as_slice() {
        hasher.update(&value.to_le_bytes());
    }
    hasher.finalize()
}

/// Metric snapshot for one generated tile.
#[derive(Debug, Clone, Serialize)]
pub struct TileMetric {
    /// Tile coordinates [x, y].
    pub tile: [i32; 2],
    /// Columns in the tile.
    pub width: usize,
    /// Rows in the tile.
    pub height: usize,
    /// Smallest height.
    pub min: f32,
    /// Largest height.
    pub max: f32,
    /// Mean height.
    pub mean: f32,
    /// Field checksum (hex string) for deterministic comparisons.
    pub checksum: String,
}

impl TileMetric {
    /// Summarize `field` as the tile at `tile`.
    pub fn from_field(tile: TileCoord, field: &NoiseField) -> Self {
        let (min, max, mean) = field
            .stats()
            .map(|s| (s.min, s.max, s.mean))
            .unwrap_or((0.0, 0.0, 0.0));
        Self {
            tile: [tile.x, tile.y],
            width: field.width(),
            height: field.height(),
            min,
            max,
            mean,
            checksum: format!("{:08x}", field_checksum(field)),
        }
    }
}

/// Writes tile metrics to JSON for CI artifacts.
pub struct TileMetricSink {
    file: File,
}

impl TileMetricSink {
    /// Create a sink pointed at the supplied path, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Persist the provided metrics as pretty JSON.
    pub fn write(&mut self, metrics: &[TileMetric]) -> Result<()> {
        let json = serde_json::to_string_pretty(metrics)?;
        self.file.write_all(json.as_bytes())?;
        Ok(())
    }
}
