//! Multi-tile sweeps used by the `seams` command.

use std::collections::BTreeMap;
use std::time::Instant;

use tilenoise_field::{
    edge_mismatch, generate_tile, Adjacency, NoiseField, TileCoord, ValidatedSettings,
};
use tilenoise_testkit::{GenerationMetrics, SeamValidation, TileMetric};
use tracing::{debug, warn};

/// Result of generating and cross-checking a square block of tiles.
pub struct RegionSweep {
    /// Per-tile summaries in row-major tile order.
    pub tiles: Vec<TileMetric>,
    /// Aggregate timings, ranges and seam results.
    pub metrics: GenerationMetrics,
}

impl RegionSweep {
    /// Whether every shared edge stayed within tolerance.
    pub fn seamless(&self) -> bool {
        self.metrics
            .seam_validation
            .as_ref()
            .map_or(true, |s| s.seams_failed == 0)
    }
}

/// Generate `tiles × tiles` tiles of `size × size` samples and measure every
/// shared edge against `tolerance`.
///
/// Neighbouring tiles share their border samples, so each tile spans
/// `size - 1` world units.
pub fn sweep_region(
    settings: &ValidatedSettings,
    tiles: i32,
    size: usize,
    tolerance: f32,
) -> RegionSweep {
    let span = size.saturating_sub(1) as f32;
    let started = Instant::now();

    let mut fields: BTreeMap<TileCoord, NoiseField> = BTreeMap::new();
    let mut timings = Vec::new();
    for ty in 0..tiles {
        for tx in 0..tiles {
            let tile = TileCoord::new(tx, ty);
            let t0 = Instant::now();
            let field = generate_tile(tile, span, size, size, settings);
            timings.push(t0.elapsed().as_micros());
            fields.insert(tile, field);
        }
    }

    let mut diffs = Vec::new();
    for (&tile, field) in &fields {
        for adjacency in [Adjacency::PositiveX, Adjacency::PositiveY] {
            let Some(neighbour) = fields.get(&tile.neighbour(adjacency)) else {
                continue;
            };
            if let Some(diff) = edge_mismatch(field, neighbour, adjacency) {
                if diff > tolerance {
                    warn!(?tile, ?adjacency, diff, "seam exceeds tolerance");
                } else {
                    debug!(?tile, ?adjacency, diff, "seam ok");
                }
                diffs.push(diff);
            }
        }
    }

    let tile_metrics: Vec<TileMetric> = fields
        .iter()
        .map(|(&tile, field)| TileMetric::from_field(tile, field))
        .collect();

    let seams_failed = diffs.iter().filter(|&&d| d > tolerance).count();
    let seam_validation = SeamValidation {
        total_seams: diffs.len(),
        seams_valid: diffs.len() - seams_failed,
        seams_failed,
        max_seam_diff: diffs.iter().copied().fold(0.0, f32::max),
        avg_seam_diff: if diffs.is_empty() {
            0.0
        } else {
            diffs.iter().map(|&d| d as f64).sum::<f64>() / diffs.len() as f64
        },
    };

    let total_us: u128 = timings.iter().sum();
    let metrics = GenerationMetrics {
        tiles_generated: fields.len(),
        cells_generated: fields.values().map(NoiseField::len).sum(),
        avg_gen_time_us: if timings.is_empty() {
            0.0
        } else {
            total_us as f64 / timings.len() as f64
        },
        min_gen_time_us: timings.iter().copied().min().unwrap_or(0),
        max_gen_time_us: timings.iter().copied().max().unwrap_or(0),
        total_gen_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        value_min: tile_metrics.iter().map(|m| m.min).fold(f32::MAX, f32::min),
        value_max: tile_metrics.iter().map(|m| m.max).fold(f32::MIN, f32::max),
        seam_validation: Some(seam_validation),
    };

    RegionSweep {
        tiles: tile_metrics,
        metrics,
    }
}
