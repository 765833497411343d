//! Tile addressing and seam checks.
//!
//! A tile of `width × height` samples covers `span = width - 1` world units
//! when neighbouring tiles share their border samples. Tile `(tx, ty)` is
//! sampled around `(tx * span, ty * span)`.
//!
//! Because the Y octave offset subtracts the sample centre, rows run opposite
//! to world Y: the tile at `ty + 1` meets the tile at `ty` along its *last*
//! row, which coincides with the first row of the tile at `ty`.

use serde::Serialize;
use tilenoise_core::ValidatedSettings;

use crate::field::NoiseField;
use crate::generator::generate;

/// Integer tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileCoord {
    /// Tile X.
    pub x: i32,
    /// Tile Y.
    pub y: i32,
}

/// Direction from one tile to its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// The neighbour sits at `x + 1`.
    PositiveX,
    /// The neighbour sits at `y + 1`.
    PositiveY,
}

impl TileCoord {
    /// Construct a tile coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World-space sample centre for a tile covering `span` units.
    pub fn sample_centre(self, span: f32) -> [f32; 2] {
        [self.x as f32 * span, self.y as f32 * span]
    }

    /// Neighbouring tile in the given direction.
    pub fn neighbour(self, adjacency: Adjacency) -> Self {
        match adjacency {
            Adjacency::PositiveX => Self::new(self.x + 1, self.y),
            Adjacency::PositiveY => Self::new(self.x, self.y + 1),
        }
    }
}

/// Generate the field for `tile`, sampling around `tile * span`.
pub fn generate_tile(
    tile: TileCoord,
    span: f32,
    width: usize,
    height: usize,
    settings: &ValidatedSettings,
) -> NoiseField {
    generate(width, height, settings, tile.sample_centre(span))
}

/// Largest absolute difference along the shared edge of two neighbouring tiles.
///
/// `b` must be the neighbour of `a` in direction `adjacency`. Returns `None`
/// when the fields have different sizes or are empty.
pub fn edge_mismatch(a: &NoiseField, b: &NoiseField, adjacency: Adjacency) -> Option<f32> {
    if a.width() != b.width() || a.height() != b.height() || a.is_empty() {
        return None;
    }
    let (edge_a, edge_b) = match adjacency {
        Adjacency::PositiveX => (a.column(a.width() - 1), b.column(0)),
        Adjacency::PositiveY => (a.row(0).to_vec(), b.row(b.height() - 1).to_vec()),
    };
    Some(
        edge_a
            .iter()
            .zip(&edge_b)
            .map(|(l, r)| (l - r).abs())
            .fold(0.0, f32::max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilenoise_core::{NoiseSettings, NormalizeMode};

    const SIZE: usize = 17;
    const SPAN: f32 = (SIZE - 1) as f32;

    fn global_settings(seed: u64) -> ValidatedSettings {
        NoiseSettings {
            scale: 30.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            seed,
            offset: [12.0, -7.0],
            normalize_mode: NormalizeMode::Global,
        }
        .validated()
    }

    fn assert_seamless(settings: &ValidatedSettings, tile: TileCoord, adjacency: Adjacency) {
        let a = generate_tile(tile, SPAN, SIZE, SIZE, settings);
        let b = generate_tile(tile.neighbour(adjacency), SPAN, SIZE, SIZE, settings);
        let mismatch = edge_mismatch(&a, &b, adjacency).expect("same size");
        assert!(
            mismatch < 1e-4,
            "seam of {} between {:?} and its {:?} neighbour",
            mismatch,
            tile,
            adjacency
        );
    }

    #[test]
    fn global_tiles_meet_along_x() {
        let settings = global_settings(42);
        assert_seamless(&settings, TileCoord::new(0, 0), Adjacency::PositiveX);
        assert_seamless(&settings, TileCoord::new(5, 10), Adjacency::PositiveX);
        assert_seamless(&settings, TileCoord::new(-1, 3), Adjacency::PositiveX);
    }

    #[test]
    fn global_tiles_meet_along_y() {
        let settings = global_settings(42);
        assert_seamless(&settings, TileCoord::new(0, 0), Adjacency::PositiveY);
        assert_seamless(&settings, TileCoord::new(10, 5), Adjacency::PositiveY);
        assert_seamless(&settings, TileCoord::new(2, -1), Adjacency::PositiveY);
    }

    #[test]
    fn local_tiles_generally_do_not_meet() {
        let mut settings = global_settings(7).into_inner();
        settings.normalize_mode = NormalizeMode::Local;
        let settings = settings.validated();
        let worst = (0..4)
            .map(|i| {
                let tile = TileCoord::new(i, 0);
                let a = generate_tile(tile, SPAN, SIZE, SIZE, &settings);
                let b = generate_tile(
                    tile.neighbour(Adjacency::PositiveX),
                    SPAN,
                    SIZE,
                    SIZE,
                    &settings,
                );
                edge_mismatch(&a, &b, Adjacency::PositiveX).expect("same size")
            })
            .fold(0.0, f32::max);
        assert!(worst > 1e-3, "local normalization unexpectedly seamless");
    }

    #[test]
    fn sample_centre_scales_with_span() {
        assert_eq!(TileCoord::new(-2, 3).sample_centre(16.0), [-32.0, 48.0]);
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let a = NoiseField::new(4, 4);
        let b = NoiseField::new(5, 4);
        assert!(edge_mismatch(&a, &b, Adjacency::PositiveX).is_none());
        let empty = NoiseField::new(0, 0);
        assert!(edge_mismatch(&empty, &empty, Adjacency::PositiveY).is_none());
    }

    #[test]
    fn neighbours_step_one_tile() {
        let tile = TileCoord::new(3, -4);
        assert_eq!(tile.neighbour(Adjacency::PositiveX), TileCoord::new(4, -4));
        assert_eq!(tile.neighbour(Adjacency::PositiveY), TileCoord::new(3, -3));
    }
}
