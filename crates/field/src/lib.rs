#![warn(missing_docs)]
//! Fractal noise height field generation.
//!
//! Turns a [`ValidatedSettings`] plus an output size and a world-space sample
//! centre into a [`NoiseField`]. Every call is independent: there is no cache
//! and no shared mutable state, so tiles can be generated from any thread.

mod field;
mod generator;
mod primitive;
mod tile;

pub use field::{FieldStats, NoiseField};
pub use generator::{generate, generate_with, inverse_lerp, octave_offsets, OctaveOffsets};
pub use primitive::{PerlinPrimitive, SmoothNoise};
pub use tile::{edge_mismatch, generate_tile, Adjacency, TileCoord};

pub use tilenoise_core::{NoiseSettings, NormalizeMode, ValidatedSettings};
