//! Smooth 2D noise primitive evaluated once per octave.
//!
//! Output must be continuous, C1-smooth and in `[0, 1]`. Bit-identical fields
//! across implementations require both the same primitive and the same octave
//! offset sequence; only the structural properties (range, continuity,
//! determinism) hold otherwise.

use noise::{NoiseFn, Perlin};

/// Lattice period of `noise`'s Perlin: its permutation hash masks each
/// lattice index with `0xff`.
const PERLIN_PERIOD: f64 = 256.0;

/// A continuous 2D noise source returning values in `[0, 1]`.
pub trait SmoothNoise {
    /// Evaluate the noise at `(x, y)`.
    fn sample(&self, x: f32, y: f32) -> f32;
}

impl<F> SmoothNoise for F
where
    F: Fn(f32, f32) -> f32,
{
    fn sample(&self, x: f32, y: f32) -> f32 {
        self(x, y)
    }
}

/// Classic gradient (Perlin) noise remapped from `[-1, 1]` into `[0, 1]`.
///
/// The permutation table uses a fixed seed; variation between fields comes
/// from the per-octave offsets, not from reseeding the primitive.
#[derive(Clone, Debug)]
pub struct PerlinPrimitive {
    perlin: Perlin,
}

impl PerlinPrimitive {
    /// Primitive using the default permutation seed.
    pub fn new() -> Self {
        Self::with_seed(Perlin::DEFAULT_SEED)
    }

    /// Primitive with a custom permutation seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl Default for PerlinPrimitive {
    fn default() -> Self {
        Self::new()
    }
}

impl SmoothNoise for PerlinPrimitive {
    fn sample(&self, x: f32, y: f32) -> f32 {
        // Non-finite coordinates come from frequency overflow at high octaves.
        if !x.is_finite() || !y.is_finite() {
            return 0.5;
        }
        // Large coordinates overflow the lattice index cast inside `noise`;
        // wrapping by one period keeps the value and stays in range.
        let x = (x as f64).rem_euclid(PERLIN_PERIOD);
        let y = (y as f64).rem_euclid(PERLIN_PERIOD);
        let value = self.perlin.get([x, y]);
        (((value + 1.0) * 0.5) as f32).clamp(0.0, 1.0)
    }
}
