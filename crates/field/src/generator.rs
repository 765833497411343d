//! Octave accumulation and normalization.
//!
//! For each cell, `octaves` layers of the smooth primitive are summed with
//! amplitude decaying by `persistence` and frequency growing by `lacunarity`.
//! Each octave samples from its own offset, drawn from a ChaCha8 stream seeded
//! by `settings.seed`, so layers do not line up with each other.
//!
//! Two normalizations are supported:
//! - [`NormalizeMode::Local`] rescales by the tile's own min/max after the
//!   fact. Exact `[0, 1]` output, but neighbouring tiles disagree.
//! - [`NormalizeMode::Global`] divides by the amplitude sum as each cell is
//!   computed. The constant only depends on the settings, so tiles line up.

use rand::Rng;
use tilenoise_core::{octave_rng, NormalizeMode, ValidatedSettings, OCTAVE_OFFSET_RANGE};
use tracing::debug;

use crate::field::NoiseField;
use crate::primitive::{PerlinPrimitive, SmoothNoise};

/// Per-octave sample offsets for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct OctaveOffsets {
    offsets: Vec<[f32; 2]>,
    max_possible_height: f32,
}

impl OctaveOffsets {
    /// Offset `[x, y]` of each octave, in octave order.
    pub fn offsets(&self) -> &[[f32; 2]] {
        &self.offsets
    }

    /// Sum of all octave amplitudes; the largest absolute height the octave
    /// sum can reach.
    pub fn max_possible_height(&self) -> f32 {
        self.max_possible_height
    }
}

/// Derive the octave offsets for `settings` sampled around `sample_centre`.
///
/// The X offset adds the manual offset and the sample centre; the Y offset
/// subtracts both. Tiles rely on this convention to meet at their edges.
pub fn octave_offsets(settings: &ValidatedSettings, sample_centre: [f32; 2]) -> OctaveOffsets {
    let mut rng = octave_rng(settings.seed());
    let [offset_x, offset_y] = settings.offset();
    let [centre_x, centre_y] = sample_centre;

    let octaves = settings.octaves() as usize;
    let mut offsets = Vec::with_capacity(octaves);
    let mut max_possible_height = 0.0f32;
    let mut amplitude = 1.0f32;

    for _ in 0..octaves {
        let x = rng.gen_range(OCTAVE_OFFSET_RANGE) as f32 + offset_x + centre_x;
        let y = rng.gen_range(OCTAVE_OFFSET_RANGE) as f32 - offset_y - centre_y;
        offsets.push([x, y]);

        max_possible_height += amplitude;
        amplitude *= settings.persistence();
    }

    OctaveOffsets {
        offsets,
        max_possible_height,
    }
}

/// Generate a `width × height` field with the default Perlin primitive.
pub fn generate(
    width: usize,
    height: usize,
    settings: &ValidatedSettings,
    sample_centre: [f32; 2],
) -> NoiseField {
    generate_with(
        &PerlinPrimitive::new(),
        width,
        height,
        settings,
        sample_centre,
    )
}

/// Generate a `width × height` field using `noise` as the per-octave primitive.
///
/// Deterministic in all arguments. A zero dimension yields an empty field.
pub fn generate_with<N>(
    noise: &N,
    width: usize,
    height: usize,
    settings: &ValidatedSettings,
    sample_centre: [f32; 2],
) -> NoiseField
where
    N: SmoothNoise + ?Sized,
{
    let octaves = octave_offsets(settings, sample_centre);
    let mode = settings.normalize_mode();
    let scale = settings.scale();
    let persistence = settings.persistence();
    let lacunarity = settings.lacunarity();

    // Float division keeps odd sizes centred on the sample centre.
    let half_width = width as f32 / 2.0;
    let half_height = height as f32 / 2.0;

    let mut min_local = f32::MAX;
    let mut max_local = f32::MIN;
    let mut data = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let mut amplitude = 1.0f32;
            let mut frequency = 1.0f32;
            let mut noise_height = 0.0f32;

            for &[offset_x, offset_y] in octaves.offsets() {
                let sample_x = (x as f32 - half_width + offset_x) / scale * frequency;
                let sample_y = (y as f32 - half_height + offset_y) / scale * frequency;

                let value = noise.sample(sample_x, sample_y) * 2.0 - 1.0;
                noise_height += value * amplitude;

                amplitude *= persistence;
                frequency *= lacunarity;
            }

            min_local = min_local.min(noise_height);
            max_local = max_local.max(noise_height);

            data.push(match mode {
                NormalizeMode::Global => {
                    ((noise_height + 1.0) / octaves.max_possible_height()).max(0.0)
                }
                NormalizeMode::Local => noise_height,
            });
        }
    }

    if mode == NormalizeMode::Local {
        for value in &mut data {
            *value = inverse_lerp(min_local, max_local, *value);
        }
    }

    debug!(
        width,
        height,
        octaves = settings.octaves(),
        ?mode,
        min_local,
        max_local,
        "generated noise field"
    );

    NoiseField::from_raw(width, height, data)
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns 0 when `a == b`, so constant tiles normalize to all-zero.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}
