//! Noise parameter bundle and its validation.
//!
//! [`NoiseSettings`] is the raw, editable form that tooling and config files
//! deal with. Generation only ever sees a [`ValidatedSettings`], which can
//! only be obtained by running the clamping pass, so degenerate parameters
//! (zero scale, zero octaves) never reach the sampling loop.

use serde::{Deserialize, Serialize};

/// Smallest legal sampling scale.
pub const MIN_SCALE: f32 = 0.01;

/// Smallest legal octave count.
pub const MIN_OCTAVES: u32 = 1;

/// Smallest legal lacunarity. Below 1 the frequency would shrink per octave.
pub const MIN_LACUNARITY: f32 = 1.0;

/// How accumulated octave heights are mapped into the output range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizeMode {
    /// Rescale by this tile's observed min/max. Output spans exactly `[0, 1]`,
    /// but adjacent tiles do not line up.
    #[default]
    Local,
    /// Rescale by the theoretical amplitude sum. Comparable across tiles
    /// generated with the same settings.
    Global,
}

/// Raw noise configuration as authored by a user or loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Sampling zoom factor; larger values stretch features out.
    pub scale: f32,
    /// Number of noise layers summed together.
    pub octaves: u32,
    /// Amplitude multiplier applied per octave.
    pub persistence: f32,
    /// Frequency multiplier applied per octave.
    pub lacunarity: f32,
    /// Seed for the octave offset sequence.
    pub seed: u64,
    /// Manual world-space shift `[x, y]`.
    pub offset: [f32; 2],
    /// Output normalization strategy.
    pub normalize_mode: NormalizeMode,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            scale: 50.0,
            octaves: 6,
            persistence: 0.6,
            lacunarity: 2.0,
            seed: 0,
            offset: [0.0, 0.0],
            normalize_mode: NormalizeMode::Local,
        }
    }
}

impl NoiseSettings {
    /// Clamp every field into its legal range.
    ///
    /// Out-of-range input is corrected silently; calling this twice is the
    /// same as calling it once.
    pub fn validate(&mut self) {
        // NaN collapses to the floor; infinities clamp to the finite extremes.
        self.scale = clamp_or(self.scale, MIN_SCALE, f32::MAX, MIN_SCALE);
        self.octaves = self.octaves.max(MIN_OCTAVES);
        self.lacunarity = clamp_or(self.lacunarity, MIN_LACUNARITY, f32::MAX, MIN_LACUNARITY);
        self.persistence = clamp_or(self.persistence, 0.0, 1.0, 0.0);
        for component in &mut self.offset {
            if !component.is_finite() {
                *component = 0.0;
            }
        }
    }

    /// Validate and freeze these settings for generation.
    pub fn validated(mut self) -> ValidatedSettings {
        self.validate();
        ValidatedSettings { inner: self }
    }

    /// Whether every field already sits inside its legal range.
    pub fn is_valid(&self) -> bool {
        (MIN_SCALE..=f32::MAX).contains(&self.scale)
            && self.octaves >= MIN_OCTAVES
            && (MIN_LACUNARITY..=f32::MAX).contains(&self.lacunarity)
            && (0.0..=1.0).contains(&self.persistence)
            && self.offset.iter().all(|c| c.is_finite())
    }
}

fn clamp_or(value: f32, min: f32, max: f32, nan: f32) -> f32 {
    if value.is_nan() {
        nan
    } else {
        value.clamp(min, max)
    }
}

/// Settings that have passed [`NoiseSettings::validate`].
///
/// Immutable once built, so a single instance can be shared between threads
/// generating different tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSettings {
    inner: NoiseSettings,
}

impl ValidatedSettings {
    /// Sampling zoom factor (`>= MIN_SCALE`).
    pub fn scale(&self) -> f32 {
        self.inner.scale
    }

    /// Octave count (`>= 1`).
    pub fn octaves(&self) -> u32 {
        self.inner.octaves
    }

    /// Amplitude decay per octave, in `[0, 1]`.
    pub fn persistence(&self) -> f32 {
        self.inner.persistence
    }

    /// Frequency growth per octave (`>= 1`).
    pub fn lacunarity(&self) -> f32 {
        self.inner.lacunarity
    }

    /// Seed for the octave offset sequence.
    pub fn seed(&self) -> u64 {
        self.inner.seed
    }

    /// Manual world-space shift.
    pub fn offset(&self) -> [f32; 2] {
        self.inner.offset
    }

    /// Output normalization strategy.
    pub fn normalize_mode(&self) -> NormalizeMode {
        self.inner.normalize_mode
    }

    /// Borrow the underlying field values.
    pub fn as_settings(&self) -> &NoiseSettings {
        &self.inner
    }

    /// Unwrap back into editable settings.
    pub fn into_inner(self) -> NoiseSettings {
        self.inner
    }
}

impl Default for ValidatedSettings {
    fn default() -> Self {
        NoiseSettings::default().validated()
    }
}

impl From<NoiseSettings> for ValidatedSettings {
    fn from(settings: NoiseSettings) -> Self {
        settings.validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_clamps_degenerate_values() {
        let mut settings = NoiseSettings {
            scale: 0.0,
            octaves: 0,
            lacunarity: 0.0,
            persistence: -1.0,
            ..Default::default()
        };
        settings.validate();
        assert!(settings.scale >= 0.01);
        assert!(settings.octaves >= 1);
        assert!(settings.lacunarity >= 1.0);
        assert_eq!(settings.persistence, 0.0);
    }

    #[test]
    fn validate_clamps_persistence_above_one() {
        let mut settings = NoiseSettings {
            persistence: 3.5,
            ..Default::default()
        };
        settings.validate();
        assert_eq!(settings.persistence, 1.0);
    }

    #[test]
    fn validate_is_idempotent() {
        let mut once = NoiseSettings {
            scale: -4.0,
            octaves: 0,
            lacunarity: 0.25,
            persistence: 2.0,
            ..Default::default()
        };
        once.validate();
        let mut twice = once.clone();
        twice.validate();
        assert_eq!(once, twice);
    }

    #[test]
    fn validate_leaves_legal_values_alone() {
        let legal = NoiseSettings {
            scale: 12.5,
            octaves: 4,
            persistence: 0.45,
            lacunarity: 2.2,
            seed: 77,
            offset: [3.0, -9.0],
            normalize_mode: NormalizeMode::Global,
        };
        let mut settings = legal.clone();
        settings.validate();
        assert_eq!(settings, legal);
    }

    #[test]
    fn validate_handles_nan() {
        let mut settings = NoiseSettings {
            scale: f32::NAN,
            lacunarity: f32::NAN,
            persistence: f32::NAN,
            ..Default::default()
        };
        settings.validate();
        assert_eq!(settings.scale, MIN_SCALE);
        assert_eq!(settings.lacunarity, MIN_LACUNARITY);
        assert_eq!(settings.persistence, 0.0);
        assert!(settings.is_valid());
    }

    #[test]
    fn validate_handles_infinities() {
        let mut settings = NoiseSettings {
            scale: f32::INFINITY,
            lacunarity: f32::INFINITY,
            persistence: f32::NEG_INFINITY,
            offset: [f32::NAN, f32::NEG_INFINITY],
            ..Default::default()
        };
        assert!(!settings.is_valid());
        settings.validate();
        assert_eq!(settings.scale, f32::MAX);
        assert_eq!(settings.lacunarity, f32::MAX);
        assert_eq!(settings.persistence, 0.0);
        assert_eq!(settings.offset, [0.0, 0.0]);
        assert!(settings.is_valid());

        let mut negative = NoiseSettings {
            scale: f32::NEG_INFINITY,
            lacunarity: f32::NEG_INFINITY,
            offset: [3.0, f32::INFINITY],
            ..Default::default()
        };
        negative.validate();
        assert_eq!(negative.scale, MIN_SCALE);
        assert_eq!(negative.lacunarity, MIN_LACUNARITY);
        assert_eq!(negative.offset, [3.0, 0.0]);
    }

    #[test]
    fn validated_settings_expose_clamped_fields() {
        let validated = NoiseSettings {
            scale: 0.0,
            octaves: 0,
            seed: 5,
            normalize_mode: NormalizeMode::Global,
            ..Default::default()
        }
        .validated();
        assert_eq!(validated.scale(), MIN_SCALE);
        assert_eq!(validated.octaves(), 1);
        assert_eq!(validated.seed(), 5);
        assert_eq!(validated.normalize_mode(), NormalizeMode::Global);
        assert!(validated.as_settings().is_valid());
    }

    #[test]
    fn defaults_are_already_valid() {
        assert!(NoiseSettings::default().is_valid());
        assert_eq!(
            ValidatedSettings::default().into_inner(),
            NoiseSettings::default()
        );
    }

    #[test]
    fn normalize_mode_serializes_lowercase() {
        let json = serde_json::to_string(&NormalizeMode::Global).expect("serialize");
        assert_eq!(json, "\"global\"");
        let mode: NormalizeMode = serde_json::from_str("\"local\"").expect("deserialize");
        assert_eq!(mode, NormalizeMode::Local);
    }

    #[test]
    fn validated_settings_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidatedSettings>();
    }
}
