use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tilenoise_core::{settings_from_file, NoiseSettings, NormalizeMode, ValidatedSettings};
use tracing::warn;

/// Normalization mode as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Local,
    Global,
}

impl From<ModeArg> for NormalizeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Local => NormalizeMode::Local,
            ModeArg::Global => NormalizeMode::Global,
        }
    }
}

/// Noise configuration flags shared by every subcommand.
///
/// Values come from `--settings` (TOML or JSON) when given, then individual
/// flags override them.
#[derive(Args, Debug, Clone, Default)]
pub struct NoiseArgs {
    /// Settings file (TOML, or JSON with a .json extension)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Seed for the octave offsets
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Sampling zoom factor
    #[arg(long)]
    pub scale: Option<f32>,

    /// Number of octaves
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Amplitude decay per octave (0..1)
    #[arg(long)]
    pub persistence: Option<f32>,

    /// Frequency growth per octave (>= 1)
    #[arg(long)]
    pub lacunarity: Option<f32>,

    /// Manual world-space shift as X,Y
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    pub offset: Option<[f32; 2]>,

    /// Normalization mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

impl NoiseArgs {
    /// Merge the settings file and flag overrides, then validate.
    pub fn resolve(&self) -> Result<ValidatedSettings> {
        let mut settings = match &self.settings {
            Some(path) => settings_from_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => NoiseSettings::default(),
        };
        self.apply_overrides(&mut settings);
        if !settings.is_valid() {
            warn!(?settings, "noise settings out of range; clamping");
        }
        Ok(settings.validated())
    }

    fn apply_overrides(&self, settings: &mut NoiseSettings) {
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        if let Some(octaves) = self.octaves {
            settings.octaves = octaves;
        }
        if let Some(persistence) = self.persistence {
            settings.persistence = persistence;
        }
        if let Some(lacunarity) = self.lacunarity {
            settings.lacunarity = lacunarity;
        }
        if let Some(offset) = self.offset {
            settings.offset = offset;
        }
        if let Some(mode) = self.mode {
            settings.normalize_mode = mode.into();
        }
    }
}

/// Parse an `X,Y` pair of floats.
pub fn parse_pair(raw: &str) -> Result<[f32; 2], String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{raw}'"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid X '{}': {e}", x.trim()))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid Y '{}': {e}", y.trim()))?;
    Ok([x, y])
}
