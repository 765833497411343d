//! JSON golden files for regression tests.
//!
//! A [`Golden`] compares a serializable value against a checked-in file. The
//! value is rendered as pretty JSON with object keys sorted, so field order in
//! the Rust types never causes spurious diffs. Set `TILENOISE_UPDATE_SNAPSHOTS=1`
//! to rewrite the files from the current output instead.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that switches goldens into rewrite mode.
pub const UPDATE_SNAPSHOTS_ENV: &str = "TILENOISE_UPDATE_SNAPSHOTS";

/// A golden file on disk.
#[derive(Debug, Clone)]
pub struct Golden {
    path: PathBuf,
    update: bool,
}

impl Golden {
    /// Golden at `path`; rewrite mode follows [`UPDATE_SNAPSHOTS_ENV`].
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let update = std::env::var(UPDATE_SNAPSHOTS_ENV)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            path: path.into(),
            update,
        }
    }

    /// Force rewrite mode on or off.
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Path of the golden file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compare `value` against the golden, or rewrite it in update mode.
    pub fn check<T: Serialize>(&self, value: &T) -> Result<()> {
        let actual = render(value)?;
        if self.update {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            }
            return fs::write(&self.path, actual)
                .with_context(|| format!("writing golden {}", self.path.display()));
        }

        let expected = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "golden {} not found; set {UPDATE_SNAPSHOTS_ENV}=1 to create it",
                self.path.display()
            )
        })?;
        if let Some((line, want, got)) = first_difference(&expected, &actual) {
            bail!(
                "golden {} differs at line {line}: expected `{want}`, got `{got}` \
                 (set {UPDATE_SNAPSHOTS_ENV}=1 to accept)",
                self.path.display()
            );
        }
        Ok(())
    }
}

/// Shorthand for `Golden::at(path).check(value)`.
pub fn assert_json_snapshot<T: Serialize>(path: impl Into<PathBuf>, value: &T) -> Result<()> {
    Golden::at(path).check(value)
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    let value = sort_keys(serde_json::to_value(value).context("serializing golden value")?);
    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect::<Map<_, _>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// 1-based line number and contents of the first line that differs.
fn first_difference<'a>(
    expected: &'a str,
    actual: &'a str,
) -> Option<(usize, &'a str, &'a str)> {
    let mut want = expected.lines();
    let mut got = actual.lines();
    for line in 1.. {
        match (want.next(), got.next()) {
            (None, None) => return None,
            (w, g) if w == g => continue,
            (w, g) => return Some((line, w.unwrap_or("<eof>"), g.unwrap_or("<eof>"))),
        }
    }
    None
}
