//! # Complexity Weights
//!
//! Relative reading difficulty per file type. A weight of `1.0` means a changed
//! line costs a reviewer the baseline effort; higher weights make the line count
//! for more when estimating read time and cognitive load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "weights_tests.rs"]
mod tests;

/// Weight used for files whose extension is missing or not in the table.
pub const DEFAULT_COMPLEXITY_WEIGHT: f64 = 1.0;

/// Built-in weights, keyed by lowercase extension.
const BUILT_IN_WEIGHTS: [(&str, f64); 38] = [
    // Systems languages
    ("rs", 1.5),
    ("c", 1.4),
    ("h", 1.4),
    ("cc", 1.4),
    ("cpp", 1.4),
    ("hpp", 1.4),
    ("zig", 1.4),
    // Typed application languages
    ("scala", 1.3),
    ("hs", 1.3),
    ("go", 1.2),
    ("java", 1.2),
    ("kt", 1.2),
    ("swift", 1.2),
    ("cs", 1.2),
    ("ts", 1.2),
    ("tsx", 1.2),
    ("sql", 1.2),
    // Scripting languages
    ("js", 1.1),
    ("jsx", 1.1),
    ("mjs", 1.1),
    ("py", 1.1),
    ("rb", 1.1),
    ("php", 1.1),
    ("sh", 1.1),
    // Markup, styles and data
    ("html", 0.8),
    ("css", 0.8),
    ("scss", 0.8),
    ("xml", 0.7),
    ("toml", 0.7),
    ("yaml", 0.7),
    ("yml", 0.7),
    ("json", 0.6),
    ("csv", 0.5),
    ("md", 0.5),
    ("txt", 0.5),
    ("rst", 0.5),
    // Generated files are barely read
    ("lock", 0.2),
    ("snap", 0.3),
];

/// Returns the lowercase text after the last `.` in `filename`.
///
/// Returns `None` when the name has no dot or ends with one.
///
/// # Examples
///
/// ```
/// use pr_helper_core::weights::extension_of;
///
/// assert_eq!(extension_of("src/Main.RS"), Some("rs".to_string()));
/// assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
/// assert_eq!(extension_of("Makefile"), None);
/// ```
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Lookup table from file extension to reading-difficulty multiplier.
///
/// # Examples
///
/// ```
/// use pr_helper_core::weights::{ComplexityWeights, DEFAULT_COMPLEXITY_WEIGHT};
///
/// let weights = ComplexityWeights::default();
/// assert!(weights.weight("src/main.rs") > weights.weight("src/main.js"));
/// assert_eq!(weights.weight("LICENSE"), DEFAULT_COMPLEXITY_WEIGHT);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplexityWeights {
    weights: BTreeMap<String, f64>,
}

impl ComplexityWeights {
    /// Creates a table with only the given entries. Every other extension falls
    /// back to [`DEFAULT_COMPLEXITY_WEIGHT`].
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Self {
            weights: entries
                .into_iter()
                .map(|(ext, weight)| (ext.as_ref().to_lowercase(), weight))
                .collect(),
        }
    }

    /// Returns a copy of this table with `overrides` added or replacing entries.
    pub fn with_overrides<'a, I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let mut weights = self.weights.clone();
        for (ext, weight) in overrides {
            weights.insert(ext.to_lowercase(), *weight);
        }
        Self { weights }
    }

    /// Weight for a file, looked up by its extension.
    pub fn weight(&self, filename: &str) -> f64 {
        extension_of(filename)
            .and_then(|ext| self.weights.get(&ext).copied())
            .unwrap_or(DEFAULT_COMPLEXITY_WEIGHT)
    }
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self::from_entries(BUILT_IN_WEIGHTS)
    }
}
