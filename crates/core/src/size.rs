//! # PR Size Analysis
//!
//! This module estimates how much effort a pull request asks of its reviewers.
//!
//! The estimate combines three signals:
//! - the PR-level line count (additions + deletions),
//! - a read time derived from per-file line counts weighted by file type,
//! - a coarse cognitive-complexity rating built from bucketed point scores.
//!
//! Everything here is pure: the same inputs always produce the same
//! [`SizeEstimate`], so estimates can be computed from already fetched data and
//! recomputed freely.

use pr_helper_developer_platforms::models::PullRequestFile;
use serde::{Deserialize, Serialize};

use crate::weights::ComplexityWeights;

#[cfg(test)]
#[path = "size_tests.rs"]
mod tests;

/// Lines per minute a reviewer reads in the reference policy.
pub const DEFAULT_READING_SPEED: f64 = 50.0;

/// Minutes of context switching charged for every changed file.
pub const DEFAULT_PER_FILE_OVERHEAD_MINUTES: f64 = 0.5;

/// Size label of a pull request based on the total number of lines changed.
///
/// The ranges are disjoint and contiguous, so exactly one label applies to any
/// line count.
///
/// # Categories
///
/// * `XS` - up to 100 lines
/// * `S` - 101-250 lines
/// * `M` - 251-500 lines
/// * `L` - 501-800 lines
/// * `XL` - more than 800 lines
///
/// # Examples
///
/// ```
/// use pr_helper_core::size::SizeLabel;
///
/// assert_eq!(SizeLabel::from_line_count(100), SizeLabel::XS);
/// assert_eq!(SizeLabel::from_line_count(101), SizeLabel::S);
/// assert_eq!(SizeLabel::from_line_count(801), SizeLabel::XL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeLabel {
    /// Up to 100 lines
    XS,
    /// 101-250 lines
    S,
    /// 251-500 lines
    M,
    /// 501-800 lines
    L,
    /// More than 800 lines
    XL,
}

impl SizeLabel {
    /// Every size label, smallest first.
    pub const ALL: [SizeLabel; 5] = [
        SizeLabel::XS,
        SizeLabel::S,
        SizeLabel::M,
        SizeLabel::L,
        SizeLabel::XL,
    ];

    /// Determine the size label from the total number of lines changed.
    pub fn from_line_count(line_count: u64) -> Self {
        match line_count {
            0..=100 => SizeLabel::XS,
            101..=250 => SizeLabel::S,
            251..=500 => SizeLabel::M,
            501..=800 => SizeLabel::L,
            _ => SizeLabel::XL,
        }
    }

    /// Short lowercase name, as used in label names.
    ///
    /// ```
    /// use pr_helper_core::size::SizeLabel;
    ///
    /// assert_eq!(SizeLabel::XS.as_str(), "xs");
    /// assert_eq!(SizeLabel::XL.as_str(), "xl");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeLabel::XS => "xs",
            SizeLabel::S => "s",
            SizeLabel::M => "m",
            SizeLabel::L => "l",
            SizeLabel::XL => "xl",
        }
    }

    /// Full label name with the given prefix, e.g. `size:m`.
    pub fn label_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.as_str())
    }
}

impl std::fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse estimate of reviewer mental effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CognitiveComplexity {
    /// Score below 3
    Low,
    /// Score of 3 or 4
    Medium,
    /// Score of 5 or 6
    High,
    /// Score of 7 or more
    VeryHigh,
}

impl CognitiveComplexity {
    /// Maps a complexity score onto its band. Lower bounds are inclusive.
    ///
    /// ```
    /// use pr_helper_core::size::CognitiveComplexity;
    ///
    /// assert_eq!(CognitiveComplexity::from_score(2), CognitiveComplexity::Low);
    /// assert_eq!(CognitiveComplexity::from_score(3), CognitiveComplexity::Medium);
    /// assert_eq!(CognitiveComplexity::from_score(5), CognitiveComplexity::High);
    /// assert_eq!(CognitiveComplexity::from_score(7), CognitiveComplexity::VeryHigh);
    /// ```
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 7 => CognitiveComplexity::VeryHigh,
            s if s >= 5 => CognitiveComplexity::High,
            s if s >= 3 => CognitiveComplexity::Medium,
            _ => CognitiveComplexity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveComplexity::Low => "low",
            CognitiveComplexity::Medium => "medium",
            CognitiveComplexity::High => "high",
            CognitiveComplexity::VeryHigh => "very-high",
        }
    }
}

impl std::fmt::Display for CognitiveComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the PR author should do about the size of the pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    /// Good size for review
    Ok,
    /// Too large, consider splitting
    Warning,
    /// Far beyond the line limit, split before review
    SplitRequired,
}

impl Recommendation {
    /// Classifies a pull request against the policy thresholds.
    ///
    /// Returns whether the PR is too large together with the recommendation.
    /// The classification keeps no state between calls.
    ///
    /// # Examples
    ///
    /// ```
    /// use pr_helper_core::size::{Recommendation, SizePolicy};
    ///
    /// let policy = SizePolicy::default(); // max_lines = 500
    /// assert_eq!(Recommendation::classify(600, 5, &policy), (true, Recommendation::Warning));
    /// assert_eq!(Recommendation::classify(751, 5, &policy), (true, Recommendation::SplitRequired));
    /// ```
    pub fn classify(total_lines: u64, read_time_minutes: u64, policy: &SizePolicy) -> (bool, Self) {
        let is_too_large =
            total_lines > policy.max_lines || read_time_minutes > policy.max_read_time_minutes;

        if !is_too_large {
            return (false, Recommendation::Ok);
        }

        // total > max * 1.5, kept in integers so the boundary is exact
        let recommendation =
            if u128::from(total_lines) * 2 > u128::from(policy.max_lines) * 3 {
                Recommendation::SplitRequired
            } else {
                Recommendation::Warning
            };

        (true, recommendation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Ok => "ok",
            Recommendation::Warning => "warning",
            Recommendation::SplitRequired => "split-required",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Thresholds and reading-speed constants used to size a pull request.
///
/// All values are expected to be positive; configuration loading rejects
/// anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizePolicy {
    /// PRs with more changed lines than this are too large
    pub max_lines: u64,

    /// PRs whose estimated read time exceeds this are too large
    pub max_read_time_minutes: u64,

    /// Weighted lines a reviewer reads per minute
    pub reading_speed_lines_per_minute: f64,

    /// Minutes of context switching charged per changed file
    pub per_file_overhead_minutes: f64,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            max_lines: 500,
            max_read_time_minutes: 10,
            reading_speed_lines_per_minute: DEFAULT_READING_SPEED,
            per_file_overhead_minutes: DEFAULT_PER_FILE_OVERHEAD_MINUTES,
        }
    }
}

/// Review-effort estimate for a pull request.
///
/// Invariants: a recommendation other than `Ok` implies `is_too_large`, and
/// `SplitRequired` implies `total_lines > max_lines * 1.5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEstimate {
    /// PR-level additions + deletions (not the weighted sum)
    pub total_lines: u64,
    pub additions: u64,
    pub deletions: u64,
    pub file_count: u64,
    pub estimated_read_time_minutes: u64,
    pub cognitive_complexity: CognitiveComplexity,
    pub is_too_large: bool,
    pub recommendation: Recommendation,
}

impl SizeEstimate {
    /// The size label matching the total line count.
    pub fn size_label(&self) -> SizeLabel {
        SizeLabel::from_line_count(self.total_lines)
    }
}

/// Sum of `changes × weight` over all files, rounded to the nearest line.
pub fn weighted_lines(files: &[PullRequestFile], weights: &ComplexityWeights) -> u64 {
    let total: f64 = files
        .iter()
        .map(|f| f.changes as f64 * weights.weight(&f.filename))
        .sum();
    total.round() as u64
}

/// Estimated read time in whole minutes.
///
/// Reading time and the per-file context-switch overhead are rounded
/// separately and then added.
pub fn estimate_read_time(weighted_lines: u64, file_count: u64, policy: &SizePolicy) -> u64 {
    let reading = (weighted_lines as f64 / policy.reading_speed_lines_per_minute).round();
    let switching = (file_count as f64 * policy.per_file_overhead_minutes).round();
    reading as u64 + switching as u64
}

/// Point score behind the cognitive-complexity rating.
///
/// Four independent contributions are summed: total size, file count, the
/// heaviest file type, and the average lines per file. The score is not capped.
pub fn complexity_score(
    files: &[PullRequestFile],
    total_lines: u64,
    weights: &ComplexityWeights,
) -> u32 {
    let file_count = files.len() as u64;
    let avg_lines_per_file = total_lines as f64 / file_count.max(1) as f64;
    let max_weight = files
        .iter()
        .map(|f| weights.weight(&f.filename))
        .fold(None, |max: Option<f64>, w| Some(max.map_or(w, |m| m.max(w))));

    let mut score = 0;

    score += match total_lines {
        l if l > 800 => 3,
        l if l > 500 => 2,
        l if l > 200 => 1,
        _ => 0,
    };

    score += match file_count {
        c if c > 20 => 3,
        c if c > 10 => 2,
        c if c > 5 => 1,
        _ => 0,
    };

    score += match max_weight {
        Some(w) if w > 1.4 => 2,
        Some(w) if w > 1.1 => 1,
        _ => 0,
    };

    score += match avg_lines_per_file {
        a if a > 100.0 => 2,
        a if a > 50.0 => 1,
        _ => 0,
    };

    score
}

/// Cognitive-complexity rating for a set of changed files.
pub fn determine_cognitive_complexity(
    files: &[PullRequestFile],
    total_lines: u64,
    weights: &ComplexityWeights,
) -> CognitiveComplexity {
    CognitiveComplexity::from_score(complexity_score(files, total_lines, weights))
}

/// Estimates the size and review effort of a pull request.
///
/// `total_additions` and `total_deletions` are the PR-level totals reported by
/// the platform. They are trusted over the per-file `changes`, which may cover
/// only part of the PR when the file list was truncated or filtered.
///
/// # Examples
///
/// ```
/// use pr_helper_core::size::{estimate_size, Recommendation, SizePolicy};
/// use pr_helper_core::weights::ComplexityWeights;
/// use pr_helper_developer_platforms::models::PullRequestFile;
///
/// let files = vec![PullRequestFile {
///     filename: "src/massive.ts".to_string(),
///     status: "modified".to_string(),
///     additions: 600,
///     deletions: 300,
///     changes: 900,
///     patch: None,
///     previous_filename: None,
/// }];
///
/// let estimate = estimate_size(&files, 600, 300, &SizePolicy::default(), &ComplexityWeights::default());
///
/// assert_eq!(estimate.total_lines, 900);
/// assert_eq!(estimate.recommendation, Recommendation::SplitRequired);
/// ```
pub fn estimate_size(
    files: &[PullRequestFile],
    total_additions: u64,
    total_deletions: u64,
    policy: &SizePolicy,
    weights: &ComplexityWeights,
) -> SizeEstimate {
    let total_lines = total_additions + total_deletions;
    let file_count = files.len() as u64;

    let read_time = estimate_read_time(weighted_lines(files, weights), file_count, policy);
    let cognitive_complexity = determine_cognitive_complexity(files, total_lines, weights);
    let (is_too_large, recommendation) = Recommendation::classify(total_lines, read_time, policy);

    SizeEstimate {
        total_lines,
        additions: total_additions,
        deletions: total_deletions,
        file_count,
        estimated_read_time_minutes: read_time,
        cognitive_complexity,
        is_too_large,
        recommendation,
    }
}
