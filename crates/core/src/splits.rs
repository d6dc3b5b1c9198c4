//! # Split Ordering
//!
//! Turns a set of split suggestions for an oversized pull request into a linear
//! review order. The suggestions themselves are produced elsewhere; this module
//! only sorts them and marks where each one sits in the order.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "splits_tests.rs"]
mod tests;

/// One of the smaller pull requests an oversized PR was split into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSuggestion {
    /// 1-based position in the review order. Expected to be unique within a set.
    pub order: u32,

    /// Number of the split pull request
    pub number: u64,

    pub title: String,
}

/// Where a split sits in the review order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPosition {
    First,
    Last,
    Nth(u32),
}

impl std::fmt::Display for ReviewPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewPosition::First => write!(f, "first"),
            ReviewPosition::Last => write!(f, "last"),
            ReviewPosition::Nth(order) => write!(f, "#{}", order),
        }
    }
}

/// A split together with its position in the review order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSplit {
    pub split: SplitSuggestion,
    pub position: ReviewPosition,
}

/// Sorts splits by `order` and assigns each its review position.
///
/// `order == 1` is reviewed first and `order == splits.len()` last; anything
/// else is reported by its order number. The sort is stable, so splits sharing
/// an `order` keep their input order. Callers should not rely on that, as
/// duplicate orders are not a meaningful review order.
///
/// # Examples
///
/// ```
/// use pr_helper_core::splits::{order_splits, ReviewPosition, SplitSuggestion};
///
/// let splits = vec![
///     SplitSuggestion { order: 2, number: 11, title: "Wire it up".to_string() },
///     SplitSuggestion { order: 1, number: 10, title: "Add the model".to_string() },
/// ];
///
/// let ordered = order_splits(&splits);
/// assert_eq!(ordered[0].split.number, 10);
/// assert_eq!(ordered[0].position, ReviewPosition::First);
/// assert_eq!(ordered[1].position, ReviewPosition::Last);
/// ```
pub fn order_splits(splits: &[SplitSuggestion]) -> Vec<OrderedSplit> {
    let count = splits.len();
    let mut sorted = splits.to_vec();
    sorted.sort_by_key(|s| s.order);

    sorted
        .into_iter()
        .map(|split| {
            let position = if split.order == 1 {
                ReviewPosition::First
            } else if split.order as usize == count {
                ReviewPosition::Last
            } else {
                ReviewPosition::Nth(split.order)
            };
            OrderedSplit { split, position }
        })
        .collect()
}

/// Renders the review order as `#a → #b → #c`.
pub fn review_order_line(ordered: &[OrderedSplit]) -> String {
    ordered
        .iter()
        .map(|o| format!("#{}", o.split.number))
        .collect::<Vec<_>>()
        .join(" → ")
}
