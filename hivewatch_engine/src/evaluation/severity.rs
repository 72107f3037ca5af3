//! Reduce-by-severity combinator shared by every aggregation level

use crate::results::{CellStatus, DecisionVerdict, RowStatus};

/// Ordered status scale; `Ord` runs from least to most severe
pub trait Severity: Copy + Ord {}

impl Severity for CellStatus {}
impl Severity for RowStatus {}
impl Severity for DecisionVerdict {}

/// Most severe level in `levels`, or `empty` when there are none
pub fn escalate<S, I>(levels: I, empty: S) -> S
where
    S: Severity,
    I: IntoIterator<Item = S>,
{
    levels.into_iter().max().unwrap_or(empty)
}

/// Count of each distinct level, in the order given by `scale`
pub fn tally<S, I>(levels: I, scale: &[S]) -> Vec<usize>
where
    S: Severity,
    I: IntoIterator<Item = S>,
{
    let mut counts = vec![0; scale.len()];
    for level in levels {
        if let Some(slot) = scale.iter().position(|s| *s == level) {
            counts[slot] += 1;
        }
    }
    counts
}
