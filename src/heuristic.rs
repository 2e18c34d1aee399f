//! Acceptance rule for accumulated operation histories
//!
//! A candidate reads like a genuine reference counter when its history
//! shows initialization near zero plus movement in both directions with
//! at least one canonical acquire/release step of exactly one. Statistics
//! counters fail the rule: they are never reset, or only ever move
//! upward, or move by application-specific amounts larger than one.

use crate::ops::Operation;

/// Decide whether an operation history is reference-count-like
///
/// Accepts iff all of:
/// - at least one Set is present;
/// - every Set has value <= 1;
/// - at least one positive and one negative Delta are present;
/// - some positive Delta is exactly +1 and some negative Delta exactly -1.
///
/// The rule is order-independent; one pass over the history suffices.
pub fn accepts(ops: &[Operation]) -> bool {
    let mut has_set = false;
    let mut sets_bounded = true;
    let mut has_pos = false;
    let mut has_neg = false;
    let mut has_unit_pos = false;
    let mut has_unit_neg = false;

    for op in ops {
        match *op {
            Operation::Set(n) => {
                has_set = true;
                if n > 1 {
                    sets_bounded = false;
                }
            }
            Operation::Delta(n) => {
                if n > 0 {
                    has_pos = true;
                    if n == 1 {
                        has_unit_pos = true;
                    }
                } else if n < 0 {
                    has_neg = true;
                    if n == -1 {
                        has_unit_neg = true;
                    }
                }
            }
        }
    }

    has_set && sets_bounded && has_pos && has_neg && has_unit_pos && has_unit_neg
}
