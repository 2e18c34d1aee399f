//! Callee-name classification
//!
//! Maps a call's callee name to its semantic role in the counter API
//! vocabulary. Matching is substring-based and order-sensitive: rules are
//! tested in a fixed priority and the first match wins. The order is
//! load-bearing ("atomic_add_unless" must classify as AddUnless, never
//! falling through to the plain "add" rule).

use serde::{Deserialize, Serialize};

/// Semantic role of a recognized API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKind {
    Init,
    GetOrInc,
    PutOrDec,
    SetExact,
    AddUnless,
    Add,
    Sub,
}

/// Which positional argument holds the field reference vs. the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    /// Single reference argument, e.g. atomic_inc(&x)
    ReferenceOnly,
    /// Reference first, value second, e.g. atomic_set(&x, 1)
    ReferenceThenValue,
    /// Value first, reference second, e.g. atomic_add(2, &x)
    ValueThenReference,
}

/// Classify a callee name, first matching rule wins
///
/// Returns `None` for names outside the counter API vocabulary; those
/// call sites contribute no evidence.
pub fn classify_callee(name: &str) -> Option<(ApiKind, ArgShape)> {
    if name.contains("init") {
        return Some((ApiKind::Init, ArgShape::ReferenceOnly));
    }
    if name.contains("get") || name.contains("inc") {
        return Some((ApiKind::GetOrInc, ArgShape::ReferenceOnly));
    }
    if name.contains("put") || name.contains("dec") {
        return Some((ApiKind::PutOrDec, ArgShape::ReferenceOnly));
    }
    if name.contains("set") {
        return Some((ApiKind::SetExact, ArgShape::ReferenceThenValue));
    }
    if name.contains("add_unless") {
        return Some((ApiKind::AddUnless, ArgShape::ReferenceThenValue));
    }
    if name.contains("add") {
        return Some((ApiKind::Add, ArgShape::ValueThenReference));
    }
    if name.contains("sub") {
        return Some((ApiKind::Sub, ArgShape::ValueThenReference));
    }
    None
}
