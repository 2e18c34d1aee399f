//! Candidate field registry
//!
//! Records which declared fields are reference-count candidates and
//! assigns each a stable identity keyed by its declaration location. The
//! registry is the sole mechanism by which call-site arguments are later
//! correlated back to a field.

use crate::facts::FieldDeclFact;
use crate::filter::CategoryFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic category of a counter-like C type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    AtomicInt,
    AtomicLongInt,
    Atomic64Int,
    RefcountStruct,
    KrefStruct,
}

impl TypeCategory {
    /// All recognized categories, in report order
    pub const ALL: [TypeCategory; 5] = [
        TypeCategory::AtomicInt,
        TypeCategory::AtomicLongInt,
        TypeCategory::Atomic64Int,
        TypeCategory::RefcountStruct,
        TypeCategory::KrefStruct,
    ];

    /// Map a spelled C type to its category
    ///
    /// Returns `None` for types the tool does not track.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name.trim() {
            "atomic_t" => Some(TypeCategory::AtomicInt),
            "atomic_long_t" => Some(TypeCategory::AtomicLongInt),
            "atomic64_t" => Some(TypeCategory::Atomic64Int),
            "refcount_t" => Some(TypeCategory::RefcountStruct),
            "kref" | "struct kref" => Some(TypeCategory::KrefStruct),
            _ => None,
        }
    }

    /// C spelling used in reports
    pub fn c_name(&self) -> &'static str {
        match self {
            TypeCategory::AtomicInt => "atomic_t",
            TypeCategory::AtomicLongInt => "atomic_long_t",
            TypeCategory::Atomic64Int => "atomic64_t",
            TypeCategory::RefcountStruct => "refcount_t",
            TypeCategory::KrefStruct => "kref",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so table columns can width-format the category
        f.pad(self.c_name())
    }
}

/// Record types whose own internal fields must never register as
/// candidates (a counter implementation's member is not a counter user)
const WRAPPER_TYPES: [&str; 2] = ["kref", "refcount_t"];

fn is_wrapper_type(name: &str) -> bool {
    let name = name.trim();
    let name = name.strip_prefix("struct ").unwrap_or(name);
    WRAPPER_TYPES.contains(&name)
}

/// Stable identity of a candidate: the declaration's file and line
///
/// Declarations sharing a file and line are the same candidate; distinct
/// locations are never merged, even when the field names collide.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FieldId {
    pub file: String,
    pub line: u32,
}

impl FieldId {
    pub fn new(file: &str, line: u32) -> Self {
        Self {
            file: file.to_string(),
            line,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A declared field tracked as a reference-count candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateField {
    pub id: FieldId,
    /// Declared name (diagnostic only, never part of the identity)
    pub name: String,
    pub category: TypeCategory,
}

/// Registry of candidate fields keyed by declaration location
///
/// `BTreeMap` storage keeps lookup within the O(log n) bound and gives
/// every report a deterministic candidate order.
#[derive(Debug, Default)]
pub struct CandidateRegistry {
    fields: BTreeMap<FieldId, CandidateField>,
    categories: CategoryFilter,
}

impl CandidateRegistry {
    /// Create a registry accepting all five categories
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry restricted to a category subset
    pub fn with_categories(categories: CategoryFilter) -> Self {
        Self {
            fields: BTreeMap::new(),
            categories,
        }
    }

    /// Register a field declaration, returning its candidate entry
    ///
    /// Returns `None` when the declared type is not one of the recognized
    /// categories, the category is filtered out, or the declaration is
    /// nested inside a counter wrapper type. Registration is idempotent:
    /// a second declaration at the same location returns the entry
    /// created at first sighting, unchanged.
    pub fn register(&mut self, decl: &FieldDeclFact) -> Option<&CandidateField> {
        let category = TypeCategory::from_type_name(&decl.type_name)?;
        if !self.categories.allows(category) {
            return None;
        }
        if decl.enclosing_types.iter().any(|t| is_wrapper_type(t)) {
            return None;
        }

        let id = FieldId::new(&decl.file, decl.line);
        let entry = self.fields.entry(id.clone()).or_insert_with(|| CandidateField {
            id,
            name: decl.name.clone(),
            category,
        });
        Some(entry)
    }

    /// Look up a candidate by declaration location
    pub fn get(&self, id: &FieldId) -> Option<&CandidateField> {
        self.fields.get(id)
    }

    /// Whether a declaration location is a registered candidate
    pub fn contains(&self, id: &FieldId) -> bool {
        self.fields.contains_key(id)
    }

    /// Number of registered candidates
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Candidates in declaration-location order
    pub fn iter(&self) -> impl Iterator<Item = &CandidateField> {
        self.fields.values()
    }

    /// Registered candidate counts per category
    pub fn category_totals(&self) -> BTreeMap<TypeCategory, u64> {
        let mut totals = BTreeMap::new();
        for field in self.fields.values() {
            *totals.entry(field.category).or_insert(0) += 1;
        }
        totals
    }
}
