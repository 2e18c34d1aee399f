//! Candidate and unit filtering
//!
//! Supports:
//! - Category subsets: --categories atomic_t,kref
//! - Unit path filtering: --include 'drivers/.*'

use crate::registry::TypeCategory;
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Restricts which type categories may register as candidates
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    /// Categories to include (None = all five)
    include: Option<BTreeSet<TypeCategory>>,
}

impl CategoryFilter {
    /// Create a filter that accepts every recognized category
    pub fn all() -> Self {
        Self { include: None }
    }

    /// Parse a comma-separated list of C type names, e.g. "atomic_t,kref"
    pub fn from_spec(spec: &str) -> Result<Self> {
        let mut include = BTreeSet::new();

        for part in spec.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match TypeCategory::from_type_name(part) {
                Some(category) => {
                    include.insert(category);
                }
                None => bail!(
                    "Unknown type category: {}. Recognized: atomic_t, atomic_long_t, \
                     atomic64_t, refcount_t, kref",
                    part
                ),
            }
        }

        Ok(Self {
            include: Some(include),
        })
    }

    /// Check whether a category may register
    pub fn allows(&self, category: TypeCategory) -> bool {
        match &self.include {
            None => true,
            Some(set) => set.contains(&category),
        }
    }
}

/// Restricts which source units are processed, by path regex
#[derive(Debug, Clone)]
pub struct UnitFilter {
    pattern: Regex,
}

impl UnitFilter {
    /// Compile a unit path pattern
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid unit path pattern: {}", pattern))?;
        Ok(Self { pattern })
    }

    /// Check whether a unit path should be processed
    pub fn matches(&self, unit: &str) -> bool {
        self.pattern.is_match(unit)
    }
}
