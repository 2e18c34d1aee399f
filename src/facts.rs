//! Source-unit fact documents produced by the front-end extractor
//!
//! A facts file is a JSON array of [`SourceUnitFacts`], one entry per
//! translation unit. The engine consumes these documents as-is; parsing,
//! macro expansion, and type resolution all happen on the extractor side.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a facts file
#[derive(Error, Debug)]
pub enum FactsError {
    #[error("failed to read facts file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse facts file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the front end extracted from one translation unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceUnitFacts {
    /// Path of the analyzed unit, also its dedup identity
    pub unit: String,
    /// Field declarations observed in the unit
    #[serde(default)]
    pub declarations: Vec<FieldDeclFact>,
    /// Call expressions observed in the unit
    #[serde(default)]
    pub calls: Vec<CallFact>,
}

impl SourceUnitFacts {
    /// Load all units from a JSON facts file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, FactsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| FactsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| FactsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// A field declaration fact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDeclFact {
    /// File the declaration is spelled in (may be a header, not the unit)
    pub file: String,
    /// Declaration line, 1-based
    pub line: u32,
    /// Declared field name (diagnostic only)
    pub name: String,
    /// Spelled C type, e.g. "atomic_t" or "struct kref"
    pub type_name: String,
    /// Record types the declaration is nested in, innermost first
    #[serde(default)]
    pub enclosing_types: Vec<String>,
}

/// A call expression fact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallFact {
    /// File containing the call expression
    pub file: String,
    /// Call line, 1-based
    pub line: u32,
    /// Callee name as spelled, e.g. "atomic_inc"
    pub callee: String,
    /// Ordered argument expressions
    #[serde(default)]
    pub args: Vec<Expr>,
}

impl CallFact {
    /// "file:line" location string for diagnostics
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

/// Unary operators the resolver understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    AddrOf,
    Deref,
    Neg,
}

/// Minimal expression tree for call arguments
///
/// Carries just enough structure for argument resolution: the wrappers the
/// resolver strips (parens, implicit casts, unary operators), the two
/// residuals it accepts (member access, integer literal), and a catch-all
/// for everything else the front end saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Parenthesized sub-expression
    Paren { inner: Box<Expr> },
    /// Implicit conversion inserted by the front end
    ImplicitCast { inner: Box<Expr> },
    /// Unary operator application
    Unary { op: UnaryOp, inner: Box<Expr> },
    /// Member access, resolved by the front end to the accessed field's
    /// own declaration location
    Member {
        decl_file: String,
        decl_line: u32,
        member: String,
    },
    /// Integer literal
    IntLiteral { value: i64 },
    /// Anything else (identifier, nested call, arithmetic, ...)
    Other {
        #[serde(default)]
        text: String,
    },
}

impl Expr {
    /// Convenience constructor for `&expr`
    pub fn addr_of(inner: Expr) -> Self {
        Expr::Unary {
            op: UnaryOp::AddrOf,
            inner: Box::new(inner),
        }
    }

    /// Convenience constructor for `-expr`
    pub fn neg(inner: Expr) -> Self {
        Expr::Unary {
            op: UnaryOp::Neg,
            inner: Box::new(inner),
        }
    }

    /// Convenience constructor for a member access residual
    pub fn member(decl_file: &str, decl_line: u32, member: &str) -> Self {
        Expr::Member {
            decl_file: decl_file.to_string(),
            decl_line,
            member: member.to_string(),
        }
    }

    /// Convenience constructor for an integer literal
    pub fn literal(value: i64) -> Self {
        Expr::IntLiteral { value }
    }
}
