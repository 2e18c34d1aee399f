//! Operation model and accumulation
//!
//! Each classified, resolved call site becomes one [`Operation`] appended
//! to its candidate's history in the [`OperationLog`]. Histories are
//! append-ordered by discovery but the acceptance rule downstream is
//! order-independent.

use crate::classify::ApiKind;
use crate::registry::FieldId;
use crate::resolve::ResolvedValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Net effect of one call site on one candidate field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Operation {
    /// Absolute assignment of the counter value
    Set(i64),
    /// Signed relative change
    Delta(i64),
}

impl Operation {
    /// Map an API kind and resolved value argument to its operation
    ///
    /// | kind      | operation            |
    /// |-----------|----------------------|
    /// | Init      | Set(1), value ignored|
    /// | GetOrInc  | Delta(+1)            |
    /// | PutOrDec  | Delta(-1)            |
    /// | SetExact  | Set(literal), sign ignored |
    /// | AddUnless | Delta(literal * flip)|
    /// | Add       | Delta(literal * flip)|
    /// | Sub       | Delta(-literal * flip)|
    ///
    /// Returns `None` when the kind needs a value argument and none was
    /// resolved; the caller drops the call in that case.
    pub fn from_call(kind: ApiKind, value: Option<ResolvedValue>) -> Option<Operation> {
        match kind {
            ApiKind::Init => Some(Operation::Set(1)),
            ApiKind::GetOrInc => Some(Operation::Delta(1)),
            ApiKind::PutOrDec => Some(Operation::Delta(-1)),
            ApiKind::SetExact => value.map(|v| Operation::Set(v.literal)),
            ApiKind::AddUnless | ApiKind::Add => {
                value.map(|v| Operation::Delta(v.literal * v.flip))
            }
            ApiKind::Sub => value.map(|v| Operation::Delta(-v.literal * v.flip)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Set(n) => write!(f, "set({})", n),
            Operation::Delta(n) => write!(f, "delta({:+})", n),
        }
    }
}

/// Append-ordered operation histories keyed by candidate identity
#[derive(Debug, Default)]
pub struct OperationLog {
    entries: BTreeMap<FieldId, Vec<Operation>>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation to a candidate's history
    pub fn append(&mut self, field: FieldId, op: Operation) {
        self.entries.entry(field).or_default().push(op);
    }

    /// A candidate's history, empty if no call site touched it
    pub fn operations(&self, field: &FieldId) -> &[Operation] {
        self.entries.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total operations recorded across all candidates
    pub fn total_operations(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Histories in candidate-identity order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &[Operation])> {
        self.entries.iter().map(|(id, ops)| (id, ops.as_slice()))
    }
}
