//! Positional argument extraction and reduction
//!
//! Reduces a call's arguments to the pieces the accumulator needs: the
//! declaration location of the field the reference argument touches, and
//! the literal value argument (when the shape calls for one) with its
//! recorded sign flip.

use crate::classify::ArgShape;
use crate::facts::{CallFact, Expr, UnaryOp};
use crate::registry::FieldId;

/// A value argument reduced to an integer literal plus sign flip
///
/// `flip` is -1 when the literal sat under a leading unary minus, +1
/// otherwise. The accumulator combines it with the API kind's own sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedValue {
    pub literal: i64,
    pub flip: i64,
}

/// Outcome of reducing the value argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOutcome {
    /// The shape has no value argument
    NotRequired,
    /// Reduced to an integer literal
    Literal(ResolvedValue),
    /// Not statically determinable (missing, non-literal, or nested sign)
    Unresolved,
}

/// A call whose reference argument reduced to a field declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    pub field: FieldId,
    pub value: ValueOutcome,
}

/// Reduce a call's arguments per the declared shape
///
/// Returns `None` when the reference argument does not reduce to a member
/// access; such calls simply do not touch a tracked field and contribute
/// nothing. An unresolvable value argument is reported in the outcome
/// rather than failing the whole call, so the caller can diagnose it
/// against the already-identified field.
pub fn resolve_args(call: &CallFact, shape: ArgShape) -> Option<ResolvedCall> {
    let (ref_idx, val_idx) = match shape {
        ArgShape::ReferenceOnly => (0, None),
        ArgShape::ReferenceThenValue => (0, Some(1)),
        ArgShape::ValueThenReference => (1, Some(0)),
    };

    let field = reduce_reference(call.args.get(ref_idx)?)?;

    let value = match val_idx {
        None => ValueOutcome::NotRequired,
        Some(idx) => match call.args.get(idx).and_then(reduce_value) {
            Some(value) => ValueOutcome::Literal(value),
            None => ValueOutcome::Unresolved,
        },
    };

    Some(ResolvedCall { field, value })
}

/// Strip parens, implicit casts, and address-of/deref until a member
/// access remains
fn reduce_reference(expr: &Expr) -> Option<FieldId> {
    let mut expr = expr;
    loop {
        match expr {
            Expr::Paren { inner } | Expr::ImplicitCast { inner } => expr = inner,
            Expr::Unary {
                op: UnaryOp::AddrOf | UnaryOp::Deref,
                inner,
            } => expr = inner,
            Expr::Member {
                decl_file,
                decl_line,
                ..
            } => return Some(FieldId::new(decl_file, *decl_line)),
            _ => return None,
        }
    }
}

/// Strip parens and implicit casts only
fn strip_wrappers(expr: &Expr) -> &Expr {
    let mut expr = expr;
    while let Expr::Paren { inner } | Expr::ImplicitCast { inner } = expr {
        expr = inner;
    }
    expr
}

/// Reduce a value argument: at most one leading unary minus over an
/// integer literal
fn reduce_value(expr: &Expr) -> Option<ResolvedValue> {
    let mut flip = 1;
    let mut expr = strip_wrappers(expr);

    if let Expr::Unary {
        op: UnaryOp::Neg,
        inner,
    } = expr
    {
        flip = -1;
        expr = strip_wrappers(inner);
    }

    match expr {
        Expr::IntLiteral { value } => Some(ResolvedValue {
            literal: *value,
            flip,
        }),
        _ => None,
    }
}
