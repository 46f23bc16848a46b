use std::cmp::Ordering;

use reef_sql::{Comparison, Expression, Value};

use crate::record::Record;

/// Evaluate whether a record matches the given predicate.
///
/// Pure — no side effects, so And/Or short-circuiting is an implementation
/// detail, not an observable behavior.
pub(crate) fn matches(record: &Record, expr: &Expression) -> bool {
    match expr {
        Expression::And(lhs, rhs) => matches(record, lhs) && matches(record, rhs),
        Expression::Or(lhs, rhs) => matches(record, lhs) || matches(record, rhs),
        Expression::Compare(field, op, literal) => compare(record.get(field), *op, literal),
    }
}

/// Comparison semantics for a single leaf.
///
/// - A missing field matches nothing except `!=`, which it always matches.
/// - A cross-kind pair (e.g. int vs string) matches nothing, `!=` included.
/// - NaN matches none of `= < > <= >=`; `!=` against NaN matches (IEEE).
fn compare(field_value: Option<&Value>, op: Comparison, literal: &Value) -> bool {
    let value = match field_value {
        Some(value) => value,
        None => return op == Comparison::Ne,
    };
    match op {
        Comparison::Ne => value.comparable(literal) && value.compare(literal) != Some(Ordering::Equal),
        _ => {
            let predicate: fn(Ordering) -> bool = match op {
                Comparison::Eq => |o| o == Ordering::Equal,
                Comparison::Gt => |o| o == Ordering::Greater,
                Comparison::Gte => |o| o != Ordering::Less,
                Comparison::Lt => |o| o == Ordering::Less,
                Comparison::Lte => |o| o != Ordering::Greater,
                Comparison::Ne => unreachable!(),
            };
            value.compare(literal).is_some_and(predicate)
        }
    }
}
