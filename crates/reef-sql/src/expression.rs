use crate::value::Value;

/// Comparison operator in a predicate leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
        }
    }
}

/// A recursive predicate tree.
///
/// Leaves compare a named field against a literal; And/Or combine exactly
/// two children. Chained `a AND b OR c` associates left-to-right with no
/// precedence, so the parser nests earlier combinators deeper.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Compare(String, Comparison, Value),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Convenience constructor for a comparison leaf.
    pub fn compare(field: impl Into<String>, op: Comparison, value: impl Into<Value>) -> Self {
        Expression::Compare(field.into(), op, value.into())
    }
}
