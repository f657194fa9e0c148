//! Record filtering: predicate factory and filter helper.

use std::fmt;
use std::str::FromStr;

use crate::error::OpsError;
use crate::types::Value;

/// Comparison operators understood by [`create_filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `===` (strict equality, see [`Value::strict_eq`])
    StrictEq,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::StrictEq => "===",
        }
    }

    /// Evaluate `lhs <op> rhs`.
    ///
    /// Relational operators are `false` whenever the operands are incomparable
    /// (see [`Value::loose_cmp`]).
    pub fn evaluate(self, lhs: &Value, rhs: &Value) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};

        match self {
            CompareOp::StrictEq => lhs.strict_eq(rhs),
            CompareOp::Gt => matches!(lhs.loose_cmp(rhs), Some(Greater)),
            CompareOp::Lt => matches!(lhs.loose_cmp(rhs), Some(Less)),
            CompareOp::Ge => matches!(lhs.loose_cmp(rhs), Some(Greater | Equal)),
            CompareOp::Le => matches!(lhs.loose_cmp(rhs), Some(Less | Equal)),
        }
    }
}

impl FromStr for CompareOp {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(CompareOp::Gt),
            "<" => Ok(CompareOp::Lt),
            ">=" => Ok(CompareOp::Ge),
            "<=" => Ok(CompareOp::Le),
            "===" => Ok(CompareOp::StrictEq),
            other => Err(OpsError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A field comparison against a fixed value.
///
/// An unrecognized operator is kept as `None`; such a predicate rejects every candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: String,
    op: Option<CompareOp>,
    value: Value,
}

impl Predicate {
    /// Build a predicate from an operator string. Unknown operators are not an error.
    pub fn new(field: impl Into<String>, operator: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: operator.parse().ok(),
            value: value.into(),
        }
    }

    /// Build a predicate from an already-parsed operator.
    pub fn with_op(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: Some(op),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The parsed operator, or `None` if the operator string was not recognized.
    pub fn op(&self) -> Option<CompareOp> {
        self.op
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Test a candidate.
    ///
    /// Returns `false` when the candidate is absent, is not a record, lacks the field, or the
    /// operator is unknown. Otherwise returns `candidate[field] <op> value`.
    pub fn test(&self, candidate: Option<&Value>) -> bool {
        let Some(op) = self.op else {
            return false;
        };
        match candidate.and_then(|c| c.field(&self.field)) {
            Some(actual) => op.evaluate(actual, &self.value),
            None => false,
        }
    }
}

/// Create a reusable predicate `record[field] <operator> value`.
///
/// `operator` is one of `>`, `<`, `>=`, `<=`, `===`. Any other operator produces a predicate
/// that returns `false` for every input.
///
/// Values are never coerced. Relational operators only relate two numbers, two strings or two
/// booleans; any other pairing is incomparable and the predicate returns `false`. So a null
/// field never satisfies `>= 0`, `true` is not `> 0`, and the text `"5"` is not `> 4`. Strict
/// equality likewise requires the same kind, except that `Int64` and `Float64` are both numbers.
///
/// ```rust
/// use record_ops::processing::create_filter;
/// use record_ops::types::{Record, Value};
///
/// let high_rated = create_filter("rating", ">=", Value::from(4));
/// let dhaba = Value::from(Record::new().with("name", "Punjab Dhaba").with("rating", 4.5));
/// assert!(high_rated(&dhaba));
/// ```
pub fn create_filter(
    field: &str,
    operator: &str,
    value: Value,
) -> impl Fn(&Value) -> bool + Clone + Send + Sync + use<> {
    let predicate = Predicate::new(field, operator, value);
    move |candidate: &Value| predicate.test(Some(candidate))
}

/// Returns the items for which `predicate` returns `true`, in their original order.
pub fn filter<F>(items: &[Value], mut predicate: F) -> Vec<Value>
where
    F: FnMut(&Value) -> bool,
{
    items.iter().filter(|v| predicate(v)).cloned().collect()
}
