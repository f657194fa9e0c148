//! Reduction operations over a single record field.

use crate::types::Value;

/// Built-in reduction operations over one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count records carrying the field (including nulls).
    Count,
    /// Sum numeric values, ignoring everything else.
    Sum,
    /// Minimum numeric value, ignoring everything else.
    Min,
    /// Maximum numeric value, ignoring everything else.
    Max,
    /// Arithmetic mean of numeric values, always `Float64`.
    Mean,
}

/// Reduce `field` across `items` using a built-in [`ReduceOp`].
///
/// - `Count` returns `Value::Int64` with the number of records where the field is present.
/// - `Sum`/`Min`/`Max` keep `Int64` when every numeric value is an integer (and the sum does not
///   overflow), otherwise return `Float64`.
/// - `Sum`/`Min`/`Max`/`Mean` return `Value::Null` if no numeric values are found.
pub fn reduce(items: &[Value], field: &str, op: ReduceOp) -> Value {
    let present = items.iter().filter_map(|item| item.field(field));

    match op {
        ReduceOp::Count => Value::Int64(present.count() as i64),
        ReduceOp::Sum => numeric(present, sum),
        ReduceOp::Min => numeric(present, |n| extreme(n, |candidate, best| candidate < best)),
        ReduceOp::Max => numeric(present, |n| extreme(n, |candidate, best| candidate > best)),
        ReduceOp::Mean => numeric(present, mean),
    }
}

/// Apply `reducer` to the numeric values among `present`, or `Null` when there are none.
fn numeric<'a>(
    present: impl Iterator<Item = &'a Value>,
    reducer: impl FnOnce(&[&'a Value]) -> Value,
) -> Value {
    let numbers: Vec<&Value> = present
        .filter(|v| matches!(v, Value::Int64(_) | Value::Float64(_)))
        .collect();
    if numbers.is_empty() {
        return Value::Null;
    }
    reducer(&numbers)
}

fn mean(numbers: &[&Value]) -> Value {
    let total: f64 = numbers.iter().filter_map(|v| v.as_f64()).sum();
    Value::Float64(total / numbers.len() as f64)
}

fn sum(numbers: &[&Value]) -> Value {
    let mut int_acc: Option<i64> = Some(0);
    let mut float_acc = 0.0_f64;
    for v in numbers {
        int_acc = match (int_acc, v) {
            (Some(acc), Value::Int64(i)) => acc.checked_add(*i),
            _ => None,
        };
        float_acc += v.as_f64().unwrap_or(0.0);
    }
    match int_acc {
        Some(total) => Value::Int64(total),
        None => Value::Float64(float_acc),
    }
}

fn extreme(numbers: &[&Value], better: impl Fn(f64, f64) -> bool) -> Value {
    let all_int = numbers.iter().all(|v| matches!(v, Value::Int64(_)));
    let mut best: Option<f64> = None;
    let mut best_value: Option<&Value> = None;
    for v in numbers {
        let Some(x) = v.as_f64() else { continue };
        if x.is_nan() {
            continue;
        }
        if best.is_none_or(|b| better(x, b)) {
            best = Some(x);
            best_value = Some(*v);
        }
    }
    match best_value {
        Some(v) if all_int => v.clone(),
        Some(v) => Value::Float64(v.as_f64().unwrap_or(f64::NAN)),
        None => Value::Null,
    }
}
