//! Record ordering: comparator factory and sort helper.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

use deunicode::deunicode;

use crate::types::{Value, ValueKind};

/// Sort direction for [`create_sorter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Parse an order indicator. Only `"desc"` selects descending; anything else is ascending.
    pub fn parse(s: &str) -> Self {
        if s == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortOrder::parse(s))
    }
}

/// Create a comparator ordering records by `field`, for use with [`slice::sort_by`].
///
/// - Equal field values (or the field absent on both) compare `Equal` in either direction.
/// - Two text values use [`locale_compare`].
/// - Other comparable values use their relational order.
/// - Values that cannot be related fall back to ordering by kind (numbers, text, booleans,
///   lists, records, null), with an absent field after everything else.
///
/// ```rust
/// use record_ops::processing::{create_sorter, SortOrder};
/// use record_ops::types::{Record, Value};
///
/// let mut items: Vec<Value> = [3, 5, 1]
///     .into_iter()
///     .map(|r| Value::from(Record::new().with("rating", r)))
///     .collect();
/// items.sort_by(create_sorter("rating", SortOrder::Desc));
/// let ratings: Vec<_> = items.iter().map(|v| v.field("rating").cloned()).collect();
/// assert_eq!(ratings, vec![Some(Value::Int64(5)), Some(Value::Int64(3)), Some(Value::Int64(1))]);
/// ```
pub fn create_sorter(
    field: &str,
    order: SortOrder,
) -> impl Fn(&Value, &Value) -> Ordering + Clone + Send + Sync + use<> {
    let field = field.to_string();
    move |a: &Value, b: &Value| compare_field(a.field(&field), b.field(&field), order)
}

/// Compare two (possibly absent) field values the way [`create_sorter`] does.
pub fn compare_field(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    let ascending = match (a, b) {
        (None, None) => return Ordering::Equal,
        (Some(x), Some(y)) if x.strict_eq(y) => return Ordering::Equal,
        (Some(Value::Utf8(x)), Some(Value::Utf8(y))) => locale_compare(x, y),
        (Some(x), Some(y)) => match x.loose_cmp(y) {
            Some(ordering) => ordering,
            None => incomparable(x, y),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
    };
    order.apply(ascending)
}

/// Accent- and case-insensitive text ordering, approximating the default (root) collation.
///
/// Text is first compared on its ASCII transliteration, so `"école"` sorts with the `e`s
/// rather than after `"zebra"`. Ties are broken by the lowercased original (unaccented before
/// accented), then lowercase before uppercase: `"apple" < "banana" < "Banana" < "Cherry"`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    deunicode(a)
        .to_lowercase()
        .cmp(&deunicode(b).to_lowercase())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn incomparable(x: &Value, y: &Value) -> Ordering {
    match (x.kind(), y.kind()) {
        // Only NaN makes two numbers incomparable; it sorts after every other number.
        (ValueKind::Number, ValueKind::Number) => {
            let x_nan = x.as_f64().is_some_and(f64::is_nan);
            let y_nan = y.as_f64().is_some_and(f64::is_nan);
            x_nan.cmp(&y_nan)
        }
        (kx, ky) => kx.cmp(&ky),
    }
}

/// Returns a stably sorted copy of `items`.
pub fn sort<F>(items: &[Value], comparator: F) -> Vec<Value>
where
    F: FnMut(&Value, &Value) -> Ordering,
{
    let mut out = items.to_vec();
    out.sort_by(comparator);
    out
}
