//! Record projection: mapper factory and map helper.

use crate::types::{Record, Value};

/// Copy the listed fields that are present on `record` into a new record.
///
/// Absent fields are omitted rather than filled with nulls. `record` is not modified.
pub fn project(record: &Record, fields: &[String]) -> Record {
    let mut out = Record::new();
    for field in fields {
        if let Some(value) = record.get(field) {
            out.insert(field.clone(), value.clone());
        }
    }
    out
}

/// Create a projection keeping only `fields`.
///
/// The returned function always produces a [`Value::Record`]. A non-record input has no
/// fields of its own, so it projects to an empty record.
///
/// ```rust
/// use record_ops::processing::create_mapper;
/// use record_ops::types::{Record, Value};
///
/// let names_only = create_mapper(&["name"]);
/// let dhaba = Value::from(Record::new().with("name", "Dhaba").with("rating", 4));
/// assert_eq!(names_only(&dhaba), Value::from(Record::new().with("name", "Dhaba")));
/// ```
pub fn create_mapper(fields: &[&str]) -> impl Fn(&Value) -> Value + Clone + Send + Sync + use<> {
    let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    move |source: &Value| {
        let projected = match source.as_record() {
            Some(record) => project(record, &fields),
            None => Record::new(),
        };
        Value::Record(projected)
    }
}

/// Returns a new vector by applying `mapper` to every item.
pub fn map<F>(items: &[Value], mapper: F) -> Vec<Value>
where
    F: FnMut(&Value) -> Value,
{
    items.iter().map(mapper).collect()
}

#[cfg(test)]
mod tests {
    use super::{create_mapper, map, project};
    use crate::types::{Record, Value};

    fn dhaba() -> Record {
        Record::new()
            .with("name", "Dhaba")
            .with("rating", 4)
            .with("menu", Value::List(vec![Value::from("dal"), Value::from("roti")]))
            .with("closed", Value::Null)
    }

    #[test]
    fn keeps_only_listed_fields() {
        let out = create_mapper(&["name"])(&Value::from(dhaba()));
        assert_eq!(out, Value::from(Record::new().with("name", "Dhaba")));
        assert_eq!(out.field("rating"), None);
    }

    #[test]
    fn omits_missing_fields() {
        let src = Value::from(Record::new().with("name", "Dhaba"));
        assert_eq!(create_mapper(&["missing"])(&src), Value::from(Record::new()));
    }

    #[test]
    fn copies_present_nulls_and_nested_values() {
        let out = project(
            &dhaba(),
            &["closed".to_string(), "menu".to_string(), "phone".to_string()],
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("closed"), Some(&Value::Null));
        assert_eq!(
            out.get("menu"),
            Some(&Value::List(vec![Value::from("dal"), Value::from("roti")]))
        );
    }

    #[test]
    fn source_record_is_unchanged() {
        let src = Value::from(dhaba());
        let _ = create_mapper(&["name"])(&src);
        assert_eq!(src, Value::from(dhaba()));
    }

    #[test]
    fn non_record_projects_to_empty_record() {
        let mapper = create_mapper(&["name"]);
        assert_eq!(mapper(&Value::Int64(1)), Value::from(Record::new()));
        assert_eq!(mapper(&Value::Null), Value::from(Record::new()));
    }

    #[test]
    fn map_applies_mapper_in_order() {
        let items = vec![
            Value::from(Record::new().with("name", "A").with("rating", 1)),
            Value::from(Record::new().with("name", "B").with("rating", 2)),
        ];
        let out = map(&items, create_mapper(&["rating"]));
        assert_eq!(
            out,
            vec![
                Value::from(Record::new().with("rating", 1)),
                Value::from(Record::new().with("rating", 2)),
            ]
        );
    }
}
