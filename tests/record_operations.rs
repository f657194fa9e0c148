use std::cmp::Ordering;

use record_ops::processing::{
    apply_operations, create_filter, create_mapper, create_sorter, sort, Operation, Pipeline,
    SortOrder,
};
use record_ops::types::{Record, Value};

fn rated(rating: impl Into<Value>) -> Value {
    Value::from(Record::new().with("rating", rating))
}

fn sample_records() -> Vec<Value> {
    vec![
        Value::from(Record::new().with("name", "Punjab Dhaba").with("rating", 4.5)),
        Value::from(Record::new().with("name", "Highway King").with("rating", 3)),
        Value::from(Record::new().with("name", "Amrik Sukhdev").with("rating", 4)),
        Value::from(Record::new().with("name", "No Rating Yet")),
    ]
}

#[test]
fn filter_matches_direct_comparison_for_every_operator() {
    let threshold = Value::from(4);
    let cases: [(&str, fn(f64) -> bool); 5] = [
        (">", |r| r > 4.0),
        ("<", |r| r < 4.0),
        (">=", |r| r >= 4.0),
        ("<=", |r| r <= 4.0),
        ("===", |r| r == 4.0),
    ];

    for (op, expected) in cases {
        let pred = create_filter("rating", op, threshold.clone());
        for record in sample_records() {
            let want = record
                .field("rating")
                .and_then(Value::as_f64)
                .is_some_and(expected);
            assert_eq!(pred(&record), want, "operator {op} on {record:?}");
        }
    }
}

#[test]
fn unknown_operator_rejects_well_formed_records() {
    for op in ["??", "==", "!==", "", "=>"] {
        let pred = create_filter("rating", op, Value::from(0));
        assert!(sample_records().iter().all(|r| !pred(r)), "operator {op:?}");
    }
}

#[test]
fn equal_fields_compare_equal_regardless_of_order() {
    for order in [SortOrder::Asc, SortOrder::Desc] {
        let cmp = create_sorter("rating", order);
        assert_eq!(cmp(&rated(4), &rated(4)), Ordering::Equal);
        assert_eq!(cmp(&rated("x"), &rated("x")), Ordering::Equal);
    }
}

#[test]
fn descending_sort_by_rating() {
    let out = sort(
        &[rated(3), rated(5), rated(1)],
        create_sorter("rating", SortOrder::parse("desc")),
    );
    assert_eq!(out, vec![rated(5), rated(3), rated(1)]);
}

#[test]
fn mapper_keeps_only_requested_fields() {
    let src = Value::from(Record::new().with("name", "Dhaba").with("rating", 4));
    let out = create_mapper(&["name"])(&src);
    assert_eq!(out, Value::from(Record::new().with("name", "Dhaba")));
}

#[test]
fn mapper_omits_missing_fields() {
    let src = Value::from(Record::new().with("name", "Dhaba"));
    let out = create_mapper(&["missing"])(&src);
    assert_eq!(out, Value::from(Record::new()));
    assert!(out.as_record().is_some_and(Record::is_empty));
}

#[test]
fn non_list_data_yields_empty() {
    let out = apply_operations(
        Value::from("not-an-array"),
        vec![Operation::stage(|_| vec![Value::Int64(1)])],
    );
    assert!(out.is_empty());

    let out = apply_operations(Value::from(Record::new().with("rating", 5)), Vec::new());
    assert!(out.is_empty());
}

#[test]
fn filter_then_project() {
    let out = apply_operations(
        Value::List(vec![rated(3), rated(5)]),
        vec![
            Operation::filter(create_filter("rating", ">=", Value::from(4))),
            Operation::stage({
                let mapper = create_mapper(&["rating"]);
                move |items: Vec<Value>| items.iter().map(&mapper).collect()
            }),
        ],
    );
    assert_eq!(out, vec![rated(5)]);
}

#[test]
fn zero_operations_return_data() {
    let data = sample_records();
    let out = apply_operations(Value::List(data.clone()), Vec::new());
    assert_eq!(out, data);
}

#[test]
fn inert_operation_leaves_data_unchanged() {
    let out = apply_operations(
        Value::List(vec![Value::Int64(1), Value::Int64(2)]),
        vec![Operation::from(Value::Null)],
    );
    assert_eq!(out, vec![Value::Int64(1), Value::Int64(2)]);
}

#[test]
fn pipeline_is_reusable() {
    let top_rated = Pipeline::new()
        .filter(create_filter("rating", ">", Value::from(3.5)))
        .sort(create_sorter("rating", SortOrder::Asc))
        .map(create_mapper(&["name"]));

    let first = top_rated.run(Value::List(sample_records()));
    let second = top_rated.run(Value::List(sample_records()));
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![
            Value::from(Record::new().with("name", "Amrik Sukhdev")),
            Value::from(Record::new().with("name", "Punjab Dhaba")),
        ]
    );
    assert_eq!(top_rated.len(), 3);
}

#[test]
fn closures_can_be_shared_across_threads() {
    let pred = create_filter("rating", ">=", Value::from(4));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pred = pred.clone();
            std::thread::spawn(move || pred(&rated(i + 2)))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![false, false, true, true]);
}
