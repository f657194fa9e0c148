use record_ops::ingestion::json::{records_from_json_path, records_from_json_str};
use record_ops::ingestion::{load_records, IngestionOptions};
use record_ops::processing::{apply_operations, create_filter, create_mapper, Operation};
use record_ops::types::{Record, Value};

#[test]
fn json_array_from_path_happy_path() {
    let v = records_from_json_path("tests/fixtures/dhabas.json").unwrap();
    let items = v.as_list().unwrap();

    assert_eq!(items.len(), 5);
    assert_eq!(items[0].field("name"), Some(&Value::from("Punjab Dhaba")));
    assert_eq!(items[1].field("rating"), Some(&Value::Int64(3)));
    assert_eq!(items[3].field("rating"), Some(&Value::Null));
    assert_eq!(items[4].field("rating"), None);
}

#[test]
fn ndjson_is_detected_by_extension() {
    let v = load_records("tests/fixtures/dhabas.ndjson", &IngestionOptions::default()).unwrap();
    assert_eq!(v.as_list().map(<[Value]>::len), Some(2));
}

#[test]
fn loaded_records_flow_through_pipeline() {
    let v = load_records("tests/fixtures/dhabas.json", &IngestionOptions::default()).unwrap();
    let out = apply_operations(
        v,
        vec![
            Operation::filter(create_filter("veg", "===", Value::Bool(true))),
            Operation::filter(create_filter("rating", ">=", Value::from(4))),
            Operation::map(create_mapper(&["name", "city"])),
        ],
    );
    assert_eq!(
        out,
        vec![Value::from(
            Record::new().with("name", "Amrik Sukhdev").with("city", "Murthal")
        )]
    );
}

#[test]
fn missing_file_is_io_error() {
    let err = records_from_json_path("tests/fixtures/does_not_exist.json").unwrap_err();
    assert!(err.to_string().contains("io error"));
}

#[test]
fn nested_objects_are_kept_as_records() {
    let v = records_from_json_str(r#"[{"name":"A","owner":{"name":"Sukhdev"}}]"#).unwrap();
    let owner = v.as_list().unwrap()[0].field("owner").unwrap();
    assert_eq!(owner.field("name"), Some(&Value::from("Sukhdev")));
}
