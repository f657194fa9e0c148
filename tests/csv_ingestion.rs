use record_ops::ingestion::csv::{records_from_csv_path, records_from_csv_reader};
use record_ops::ingestion::{load_records, IngestionOptions};
use record_ops::processing::{reduce, ReduceOp};
use record_ops::types::{DataType, Field, Record, Schema, Value};

fn dhaba_schema() -> Schema {
    Schema::new(vec![
        Field::new("name", DataType::Utf8),
        Field::new("rating", DataType::Float64),
        Field::new("veg", DataType::Bool),
    ])
}

#[test]
fn csv_from_path_happy_path() {
    let v = records_from_csv_path("tests/fixtures/dhabas.csv", &dhaba_schema()).unwrap();
    let items = v.as_list().unwrap();

    assert_eq!(items.len(), 4);
    assert_eq!(
        items[0],
        Value::from(
            Record::new()
                .with("name", "Punjab Dhaba")
                .with("rating", 4.5)
                .with("veg", false)
        )
    );
    assert_eq!(items[2].field("veg"), Some(&Value::Bool(true)));
    // Column not in the schema is dropped.
    assert_eq!(items[0].field("city"), None);
}

#[test]
fn empty_cell_leaves_field_absent() {
    let v = records_from_csv_path("tests/fixtures/dhabas.csv", &dhaba_schema()).unwrap();
    let items = v.as_list().unwrap();
    assert_eq!(items[3].field("rating"), None);
    assert_eq!(reduce(items, "rating", ReduceOp::Count), Value::Int64(3));
}

#[test]
fn load_records_uses_schema_option() {
    let opts = IngestionOptions {
        schema: Some(dhaba_schema()),
        ..Default::default()
    };
    let v = load_records("tests/fixtures/dhabas.csv", &opts).unwrap();
    let mean = reduce(v.as_list().unwrap(), "rating", ReduceOp::Mean);
    match mean {
        Value::Float64(m) => assert!((m - (4.5 + 3.0 + 4.8) / 3.0).abs() < 1e-9),
        other => panic!("unexpected mean {other:?}"),
    }
}

#[test]
fn csv_allows_reordered_columns() {
    let input = "veg,rating,name\ntrue,4,Ada Dhaba\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let v = records_from_csv_reader(&mut rdr, &dhaba_schema()).unwrap();
    let items = v.as_list().unwrap();
    assert_eq!(items[0].field("name"), Some(&Value::from("Ada Dhaba")));
    assert_eq!(items[0].field("rating"), Some(&Value::Float64(4.0)));
}

#[test]
fn csv_errors_on_missing_required_column() {
    let input = "name,rating\nAda,4\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = records_from_csv_reader(&mut rdr, &dhaba_schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing required column 'veg'"));
}

#[test]
fn csv_errors_on_type_parse() {
    let input = "name,rating,veg\nAda,four,true\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = records_from_csv_reader(&mut rdr, &dhaba_schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value at row 2"));
    assert!(msg.contains("column 'rating'"));
}
