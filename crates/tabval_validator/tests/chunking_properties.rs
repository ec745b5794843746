//! End-to-end properties of the chunked validation pipeline.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tabval_core::{
    DataModel, Delimiter, ErrorKind, FieldSpecBuilder, FieldType, ModelBuilder, StreamItem,
};
use tabval_validator::{ModelRegistry, RowBatch, ValidationStream, validate, validate_data};

fn patient_model() -> DataModel {
    ModelBuilder::new("patients")
        .field(FieldSpecBuilder::new("id", FieldType::Integer).required().build())
        .field(
            FieldSpecBuilder::new("age", FieldType::Integer)
                .required()
                .min(0.0)
                .max(120.0)
                .build(),
        )
        .build()
}

fn errors_of(items: Vec<StreamItem>) -> Vec<(u64, String, ErrorKind)> {
    items
        .into_iter()
        .filter_map(|i| match i {
            StreamItem::Error(e) => Some((e.row_index, e.column, e.kind)),
            StreamItem::Fault(_) => None,
        })
        .collect()
}

#[test]
fn reference_example_with_chunk_size_one() {
    // Model {id: integer required, age: integer required 0..=120} over
    // rows ("1","30"), ("","200"), ("3","abc"), chunked one row at a time.
    let csv = "id,age\n1,30\n,200\n3,abc\n";
    let stream = ValidationStream::new(
        csv.as_bytes(),
        Delimiter::Comma,
        Arc::new(patient_model()),
        1,
        None,
    )
    .unwrap();

    let found = errors_of(stream.collect_all());
    assert_eq!(
        found,
        vec![
            (1, "id".to_string(), ErrorKind::MissingRequired),
            (1, "age".to_string(), ErrorKind::OutOfRange),
            (2, "age".to_string(), ErrorKind::TypeMismatch),
        ]
    );
}

#[test]
fn streamed_and_eager_paths_agree() {
    // The streaming orchestrator and the eager whole-file engine run must
    // find the same violations.
    let csv = "id,age\n1,30\n,200\n3,abc\n4,50\n5,-2\n";
    let model = patient_model();

    let streamed = errors_of(
        ValidationStream::new(
            csv.as_bytes(),
            Delimiter::Comma,
            Arc::new(model.clone()),
            2,
            None,
        )
        .unwrap()
        .collect_all(),
    );

    let batch = RowBatch::from_csv_reader(csv.as_bytes(), Delimiter::Comma).unwrap();
    let eager: Vec<_> = validate(&batch, &model, 0)
        .unwrap()
        .errors
        .into_iter()
        .map(|e| (e.row_index, e.column, e.kind))
        .collect();

    assert_eq!(streamed, eager);
}

#[test]
fn no_error_file_passes_everywhere() {
    let csv = "id,age\n1,30\n2,45\n3,0\n";
    let model = patient_model();

    let items = ValidationStream::new(
        csv.as_bytes(),
        Delimiter::Comma,
        Arc::new(model.clone()),
        2,
        None,
    )
    .unwrap()
    .collect_all();
    assert!(items.is_empty());

    let registry = ModelRegistry::new(vec![model]).unwrap();
    let batch = RowBatch::from_csv_reader(csv.as_bytes(), Delimiter::Comma).unwrap();
    let summary = validate_data(&batch, &registry, None, "patients");
    assert!(summary.validation_passed);
    assert_eq!(summary.total_errors, Some(0));
}

#[test]
fn mid_stream_fault_keeps_output_well_formed() {
    // Inject a fault after the first chunk: the first chunk's errors are
    // kept and exactly one terminal marker closes the sequence.
    let csv = "id,age\n,200\n2,45\n3,45,extra\n";
    let items = ValidationStream::new(
        csv.as_bytes(),
        Delimiter::Comma,
        Arc::new(patient_model()),
        2,
        None,
    )
    .unwrap()
    .collect_all();

    let faults = items
        .iter()
        .filter(|i| matches!(i, StreamItem::Fault(_)))
        .count();
    assert_eq!(faults, 1);
    assert!(matches!(items.last(), Some(StreamItem::Fault(_))));
    assert_eq!(errors_of(items).len(), 2);
}

#[test]
fn pattern_and_enum_fields_validate_in_order() {
    let model = ModelBuilder::new("visits")
        .field(
            FieldSpecBuilder::new("code", FieldType::String)
                .required()
                .pattern("^[A-Z]{3}[0-9]{2}$")
                .build(),
        )
        .field(
            FieldSpecBuilder::new(
                "unit",
                FieldType::Enum {
                    values: vec!["mg".to_string(), "ml".to_string()],
                },
            )
            .required()
            .build(),
        )
        .field(FieldSpecBuilder::new("taken_on", FieldType::Date).build())
        .build();

    let csv = "code,unit,taken_on\nABC12,mg,2024-01-31\nabc,kg,2024-13-01\n";
    let stream = ValidationStream::new(
        csv.as_bytes(),
        Delimiter::Comma,
        Arc::new(model),
        10,
        None,
    )
    .unwrap();

    let found = errors_of(stream.collect_all());
    assert_eq!(
        found,
        vec![
            (1, "code".to_string(), ErrorKind::PatternMismatch),
            (1, "unit".to_string(), ErrorKind::NotInAllowedSet),
            (1, "taken_on".to_string(), ErrorKind::TypeMismatch),
        ]
    );
}

#[test]
fn tab_delimited_input() {
    let csv = "id\tage\n1\t30\n\t40\n";
    let stream = ValidationStream::new(
        csv.as_bytes(),
        Delimiter::Tab,
        Arc::new(patient_model()),
        10,
        None,
    )
    .unwrap();

    let found = errors_of(stream.collect_all());
    assert_eq!(found, vec![(1, "id".to_string(), ErrorKind::MissingRequired)]);
}
