//! Integration tests for the csv2lsvm library
//!
//! These tests run whole conversions through files on disk.

use approx::assert_relative_eq;
use csv2lsvm::api::{quick, Converter};
use csv2lsvm::{ConvertConfig, ConvertError, ReadOptions, Section, WriteOptions};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::with_suffix(".csv").expect("Failed to create temp file");
    for line in lines {
        writeln!(temp_file, "{line}").expect("Failed to write");
    }
    temp_file.flush().expect("Failed to flush");
    temp_file
}

#[test]
fn test_end_to_end_conversion() {
    let input = csv_file(&["10,1,2,3", "2.1,2,3,1.5", "-4,1,,2.5"]);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.svm");

    let summary = Converter::new()
        .with_precision(2)
        .convert_file(input.path(), &output)
        .expect("Conversion should succeed");

    assert_eq!(summary.rows, 3);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "10.00 1:1.00 2:2.00 3:3.00\n2.10 1:2.00 2:3.00 3:1.50\n-4.00 1:1.00 3:2.50\n"
    );
}

#[test]
fn test_dense_and_sparse_inputs() {
    let dense = csv_file(&[
        "1,1,2,3",
        "0,1,0,2",
        "1,0.5,0,1",
        "0,2,0.25,-3",
        "1,1.5,2,1",
        "0,-1,0.5,0.75",
    ]);
    let section = Section::from_csv_file(dense.path(), &ReadOptions::default()).unwrap();
    assert_eq!(section.len(), 6);
    for row in &section {
        assert_eq!(row.features.indices, vec![1, 2, 3]);
    }
    assert_eq!(section.rows()[3].features.values, vec![2.0, 0.25, -3.0]);

    let sparse = csv_file(&[
        "1,1,2,",
        "0,1,NA,2",
        "1,0.5,0,1",
        "0,2,0.25,-3",
        "1, ,2,1",
        "0,-1,,0.75",
    ]);
    let section = Section::from_csv_file(sparse.path(), &ReadOptions::default()).unwrap();
    let schemas: Vec<Vec<usize>> = section
        .iter()
        .map(|row| row.features.indices.clone())
        .collect();
    assert_eq!(
        schemas,
        vec![
            vec![1, 2],
            vec![1, 3],
            vec![1, 2, 3],
            vec![1, 2, 3],
            vec![2, 3],
            vec![1, 3],
        ]
    );
    assert_eq!(section.rows()[5].features.values, vec![-1.0, 0.75]);
}

#[test]
fn test_output_parses_back() {
    let input = csv_file(&["1.5,0.125,,3", "-2,,,7.75", "0,1"]);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.svm");

    Converter::new()
        .with_precision(4)
        .convert_file(input.path(), &output)
        .unwrap();

    let original = Section::from_csv_file(input.path(), &ReadOptions::default()).unwrap();
    let parsed = Section::from_libsvm_file(&output).unwrap();

    assert_eq!(parsed.len(), original.len());
    for (a, b) in original.iter().zip(parsed.iter()) {
        assert_relative_eq!(a.label, b.label);
        assert_eq!(a.features.indices, b.features.indices);
        for (x, y) in a.features.values.iter().zip(&b.features.values) {
            assert_relative_eq!(*x, *y, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_header_is_lenient_by_default() {
    let input = csv_file(&["label,x1,x2", "1,2,3", "0,4,5"]);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.svm");

    let summary = quick::csv_to_libsvm(input.path(), &output).unwrap();
    assert_eq!(summary.rows, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");

    let summary = Converter::new()
        .with_header(true)
        .convert_file(input.path(), &output)
        .unwrap();
    assert_eq!(summary.rows, 2);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "1.00 1:2.00 2:3.00\n0.00 1:4.00 2:5.00\n"
    );
}

#[test]
fn test_mid_stream_failure_propagates() {
    let input = csv_file(&["1,2", "2,3", "oops,4"]);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.svm");

    let result = Converter::new().convert_file(input.path(), &output);
    match result {
        Err(ConvertError::RowDecodeFailed { row_index, .. }) => assert_eq!(row_index, 2),
        other => panic!("expected row decode failure, got {other:?}"),
    }
    assert!(!output.exists(), "Nothing should be written on failure");
}

#[test]
fn test_max_rows_and_blank_line() {
    let input = csv_file(&["1,1", "2,2", "3,3", "4,4", "5,5"]);
    let section = Section::from_csv_file(
        input.path(),
        &ReadOptions {
            max_rows: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(section.len(), 2);
    assert_eq!(section.rows()[1].label, 2.0);

    let input = csv_file(&["1,1", "", "3,3", "4,4", "5,5"]);
    let section = Section::from_csv_file(
        input.path(),
        &ReadOptions {
            max_rows: Some(4),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(section.len(), 1);
}

#[test]
fn test_missing_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = Converter::new().convert_file(
        temp_dir.path().join("missing.csv"),
        temp_dir.path().join("out.svm"),
    );
    assert!(matches!(
        result,
        Err(ConvertError::SourceUnreadable { .. })
    ));
}

#[test]
fn test_unwritable_output() {
    let input = csv_file(&["1,2"]);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = Converter::new().convert_file(
        input.path(),
        temp_dir.path().join("no_such_dir").join("out.svm"),
    );
    assert!(matches!(result, Err(ConvertError::SinkUnwritable { .. })));
}

#[test]
fn test_config_file_drives_conversion() {
    let input = csv_file(&["1,2,3", "4,5,6", "7,8,9"]);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("settings.json");
    let output = temp_dir.path().join("out.svm");

    let config = ConvertConfig {
        read: ReadOptions {
            max_rows: Some(2),
            ..Default::default()
        },
        write: WriteOptions {
            precision: 1,
            append: false,
        },
    };
    config.save_to_file(&config_path).unwrap();

    let loaded = ConvertConfig::load_from_file(&config_path).unwrap();
    Converter::from_config(loaded)
        .convert_file(input.path(), &output)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "1.0 1:2.0 2:3.0\n4.0 1:5.0 2:6.0\n"
    );
}
