use shapereg_core::{Curve, DecodeError, Error};
use shapereg_io::{format_document, parse_document, read_document, write_document};
use tempfile::TempDir;

#[test]
fn test_groups_by_ascending_ids() {
    let content = "\
1.0,0.0,10.0,11.0
0.0,1.0,5.0,6.0
0.0,0.0,1.0,2.0
0.0,1.0,7.0,8.0
0.0,0.0,3.0,4.0
";
    let document = parse_document(content).unwrap();
    assert_eq!(document.len(), 2);
    assert_eq!(document[0].len(), 2);
    assert_eq!(document[0][0], Curve::from_xy(&[(1.0, 2.0), (3.0, 4.0)]));
    assert_eq!(document[0][1], Curve::from_xy(&[(5.0, 6.0), (7.0, 8.0)]));
    assert_eq!(document[1], vec![Curve::from_xy(&[(10.0, 11.0)])]);
}

#[test]
fn test_sparse_ids_are_compacted() {
    let document = parse_document("7,3,0,0\n2,9,1,1\n").unwrap();
    assert_eq!(document.len(), 2);
    assert_eq!(document[0][0], Curve::from_xy(&[(1.0, 1.0)]));
    assert_eq!(document[1][0], Curve::from_xy(&[(0.0, 0.0)]));
}

#[test]
fn test_blank_lines_and_comments_are_skipped() {
    let document = parse_document("# fragment\n\n0, 0, 1.5, -2\n   \n0,0,3,4\n").unwrap();
    assert_eq!(document[0][0], Curve::from_xy(&[(1.5, -2.0), (3.0, 4.0)]));
}

#[test]
fn test_empty_input_is_empty_document() {
    assert!(parse_document("").unwrap().is_empty());
}

#[test]
fn test_errors_carry_line_numbers() {
    let err = parse_document("0,0,1,1\n\n0,0,1\n").unwrap_err();
    assert_eq!(
        err,
        DecodeError::ColumnCount {
            line: 3,
            expected: 4,
            found: 3,
        }
    );

    let err = parse_document("0,0,1,1\n0,0,abc,1\n").unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidNumber {
            line: 2,
            column: 3,
            value: "abc".to_string(),
        }
    );

    let err = parse_document("0.5,0,1,1\n").unwrap_err();
    assert!(matches!(err, DecodeError::InvalidIdentifier { line: 1, .. }));
    assert!(err.to_string().starts_with("Line 1"));
}

#[test]
fn test_written_document_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("regularized.csv");
    let paths = vec![
        vec![
            Curve::from_xy(&[(0.0, 0.0), (2.5, 2.5)]),
            Curve::from_xy(&[(1.0, -1.0), (0.125, 3.0), (4.0, 4.0)]),
        ],
        vec![Curve::from_xy(&[(-7.25, 1e-3)])],
    ];

    write_document(&path, &paths).unwrap();
    assert_eq!(read_document(&path).unwrap(), paths);
}

#[test]
fn test_format_numbers_paths_and_shapes() {
    let paths = vec![vec![], vec![Curve::from_xy(&[(1.0, 2.0)])]];
    assert_eq!(format_document(&paths), "1,0,1,2\n");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_document(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_malformed_file_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "0,0,1,1\n0,0\n").unwrap();
    let err = read_document(&path).unwrap_err();
    assert!(err.is_decode_error());
}
