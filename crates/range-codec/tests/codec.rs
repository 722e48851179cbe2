//! End-to-end tests for range data encoding and decoding

use pretty_assertions::assert_eq;
use range_codec::{
    check_roundtrip, decode, decode_with, encode, encode_rows, encode_with, verify, CodecOptions,
    DecodeErrorReason, Field, Grid, LengthUnit, ShapeError,
};

const LITERAL: &str = "2#5#3#abc2#de4#fghi1#34#52352#234#53530#4#32532#32";

fn literal_grid() -> Grid {
    Grid::new(vec![
        vec!["abc", "de", "fghi", "3", "5235"],
        vec!["23", "5353", "", "3253", "32"],
    ])
    .unwrap()
}

#[test]
fn test_literal_example_encodes() {
    assert_eq!(encode(&literal_grid()), LITERAL);
}

#[test]
fn test_literal_example_decodes() {
    let grid = decode(LITERAL).unwrap();
    assert_eq!(grid, literal_grid());
    assert_eq!(grid.get(1, 2), Some(""));
}

#[test]
fn test_roundtrip_degenerate_shapes() {
    for (rows, cols) in [(0, 0), (1, 1), (3, 0), (0, 3)] {
        let grid = Grid::empty(rows, cols).unwrap();
        assert_eq!(decode(&encode(&grid)).unwrap(), grid, "{rows}x{cols}");
    }
}

#[test]
fn test_zero_rows_preserves_column_count() {
    let grid = decode("0#3#").unwrap();
    assert_eq!(grid.dimensions(), (0, 3));
    assert_eq!(encode(&grid), "0#3#");
    assert!(grid.into_rows().is_empty());
}

#[test]
fn test_zero_columns_preserves_row_count() {
    let grid = decode("2#0#").unwrap();
    assert_eq!(grid.dimensions(), (2, 0));
    assert_eq!(encode(&grid), "2#0#");
}

#[test]
fn test_value_that_looks_like_an_entry() {
    let grid = Grid::new(vec![vec!["3#ab", "1#"], vec!["0#", "42"]]).unwrap();
    let text = encode(&grid);
    assert_eq!(text, "2#2#4#3#ab2#1#2#0#2#42");
    assert_eq!(decode(&text).unwrap(), grid);
}

#[test]
fn test_empty_values() {
    let grid = Grid::new(vec![vec!["", ""], vec!["x", ""]]).unwrap();
    let text = encode(&grid);
    assert_eq!(text, "2#2#0#0#1#x0#");
    assert_eq!(decode(&text).unwrap(), grid);
}

#[test]
fn test_unicode_values() {
    let grid = Grid::new(vec![vec!["Grüße", "日本語", "😀#😀"]]).unwrap();
    for unit in [LengthUnit::Chars, LengthUnit::Utf16, LengthUnit::Bytes] {
        let options = CodecOptions::with_length_unit(unit);
        let text = encode_with(&grid, &options);
        assert_eq!(decode_with(&text, &options).unwrap(), grid, "{unit:?}");
    }
}

#[test]
fn test_truncated_input() {
    let err = decode("2#2#1#a1#b1#c").unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.offset, 13);
    assert_eq!(
        err.reason,
        DecodeErrorReason::UnexpectedEnd {
            field: Field::Length { index: 3 }
        }
    );
}

#[test]
fn test_trailing_garbage() {
    let err = decode("1#1#1#a999").unwrap_err();
    assert!(!err.is_truncated());
    assert_eq!(err.reason, DecodeErrorReason::TrailingData { remaining: 3 });
}

#[test]
fn test_declared_length_exceeds_input() {
    let err = decode("1#2#1#a9#short").unwrap_err();
    assert_eq!(
        err.reason,
        DecodeErrorReason::ValueTruncated {
            index: 1,
            declared: 9,
            available: 5
        }
    );
}

#[test]
fn test_negative_counts_rejected() {
    assert!(decode("-1#1#").is_err());
    assert!(decode("1#-1#").is_err());
}

#[test]
fn test_non_rectangular_rejected() {
    let rows = vec![vec!["a", "b", "c"], vec!["d", "e"]];
    assert_eq!(
        encode_rows(&rows).unwrap_err(),
        ShapeError::RaggedRow {
            row: 1,
            len: 2,
            expected: 3
        }
    );
    assert!(Grid::new(rows).is_err());
}

#[test]
fn test_error_messages() {
    let err = decode("1#1#1#a999").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed range data at offset 7: 3 unconsumed bytes after the last value"
    );

    let err = decode("1#x#").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed range data at offset 2: expected a digit for the column count, found 'x'"
    );
}

#[test]
fn test_verify_and_check_roundtrip() {
    let text = check_roundtrip(&literal_grid()).unwrap();
    assert_eq!(text, LITERAL);
    assert_eq!(verify(LITERAL).unwrap(), literal_grid());
    assert!(verify("1#1#01#a").is_err());
}
