//! Property tests: round-trips for arbitrary grids, no panics on arbitrary input

use proptest::prelude::*;
use range_codec::{decode, decode_with, encode, encode_with, verify, CodecOptions, Grid, LengthUnit};

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[0-9#]{1,6}",
        "[a-z0-9#]{0,12}",
        any::<String>(),
    ]
}

fn grid() -> impl Strategy<Value = Grid> {
    (0usize..6, 0usize..6).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(cell(), rows * cols)
            .prop_map(move |cells| Grid::from_cells(rows, cols, cells).unwrap())
    })
}

fn unit() -> impl Strategy<Value = LengthUnit> {
    prop_oneof![
        Just(LengthUnit::Chars),
        Just(LengthUnit::Utf16),
        Just(LengthUnit::Bytes),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn roundtrip_any_grid(grid in grid()) {
        let text = encode(&grid);
        prop_assert_eq!(decode(&text).unwrap(), grid);
    }

    #[test]
    fn roundtrip_any_grid_any_unit(grid in grid(), unit in unit()) {
        let options = CodecOptions::with_length_unit(unit);
        let text = encode_with(&grid, &options);
        prop_assert_eq!(decode_with(&text, &options).unwrap(), grid);
    }

    #[test]
    fn encoded_text_is_canonical(grid in grid()) {
        let text = encode(&grid);
        prop_assert!(verify(&text).is_ok());
    }

    #[test]
    fn decode_never_panics(text in any::<String>()) {
        let _ = decode(&text);
    }

    #[test]
    fn decode_never_panics_on_near_miss(text in "[0-9#a-c]{0,40}") {
        if let Ok(grid) = decode(&text) {
            prop_assert_eq!(encode(&grid), text);
        }
    }

    #[test]
    fn truncation_is_always_detected(grid in grid(), cut in any::<prop::sample::Index>()) {
        let text = encode(&grid);
        let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let at = boundaries[cut.index(boundaries.len())];
        prop_assert!(decode(&text[..at]).is_err());
    }
}
