//! Round-trip self-checks

use crate::decoder::decode_with;
use crate::encoder::encode_with;
use crate::error::VerifyError;
use crate::grid::Grid;
use crate::options::CodecOptions;

/// Decode `text`, re-encode the result and require the exact same text back.
///
/// The grammar admits exactly one spelling per grid, so any difference
/// points at a codec fault rather than at the input.
pub fn verify(text: &str) -> Result<Grid, VerifyError> {
    verify_with(text, &CodecOptions::default())
}

/// [`verify`] with explicit options
pub fn verify_with(text: &str, options: &CodecOptions) -> Result<Grid, VerifyError> {
    let grid = decode_with(text, options)?;
    let reencoded = encode_with(&grid, options);

    if reencoded != text {
        let offset = first_difference(text, &reencoded);
        tracing::debug!("re-encoded range data diverges at byte {offset}");
        return Err(VerifyError::Mismatch { offset });
    }

    Ok(grid)
}

/// Encode `grid`, decode the result and require an equal grid back.
/// Returns the encoded text on success.
pub fn check_roundtrip(grid: &Grid) -> Result<String, VerifyError> {
    check_roundtrip_with(grid, &CodecOptions::default())
}

/// [`check_roundtrip`] with explicit options
pub fn check_roundtrip_with(grid: &Grid, options: &CodecOptions) -> Result<String, VerifyError> {
    let text = encode_with(grid, options);
    let decoded = decode_with(&text, options)?;

    if &decoded != grid {
        return Err(VerifyError::GridMismatch);
    }

    Ok(text)
}

fn first_difference(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .position(|(x, y)| x != y)
        .unwrap_or_else(|| a.len().min(b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorReason;

    #[test]
    fn test_verify_accepts_canonical() {
        let grid = verify("2#1#1#a0#").unwrap();
        assert_eq!(grid.dimensions(), (2, 1));
    }

    #[test]
    fn test_verify_reports_decode_failures() {
        match verify("1#1#1#a999") {
            Err(VerifyError::Decode(e)) => {
                assert_eq!(e.reason, DecodeErrorReason::TrailingData { remaining: 3 })
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_roundtrip() {
        let grid = Grid::new(vec![vec!["12", "#"], vec!["", "3#ab"]]).unwrap();
        assert_eq!(check_roundtrip(&grid).unwrap(), "2#2#2#121##0#4#3#ab");
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("abc", "abd"), 2);
        assert_eq!(first_difference("abc", "ab"), 2);
        assert_eq!(first_difference("", "x"), 0);
    }
}
