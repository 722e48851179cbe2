//! Range data decoder
//!
//! A single left-to-right scan. Each count or length is a run of ASCII digits
//! closed by `#`; each value is then taken as exactly the declared number of
//! units without looking at its content.

use crate::error::{DecodeError, DecodeErrorReason, Field};
use crate::grid::Grid;
use crate::options::{CodecOptions, LengthUnit};
use crate::DELIMITER;

/// Decode range data, counting lengths in chars.
///
/// # Examples
/// ```
/// use range_codec::decode;
///
/// let grid = decode("1#2#4#3#ab0#").unwrap();
/// assert_eq!(grid.get(0, 0), Some("3#ab"));
/// assert_eq!(grid.get(0, 1), Some(""));
///
/// assert!(decode("1#1#1#a999").is_err());
/// ```
pub fn decode(text: &str) -> Result<Grid, DecodeError> {
    decode_with(text, &CodecOptions::default())
}

/// Decode range data with explicit options
pub fn decode_with(text: &str, options: &CodecOptions) -> Result<Grid, DecodeError> {
    let result = Decoder::new(text, options.length_unit).run();
    if let Err(e) = &result {
        tracing::debug!("rejected range data ({} bytes): {e}", text.len());
    }
    result
}

struct Decoder<'a> {
    input: &'a str,
    pos: usize,
    unit: LengthUnit,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a str, unit: LengthUnit) -> Self {
        Self {
            input,
            pos: 0,
            unit,
        }
    }

    fn run(mut self) -> Result<Grid, DecodeError> {
        let rows = self.read_number(Field::Rows)?;
        let cols = self.read_number(Field::Columns)?;
        let total = rows.checked_mul(cols).ok_or_else(|| {
            DecodeError::new(self.pos, DecodeErrorReason::CellCountOverflow { rows, cols })
        })?;

        // The shortest entry is "0#", so the header cannot claim more cells
        // than half the remaining input without failing later anyway.
        let mut cells = Vec::with_capacity(total.min(self.remaining() / 2));

        for index in 0..total {
            let len = self.read_number(Field::Length { index })?;
            let value = self.read_value(index, len)?;
            cells.push(value.to_owned());
        }

        if self.remaining() > 0 {
            return Err(DecodeError::new(
                self.pos,
                DecodeErrorReason::TrailingData {
                    remaining: self.remaining(),
                },
            ));
        }

        tracing::trace!("decoded {rows}x{cols} range data");
        Ok(Grid::from_parts(rows, cols, cells))
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Read `D+ '#'`. Digits only, no sign, no leading zeros except "0".
    fn read_number(&mut self, field: Field) -> Result<usize, DecodeError> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }

        if end == start {
            let reason = match self.input[start..].chars().next() {
                Some(found) => DecodeErrorReason::ExpectedDigit { field, found },
                None => DecodeErrorReason::UnexpectedEnd { field },
            };
            return Err(DecodeError::new(start, reason));
        }

        if bytes[start] == b'0' && end - start > 1 {
            return Err(DecodeError::new(
                start,
                DecodeErrorReason::LeadingZero { field },
            ));
        }

        let value: usize = self.input[start..end]
            .parse()
            .map_err(|_| DecodeError::new(start, DecodeErrorReason::NumberOverflow { field }))?;

        match self.input[end..].chars().next() {
            Some(DELIMITER) => {
                self.pos = end + DELIMITER.len_utf8();
                Ok(value)
            }
            Some(found) => Err(DecodeError::new(
                end,
                DecodeErrorReason::ExpectedDelimiter { field, found },
            )),
            None => Err(DecodeError::new(
                end,
                DecodeErrorReason::UnexpectedEnd { field },
            )),
        }
    }

    /// Take exactly `len` units of raw text
    fn read_value(&mut self, index: usize, len: usize) -> Result<&'a str, DecodeError> {
        let input = self.input;
        let rest = &input[self.pos..];
        let truncated = |available| {
            DecodeError::new(
                self.pos,
                DecodeErrorReason::ValueTruncated {
                    index,
                    declared: len,
                    available,
                },
            )
        };
        let split = DecodeError::new(self.pos, DecodeErrorReason::SplitCharacter { index });

        let end = match self.unit {
            LengthUnit::Bytes => {
                if len > rest.len() {
                    return Err(truncated(rest.len()));
                }
                if !rest.is_char_boundary(len) {
                    return Err(split);
                }
                len
            }
            LengthUnit::Chars => match len.checked_sub(1) {
                None => 0,
                Some(last) => match rest.char_indices().nth(last) {
                    Some((i, c)) => i + c.len_utf8(),
                    None => return Err(truncated(rest.chars().count())),
                },
            },
            LengthUnit::Utf16 => {
                let mut units = 0;
                let mut end = 0;
                let mut chars = rest.chars();
                while units < len {
                    match chars.next() {
                        Some(c) => {
                            units += c.len_utf16();
                            end += c.len_utf8();
                        }
                        None => return Err(truncated(units)),
                    }
                }
                if units > len {
                    return Err(split);
                }
                end
            }
        };

        self.pos += end;
        Ok(&rest[..end])
    }
}
