//! Codec options

/// Unit in which value length prefixes are counted.
///
/// All units agree for ASCII text. They differ only in how a value with
/// non-ASCII characters declares its length; the grammar itself is the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    /// Unicode scalar values (`char`s)
    #[default]
    Chars,
    /// UTF-16 code units, as counted by wide-string hosts
    Utf16,
    /// UTF-8 bytes
    Bytes,
}

impl LengthUnit {
    /// Length of `value` in this unit
    pub fn measure(self, value: &str) -> usize {
        match self {
            LengthUnit::Chars => value.chars().count(),
            LengthUnit::Utf16 => value.encode_utf16().count(),
            LengthUnit::Bytes => value.len(),
        }
    }
}

/// Options for encoding and decoding range data
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// How length prefixes are counted (default: chars)
    pub length_unit: LengthUnit,
}

impl CodecOptions {
    /// Options with the given length unit
    pub fn with_length_unit(length_unit: LengthUnit) -> Self {
        Self { length_unit }
    }
}
