/// How a boolean element's single value byte maps onto `true`/`false`.
///
/// `Standard` is the conventional mapping. `Inverted` reproduces a
/// legacy peer that wrote `0x00` for `true` and `0x01` for `false`;
/// select it only when talking to that peer. Bytes other than 0 and 1
/// are invalid under both mappings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BooleanEncoding {
    /// `0x00` → `false`, `0x01` → `true`.
    #[default]
    Standard,
    /// `0x00` → `true`, `0x01` → `false`.
    Inverted,
}

impl BooleanEncoding {
    /// Decode a boolean value byte, or `None` if it is neither 0 nor 1.
    #[must_use]
    pub fn decode(self, byte: u8) -> Option<bool> {
        let raw = match byte {
            0x00 => false,
            0x01 => true,
            _ => return None,
        };
        Some(match self {
            Self::Standard => raw,
            Self::Inverted => !raw,
        })
    }

    #[must_use]
    pub fn encode(self, value: bool) -> u8 {
        let raw = match self {
            Self::Standard => value,
            Self::Inverted => !value,
        };
        u8::from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_mapping() {
        assert_eq!(BooleanEncoding::Standard.decode(0), Some(false));
        assert_eq!(BooleanEncoding::Standard.decode(1), Some(true));
        assert_eq!(BooleanEncoding::Standard.encode(true), 1);
    }

    #[test]
    fn inverted_mapping() {
        assert_eq!(BooleanEncoding::Inverted.decode(0), Some(true));
        assert_eq!(BooleanEncoding::Inverted.decode(1), Some(false));
        assert_eq!(BooleanEncoding::Inverted.encode(true), 0);
        assert_eq!(BooleanEncoding::Inverted.encode(false), 1);
    }

    #[test]
    fn other_bytes_invalid() {
        for byte in [2u8, 0x7F, 0xFF] {
            assert_eq!(BooleanEncoding::Standard.decode(byte), None);
            assert_eq!(BooleanEncoding::Inverted.decode(byte), None);
        }
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(BooleanEncoding::default(), BooleanEncoding::Standard);
    }
}
