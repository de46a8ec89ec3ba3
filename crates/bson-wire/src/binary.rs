use crate::error::WireError;
use crate::primitives::{read_u32, read_u8, take_bytes, write_u32, write_u8};

/// Binary blob subtype.
///
/// ```text
/// ┌──────┬──────────┬───────────────────────────────────────┐
/// │ Wire │ Variant  │ Notes                                 │
/// ├──────┼──────────┼───────────────────────────────────────┤
/// │ 0x00 │ Generic  │                                       │
/// │ 0x01 │ Function │                                       │
/// │ 0x02 │ Generic  │ legacy binary, payload taken as-is    │
/// │ 0x03 │ Uuid     │                                       │
/// │ 0x04 │ Md5      │                                       │
/// │ 0x80 │ Generic  │ user-defined range collapses here     │
/// └──────┴──────────┴───────────────────────────────────────┘
/// ```
///
/// Any other subtype byte is rejected. Because 0x02 and 0x80 decode to
/// `Generic`, the encoder always writes `Generic` as 0x00.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinarySubtype {
    Generic,
    Function,
    Uuid,
    Md5,
}

impl BinarySubtype {
    /// Map a wire subtype byte onto a variant.
    ///
    /// # Errors
    ///
    /// [`WireError::UnsupportedSubtype`] for bytes outside the table.
    pub fn from_wire(subtype: u8) -> Result<Self, WireError> {
        match subtype {
            0x00 | 0x02 | 0x80 => Ok(Self::Generic),
            0x01 => Ok(Self::Function),
            0x03 => Ok(Self::Uuid),
            0x04 => Ok(Self::Md5),
            other => Err(WireError::UnsupportedSubtype { subtype: other }),
        }
    }

    /// The canonical byte written by the encoder.
    #[must_use]
    pub fn wire_id(self) -> u8 {
        match self {
            Self::Generic => 0x00,
            Self::Function => 0x01,
            Self::Uuid => 0x03,
            Self::Md5 => 0x04,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Function => "function",
            Self::Uuid => "uuid",
            Self::Md5 => "md5",
        }
    }
}

/// Read a binary blob.
///
/// ```text
/// ┌──────────────┬─────────────┬────────────────┐
/// │ len (u32 LE) │ subtype u8  │ payload [len]  │
/// └──────────────┴─────────────┴────────────────┘
/// ```
///
/// Unlike strings, `len` counts only the payload; there is no
/// terminator. The payload is returned as a borrowed slice.
///
/// # Errors
///
/// - [`WireError::TruncatedInput`] if the header or payload is short.
/// - [`WireError::UnsupportedSubtype`] for an unknown subtype byte.
pub fn read_binary(buf: &[u8]) -> Result<((BinarySubtype, &[u8]), &[u8]), WireError> {
    let (declared, rest) = read_u32(buf)?;
    let (subtype_byte, rest) = read_u8(rest)?;
    let subtype = BinarySubtype::from_wire(subtype_byte)?;
    let len = declared as usize;
    if rest.len() < len {
        return Err(WireError::TruncatedInput {
            needed: len.saturating_add(5),
            available: buf.len(),
        });
    }
    let (payload, rest) = take_bytes(rest, len)?;
    Ok(((subtype, payload), rest))
}

/// Append a binary blob.
///
/// # Errors
///
/// [`WireError::MalformedLength`] if the payload does not fit a `u32`.
pub fn write_binary(
    buf: &mut Vec<u8>,
    subtype: BinarySubtype,
    payload: &[u8],
) -> Result<(), WireError> {
    let len = u32::try_from(payload.len()).map_err(|_| WireError::MalformedLength {
        declared: u32::MAX,
    })?;
    write_u32(buf, len);
    write_u8(buf, subtype.wire_id());
    buf.extend_from_slice(payload);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(subtype: u8, payload: &[u8]) -> Vec<u8> {
        let mut buf = u32::try_from(payload.len()).unwrap().to_le_bytes().to_vec();
        buf.push(subtype);
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn subtype_table() {
        let cases = [
            (0x00, BinarySubtype::Generic),
            (0x01, BinarySubtype::Function),
            (0x02, BinarySubtype::Generic),
            (0x03, BinarySubtype::Uuid),
            (0x04, BinarySubtype::Md5),
            (0x80, BinarySubtype::Generic),
        ];
        for (byte, expected) in cases {
            assert_eq!(
                BinarySubtype::from_wire(byte).unwrap(),
                expected,
                "subtype {byte:#04X}"
            );
        }
    }

    #[test]
    fn unknown_subtypes_rejected() {
        for byte in [0x05, 0x06, 0x7F, 0x81, 0xFF] {
            assert!(matches!(
                BinarySubtype::from_wire(byte),
                Err(WireError::UnsupportedSubtype { subtype }) if subtype == byte
            ));
        }
    }

    #[test]
    fn reads_uuid_payload() {
        let mut buf = blob(0x03, &[0xAB; 16]);
        buf.push(0x99);
        let ((subtype, payload), rest) = read_binary(&buf).unwrap();
        assert_eq!(subtype, BinarySubtype::Uuid);
        assert_eq!(payload, &[0xAB; 16]);
        assert_eq!(rest, &[0x99]);
    }

    #[test]
    fn legacy_subtype_payload_used_as_is() {
        // The legacy form carries its own inner length; it is not stripped.
        let payload = [0x02, 0x00, 0x00, 0x00, 0xCA, 0xFE];
        let buf = blob(0x02, &payload);
        let ((subtype, data), _) = read_binary(&buf).unwrap();
        assert_eq!(subtype, BinarySubtype::Generic);
        assert_eq!(data, &payload);
    }

    #[test]
    fn truncated_payload() {
        let mut buf = blob(0x00, &[1, 2, 3, 4]);
        buf.truncate(7);
        assert!(matches!(
            read_binary(&buf),
            Err(WireError::TruncatedInput {
                needed: 9,
                available: 7
            })
        ));
    }

    #[test]
    fn unsupported_subtype_in_blob() {
        let buf = blob(0x09, b"xyz");
        assert!(matches!(
            read_binary(&buf),
            Err(WireError::UnsupportedSubtype { subtype: 0x09 })
        ));
    }

    #[test]
    fn write_uses_canonical_subtype() {
        let mut buf = Vec::new();
        write_binary(&mut buf, BinarySubtype::Md5, &[7; 16]).unwrap();
        assert_eq!(&buf[..5], &[16, 0, 0, 0, 0x04]);
        let ((subtype, payload), rest) = read_binary(&buf).unwrap();
        assert_eq!(subtype, BinarySubtype::Md5);
        assert_eq!(payload.len(), 16);
        assert!(rest.is_empty());
    }
}
