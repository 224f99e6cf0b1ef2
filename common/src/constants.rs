//! Wire-format constants.

/// Largest payload length expressible in the prefix byte itself.
pub const SHORT_LENGTH_LIMIT: usize = 55;

/// Largest byte value that encodes as itself.
pub const SINGLE_BYTE_MAX: u8 = 0x7f;

/// Prefix offset for byte strings of up to 55 bytes.
pub const STRING_SHORT_OFFSET: u8 = 0x80;

/// Prefix offset for byte strings whose length needs a separate length field.
/// The prefix is this value plus the number of length bytes.
pub const STRING_LONG_OFFSET: u8 = 0xb7;

/// Prefix offset for lists with up to 55 bytes of encoded children.
pub const LIST_SHORT_OFFSET: u8 = 0xc0;

/// Prefix offset for lists whose payload length needs a separate length field.
pub const LIST_LONG_OFFSET: u8 = 0xf7;

/// Canonical encoding of the empty byte string (and of the null sentinel).
pub const EMPTY_STRING_CODE: u8 = STRING_SHORT_OFFSET;

/// Canonical encoding of the empty list.
pub const EMPTY_LIST_CODE: u8 = LIST_SHORT_OFFSET;

/// Default maximum list nesting accepted by the parser.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_ranges_are_contiguous() {
        assert_eq!(STRING_SHORT_OFFSET, SINGLE_BYTE_MAX + 1);
        assert_eq!(
            STRING_LONG_OFFSET as usize,
            STRING_SHORT_OFFSET as usize + SHORT_LENGTH_LIMIT
        );
        assert_eq!(
            LIST_LONG_OFFSET as usize,
            LIST_SHORT_OFFSET as usize + SHORT_LENGTH_LIMIT
        );
        // eight length bytes on top of the long offsets stays within a byte
        assert_eq!(STRING_LONG_OFFSET + 8, 0xbf);
        assert_eq!(LIST_LONG_OFFSET as u16 + 8, 0xff);
    }
}
