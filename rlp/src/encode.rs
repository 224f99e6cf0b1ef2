//! RLP encoding.
//!
//! Encoding rules:
//! - Single byte [0x00, 0x7f]: itself
//! - String of 0-55 bytes: 0x80 + len, then data
//! - Longer string: 0xb7 + len_of_len, then len, then data
//! - List with 0-55 payload bytes: 0xc0 + len, then items
//! - Longer list: 0xf7 + len_of_len, then len, then items
//!
//! Encoding never fails; every item tree has exactly one canonical form.

use alloc::vec::Vec;

use flow_rlp_common::constants::{
    LIST_LONG_OFFSET, LIST_SHORT_OFFSET, SHORT_LENGTH_LIMIT, SINGLE_BYTE_MAX,
    STRING_LONG_OFFSET, STRING_SHORT_OFFSET,
};

use crate::item::{trim_leading_zeros, Item};

/// Encodes an item tree into a fresh buffer.
pub fn encode(item: &Item) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(item));
    encode_into(item, &mut out);
    log::trace!("rlp: encoded {} bytes", out.len());
    out
}

/// Appends the encoding of `item` to `out`.
pub fn encode_into(item: &Item, out: &mut Vec<u8>) {
    match item {
        Item::ByteString(data) => write_bytes(data, out),
        Item::Null => write_bytes(&[], out),
        Item::List(items) => {
            let payload_len = items.iter().map(encoded_len).sum();
            encode_header(true, payload_len, out);
            for child in items {
                encode_into(child, out);
            }
        }
    }
}

/// Number of bytes `encode(item)` produces.
pub fn encoded_len(item: &Item) -> usize {
    match item {
        Item::ByteString(data) => bytes_len(data),
        Item::Null => 1,
        Item::List(items) => {
            let payload_len: usize = items.iter().map(encoded_len).sum();
            header_len(payload_len) + payload_len
        }
    }
}

/// Writes the prefix (and length field, in long form) for a payload of
/// `payload_len` bytes.
///
/// For strings this is only correct when the payload is not a single byte
/// below 0x80; [`encode_bytes`] handles that case.
pub fn encode_header(is_list: bool, payload_len: usize, out: &mut Vec<u8>) {
    let (short, long) = if is_list {
        (LIST_SHORT_OFFSET, LIST_LONG_OFFSET)
    } else {
        (STRING_SHORT_OFFSET, STRING_LONG_OFFSET)
    };

    if payload_len <= SHORT_LENGTH_LIMIT {
        out.push(short + payload_len as u8);
    } else {
        let len_bytes = payload_len.to_be_bytes();
        let len_bytes = trim_leading_zeros(&len_bytes);
        out.push(long + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes);
    }
}

/// Encodes a byte slice as an RLP string.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes_len(data));
    write_bytes(data, &mut out);
    out
}

/// Wraps already-encoded children in a list header.
pub fn encode_list_payload(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(header_len(payload.len()) + payload.len());
    encode_header(true, payload.len(), &mut out);
    out.extend_from_slice(payload);
    out
}

/// Encodes a u64 as a minimal big-endian RLP string.
pub fn encode_u64(value: u64) -> Vec<u8> {
    encode_bytes(trim_leading_zeros(&value.to_be_bytes()))
}

fn write_bytes(data: &[u8], out: &mut Vec<u8>) {
    if data.len() == 1 && data[0] <= SINGLE_BYTE_MAX {
        out.push(data[0]);
    } else {
        encode_header(false, data.len(), out);
        out.extend_from_slice(data);
    }
}

fn bytes_len(data: &[u8]) -> usize {
    if data.len() == 1 && data[0] <= SINGLE_BYTE_MAX {
        1
    } else {
        header_len(data.len()) + data.len()
    }
}

fn header_len(payload_len: usize) -> usize {
    if payload_len <= SHORT_LENGTH_LIMIT {
        1
    } else {
        1 + trim_leading_zeros(&payload_len.to_be_bytes()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_encode_u64() {
        assert_eq!(encode_u64(0), vec![0x80]);
        assert_eq!(encode_u64(127), vec![0x7f]);
        assert_eq!(encode_u64(128), vec![0x81, 0x80]);
        assert_eq!(encode_u64(256), vec![0x82, 0x01, 0x00]);
        assert_eq!(
            encode_u64(u64::MAX),
            vec![0x88, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_encode_bytes() {
        assert_eq!(encode_bytes(b""), vec![0x80]);
        assert_eq!(encode_bytes(&[0x00]), vec![0x00]);
        assert_eq!(encode_bytes(&[0x7f]), vec![0x7f]);
        assert_eq!(encode_bytes(&[0x80]), vec![0x81, 0x80]);
        assert_eq!(encode_bytes(b"cat"), vec![0x83, b'c', b'a', b't']);
    }

    #[test]
    fn test_short_long_string_boundary() {
        let data = [0xaa; 55];
        let out = encode_bytes(&data);
        assert_eq!(out[0], 0xb7);
        assert_eq!(out.len(), 56);

        let data = [0xaa; 56];
        let out = encode_bytes(&data);
        assert_eq!(&out[..2], &[0xb8, 56]);
        assert_eq!(out.len(), 58);
    }

    #[test]
    fn test_long_string_two_byte_length() {
        let data = vec![0x01; 1024];
        let out = encode_bytes(&data);
        assert_eq!(&out[..3], &[0xb9, 0x04, 0x00]);
        assert_eq!(out.len(), 1027);
    }

    #[test]
    fn test_encode_null() {
        assert_eq!(encode(&Item::Null), vec![0x80]);
        assert_eq!(encode(&Item::list([Item::Null])), vec![0xc1, 0x80]);
    }

    #[test]
    fn test_encode_lists() {
        assert_eq!(encode(&Item::empty_list()), vec![0xc0]);
        assert_eq!(
            encode(&Item::list([Item::from("dog")])),
            vec![0xc4, 0x83, b'd', b'o', b'g']
        );
        // [ [], [[]], [ [], [[]] ] ]
        let empty = Item::empty_list;
        let set = Item::list([
            empty(),
            Item::list([empty()]),
            Item::list([empty(), Item::list([empty()])]),
        ]);
        assert_eq!(
            encode(&set),
            vec![0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0]
        );
    }

    #[test]
    fn test_long_list() {
        // 20 three-byte strings -> 80 payload bytes
        let item = Item::list((0..20).map(|_| Item::from("abc")));
        let out = encode(&item);
        assert_eq!(&out[..2], &[0xf8, 80]);
        assert_eq!(out.len(), 82);
    }

    #[test]
    fn test_encode_list_payload_matches_tree_encoding() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&encode_u64(1));
        payload.extend_from_slice(&encode_bytes(b"cat"));
        let item = Item::list([Item::from_u64(1), Item::from("cat")]);
        assert_eq!(encode_list_payload(&payload), encode(&item));
    }

    #[test]
    fn test_encoded_len_matches_output() {
        let items = [
            Item::Null,
            Item::bytes(vec![0x05]),
            Item::bytes(vec![0x99; 300]),
            Item::list((0..40).map(|i| Item::from_u64(i * 1000))),
            Item::list([Item::list([Item::list([Item::from("x")])])]),
        ];
        for item in &items {
            assert_eq!(encoded_len(item), encode(item).len());
        }
    }
}
