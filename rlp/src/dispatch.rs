//! Typed decode dispatch.
//!
//! A [`RlpDecoder<T>`] projects a parsed [`Item`] into a domain value. The
//! result is `Ok(None)` when the value is absent, which is how every decoder
//! here treats the [`Item::Null`] sentinel. Structurally valid items of the
//! wrong shape fail with a [`TypedDecodeError`]; there are no silent
//! conversions between lists and byte strings.
//!
//! Decoders are plain values chosen at compile time, so domain layers compose
//! them generically:
//!
//! ```
//! use flow_rlp::dispatch::{decode_as, ListDecoder, U64Decoder};
//!
//! let values = decode_as(&[0xc3, 0x01, 0x02, 0x03], &ListDecoder::new(U64Decoder)).unwrap();
//! assert_eq!(values, Some(vec![1, 2, 3]));
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::marker::PhantomData;

use flow_rlp_common::TypedDecodeError;

use crate::decode::decode;
use crate::item::Item;

/// Converts a parsed item into a value of type `T`.
pub trait RlpDecoder<T> {
    /// Decodes `item`, which may be the `Null` sentinel.
    ///
    /// Implementations must not fail on `Null`; absence is `Ok(None)`.
    fn decode(&self, item: &Item) -> Result<Option<T>, TypedDecodeError>;
}

impl<T, D> RlpDecoder<T> for &D
where
    D: RlpDecoder<T> + ?Sized,
{
    fn decode(&self, item: &Item) -> Result<Option<T>, TypedDecodeError> {
        (**self).decode(item)
    }
}

/// Decoder that ignores its input and always yields an absent value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoneDecoder;

impl<T> RlpDecoder<T> for NoneDecoder {
    fn decode(&self, _item: &Item) -> Result<Option<T>, TypedDecodeError> {
        Ok(None)
    }
}

/// Returns the item itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemDecoder;

impl RlpDecoder<Item> for ItemDecoder {
    fn decode(&self, item: &Item) -> Result<Option<Item>, TypedDecodeError> {
        if item.is_null() {
            return Ok(None);
        }
        Ok(Some(item.clone()))
    }
}

/// Raw byte-string payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesDecoder;

impl RlpDecoder<Vec<u8>> for BytesDecoder {
    fn decode(&self, item: &Item) -> Result<Option<Vec<u8>>, TypedDecodeError> {
        if item.is_null() {
            return Ok(None);
        }
        Ok(Some(item.as_bytes()?.to_vec()))
    }
}

/// UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringDecoder;

impl RlpDecoder<String> for StringDecoder {
    fn decode(&self, item: &Item) -> Result<Option<String>, TypedDecodeError> {
        if item.is_null() {
            return Ok(None);
        }
        let s = core::str::from_utf8(item.as_bytes()?)
            .map_err(|_| TypedDecodeError::InvalidUtf8)?;
        Ok(Some(String::from(s)))
    }
}

/// Canonical big-endian unsigned integer up to 64 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct U64Decoder;

impl RlpDecoder<u64> for U64Decoder {
    fn decode(&self, item: &Item) -> Result<Option<u64>, TypedDecodeError> {
        if item.is_null() {
            return Ok(None);
        }
        Ok(Some(item.as_u64()?))
    }
}

/// Canonical big-endian unsigned integer up to 128 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct U128Decoder;

impl RlpDecoder<u128> for U128Decoder {
    fn decode(&self, item: &Item) -> Result<Option<u128>, TypedDecodeError> {
        if item.is_null() {
            return Ok(None);
        }
        Ok(Some(item.as_u128()?))
    }
}

/// Byte string of exactly `N` bytes, e.g. an address or a hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBytesDecoder<const N: usize>;

impl<const N: usize> RlpDecoder<[u8; N]> for FixedBytesDecoder<N> {
    fn decode(&self, item: &Item) -> Result<Option<[u8; N]>, TypedDecodeError> {
        if item.is_null() {
            return Ok(None);
        }
        let data = item.as_bytes()?;
        let out: [u8; N] = data.try_into().map_err(|_| TypedDecodeError::InvalidLength {
            expected: N,
            found: data.len(),
        })?;
        Ok(Some(out))
    }
}

/// Decodes every child of a list through the inner decoder, in order.
///
/// A child that decodes to an absent value fails the whole list with
/// [`TypedDecodeError::MissingElement`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ListDecoder<D> {
    inner: D,
}

impl<D> ListDecoder<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<T, D> RlpDecoder<Vec<T>> for ListDecoder<D>
where
    D: RlpDecoder<T>,
{
    fn decode(&self, item: &Item) -> Result<Option<Vec<T>>, TypedDecodeError> {
        if item.is_null() {
            return Ok(None);
        }
        let children = item.as_list()?;
        let mut out = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            let value = self
                .inner
                .decode(child)?
                .ok_or(TypedDecodeError::MissingElement { index })?;
            out.push(value);
        }
        Ok(Some(out))
    }
}

/// Adapts a closure into a decoder.
pub struct FnDecoder<F, T> {
    f: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> FnDecoder<F, T>
where
    F: Fn(&Item) -> Result<Option<T>, TypedDecodeError>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<F, T> RlpDecoder<T> for FnDecoder<F, T>
where
    F: Fn(&Item) -> Result<Option<T>, TypedDecodeError>,
{
    fn decode(&self, item: &Item) -> Result<Option<T>, TypedDecodeError> {
        (self.f)(item)
    }
}

/// Returns the children of `item`, checking there are exactly `expected`.
pub fn expect_list_len(item: &Item, expected: usize) -> Result<&[Item], TypedDecodeError> {
    let children = item.as_list()?;
    if children.len() != expected {
        return Err(TypedDecodeError::ArityMismatch {
            expected,
            found: children.len(),
        });
    }
    Ok(children)
}

/// Parses `input` as exactly one item and hands it to `decoder`.
pub fn decode_as<T, D>(input: &[u8], decoder: &D) -> Result<Option<T>, TypedDecodeError>
where
    D: RlpDecoder<T> + ?Sized,
{
    let item = decode(input)?;
    decoder.decode(&item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use flow_rlp_common::RlpError;

    #[test]
    fn test_none_decoder_on_null() {
        let result: Result<Option<u64>, _> = NoneDecoder.decode(&Item::Null);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_none_decoder_ignores_everything() {
        let items = [
            Item::from("dog"),
            Item::empty_list(),
            Item::list([Item::Null, Item::list([Item::from_u64(9)])]),
        ];
        for item in &items {
            let result: Result<Option<String>, _> = NoneDecoder.decode(item);
            assert_eq!(result, Ok(None));
        }
    }

    #[test]
    fn test_scalar_decoders_treat_null_as_absent() {
        assert_eq!(U64Decoder.decode(&Item::Null), Ok(None));
        assert_eq!(U128Decoder.decode(&Item::Null), Ok(None));
        assert_eq!(BytesDecoder.decode(&Item::Null), Ok(None));
        assert_eq!(StringDecoder.decode(&Item::Null), Ok(None));
        assert_eq!(ItemDecoder.decode(&Item::Null), Ok(None));
        assert_eq!(FixedBytesDecoder::<4>.decode(&Item::Null), Ok(None));
        assert_eq!(ListDecoder::new(U64Decoder).decode(&Item::Null), Ok(None));
    }

    #[test]
    fn test_empty_string_is_not_null() {
        assert_eq!(U64Decoder.decode(&Item::bytes(vec![])), Ok(Some(0)));
        assert_eq!(BytesDecoder.decode(&Item::bytes(vec![])), Ok(Some(vec![])));
    }

    #[test]
    fn test_list_through_scalar_decoder_fails() {
        let list = Item::list([Item::from_u64(1)]);
        assert_eq!(
            U64Decoder.decode(&list),
            Err(TypedDecodeError::ExpectedByteString)
        );
        assert_eq!(
            BytesDecoder.decode(&list),
            Err(TypedDecodeError::ExpectedByteString)
        );
    }

    #[test]
    fn test_scalar_through_list_decoder_fails() {
        let decoder = ListDecoder::new(U64Decoder);
        assert_eq!(
            decoder.decode(&Item::from_u64(5)),
            Err(TypedDecodeError::ExpectedList)
        );
    }

    #[test]
    fn test_list_decoder_preserves_order() {
        let item = Item::list([Item::from_u64(3), Item::from_u64(1), Item::from_u64(2)]);
        let decoder = ListDecoder::new(U64Decoder);
        assert_eq!(decoder.decode(&item), Ok(Some(vec![3, 1, 2])));
    }

    #[test]
    fn test_list_decoder_missing_element() {
        let item = Item::list([Item::from_u64(3), Item::Null]);
        let decoder = ListDecoder::new(U64Decoder);
        assert_eq!(
            decoder.decode(&item),
            Err(TypedDecodeError::MissingElement { index: 1 })
        );
    }

    #[test]
    fn test_nested_list_decoder() {
        let item = Item::list([
            Item::list([Item::from("a"), Item::from("b")]),
            Item::empty_list(),
        ]);
        let decoder = ListDecoder::new(ListDecoder::new(StringDecoder));
        assert_eq!(
            decoder.decode(&item),
            Ok(Some(vec![
                vec![String::from("a"), String::from("b")],
                vec![]
            ]))
        );
    }

    #[test]
    fn test_integer_errors() {
        assert_eq!(
            U64Decoder.decode(&Item::bytes(vec![0x00, 0x01])),
            Err(TypedDecodeError::Rlp(RlpError::NonCanonicalEncoding))
        );
        assert_eq!(
            U64Decoder.decode(&Item::bytes(vec![0x01; 9])),
            Err(TypedDecodeError::Rlp(RlpError::IntegerOverflow))
        );
    }

    #[test]
    fn test_fixed_bytes() {
        let decoder = FixedBytesDecoder::<3>;
        assert_eq!(decoder.decode(&Item::from("dog")), Ok(Some(*b"dog")));
        assert_eq!(
            decoder.decode(&Item::from("dogs")),
            Err(TypedDecodeError::InvalidLength {
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        assert_eq!(
            StringDecoder.decode(&Item::bytes(vec![0xff, 0xfe])),
            Err(TypedDecodeError::InvalidUtf8)
        );
    }

    #[test]
    fn test_fn_decoder() {
        let decoder = FnDecoder::new(|item: &Item| {
            let fields = expect_list_len(item, 2)?;
            let a = fields[0].as_u64()?;
            let b = fields[1].as_u64()?;
            Ok(Some(a + b))
        });
        let item = Item::list([Item::from_u64(40), Item::from_u64(2)]);
        assert_eq!(decoder.decode(&item), Ok(Some(42)));
        assert_eq!(
            decoder.decode(&Item::list([Item::from_u64(1)])),
            Err(TypedDecodeError::ArityMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_decoder_by_reference() {
        let decoder = U64Decoder;
        let by_ref = &decoder;
        assert_eq!(by_ref.decode(&Item::from_u64(7)), Ok(Some(7)));
    }

    #[test]
    fn test_decode_as() {
        assert_eq!(
            decode_as(&[0x83, b'd', b'o', b'g'], &StringDecoder),
            Ok(Some(String::from("dog")))
        );
        assert_eq!(
            decode_as(&[0x83, b'd', b'o'], &StringDecoder),
            Err(TypedDecodeError::Rlp(RlpError::TruncatedInput))
        );
        let absent: Result<Option<u64>, _> = decode_as(&[0xc0], &NoneDecoder);
        assert_eq!(absent, Ok(None));
    }
}
