//! The RLP item tree.
//!
//! An `Item` is either a byte string, a list of items, or the `Null`
//! sentinel. `Null` travels on the wire as the empty byte string and compares
//! equal to it; only typed decoders (and [`Item::is_null`]) tell them apart.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use flow_rlp_common::RlpError;

/// A decoded or to-be-encoded RLP value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    /// A byte string (may be empty).
    ByteString(Vec<u8>),
    /// An ordered list of items (may be empty).
    List(Vec<Item>),
    /// Absent value; encodes as the empty byte string.
    Null,
}

impl Item {
    /// Creates a byte-string item.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Item::ByteString(data.into())
    }

    /// Creates a list item from its children, preserving order.
    pub fn list(items: impl IntoIterator<Item = Item>) -> Self {
        Item::List(items.into_iter().collect())
    }

    /// Creates an empty list.
    pub fn empty_list() -> Self {
        Item::List(Vec::new())
    }

    /// Creates the minimal big-endian byte string for `value`.
    /// Zero maps to the empty string.
    pub fn from_u64(value: u64) -> Self {
        Item::ByteString(trim_leading_zeros(&value.to_be_bytes()).to_vec())
    }

    /// Creates the minimal big-endian byte string for `value`.
    pub fn from_u128(value: u128) -> Self {
        Item::ByteString(trim_leading_zeros(&value.to_be_bytes()).to_vec())
    }

    /// Returns true if this is a byte string or the null sentinel.
    #[inline]
    pub fn is_bytes(&self) -> bool {
        !self.is_list()
    }

    /// Returns true if this is a list.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Item::List(_))
    }

    /// Returns true only for the `Null` sentinel, not for an empty byte string.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Item::Null)
    }

    /// Returns true for an empty byte string, an empty list, or `Null`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload length for byte strings, child count for lists.
    pub fn len(&self) -> usize {
        match self {
            Item::ByteString(data) => data.len(),
            Item::List(items) => items.len(),
            Item::Null => 0,
        }
    }

    /// Returns the byte-string payload.
    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            Item::ByteString(data) => Ok(data),
            Item::Null => Ok(&[]),
            Item::List(_) => Err(RlpError::ExpectedString),
        }
    }

    /// Returns the list children.
    pub fn as_list(&self) -> Result<&[Item], RlpError> {
        match self {
            Item::List(items) => Ok(items),
            _ => Err(RlpError::ExpectedList),
        }
    }

    /// Consumes the item, returning the byte-string payload.
    pub fn into_bytes(self) -> Result<Vec<u8>, RlpError> {
        match self {
            Item::ByteString(data) => Ok(data),
            Item::Null => Ok(Vec::new()),
            Item::List(_) => Err(RlpError::ExpectedString),
        }
    }

    /// Consumes the item, returning the list children.
    pub fn into_list(self) -> Result<Vec<Item>, RlpError> {
        match self {
            Item::List(items) => Ok(items),
            _ => Err(RlpError::ExpectedList),
        }
    }

    pub fn as_u8(&self) -> Result<u8, RlpError> {
        self.canonical_uint(1).map(|v| v as u8)
    }

    pub fn as_u16(&self) -> Result<u16, RlpError> {
        self.canonical_uint(2).map(|v| v as u16)
    }

    pub fn as_u32(&self) -> Result<u32, RlpError> {
        self.canonical_uint(4).map(|v| v as u32)
    }

    /// Interprets the byte string as a canonical big-endian integer.
    ///
    /// The empty string is zero. Leading zero bytes are rejected, including a
    /// lone `0x00`.
    pub fn as_u64(&self) -> Result<u64, RlpError> {
        self.canonical_uint(8).map(|v| v as u64)
    }

    pub fn as_u128(&self) -> Result<u128, RlpError> {
        self.canonical_uint(16)
    }

    pub fn as_usize(&self) -> Result<usize, RlpError> {
        self.canonical_uint(core::mem::size_of::<usize>())
            .map(|v| v as usize)
    }

    fn canonical_uint(&self, max_bytes: usize) -> Result<u128, RlpError> {
        let data = self.as_bytes()?;
        if data.first() == Some(&0) {
            return Err(RlpError::NonCanonicalEncoding);
        }
        if data.len() > max_bytes {
            return Err(RlpError::IntegerOverflow);
        }
        Ok(data.iter().fold(0u128, |acc, &b| acc << 8 | b as u128))
    }
}

/// Strips leading zero bytes from a big-endian integer.
pub(crate) fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

// Null and the empty byte string share a wire form, so they compare equal.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::List(a), Item::List(b)) => a == b,
            (Item::List(_), _) | (_, Item::List(_)) => false,
            (a, b) => a.as_bytes().ok() == b.as_bytes().ok(),
        }
    }
}

impl Eq for Item {}

impl Default for Item {
    fn default() -> Self {
        Item::Null
    }
}

impl From<Vec<u8>> for Item {
    fn from(data: Vec<u8>) -> Self {
        Item::ByteString(data)
    }
}

impl From<&[u8]> for Item {
    fn from(data: &[u8]) -> Self {
        Item::ByteString(data.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Item {
    fn from(data: [u8; N]) -> Self {
        Item::ByteString(data.to_vec())
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::ByteString(s.as_bytes().to_vec())
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::ByteString(s.into_bytes())
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

impl From<u8> for Item {
    fn from(value: u8) -> Self {
        Item::from_u64(value as u64)
    }
}

impl From<u16> for Item {
    fn from(value: u16) -> Self {
        Item::from_u64(value as u64)
    }
}

impl From<u32> for Item {
    fn from(value: u32) -> Self {
        Item::from_u64(value as u64)
    }
}

impl From<u64> for Item {
    fn from(value: u64) -> Self {
        Item::from_u64(value)
    }
}

impl From<u128> for Item {
    fn from(value: u128) -> Self {
        Item::from_u128(value)
    }
}

impl<T: Into<Item>> From<Option<T>> for Item {
    fn from(value: Option<T>) -> Self {
        value.map_or(Item::Null, Into::into)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::ByteString(data) => write!(f, "0x{}", hex::encode(data)),
            Item::Null => write!(f, "null"),
            Item::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
