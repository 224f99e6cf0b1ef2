//! RLP decoding.
//!
//! The parser works on a fully buffered input and either returns a complete
//! item tree or an error; it never yields a partial tree.
//!
//! # Security
//!
//! - Validates all length fields before access
//! - Rejects non-canonical encodings
//! - Bounded recursion depth (see [`DecodeConfig`])

use alloc::vec::Vec;

use flow_rlp_common::constants::{
    LIST_LONG_OFFSET, LIST_SHORT_OFFSET, SHORT_LENGTH_LIMIT, SINGLE_BYTE_MAX,
    STRING_LONG_OFFSET, STRING_SHORT_OFFSET,
};
use flow_rlp_common::RlpError;

use crate::config::DecodeConfig;
use crate::item::Item;

/// Classification of a prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// The byte is its own value.
    Byte(u8),
    /// String whose payload length is in the prefix.
    ShortString(usize),
    /// String followed by a length field of the given size.
    LongString(usize),
    /// List whose payload length is in the prefix.
    ShortList(usize),
    /// List followed by a length field of the given size.
    LongList(usize),
}

impl Prefix {
    pub fn from_byte(b: u8) -> Self {
        match b {
            0x00..=SINGLE_BYTE_MAX => Prefix::Byte(b),
            STRING_SHORT_OFFSET..=STRING_LONG_OFFSET => {
                Prefix::ShortString((b - STRING_SHORT_OFFSET) as usize)
            }
            0xb8..=0xbf => Prefix::LongString((b - STRING_LONG_OFFSET) as usize),
            LIST_SHORT_OFFSET..=LIST_LONG_OFFSET => {
                Prefix::ShortList((b - LIST_SHORT_OFFSET) as usize)
            }
            0xf8..=0xff => Prefix::LongList((b - LIST_LONG_OFFSET) as usize),
        }
    }

    #[inline]
    pub fn is_list(self) -> bool {
        matches!(self, Prefix::ShortList(_) | Prefix::LongList(_))
    }
}

/// A read cursor over one input buffer.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    config: DecodeConfig,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, DecodeConfig::default())
    }

    pub fn with_config(input: &'a [u8], config: DecodeConfig) -> Self {
        if config != DecodeConfig::default() {
            log::debug!(
                "rlp: parser max_depth={} max_input_len={:?}",
                config.max_depth,
                config.max_input_len
            );
        }
        Self {
            input,
            pos: 0,
            config,
        }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed input.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Parses the next top-level item.
    pub fn next_item(&mut self) -> Result<Item, RlpError> {
        if let Some(max) = self.config.max_input_len {
            if self.input.len() > max {
                return Err(RlpError::InputTooLarge);
            }
        }
        if self.is_empty() {
            return Err(RlpError::EmptyInput);
        }
        self.read_item(0)
    }

    /// Fails if any input is left unconsumed.
    pub fn finish(self) -> Result<(), RlpError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RlpError::TrailingBytes)
        }
    }

    fn read_item(&mut self, depth: usize) -> Result<Item, RlpError> {
        let prefix = Prefix::from_byte(self.take(1)?[0]);

        match prefix {
            Prefix::Byte(b) => Ok(Item::ByteString(alloc::vec![b])),

            Prefix::ShortString(len) => {
                let data = self.take(len)?;
                // Single byte below 0x80 should be encoded as itself
                if len == 1 && data[0] <= SINGLE_BYTE_MAX {
                    return Err(RlpError::NonCanonicalEncoding);
                }
                Ok(Item::ByteString(data.to_vec()))
            }

            Prefix::LongString(len_of_len) => {
                let len = self.read_long_length(len_of_len)?;
                Ok(Item::ByteString(self.take(len)?.to_vec()))
            }

            Prefix::ShortList(len) => self.read_list(len, depth + 1),

            Prefix::LongList(len_of_len) => {
                let len = self.read_long_length(len_of_len)?;
                self.read_list(len, depth + 1)
            }
        }
    }

    /// Reads a long-form length field and checks it is minimal.
    fn read_long_length(&mut self, len_of_len: usize) -> Result<usize, RlpError> {
        let len_bytes = self.take(len_of_len)?;

        // Leading zero means the length field could have been shorter
        if len_bytes[0] == 0 {
            return Err(RlpError::NonCanonicalEncoding);
        }
        if len_bytes.len() > core::mem::size_of::<usize>() {
            return Err(RlpError::LengthOverflow);
        }

        let len = len_bytes
            .iter()
            .fold(0usize, |acc, &b| acc << 8 | b as usize);

        if len <= SHORT_LENGTH_LIMIT {
            return Err(RlpError::NonCanonicalEncoding);
        }
        Ok(len)
    }

    fn read_list(&mut self, len: usize, depth: usize) -> Result<Item, RlpError> {
        if depth > self.config.max_depth {
            return Err(RlpError::TooDeep);
        }

        let mut span = Parser {
            input: self.take(len)?,
            pos: 0,
            config: self.config,
        };

        let mut items = Vec::new();
        while !span.is_empty() {
            // The span itself is in bounds, so a child running past it
            // disagrees with the list header rather than the buffer.
            let item = span.read_item(depth).map_err(|e| match e {
                RlpError::TruncatedInput => RlpError::MalformedLengthPrefix,
                other => other,
            })?;
            items.push(item);
        }

        Ok(Item::List(items))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], RlpError> {
        let end = self.pos.checked_add(n).ok_or(RlpError::TruncatedInput)?;
        let input = self.input;
        let data = input.get(self.pos..end).ok_or(RlpError::TruncatedInput)?;
        self.pos = end;
        Ok(data)
    }
}

/// Decodes exactly one item, rejecting trailing bytes.
pub fn decode(input: &[u8]) -> Result<Item, RlpError> {
    decode_with_config(input, DecodeConfig::default())
}

/// Decodes exactly one item under the given limits.
pub fn decode_with_config(input: &[u8], config: DecodeConfig) -> Result<Item, RlpError> {
    let mut parser = Parser::with_config(input, config);
    let item = parser.next_item()?;
    parser.finish()?;
    log::trace!("rlp: decoded {} bytes", input.len());
    Ok(item)
}

/// Decodes one item from the front of `input`, returning the rest.
pub fn decode_prefix(input: &[u8]) -> Result<(Item, &[u8]), RlpError> {
    let mut parser = Parser::new(input);
    let item = parser.next_item()?;
    Ok((item, parser.remaining()))
}

/// Decodes a concatenation of top-level items.
pub fn decode_all(input: &[u8]) -> Result<Vec<Item>, RlpError> {
    let mut parser = Parser::new(input);
    let mut items = Vec::new();
    while !parser.is_empty() {
        items.push(parser.next_item()?);
    }
    Ok(items)
}
