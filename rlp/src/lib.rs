//! Recursive-Length-Prefix (RLP) codec.
//!
//! - [`item`]: the `Item` tree (byte string, list, or null sentinel)
//! - [`encode`]: canonical encoding
//! - [`decode`]: strict parsing that rejects non-canonical input
//! - [`dispatch`]: pluggable projection of items into typed values
//!
//! ```
//! use flow_rlp::{decode, encode, Item};
//!
//! let item = Item::list([Item::from("dog")]);
//! let bytes = encode(&item);
//! assert_eq!(bytes, [0xc4, 0x83, b'd', b'o', b'g']);
//! assert_eq!(decode(&bytes).unwrap(), item);
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod decode;
pub mod dispatch;
pub mod encode;
pub mod item;

pub use config::DecodeConfig;
pub use decode::{decode, decode_all, decode_prefix, decode_with_config, Parser, Prefix};
pub use dispatch::{decode_as, NoneDecoder, RlpDecoder};
pub use encode::{encode, encode_into, encoded_len};
pub use item::Item;

pub use flow_rlp_common::{constants, RlpError, TypedDecodeError};
