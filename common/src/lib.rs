//! Shared types for the flow-rlp codec.
//!
//! Error types and wire-format constants live here so that crates consuming
//! decoded items can name them without depending on the codec itself.

#![no_std]

extern crate alloc;

pub mod constants;
pub mod error;

pub use error::{RlpError, TypedDecodeError};
