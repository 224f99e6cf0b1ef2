//! Parser configuration.

use flow_rlp_common::constants::DEFAULT_MAX_DEPTH;

/// Limits applied by the [`Parser`](crate::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeConfig {
    /// Maximum list nesting. A top-level list has depth 1.
    pub max_depth: usize,
    /// Maximum accepted input size in bytes, if any.
    pub max_input_len: Option<usize>,
}

impl DecodeConfig {
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = Some(max_input_len);
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}
