//! Map growth configuration.

use crate::error::DequeError;

/// Configuration for block map growth.
///
/// Controls how aggressively the block map grows and where the live blocks
/// are placed after a reallocation. Block capacity is not part of the
/// config: it is the `B` const parameter of [`SegDeque`](crate::SegDeque).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DequeConfig {
    /// Multiplier applied to the map length on reallocation.
    ///
    /// Default: 3. Must be at least 2. After a reallocation the free
    /// handles are split `1 : growth_factor - 1`, the larger share on the
    /// side that triggered the growth.
    pub growth_factor: usize,

    /// Floor for the map length, in block handles, when growing from a
    /// small or empty map.
    ///
    /// Default: 8. Must be at least 1.
    pub min_map_blocks: usize,
}

impl DequeConfig {
    /// Default growth factor.
    pub const DEFAULT_GROWTH_FACTOR: usize = 3;

    /// Default minimum map length.
    pub const DEFAULT_MIN_MAP_BLOCKS: usize = 8;

    /// Create a config with default values.
    pub const fn new() -> Self {
        Self {
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            min_map_blocks: Self::DEFAULT_MIN_MAP_BLOCKS,
        }
    }

    /// Set the growth factor.
    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Set the minimum map length.
    pub fn with_min_map_blocks(mut self, min_map_blocks: usize) -> Self {
        self.min_map_blocks = min_map_blocks;
        self
    }

    /// Check every constraint.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidConfig`] if `growth_factor < 2` or
    /// `min_map_blocks == 0`.
    pub fn validate(&self) -> Result<(), DequeError> {
        if self.growth_factor < 2 {
            return Err(DequeError::InvalidConfig {
                reason: format!("growth_factor must be >= 2, got {}", self.growth_factor),
            });
        }
        if self.min_map_blocks == 0 {
            return Err(DequeError::InvalidConfig {
                reason: "min_map_blocks must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self::new()
    }
}
