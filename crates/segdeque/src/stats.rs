//! Storage layout diagnostics.

/// Point-in-time view of a deque's block map and window.
///
/// Returned by [`SegDeque::stats`](crate::SegDeque::stats). Slack is
/// counted in element slots, everything else in blocks unless noted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of live elements.
    pub len: usize,
    /// Map length in block handles.
    pub map_len: usize,
    /// Handles that currently own a block, live or spare.
    pub allocated_blocks: usize,
    /// Blocks holding at least one live element.
    pub active_blocks: usize,
    /// Free slots before the first element.
    pub front_slack: usize,
    /// Free slots after the last element.
    pub back_slack: usize,
    /// Times the map was moved into a larger handle array.
    pub map_reallocations: u64,
    /// Times the live blocks were rotated within the existing map.
    pub recenterings: u64,
    /// Bytes held by the handle array and all allocated blocks.
    pub memory_bytes: usize,
}

impl StorageStats {
    /// Allocated blocks that hold no live element.
    pub fn spare_blocks(&self) -> usize {
        self.allocated_blocks - self.active_blocks
    }
}

#[cfg(test)]
mod tests {
    use crate::SegDeque;

    #[test]
    fn spare_blocks_after_pops() {
        let mut deque: SegDeque<u8, 4> = (0..16).collect();
        for _ in 0..8 {
            deque.pop_front();
        }
        let stats = deque.stats();
        assert_eq!(stats.len, 8);
        assert_eq!(stats.active_blocks, 2);
        assert_eq!(stats.spare_blocks(), 2);
    }

    #[test]
    fn slack_accounts_for_every_slot() {
        let mut deque: SegDeque<u8, 4> = SegDeque::new();
        for v in 0..10 {
            deque.push_back(v);
            deque.push_front(v);
        }
        let stats = deque.stats();
        assert_eq!(
            stats.front_slack + stats.len + stats.back_slack,
            stats.map_len * 4
        );
    }
}
