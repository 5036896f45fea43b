//! Capacity query: which single directory frees enough space?

use serde::Serialize;

use crate::sizes::{DirectorySizes, SizePass};

/// Total capacity of the device the transcript was taken on.
pub const DEFAULT_CAPACITY: u64 = 70_000_000;

/// Free space required after the deletion.
pub const DEFAULT_REQUIRED_FREE: u64 = 30_000_000;

/// Capacity constraints for the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityConfig {
    pub capacity: u64,
    pub required_free: u64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            required_free: DEFAULT_REQUIRED_FREE,
        }
    }
}

impl CapacityConfig {
    /// Space left on the device, negative when usage exceeds capacity.
    pub fn available(&self, used: u64) -> i128 {
        i128::from(self.capacity) - i128::from(used)
    }

    /// Free space still missing, negative when there is room to spare.
    pub fn shortfall(&self, used: u64) -> i128 {
        i128::from(self.required_free) - self.available(used)
    }

    /// Smallest deletion that brings free space up to `required_free`.
    /// Zero when there is already enough room, clamped to `u64::MAX`.
    pub fn needed(&self, used: u64) -> u64 {
        u64::try_from(self.shortfall(used).max(0)).unwrap_or(u64::MAX)
    }

    /// Whether deleting a directory of `candidate` size is enough.
    pub fn is_sufficient(&self, used: u64, candidate: u64) -> bool {
        self.available(used) + i128::from(candidate) >= i128::from(self.required_free)
    }
}

/// Smallest recorded directory size whose deletion satisfies `config`.
///
/// `None` means no single directory is large enough.
pub fn find_smallest_deletable(
    config: &CapacityConfig,
    root_size: u64,
    sizes: &DirectorySizes,
) -> Option<u64> {
    // A shortfall beyond u64::MAX cannot be covered by any directory.
    let minimum = u64::try_from(config.shortfall(root_size).max(0)).ok()?;
    let candidate = sizes.smallest_at_least(minimum);
    debug_assert!(candidate.is_none_or(|size| config.is_sufficient(root_size, size)));
    candidate
}

/// Outcome of a full run, ready for printing.
#[derive(Debug, Clone, Serialize)]
pub struct CapacityReport {
    pub root_size: u64,
    pub capacity: u64,
    pub required_free: u64,
    /// Free space before deleting anything (may be negative).
    pub available: i64,
    pub needed: u64,
    pub directory_count: usize,
    /// Sum of every directory's size, nested directories counted repeatedly.
    pub recorded_total: u64,
    /// `null` when no directory is large enough.
    pub smallest_deletable: Option<u64>,
}

impl CapacityReport {
    pub fn new(config: &CapacityConfig, pass: &SizePass) -> Self {
        let available = config.available(pass.root_size);
        Self {
            root_size: pass.root_size,
            capacity: config.capacity,
            required_free: config.required_free,
            available: i64::try_from(available)
                .unwrap_or(if available < 0 { i64::MIN } else { i64::MAX }),
            needed: config.needed(pass.root_size),
            directory_count: pass.sizes.len(),
            recorded_total: pass.sizes.recorded_total(),
            smallest_deletable: find_smallest_deletable(config, pass.root_size, &pass.sizes),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.smallest_deletable.is_none()
    }
}
