//! Address-space categories.

use std::fmt;

/// The category of an address-space region.
///
/// Strata tracks the allocation extent and the physical extent of a store
/// independently per kind, because different object classes may be
/// allocated in disjoint address ranges (a driver is free to map every
/// kind onto one file, or to place each kind in its own backing store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemKind {
    /// Generic data with no more specific category.
    Default,
    /// The superblock region at the head of the logical address space.
    Superblock,
    /// B-tree node metadata.
    BTree,
    /// Raw object data.
    Raw,
    /// Free-space tracking metadata.
    FreeSpace,
}

impl fmt::Display for MemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemKind::Default => "default",
            MemKind::Superblock => "superblock",
            MemKind::BTree => "btree",
            MemKind::Raw => "raw",
            MemKind::FreeSpace => "freespace",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_names() {
        assert_eq!(MemKind::Superblock.to_string(), "superblock");
        assert_eq!(MemKind::FreeSpace.to_string(), "freespace");
    }
}
