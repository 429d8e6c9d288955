//! Pure edge diff between a product's current and target brand sets.

use std::collections::BTreeSet;

use crate::domain::foundation::BrandId;

/// Edges to create and sever for one synchronization run.
///
/// Both lists are sorted and duplicate-free; a brand present in both the
/// current and the target set appears in neither.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkDiff {
    pub added: Vec<BrandId>,
    pub removed: Vec<BrandId>,
}

impl LinkDiff {
    /// True when the target set already matches the current set.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Computes which brand edges must be created and which severed to make
/// `current` equal to `target`.
pub fn diff(current: &[BrandId], target: &[BrandId]) -> LinkDiff {
    let current: BTreeSet<BrandId> = current.iter().copied().collect();
    let target: BTreeSet<BrandId> = target.iter().copied().collect();

    LinkDiff {
        added: target.difference(&current).copied().collect(),
        removed: current.difference(&target).copied().collect(),
    }
}
