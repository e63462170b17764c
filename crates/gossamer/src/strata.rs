//! Z-order management: strata membership, hidden-frame bookkeeping and
//! draw-order lists.
//!
//! Every frame belongs to exactly one stratum. Per stratum the manager keeps
//! the member list, the set of members currently hidden, and a sorted draw
//! order over the visible members. The draw order is rebuilt only for the
//! stratum affected by a membership, level or visibility change.
//!
//! Ordering rule: frames draw by ascending level; at equal level an ancestor
//! draws before its descendants. The rebuild realizes the tie-break with a
//! stable sort on (level, tree depth): a descendant is always deeper than
//! its ancestor, and unrelated frames keep a stable relative order.

use std::collections::HashSet;

use slotmap::SlotMap;
use tracing::trace;

use crate::frame::FrameStrata;
use crate::logging::targets;
use crate::region::{RegionData, RegionId};

/// One stratum's bookkeeping.
#[derive(Default)]
pub(crate) struct StratumSet {
    /// All member frames, hidden included, in insertion order.
    members: Vec<RegionId>,
    /// Members currently excluded from drawing and hit testing.
    hidden: HashSet<RegionId>,
    /// Visible members in paint order (bottom first).
    draw_order: Vec<RegionId>,
}

impl StratumSet {
    /// Visible members in paint order.
    pub(crate) fn draw_order(&self) -> &[RegionId] {
        &self.draw_order
    }

    /// Highest frame level over *all* members, hidden included.
    ///
    /// Hidden frames keep their level so "put on top" stays correct while
    /// they are hidden.
    fn max_level(&self, regions: &SlotMap<RegionId, RegionData>) -> Option<i32> {
        self.members
            .iter()
            .filter_map(|id| regions.get(*id))
            .filter_map(|r| r.frame())
            .map(|f| f.level)
            .max()
    }
}

/// Distance from the root; used as the ancestor-before-descendant tie-break.
fn depth(regions: &SlotMap<RegionId, RegionData>, id: RegionId) -> u32 {
    let mut depth = 0;
    let mut current = regions.get(id).and_then(|r| r.parent);
    while let Some(p) = current {
        depth += 1;
        current = regions.get(p).and_then(|r| r.parent);
    }
    depth
}

/// Per-stratum frame registries and draw orders.
#[derive(Default)]
pub(crate) struct StrataManager {
    strata: [StratumSet; 8],
}

impl StrataManager {
    pub(crate) fn stratum(&self, stratum: FrameStrata) -> &StratumSet {
        &self.strata[stratum.index()]
    }

    /// Register a frame with a stratum and rebuild that stratum.
    pub(crate) fn add(
        &mut self,
        id: RegionId,
        stratum: FrameStrata,
        hidden: bool,
        regions: &SlotMap<RegionId, RegionData>,
    ) {
        let set = &mut self.strata[stratum.index()];
        if !set.members.contains(&id) {
            set.members.push(id);
        }
        if hidden {
            set.hidden.insert(id);
        } else {
            set.hidden.remove(&id);
        }
        self.rebuild(stratum, regions);
    }

    /// Remove a frame from a stratum and rebuild it.
    pub(crate) fn remove(
        &mut self,
        id: RegionId,
        stratum: FrameStrata,
        regions: &SlotMap<RegionId, RegionData>,
    ) {
        let set = &mut self.strata[stratum.index()];
        set.members.retain(|m| *m != id);
        set.hidden.remove(&id);
        self.rebuild(stratum, regions);
    }

    /// Update a member's hidden status; rebuilds only when it changed.
    pub(crate) fn set_hidden(
        &mut self,
        id: RegionId,
        stratum: FrameStrata,
        hidden: bool,
        regions: &SlotMap<RegionId, RegionData>,
    ) {
        let set = &mut self.strata[stratum.index()];
        let changed = if hidden {
            set.hidden.insert(id)
        } else {
            set.hidden.remove(&id)
        };
        if changed {
            self.rebuild(stratum, regions);
        }
    }

    /// Recompute one stratum's draw order.
    pub(crate) fn rebuild(
        &mut self,
        stratum: FrameStrata,
        regions: &SlotMap<RegionId, RegionData>,
    ) {
        let set = &mut self.strata[stratum.index()];
        let mut order: Vec<RegionId> = set
            .members
            .iter()
            .copied()
            .filter(|id| !set.hidden.contains(id) && regions.contains_key(*id))
            .collect();
        order.sort_by_key(|id| {
            let level = regions[*id].frame().map(|f| f.level).unwrap_or(0);
            (level, depth(regions, *id))
        });
        trace!(
            target: targets::STRATA,
            ?stratum,
            frames = order.len(),
            "draw order rebuilt"
        );
        set.draw_order = order;
    }

    /// The level a frame must take to sit above everything in its stratum:
    /// `1 + max(level over visible and hidden members)`.
    pub(crate) fn raised_level(
        &self,
        stratum: FrameStrata,
        regions: &SlotMap<RegionId, RegionData>,
    ) -> i32 {
        self.strata[stratum.index()]
            .max_level(regions)
            .map(|max| max + 1)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameData;
    use crate::region::RegionKind;

    fn frame_region(level: i32, parent: Option<RegionId>) -> RegionData {
        let mut data = RegionData::new(RegionKind::Frame(FrameData {
            level,
            ..FrameData::default()
        }));
        data.parent = parent;
        data
    }

    #[test]
    fn test_level_orders_draws() {
        let mut regions: SlotMap<RegionId, RegionData> = SlotMap::with_key();
        let low = regions.insert(frame_region(1, None));
        let high = regions.insert(frame_region(5, None));

        let mut strata = StrataManager::default();
        // Insert the higher-level frame first to prove sorting wins.
        strata.add(high, FrameStrata::Medium, false, &regions);
        strata.add(low, FrameStrata::Medium, false, &regions);

        assert_eq!(strata.stratum(FrameStrata::Medium).draw_order(), &[low, high]);
    }

    #[test]
    fn test_ancestor_before_descendant_at_equal_level() {
        let mut regions: SlotMap<RegionId, RegionData> = SlotMap::with_key();
        let parent = regions.insert(frame_region(2, None));
        let child = regions.insert(frame_region(2, Some(parent)));

        let mut strata = StrataManager::default();
        strata.add(child, FrameStrata::Medium, false, &regions);
        strata.add(parent, FrameStrata::Medium, false, &regions);

        assert_eq!(
            strata.stratum(FrameStrata::Medium).draw_order(),
            &[parent, child]
        );
    }

    #[test]
    fn test_hidden_excluded_but_counted_for_raise() {
        let mut regions: SlotMap<RegionId, RegionData> = SlotMap::with_key();
        let visible = regions.insert(frame_region(1, None));
        let hidden = regions.insert(frame_region(9, None));

        let mut strata = StrataManager::default();
        strata.add(visible, FrameStrata::High, false, &regions);
        strata.add(hidden, FrameStrata::High, true, &regions);

        assert_eq!(strata.stratum(FrameStrata::High).draw_order(), &[visible]);
        // The hidden frame's level still dominates the raise computation.
        assert_eq!(strata.raised_level(FrameStrata::High, &regions), 10);
    }

    #[test]
    fn test_unhide_rejoins_draw_order() {
        let mut regions: SlotMap<RegionId, RegionData> = SlotMap::with_key();
        let a = regions.insert(frame_region(1, None));
        let b = regions.insert(frame_region(2, None));

        let mut strata = StrataManager::default();
        strata.add(a, FrameStrata::Low, false, &regions);
        strata.add(b, FrameStrata::Low, true, &regions);
        assert_eq!(strata.stratum(FrameStrata::Low).draw_order(), &[a]);

        strata.set_hidden(b, FrameStrata::Low, false, &regions);
        assert_eq!(strata.stratum(FrameStrata::Low).draw_order(), &[a, b]);
    }

    #[test]
    fn test_empty_stratum_raised_level() {
        let regions: SlotMap<RegionId, RegionData> = SlotMap::with_key();
        let strata = StrataManager::default();
        assert_eq!(strata.raised_level(FrameStrata::Dialog, &regions), 0);
    }
}
