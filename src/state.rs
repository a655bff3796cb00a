//! The mutable state operated on by the Algorithm C engine: per-item
//! active/inactive option lists stored as contiguous, swap-reordered
//! arrays ("dancing cells"), a reverse index keeping those arrays'
//! positions addressable in O(1), and a trail of small, fixed-size undo
//! records that makes every cover reversible in O(1) per touched cell.
//!
//! This module has no public API; it is the engine's private workspace.
//! See `solver.rs` for the search loop that drives it.

use crate::types::{ColorId, ItemId, OptionId};

/// The contiguous per-item option list described in the crate's design
/// notes: `options[0..len)` are the options currently "active" for this
/// item; everything at `len..` is hidden. `slot[p]` names which entry of
/// `options[p]`'s own item list corresponds to this item, so that hiding an
/// option from *other* items can look up its color/neighbors directly.
#[derive(Clone, Debug)]
struct ItemCells {
    options: Vec<OptionId>,
    slot: Vec<usize>,
    len: usize,
}

/// One undo record. Every variant is small and fixed-size, and the trail as
/// a whole is popped in strict LIFO order, which is what makes `Removed`
/// restorable with nothing more than incrementing a length: the entry that
/// was swapped out of the active prefix is never touched again until the
/// matching restore runs.
#[derive(Clone, Copy, Debug)]
enum TrailEvent {
    /// An option was swapped out of `item`'s active prefix.
    Removed(ItemId),
    /// A primary item was fully consumed by a chosen option.
    PrimaryCovered { item: ItemId, old_len: usize },
    /// A secondary item (uncolored, or colored-but-zero) was fully
    /// consumed by a chosen option.
    SecondaryConsumed { item: ItemId, old_len: usize },
    /// A secondary item was committed to a color for the first time.
    ColorAssigned { item: ItemId },
    /// One option's occurrence of a secondary item was marked purified
    /// (compatible with the committed color, so it no longer triggers
    /// further hides through that item).
    Purified { option: OptionId, slot: usize },
}

/// The search state for one top-level enumeration: item records, color
/// state, the `cells` arrays and their active-length markers, the
/// solution stack, and the trail.
pub(crate) struct SearchState {
    num_primary: usize,
    /// Per option, its ordered `(item, color)` entries. Fixed for the
    /// lifetime of the search.
    entries: Vec<Vec<(ItemId, Option<ColorId>)>>,
    cells: Vec<ItemCells>,
    /// `pos[option][slot]` = current position of that entry within
    /// `cells[item].options`, where `item` is `entries[option][slot].0`.
    pos: Vec<Vec<usize>>,
    /// `purified[option][slot]` marks an entry whose item has already been
    /// satisfied by color commitment, so later hides skip it.
    purified: Vec<Vec<bool>>,
    /// Current color commitment per secondary item (indexed from 0, i.e.
    /// subtract `num_primary` from the item's index).
    color: Vec<Option<ColorId>>,
    /// Whether a primary item has been consumed by the current partial
    /// solution (distinguishes "covered" from merely "zero options left").
    covered: Vec<bool>,
    trail: Vec<TrailEvent>,
    /// One trail mark per currently-chosen option, so `uncover` knows how
    /// far back to roll.
    marks: Vec<usize>,
    solution: Vec<OptionId>,
}

/// Returned by `try_cover` when a secondary item's committed color
/// conflicts with the option being covered. Purely internal: callers only
/// ever see a `bool`.
struct ColorConflict;

impl SearchState {
    pub(crate) fn new(
        num_primary: usize,
        num_items: usize,
        entries: Vec<Vec<(ItemId, Option<ColorId>)>>,
    ) -> Self {
        let mut cells: Vec<ItemCells> = (0..num_items)
            .map(|_| ItemCells {
                options: Vec::new(),
                slot: Vec::new(),
                len: 0,
            })
            .collect();
        let mut pos: Vec<Vec<usize>> = entries.iter().map(|e| vec![0; e.len()]).collect();
        let purified: Vec<Vec<bool>> = entries.iter().map(|e| vec![false; e.len()]).collect();

        for (opt_idx, opt_entries) in entries.iter().enumerate() {
            for (slot, &(item, _)) in opt_entries.iter().enumerate() {
                let k = item.index();
                let p = cells[k].options.len();
                cells[k].options.push(OptionId::new(opt_idx));
                cells[k].slot.push(slot);
                pos[opt_idx][slot] = p;
            }
        }
        for c in &mut cells {
            c.len = c.options.len();
        }

        let num_secondary = num_items - num_primary;
        SearchState {
            num_primary,
            entries,
            cells,
            pos,
            purified,
            color: vec![None; num_secondary],
            covered: vec![false; num_primary],
            trail: Vec::new(),
            marks: Vec::new(),
            solution: Vec::new(),
        }
    }

    fn is_primary(&self, item: ItemId) -> bool {
        item.index() < self.num_primary
    }

    /// Active-length of `item`'s cell array.
    pub(crate) fn active_len(&self, item: ItemId) -> usize {
        self.cells[item.index()].len
    }

    /// The uncovered primary item with fewest active options, breaking
    /// ties toward the smallest index. `None` means every primary item is
    /// covered, i.e. the current partial solution is complete.
    pub(crate) fn select_item(&self) -> Option<ItemId> {
        let mut best: Option<(usize, usize)> = None;
        for i in 0..self.num_primary {
            if self.covered[i] {
                continue;
            }
            let len = self.cells[i].len;
            match best {
                Some((best_len, _)) if len >= best_len => {}
                _ => best = Some((len, i)),
            }
        }
        let chosen = best.map(|(_, i)| ItemId::new(i));
        match chosen {
            Some(item) => log::trace!(
                "select_item: item {} ({} active options)",
                item.index(),
                self.cells[item.index()].len
            ),
            None => log::trace!("select_item: every primary item is covered"),
        }
        chosen
    }

    /// Snapshot of `item`'s active prefix at this instant, in the order
    /// the engine must try them.
    pub(crate) fn snapshot_options(&self, item: ItemId) -> Vec<OptionId> {
        let c = &self.cells[item.index()];
        c.options[0..c.len].to_vec()
    }

    pub(crate) fn solution(&self) -> &[OptionId] {
        &self.solution
    }

    pub(crate) fn trail_is_empty(&self) -> bool {
        self.trail.is_empty() && self.marks.is_empty() && self.solution.is_empty()
    }

    /// Attempts to select `option` as the next chosen option. On success,
    /// pushes it onto the solution stack and returns `true`. On a color
    /// conflict, rolls back every change this call made and returns
    /// `false`: `option` is simply not viable right now, not an error.
    pub(crate) fn try_cover(&mut self, option: OptionId) -> bool {
        log::trace!("try_cover: option {}", option.index());
        let mark = self.trail.len();
        let n = self.entries[option.index()].len();
        for slot in 0..n {
            let (item, color) = self.entries[option.index()][slot];
            let ok = match color {
                None => {
                    self.hide_item(item, option);
                    Ok(())
                }
                Some(c) => self.commit_color(item, c, option),
            };
            if ok.is_err() {
                log::trace!("try_cover: option {} conflicts, rolling back", option.index());
                self.rollback_to(mark);
                return false;
            }
        }
        self.marks.push(mark);
        self.solution.push(option);
        true
    }

    /// Undoes the most recently covered option, restoring the state to
    /// exactly what it was before that `try_cover` call succeeded.
    pub(crate) fn uncover(&mut self) {
        let option = self.solution.pop().expect("uncover without a cover");
        log::trace!("uncover: option {}", option.index());
        let mark = self.marks.pop().expect("uncover without a cover");
        self.rollback_to(mark);
    }

    fn rollback_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            match self.trail.pop().expect("trail longer than mark") {
                TrailEvent::Removed(item) => self.cells[item.index()].len += 1,
                TrailEvent::PrimaryCovered { item, old_len } => {
                    self.cells[item.index()].len = old_len;
                    self.covered[item.index()] = false;
                }
                TrailEvent::SecondaryConsumed { item, old_len } => {
                    self.cells[item.index()].len = old_len;
                }
                TrailEvent::ColorAssigned { item } => {
                    self.color[item.index() - self.num_primary] = None;
                }
                TrailEvent::Purified { option, slot } => {
                    self.purified[option.index()][slot] = false;
                }
            }
        }
    }

    /// Removes `option` from `item`'s active prefix by swapping it with
    /// the last active entry and shrinking the prefix by one. Undoing this
    /// is nothing more than growing the prefix back by one, because the
    /// trail is strictly LIFO: nothing touches this slot again before the
    /// matching undo runs.
    fn remove(&mut self, item: ItemId, option: OptionId, slot: usize) {
        let k = item.index();
        let p = self.pos[option.index()][slot];
        let last = self.cells[k].len - 1;

        let other_opt = self.cells[k].options[last];
        let other_slot = self.cells[k].slot[last];

        self.cells[k].options.swap(p, last);
        self.cells[k].slot.swap(p, last);
        self.pos[other_opt.index()][other_slot] = p;
        self.pos[option.index()][slot] = last;

        self.cells[k].len -= 1;
        self.trail.push(TrailEvent::Removed(item));
    }

    /// For every entry of `option` other than `except`, removes `option`
    /// from that entry's item, unless that entry has already been
    /// purified by an earlier color commitment, in which case it no
    /// longer imposes any constraint.
    fn hide_from_other_items(&mut self, option: OptionId, except: ItemId) {
        let n = self.entries[option.index()].len();
        for slot in 0..n {
            let (item2, _) = self.entries[option.index()][slot];
            if item2 == except || self.purified[option.index()][slot] {
                continue;
            }
            self.remove(item2, option, slot);
        }
    }

    /// Consumes `item` (primary, or secondary with no color): every other
    /// active option containing it is hidden from all the other items it
    /// touches, and `item` itself is marked fully used.
    fn hide_item(&mut self, item: ItemId, chosen: OptionId) {
        let k = item.index();
        let old_len = self.cells[k].len;
        for p in 0..old_len {
            let q = self.cells[k].options[p];
            if q != chosen {
                self.hide_from_other_items(q, item);
            }
        }
        if self.is_primary(item) {
            self.covered[k] = true;
            self.trail.push(TrailEvent::PrimaryCovered { item, old_len });
        } else {
            self.trail.push(TrailEvent::SecondaryConsumed { item, old_len });
        }
        self.cells[k].len = 0;
    }

    /// Handles a secondary item's colored occurrence in the option being
    /// covered: commits the color if unassigned, accepts it if already
    /// matching, or reports a conflict.
    fn commit_color(
        &mut self,
        item: ItemId,
        color: ColorId,
        chosen: OptionId,
    ) -> Result<(), ColorConflict> {
        let idx = item.index() - self.num_primary;
        match self.color[idx] {
            Some(c) if c == color => Ok(()),
            Some(_) => Err(ColorConflict),
            None => {
                let k = item.index();
                let old_len = self.cells[k].len;
                for p in 0..old_len {
                    let q = self.cells[k].options[p];
                    if q == chosen {
                        continue;
                    }
                    let slot = self.cells[k].slot[p];
                    let (_, qcolor) = self.entries[q.index()][slot];
                    if qcolor == Some(color) {
                        self.purified[q.index()][slot] = true;
                        self.trail.push(TrailEvent::Purified { option: q, slot });
                    } else {
                        self.hide_from_other_items(q, item);
                    }
                }
                self.color[idx] = Some(color);
                self.trail.push(TrailEvent::ColorAssigned { item });
                self.trail
                    .push(TrailEvent::SecondaryConsumed { item, old_len });
                self.cells[k].len = 0;
                Ok(())
            }
        }
    }

    #[cfg(test)]
    fn snapshot_cells(&self) -> Vec<(Vec<OptionId>, usize)> {
        self.cells
            .iter()
            .map(|c| (c.options.clone(), c.len))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(i: usize) -> ItemId {
        ItemId::new(i)
    }

    fn color(c: usize) -> ColorId {
        ColorId::new(c)
    }

    fn opt(i: usize) -> OptionId {
        OptionId::new(i)
    }

    /// Builds Knuth's 7.2.2.1 toy exact-cover example (uncolored): primary
    /// items 1..7 (0-indexed here as 0..6), six options.
    fn knuth_toy_state() -> SearchState {
        let rows: Vec<Vec<usize>> = vec![
            vec![0, 3, 6], // {1,4,7}
            vec![0, 3],    // {1,4}
            vec![3, 4, 6], // {4,5,7}
            vec![2, 4, 5], // {3,5,6}
            vec![1, 2, 5, 6], // {2,3,6,7}
            vec![1, 6],    // {2,7}
        ];
        let entries: Vec<Vec<(ItemId, Option<ColorId>)>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|i| (item(i), None)).collect())
            .collect();
        SearchState::new(7, 7, entries)
    }

    #[test]
    fn select_item_breaks_ties_by_smallest_index() {
        let state = knuth_toy_state();
        // item counts: 0:2 1:2 2:2 3:3 4:2 5:2 6:4 -- smallest tied index wins.
        assert_eq!(state.select_item(), Some(item(0)));
    }

    #[test]
    fn cover_and_uncover_round_trip_is_exact() {
        let mut state = knuth_toy_state();
        let before = state.snapshot_cells();
        assert!(state.try_cover(opt(0)));
        assert!(state.try_cover(opt(3)));
        state.uncover();
        state.uncover();
        assert_eq!(state.snapshot_cells(), before);
        assert!(state.trail_is_empty());
    }

    #[test]
    fn full_search_restores_byte_identical_state() {
        let mut state = knuth_toy_state();
        let before = state.snapshot_cells();

        // Exhaustive DFS using the raw state API directly (the engine in
        // solver.rs does the same thing through an explicit frame stack).
        fn search(state: &mut SearchState, solutions: &mut Vec<Vec<OptionId>>) {
            match state.select_item() {
                None => solutions.push(state.solution().to_vec()),
                Some(item) => {
                    if state.active_len(item) == 0 {
                        return;
                    }
                    for option in state.snapshot_options(item) {
                        if state.try_cover(option) {
                            search(state, solutions);
                            state.uncover();
                        }
                    }
                }
            }
        }

        let mut solutions = Vec::new();
        search(&mut state, &mut solutions);
        assert_eq!(solutions.len(), 1, "this instance has a unique cover");
        let mut picked: Vec<usize> = solutions[0].iter().map(|o| o.index()).collect();
        picked.sort_unstable();
        // The classic solution to Knuth's toy example: rows B, D, F.
        assert_eq!(picked, vec![1, 3, 5]);
        assert_eq!(state.snapshot_cells(), before);
        assert!(state.trail_is_empty());
    }

    #[test]
    fn colored_conflict_is_rolled_back_completely() {
        // Two distinct primaries p, q sharing a secondary item x.
        // opt0 = [p, x:A], opt1 = [q, x:B].
        let entries = vec![
            vec![(item(0), None), (item(2), Some(color(1)))],
            vec![(item(1), None), (item(2), Some(color(2)))],
        ];
        let mut state = SearchState::new(2, 3, entries);

        assert!(state.try_cover(opt(0)));
        // Committing x:A purifies/hides opt1 out of q's own array too, since
        // it carries a conflicting color -- a well-behaved engine would
        // never offer opt1 as a candidate for q again in this branch.
        assert_eq!(state.active_len(item(1)), 0);

        // Calling try_cover directly still reports the conflict cleanly
        // and leaves nothing half-applied.
        let before_attempt = state.snapshot_cells();
        assert!(!state.try_cover(opt(1)));
        assert_eq!(state.snapshot_cells(), before_attempt);
        assert_eq!(state.solution(), &[opt(0)]);

        state.uncover();
        assert!(state.trail_is_empty());
    }

    #[test]
    fn same_color_reuse_is_compatible() {
        // secondary "x" used twice with the same color must be allowed.
        let entries = vec![
            vec![(item(0), None), (item(2), Some(color(1)))],
            vec![(item(1), None), (item(2), Some(color(1)))],
        ];
        let mut state = SearchState::new(2, 3, entries);
        assert!(state.try_cover(opt(0)));
        assert!(state.try_cover(opt(1)));
        assert_eq!(state.select_item(), None);
    }
}
