//! Gap-buffer-backed store of styled runs.
//!
//! A [`SpanStore`] owns the canonical mapping from character ranges to styles:
//! an ordered sequence of [`StyleRun`]s partitioning `[0, total_len)` into
//! contiguous, non-overlapping ranges. The backing array keeps a single
//! relocatable gap of unused slots, so inserting or removing a run near the
//! previous edit costs O(1) amortized; moving the gap costs work proportional
//! to the number of *runs* crossed, not the number of characters.
//!
//! Between public calls the store upholds four invariants:
//!
//! 1. the run lengths sum to `total_len()`;
//! 2. no run has length zero;
//! 3. no two adjacent runs have equal attributes;
//! 4. runs are ordered by position.
//!
//! Mutating operations never fail: out-of-range inputs are clamped or ignored,
//! because the text edits that drive them have already happened. An internal
//! index inconsistency is a defect in the store itself and panics rather than
//! silently corrupting the styling.

use crate::attrs::{StyleAttrs, StyleRun};

const INITIAL_CAPACITY: usize = 16;

/// An ordered collection of style runs with gap-buffer slot storage.
#[derive(Debug, Clone)]
pub struct SpanStore {
    /// Backing slots: `[runs before gap | gap | runs after gap]`.
    slots: Vec<StyleRun>,
    /// First unused slot.
    gap_start: usize,
    /// First used slot after the gap.
    gap_end: usize,
    /// Cached sum of all run lengths.
    total_len: usize,
}

impl SpanStore {
    /// Create an empty store covering zero characters.
    pub fn new() -> Self {
        Self {
            slots: vec![StyleRun::default(); INITIAL_CAPACITY],
            gap_start: 0,
            gap_end: INITIAL_CAPACITY,
            total_len: 0,
        }
    }

    /// Total character count covered by the runs; O(1).
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Number of runs currently stored.
    pub fn num_runs(&self) -> usize {
        self.slots.len() - self.gap_len()
    }

    /// Check if the store holds no runs.
    pub fn is_empty(&self) -> bool {
        self.num_runs() == 0
    }

    /// Discard all runs and reset the covered length to zero.
    pub fn clear(&mut self) {
        self.gap_start = 0;
        self.gap_end = self.slots.len();
        self.total_len = 0;
    }

    /// Iterate over the runs in position order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRun> + '_ {
        self.slots[..self.gap_start]
            .iter()
            .chain(self.slots[self.gap_end..].iter())
    }

    /// Visit each run in position order exactly once.
    pub fn for_each_run<F: FnMut(&StyleRun)>(&self, mut visit: F) {
        for run in self.iter() {
            visit(run);
        }
    }

    /// Snapshot copy of all runs in position order.
    pub fn runs(&self) -> Vec<StyleRun> {
        self.iter().copied().collect()
    }

    /// Attributes in effect at character position `pos`, if covered.
    pub fn attrs_at(&self, pos: usize) -> Option<&StyleAttrs> {
        if pos >= self.total_len {
            return None;
        }
        let (index, _) = self.find_run_at(pos);
        Some(&self.run(index).attrs)
    }

    /// Adjust the store for `len` characters inserted at position `pos`.
    ///
    /// Boundary insertions are left-biased: a position that falls exactly
    /// between two runs extends the *preceding* run, so typing at the end of
    /// a colored token keeps the token's color. Insertion at position 0
    /// extends the first run, and insertion at or past the end extends the
    /// last run. An empty store gets a single default-styled run.
    pub fn insert(&mut self, pos: usize, len: usize) {
        if len == 0 {
            return;
        }
        if self.is_empty() {
            self.insert_run_at(0, StyleRun::plain(len));
            self.total_len = len;
            return;
        }

        if pos == 0 {
            self.run_mut(0).len += len;
        } else if pos >= self.total_len {
            let last = self.num_runs() - 1;
            self.run_mut(last).len += len;
        } else {
            // The run on the left of the boundary is the run covering pos - 1.
            let (index, _) = self.find_run_at(pos - 1);
            self.run_mut(index).len += len;
        }
        self.total_len += len;
    }

    /// Adjust the store for `len` characters deleted starting at `pos`.
    ///
    /// The range is clamped to `[pos, total_len)`. Runs fully inside the
    /// deleted range are removed, edge runs are trimmed to their surviving
    /// prefix/suffix, and the two runs that become adjacent are merged when
    /// their attributes are equal.
    pub fn delete(&mut self, pos: usize, len: usize) {
        if pos >= self.total_len {
            return;
        }
        let len = len.min(self.total_len - pos);
        if len == 0 {
            return;
        }

        let end = pos + len;
        let (first, first_start) = self.find_run_at(pos);
        let first_run_end = first_start + self.run(first).len;

        if end <= first_run_end {
            // Entirely within one run.
            let run = self.run_mut(first);
            run.len -= len;
            if run.len == 0 {
                self.remove_runs_at(first, 1);
                self.merge_boundary(first);
            }
            self.total_len -= len;
            return;
        }

        // Spans multiple runs. The first run keeps its surviving prefix
        // (possibly empty; dropped below, after the walk).
        let keep_prefix = pos - first_start;
        self.run_mut(first).len = keep_prefix;

        let mut index = first + 1;
        let mut run_start = first_run_end;
        while index < self.num_runs() && run_start < end {
            let run_end = run_start + self.run(index).len;
            if run_end <= end {
                self.remove_runs_at(index, 1);
            } else {
                self.run_mut(index).len = run_end - end;
            }
            run_start = run_end;
        }

        let mut seam = first + 1;
        if keep_prefix == 0 {
            self.remove_runs_at(first, 1);
            seam = first;
        }
        self.total_len -= len;
        self.merge_boundary(seam);
    }

    /// Replace the styling of `[offset, offset + Σ new_runs.len)` with
    /// `new_runs`, leaving everything outside the range untouched.
    ///
    /// Runs straddling either boundary are split so the region edges land on
    /// run boundaries, runs fully inside the region are removed, zero-length
    /// replacements are filtered out, and equal-attribute runs are merged
    /// across both seams. A replacement list covering zero characters is a
    /// no-op.
    pub fn region_update(&mut self, offset: usize, new_runs: &[StyleRun]) {
        let region_len: usize = new_runs.iter().map(|run| run.len).sum();
        if region_len == 0 {
            return;
        }
        let offset = offset.min(self.total_len);
        let end = (offset + region_len).min(self.total_len);

        self.split_at(offset);
        self.split_at(end);

        let first = self.index_of_boundary(offset);
        let last = self.index_of_boundary(end);
        self.remove_runs_at(first, last - first);

        let mut index = first;
        for run in new_runs.iter().filter(|run| run.len > 0) {
            if index > first && self.run(index - 1).attrs == run.attrs {
                self.run_mut(index - 1).len += run.len;
            } else {
                self.insert_run_at(index, *run);
                index += 1;
            }
        }

        // Right seam first so `first` stays a valid index for the left seam.
        self.merge_boundary(index);
        self.merge_boundary(first);

        // Recompute the cached total from the runs themselves rather than
        // trusting incremental bookkeeping.
        self.total_len = self.iter().map(|run| run.len).sum();
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Map a logical run index to its physical slot.
    fn physical(&self, index: usize) -> usize {
        if index < self.gap_start {
            index
        } else {
            index + self.gap_len()
        }
    }

    fn run(&self, index: usize) -> &StyleRun {
        &self.slots[self.physical(index)]
    }

    fn run_mut(&mut self, index: usize) -> &mut StyleRun {
        let slot = self.physical(index);
        &mut self.slots[slot]
    }

    /// Move the gap so that it sits before logical index `index`.
    ///
    /// Costs a shift-copy of the runs between the old and new gap position.
    fn move_gap_to(&mut self, index: usize) {
        debug_assert!(index <= self.num_runs());
        if index < self.gap_start {
            let shift = self.gap_start - index;
            self.slots.copy_within(index..self.gap_start, self.gap_end - shift);
            self.gap_start = index;
            self.gap_end -= shift;
        } else if index > self.gap_start {
            let shift = index - self.gap_start;
            self.slots
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grow the gap to at least `min_size` slots, preserving its position.
    fn ensure_gap(&mut self, min_size: usize) {
        if self.gap_len() >= min_size {
            return;
        }
        let needed = min_size - self.gap_len();
        let growth = needed.max(self.slots.len());

        let old_len = self.slots.len();
        let old_gap_end = self.gap_end;
        let post_gap_len = old_len - old_gap_end;

        let new_len = old_len + growth;
        self.slots.resize(new_len, StyleRun::default());
        if post_gap_len > 0 {
            self.slots
                .copy_within(old_gap_end..old_len, new_len - post_gap_len);
        }
        self.gap_end = new_len - post_gap_len;
    }

    /// Insert a run before logical index `index`.
    fn insert_run_at(&mut self, index: usize, run: StyleRun) {
        self.move_gap_to(index);
        self.ensure_gap(1);
        self.slots[self.gap_start] = run;
        self.gap_start += 1;
    }

    /// Remove `count` runs starting at logical index `index`.
    fn remove_runs_at(&mut self, index: usize, count: usize) {
        if count == 0 {
            return;
        }
        debug_assert!(index + count <= self.num_runs());
        self.move_gap_to(index);
        self.gap_end += count;
    }

    /// Find the run covering position `pos`; returns `(index, run_start)`.
    ///
    /// Panics if `pos` is not covered, which would mean the cached total and
    /// the run list disagree.
    fn find_run_at(&self, pos: usize) -> (usize, usize) {
        let mut start = 0;
        for index in 0..self.num_runs() {
            let len = self.run(index).len;
            if pos < start + len {
                return (index, start);
            }
            start += len;
        }
        panic!("position {pos} not covered by any run (total {})", self.total_len);
    }

    /// Split the run containing `pos` so that `pos` becomes a run boundary.
    /// Both halves keep the original attributes.
    fn split_at(&mut self, pos: usize) {
        if pos == 0 || pos >= self.total_len {
            return;
        }
        let (index, run_start) = self.find_run_at(pos);
        if pos == run_start {
            return;
        }
        let attrs = self.run(index).attrs;
        let left_len = pos - run_start;
        let right_len = self.run(index).len - left_len;
        self.run_mut(index).len = left_len;
        self.insert_run_at(index + 1, StyleRun::new(right_len, attrs));
    }

    /// Index of the run starting exactly at `pos` (or `num_runs()` when `pos`
    /// equals the total length). Panics if `pos` is not a run boundary.
    fn index_of_boundary(&self, pos: usize) -> usize {
        let mut start = 0;
        let mut index = 0;
        while start < pos {
            start += self.run(index).len;
            index += 1;
        }
        assert_eq!(start, pos, "offset {pos} does not fall on a run boundary");
        index
    }

    /// Merge runs `index - 1` and `index` when their attributes are equal.
    fn merge_boundary(&mut self, index: usize) {
        if index == 0 || index >= self.num_runs() {
            return;
        }
        if self.run(index - 1).attrs == self.run(index).attrs {
            let absorbed = self.run(index).len;
            self.run_mut(index - 1).len += absorbed;
            self.remove_runs_at(index, 1);
        }
    }
}

impl Default for SpanStore {
    fn default() -> Self {
        Self::new()
    }
}
