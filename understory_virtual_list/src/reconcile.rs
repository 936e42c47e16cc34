// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-only reconciliation of a materialized row range.
//!
//! The view is a contiguous run of rows `previous.start..previous.end`.
//! [`reconcile`] moves it to `next` by inserting and removing rows at its two
//! edges only, so a pass costs time proportional to the rows that entered or
//! left the window, not to the window or list size.
//!
//! Forward passes grow the tail first and then trim the head; backward passes
//! grow the head (in descending index order) and then trim the tail. Each pass
//! finishes with the opposite-edge corrections, which are no-ops while
//! scrolling but keep the view exact after a viewport resize or when items
//! arrive without the offset changing.

use core::ops::Range;

use crate::ScrollDirection;

/// One end of the materialized run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The first materialized row (lowest index).
    Head,
    /// The last materialized row (highest index).
    Tail,
}

/// Sink for the edge operations issued by [`reconcile`].
///
/// Implementations materialize or detach exactly one row per call. Insertions
/// at [`Edge::Head`] arrive in descending index order, so each one becomes the
/// new head.
pub trait EdgeOps {
    /// Error produced when a row cannot be materialized.
    type Error;

    /// Materializes row `index` and attaches it at `edge`.
    fn insert(&mut self, edge: Edge, index: usize) -> Result<(), Self::Error>;

    /// Detaches the row at `edge`, whose logical index is `index`.
    fn remove(&mut self, edge: Edge, index: usize);
}

/// Operation counts for one reconciliation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Diff {
    /// Rows inserted at the head.
    pub inserted_head: usize,
    /// Rows inserted at the tail.
    pub inserted_tail: usize,
    /// Rows removed from the head.
    pub removed_head: usize,
    /// Rows removed from the tail.
    pub removed_tail: usize,
}

impl Diff {
    /// Total rows inserted.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.inserted_head + self.inserted_tail
    }

    /// Total rows removed.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.removed_head + self.removed_tail
    }

    /// Returns `true` if the pass issued no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted() == 0 && self.removed() == 0
    }
}

/// Moves a materialized run from `previous` to `next` with edge operations.
///
/// On success the run issued to `ops` spans exactly `next`, with retained rows
/// untouched. An error from [`EdgeOps::insert`] aborts the pass immediately;
/// operations issued before it are not rolled back.
///
/// ```rust
/// use core::convert::Infallible;
/// use std::collections::VecDeque;
/// use understory_virtual_list::{Edge, EdgeOps, ScrollDirection, reconcile};
///
/// struct Rows(VecDeque<usize>);
///
/// impl EdgeOps for Rows {
///     type Error = Infallible;
///     fn insert(&mut self, edge: Edge, index: usize) -> Result<(), Infallible> {
///         match edge {
///             Edge::Head => self.0.push_front(index),
///             Edge::Tail => self.0.push_back(index),
///         }
///         Ok(())
///     }
///     fn remove(&mut self, edge: Edge, _index: usize) {
///         match edge {
///             Edge::Head => self.0.pop_front(),
///             Edge::Tail => self.0.pop_back(),
///         };
///     }
/// }
///
/// let mut rows = Rows((0..20).collect());
/// let diff = reconcile(0..20, 3..23, ScrollDirection::Forward, &mut rows).unwrap();
/// assert_eq!((diff.inserted_tail, diff.removed_head), (3, 3));
/// assert!(rows.0.iter().copied().eq(3..23));
/// ```
pub fn reconcile<O: EdgeOps>(
    previous: Range<usize>,
    next: Range<usize>,
    direction: ScrollDirection,
    ops: &mut O,
) -> Result<Diff, O::Error> {
    let mut diff = Diff::default();

    if next.is_empty() {
        // Nothing stays: detach everything from the edge the scroll moves away from.
        let (start, end) = (previous.start, previous.end);
        let mut span = previous;
        match direction {
            ScrollDirection::Forward => trim_head(&mut span, end, ops, &mut diff),
            ScrollDirection::Backward => trim_tail(&mut span, start, ops, &mut diff),
        }
        return Ok(diff);
    }

    // An empty run has no edges to preserve; anchor it where `next` starts.
    let mut span = if previous.is_empty() {
        next.start..next.start
    } else {
        previous
    };

    match direction {
        ScrollDirection::Forward => {
            grow_tail(&mut span, next.end, ops, &mut diff)?;
            trim_head(&mut span, next.start, ops, &mut diff);
            grow_head(&mut span, next.start, ops, &mut diff)?;
            trim_tail(&mut span, next.end, ops, &mut diff);
        }
        ScrollDirection::Backward => {
            grow_head(&mut span, next.start, ops, &mut diff)?;
            trim_tail(&mut span, next.end, ops, &mut diff);
            grow_tail(&mut span, next.end, ops, &mut diff)?;
            trim_head(&mut span, next.start, ops, &mut diff);
        }
    }

    debug_assert_eq!(span, next, "reconcile must land exactly on the target range");
    Ok(diff)
}

fn grow_tail<O: EdgeOps>(
    span: &mut Range<usize>,
    end: usize,
    ops: &mut O,
    diff: &mut Diff,
) -> Result<(), O::Error> {
    while span.end < end {
        ops.insert(Edge::Tail, span.end)?;
        span.end += 1;
        diff.inserted_tail += 1;
    }
    Ok(())
}

fn grow_head<O: EdgeOps>(
    span: &mut Range<usize>,
    start: usize,
    ops: &mut O,
    diff: &mut Diff,
) -> Result<(), O::Error> {
    while span.start > start {
        ops.insert(Edge::Head, span.start - 1)?;
        span.start -= 1;
        diff.inserted_head += 1;
    }
    Ok(())
}

fn trim_head<O: EdgeOps>(span: &mut Range<usize>, start: usize, ops: &mut O, diff: &mut Diff) {
    while span.start < start && !span.is_empty() {
        ops.remove(Edge::Head, span.start);
        span.start += 1;
        diff.removed_head += 1;
    }
}

fn trim_tail<O: EdgeOps>(span: &mut Range<usize>, end: usize, ops: &mut O, diff: &mut Diff) {
    while span.end > end && !span.is_empty() {
        span.end -= 1;
        ops.remove(Edge::Tail, span.end);
        diff.removed_tail += 1;
    }
}
