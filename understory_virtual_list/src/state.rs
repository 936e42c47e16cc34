// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window state carried between reconciliation passes.

use core::ops::Range;

use crate::Scalar;

/// Direction of a scroll notification relative to the previous one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// The offset increased (content moves up, later rows come into view).
    Forward,
    /// The offset decreased or stayed the same.
    Backward,
}

impl ScrollDirection {
    /// Classifies a move from `previous` to `next`.
    ///
    /// Only a strictly greater offset is [`ScrollDirection::Forward`]; equal
    /// offsets are [`ScrollDirection::Backward`].
    #[must_use]
    pub fn from_offsets<S: Scalar>(previous: S, next: S) -> Self {
        if next > previous {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// Spacer extents standing in for hidden rows at each edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spacers<S> {
    /// Extent before the first materialized row.
    pub top: S,
    /// Extent after the last materialized row.
    pub bottom: S,
}

/// Hidden-row bookkeeping for one list.
///
/// `WindowState` is a plain value: each reconciliation pass reads one
/// snapshot and produces the next one with [`WindowState::settle`]. For a list
/// of `count` loaded items the materialized rows are exactly
/// `top_hidden..count - bottom_hidden`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindowState<S> {
    /// Leading items that are loaded but not materialized.
    pub top_hidden: usize,
    /// Trailing items that are loaded but not materialized.
    pub bottom_hidden: usize,
    /// Scroll offset seen by the most recent pass.
    pub last_scroll_offset: S,
    /// `last_visible` index computed by the most recent pass.
    pub last_visible_index: usize,
}

impl<S: Scalar> Default for WindowState<S> {
    fn default() -> Self {
        Self {
            top_hidden: 0,
            bottom_hidden: 0,
            last_scroll_offset: S::zero(),
            last_visible_index: 0,
        }
    }
}

impl<S: Scalar> WindowState<S> {
    /// Number of materialized rows for `count` loaded items.
    #[must_use]
    pub fn materialized_len(&self, count: usize) -> usize {
        count.saturating_sub(self.top_hidden + self.bottom_hidden)
    }

    /// Materialized index range for `count` loaded items.
    #[must_use]
    pub fn materialized(&self, count: usize) -> Range<usize> {
        let start = self.top_hidden.min(count);
        start..start + self.materialized_len(count)
    }

    /// Spacer extents for the hidden counts.
    #[must_use]
    pub fn spacers(&self, row_height: S) -> Spacers<S> {
        Spacers {
            top: S::from_usize(self.top_hidden) * row_height,
            bottom: S::from_usize(self.bottom_hidden) * row_height,
        }
    }

    /// Accounts for `appended` items added to the tail.
    ///
    /// New items are not materialized until a pass admits them, so they are
    /// hidden at the bottom.
    #[must_use]
    pub fn with_appended(self, appended: usize) -> Self {
        Self {
            bottom_hidden: self.bottom_hidden + appended,
            ..self
        }
    }

    /// Produces the state after a pass materialized exactly `range` out of
    /// `count` items.
    #[must_use]
    pub fn settle(
        self,
        range: Range<usize>,
        count: usize,
        scroll_offset: S,
        last_visible_index: usize,
    ) -> Self {
        debug_assert!(range.end <= count, "materialized range exceeds item count");
        Self {
            top_hidden: range.start,
            bottom_hidden: count - range.end,
            last_scroll_offset: scroll_offset,
            last_visible_index,
        }
    }
}
