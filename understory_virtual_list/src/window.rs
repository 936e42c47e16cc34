// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window computation: which row indices should be materialized.

use core::ops::Range;

use crate::Scalar;

/// Scroll metrics reported by the host with every scroll notification.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics<S> {
    /// Distance scrolled from the top of the content.
    pub scroll_offset: S,
    /// Extent of the visible viewport along the scroll axis.
    pub viewport_extent: S,
    /// Total scrollable extent of the content (rows plus spacers).
    pub content_extent: S,
}

impl<S: Scalar> ScrollMetrics<S> {
    /// Creates metrics from their three components.
    #[must_use]
    pub fn new(scroll_offset: S, viewport_extent: S, content_extent: S) -> Self {
        Self {
            scroll_offset,
            viewport_extent,
            content_extent,
        }
    }

    /// Distance from the bottom of the viewport to the end of the content.
    ///
    /// Negative when the host over-scrolls past the end.
    #[must_use]
    pub fn distance_to_end(&self) -> S {
        self.content_extent - (self.scroll_offset + self.viewport_extent)
    }
}

/// Result of [`compute_window`].
///
/// Indices are expressed in the logical list. `first_visible..=last_visible`
/// is the strictly visible span; `first_existing..=last_existing` adds the
/// buffer on both sides. Neither pair is clamped to the loaded item count;
/// use [`Window::materialized`] for the clamped range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    /// Index of the row at the top edge of the viewport.
    pub first_visible: usize,
    /// Index of the row at the bottom edge of the viewport.
    pub last_visible: usize,
    /// First index to materialize (`first_visible - buffer`, floored at `0`).
    pub first_existing: usize,
    /// Last index to materialize (`last_visible + buffer`), unclamped.
    pub last_existing: usize,
    /// Number of loaded items the window was computed against.
    pub count: usize,
}

impl Window {
    /// Returns the half-open range of indices to materialize, clamped to the
    /// loaded items.
    ///
    /// When the window starts past the loaded tail (for example while a fetch
    /// is outstanding), the range is empty and positioned at `count`.
    #[must_use]
    pub fn materialized(&self) -> Range<usize> {
        let end = self.last_existing.saturating_add(1).min(self.count);
        let start = self.first_existing.min(end);
        start..end
    }

    /// Returns the half-open range of strictly visible indices, clamped to the
    /// loaded items.
    #[must_use]
    pub fn visible(&self) -> Range<usize> {
        let end = self.last_visible.saturating_add(1).min(self.count);
        let start = self.first_visible.min(end);
        start..end
    }
}

/// Computes the materialization window for a uniform-height list.
///
/// - `first_visible = floor(scroll_offset / row_height)`
/// - `last_visible = floor((scroll_offset + viewport_extent) / row_height)`
/// - `first_existing = max(0, first_visible - buffer)`
/// - `last_existing = last_visible + buffer`
///
/// Negative or non-finite offsets and extents are treated as `0`. A
/// non-positive or non-finite `row_height` yields an empty window at index `0`.
///
/// ```rust
/// use understory_virtual_list::compute_window;
///
/// // Row 100 at the top of a 600px viewport with 60px rows and a buffer of 10.
/// let window = compute_window(6_000.0_f64, 600.0, 60.0, 10, 1_000);
/// assert_eq!(window.first_visible, 100);
/// assert_eq!(window.last_visible, 110);
/// assert_eq!(window.materialized(), 90..121);
/// ```
#[must_use]
pub fn compute_window<S: Scalar>(
    scroll_offset: S,
    viewport_extent: S,
    row_height: S,
    buffer: usize,
    count: usize,
) -> Window {
    if !row_height.is_positive_finite() {
        return Window {
            first_visible: 0,
            last_visible: 0,
            first_existing: 0,
            last_existing: 0,
            count: 0,
        };
    }
    let offset = scroll_offset.sanitize();
    let viewport = viewport_extent.sanitize();

    let first_visible = (offset / row_height).floor_to_usize();
    let last_visible = ((offset + viewport) / row_height).floor_to_usize();

    Window {
        first_visible,
        last_visible,
        first_existing: first_visible.saturating_sub(buffer),
        last_existing: last_visible.saturating_add(buffer),
        count,
    }
}
