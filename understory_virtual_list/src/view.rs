// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side capabilities: the rendering surface and container lookup.

use crate::{Edge, Extent, Scalar, Spacers};

/// A rendering surface that holds materialized rows.
///
/// The surface keeps its rows in a single ordered run. The scroller only
/// attaches and detaches rows at the two ends of that run, and reports the
/// spacer extents that stand in for the hidden rows so the host's scroll
/// travel matches a fully materialized list.
///
/// Any concrete surface (a native widget container, a terminal grid, a canvas
/// display list) can implement this trait.
pub trait RowView<S: Scalar> {
    /// A materialized row, as produced by the scroller's `render_item` callback.
    type Row;

    /// Attaches `row` at `edge`; it becomes the new head or tail.
    fn insert_row(&mut self, edge: Edge, row: Self::Row);

    /// Detaches the row at `edge`.
    fn remove_row(&mut self, edge: Edge);

    /// Applies the configured container extent (height) to the surface.
    fn apply_extent(&mut self, extent: &Extent<S>);

    /// Returns the measured viewport extent along the scroll axis.
    ///
    /// Called once after [`RowView::apply_extent`] to size the initial load.
    fn viewport_extent(&self) -> S;

    /// Updates the spacer extents before and after the materialized rows.
    fn set_spacers(&mut self, spacers: Spacers<S>);
}

/// Resolves a named container to a rendering surface.
///
/// Hosts that address containers by name (a selector, an id, a widget path)
/// implement this over their own registry. Closures of the form
/// `FnMut(&str) -> Option<V>` implement it directly.
pub trait ContainerLookup<V> {
    /// Returns the surface registered under `name`, if any.
    fn lookup(&mut self, name: &str) -> Option<V>;
}

impl<V, F> ContainerLookup<V> for F
where
    F: FnMut(&str) -> Option<V>,
{
    #[inline]
    fn lookup(&mut self, name: &str) -> Option<V> {
        self(name)
    }
}
