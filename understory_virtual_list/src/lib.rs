// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_list --heading-base-level=0

//! Understory Virtual List: lazily-paged 1D list virtualization.
//!
//! This crate keeps an arbitrarily long, uniformly sized list responsive by
//! attaching only the rows near the viewport to a rendering surface. Items are
//! pulled from a host data source one page at a time as the user nears the end
//! of the loaded content, and the rows that are loaded but not attached are
//! stood in for by two spacers so scroll travel matches the full list.
//!
//! The core concepts are:
//!
//! - [`Scalar`]: a small abstraction over `f32`/`f64` used for extents, offsets,
//!   and scroll positions.
//! - [`compute_window`]: given a scroll offset, viewport extent, row height,
//!   and buffer, returns which indices should be materialized as a [`Window`].
//! - [`reconcile`]: moves a contiguous run of materialized rows from one index
//!   range to another using only edge operations ([`EdgeOps`]), leaving
//!   retained rows untouched.
//! - [`PagedStore`]: the append-only item list with exhaustion tracking that
//!   grows by whole pages.
//! - [`WindowState`]: the hidden-row counts carried between passes, from which
//!   [`Spacers`] are derived.
//! - [`VirtualScroller`]: the controller that ties the above to a host
//!   [`RowView`], a `render_item` callback, and a `load_more` callback, with
//!   scroll notifications rate-limited by [`understory_timing::RateLimited`].
//!
//! This crate does **not** know about widgets, display trees, or any particular
//! UI framework. Host frameworks are responsible for:
//!
//! - Implementing [`RowView`] over their container (attach and detach rows at
//!   either end, size the container, lay out the spacers).
//! - Forwarding scroll notifications to [`VirtualScroller::on_scroll`] with a
//!   monotonic timestamp, and calling [`VirtualScroller::poll`] once
//!   [`VirtualScroller::next_deadline`] has passed.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::convert::Infallible;
//! use std::collections::VecDeque;
//! use understory_virtual_list::{Edge, Extent, RowView, ScrollMetrics, Spacers, VirtualScroller};
//!
//! #[derive(Default)]
//! struct Rows {
//!     rows: VecDeque<usize>,
//!     spacers: Option<Spacers<f64>>,
//! }
//!
//! impl RowView<f64> for Rows {
//!     type Row = usize;
//!     fn insert_row(&mut self, edge: Edge, row: usize) {
//!         match edge {
//!             Edge::Head => self.rows.push_front(row),
//!             Edge::Tail => self.rows.push_back(row),
//!         }
//!     }
//!     fn remove_row(&mut self, edge: Edge) {
//!         match edge {
//!             Edge::Head => self.rows.pop_front(),
//!             Edge::Tail => self.rows.pop_back(),
//!         };
//!     }
//!     fn apply_extent(&mut self, _extent: &Extent<f64>) {}
//!     fn viewport_extent(&self) -> f64 {
//!         600.0
//!     }
//!     fn set_spacers(&mut self, spacers: Spacers<f64>) {
//!         self.spacers = Some(spacers);
//!     }
//! }
//!
//! // An endless source: every page is full.
//! let mut next = 0;
//! let mut list = VirtualScroller::builder()
//!     .container(Rows::default())
//!     .height(Extent::Pixels(600.0))
//!     .row_height(60.0)
//!     .render_item(|index, _item: &usize| Ok::<_, Infallible>(index))
//!     .load_more(move |page_size| {
//!         let page = (next..next + page_size).collect::<Vec<_>>();
//!         next += page_size;
//!         Ok(page)
//!     })
//!     .build()
//!     .unwrap();
//!
//! // One page fills the viewport and is fully materialized.
//! assert_eq!(list.len(), 50);
//! assert_eq!(list.materialized(), 0..50);
//!
//! // Scrolling to row 100 is impossible until more pages load; scroll to the
//! // bottom of the loaded content instead, which also requests growth.
//! let pass = list.scroll_to(ScrollMetrics::new(2_400.0, 600.0, 3_000.0)).unwrap();
//! assert_eq!(list.len(), 100);
//! assert_eq!(pass.window.materialized(), 30..61);
//! assert!(list.view().rows.iter().copied().eq(30..61));
//! assert_eq!(list.spacers().top, 30.0 * 60.0);
//! ```
//!
//! All extents and offsets live in a caller-chosen 1D coordinate space
//! (typically logical pixels). This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod reconcile;
mod scalar;
mod scroller;
mod state;
mod store;
mod view;
mod window;

pub use config::{
    BuildError, ConfigError, DEFAULT_BUFFER, DEFAULT_GROWTH_THRESHOLD, DEFAULT_PAGE_SIZE,
    DEFAULT_THROTTLE_WAIT, Extent, ScrollerOptions,
};
pub use reconcile::{Diff, Edge, EdgeOps, reconcile};
pub use scalar::Scalar;
pub use scroller::{ScrollPass, VirtualScroller, VirtualScrollerBuilder};
pub use state::{ScrollDirection, Spacers, WindowState};
pub use store::{Growth, PagedStore};
pub use view::{ContainerLookup, RowView};
pub use window::{ScrollMetrics, Window, compute_window};
