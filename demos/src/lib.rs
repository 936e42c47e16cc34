// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo hosts for `understory_virtual_list`.
//!
//! - [`TextGrid`]: a terminal-style [`RowView`] whose rows are lines of text.
//! - [`FeedSource`]: a finite paged source of [`FeedItem`]s, optionally failing
//!   at a given index.
//! - [`feed_scroller`]: wires both into a [`VirtualScroller`].
//!
//! Run the paged feed demo with:
//! - `RUST_LOG=debug cargo run -p understory_demos --example paged_feed`

use std::collections::VecDeque;
use std::fmt::Write as _;

use understory_virtual_list::{
    BuildError, Edge, Extent, RowView, ScrollMetrics, Spacers, VirtualScroller,
};

/// One entry of the demo feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedItem {
    /// Position of the item in the feed.
    pub id: usize,
    /// Display text.
    pub title: String,
}

/// Failures of the demo collaborators.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The source failed while producing the page containing this index.
    #[error("feed source unavailable at item {0}")]
    Unavailable(usize),
    /// The row for this index could not be rendered.
    #[error("item {0} cannot be rendered")]
    Render(usize),
}

/// A finite paged source.
#[derive(Clone, Debug)]
pub struct FeedSource {
    next: usize,
    total: usize,
    fail_at: Option<usize>,
}

impl FeedSource {
    /// A source of `total` items.
    pub fn new(total: usize) -> Self {
        Self {
            next: 0,
            total,
            fail_at: None,
        }
    }

    /// Fails the fetch whose page would contain `index`.
    #[must_use]
    pub fn failing_at(self, index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..self
        }
    }

    /// Produces up to `page_size` items; a short page means the feed is drained.
    pub fn next_page(&mut self, page_size: usize) -> Result<Vec<FeedItem>, FeedError> {
        let end = (self.next + page_size).min(self.total);
        if let Some(index) = self.fail_at.filter(|i| (self.next..end).contains(i)) {
            return Err(FeedError::Unavailable(index));
        }
        let page = (self.next..end)
            .map(|id| FeedItem {
                id,
                title: format!("post {id} of {}", self.total),
            })
            .collect();
        self.next = end;
        Ok(page)
    }
}

/// Renders a feed item as one line of text.
pub fn render_item(index: usize, item: &FeedItem) -> Result<String, FeedError> {
    Ok(format!("#{index:05} {}", item.title))
}

/// A text surface that keeps materialized rows as lines.
#[derive(Clone, Debug)]
pub struct TextGrid {
    rows: VecDeque<String>,
    spacers: Spacers<f32>,
    extent: Option<Extent<f32>>,
    screen: f32,
    viewport: f32,
}

impl TextGrid {
    /// A grid on a screen `screen` pixels tall; sizing expressions resolve
    /// against it.
    pub fn new(screen: f32) -> Self {
        Self {
            rows: VecDeque::new(),
            spacers: Spacers {
                top: 0.0,
                bottom: 0.0,
            },
            extent: None,
            screen,
            viewport: screen,
        }
    }

    /// Attached rows, head first.
    pub fn rows(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(String::as_str)
    }

    /// Spacers most recently pushed by the scroller.
    pub fn spacers(&self) -> Spacers<f32> {
        self.spacers
    }

    /// The extent applied by the scroller, if any.
    pub fn extent(&self) -> Option<&Extent<f32>> {
        self.extent.as_ref()
    }

    /// Total scrollable extent: spacers plus attached rows.
    pub fn content_extent(&self, row_height: f32) -> f32 {
        self.spacers.top + row_height * self.rows.len() as f32 + self.spacers.bottom
    }

    /// Metrics a native scroll container would report at `scroll_offset`.
    pub fn metrics(&self, row_height: f32, scroll_offset: f32) -> ScrollMetrics<f32> {
        ScrollMetrics::new(
            scroll_offset,
            self.viewport,
            self.content_extent(row_height),
        )
    }

    /// Draws the rows intersecting the viewport at `scroll_offset`, prefixed
    /// by their pixel position.
    pub fn frame(&self, row_height: f32, scroll_offset: f32) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "[{:.0}px above | {} rows attached | {:.0}px below]",
            self.spacers.top,
            self.rows.len(),
            self.spacers.bottom
        );
        let bottom = scroll_offset + self.viewport;
        for (i, row) in self.rows.iter().enumerate() {
            let y = self.spacers.top + row_height * i as f32;
            if y + row_height > scroll_offset && y < bottom {
                let _ = writeln!(out, "{y:>8.0} | {row}");
            }
        }
        out
    }
}

impl RowView<f32> for TextGrid {
    type Row = String;

    fn insert_row(&mut self, edge: Edge, row: String) {
        match edge {
            Edge::Head => self.rows.push_front(row),
            Edge::Tail => self.rows.push_back(row),
        }
    }

    fn remove_row(&mut self, edge: Edge) {
        match edge {
            Edge::Head => self.rows.pop_front(),
            Edge::Tail => self.rows.pop_back(),
        };
    }

    fn apply_extent(&mut self, extent: &Extent<f32>) {
        self.viewport = match extent {
            Extent::Pixels(px) => *px,
            Extent::Expr(expr) => match expr.trim().strip_suffix("vh") {
                Some(pct) => pct.trim().parse::<f32>().map_or(self.screen, |pct| {
                    self.screen * pct / 100.0
                }),
                None => self.screen,
            },
        };
        self.extent = Some(extent.clone());
    }

    fn viewport_extent(&self) -> f32 {
        self.viewport
    }

    fn set_spacers(&mut self, spacers: Spacers<f32>) {
        self.spacers = spacers;
    }
}

/// The scroller type used by the demos.
pub type FeedScroller = VirtualScroller<FeedItem, TextGrid, FeedError, f32>;

/// Builds a feed scroller over `source` in a grid registered as `"feed"`.
pub fn feed_scroller(
    source: FeedSource,
    screen: f32,
    height: Extent<f32>,
    row_height: f32,
) -> Result<FeedScroller, BuildError<FeedError>> {
    let mut source = source;
    VirtualScroller::builder()
        .container_named("feed", |name: &str| {
            (name == "feed").then(|| TextGrid::new(screen))
        })
        .height(height)
        .row_height(row_height)
        .page_size(20)
        .buffer(4)
        .render_item(render_item)
        .load_more(move |page_size| source.next_page(page_size))
        .build()
}
