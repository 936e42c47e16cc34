// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for scroller integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the helpers."
)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use understory_virtual_list::{
    Edge, Extent, RowView, ScrollMetrics, Spacers, VirtualScroller, VirtualScrollerBuilder,
};

pub(crate) const VIEWPORT: f64 = 600.0;
pub(crate) const ROW: f64 = 60.0;

/// Collaborator failure used by the tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Fail {
    Render(usize),
    Load,
}

/// One edge operation observed by [`Recording`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Insert(Edge, usize),
    Remove(Edge, usize),
}

/// A row surface that keeps rendered item values and logs every edge operation.
#[derive(Debug)]
pub(crate) struct Recording {
    pub(crate) rows: VecDeque<usize>,
    pub(crate) ops: Vec<Op>,
    pub(crate) spacers: Spacers<f64>,
    pub(crate) extent: Option<Extent<f64>>,
    pub(crate) viewport: f64,
}

impl Recording {
    pub(crate) fn new(viewport: f64) -> Self {
        Self {
            rows: VecDeque::new(),
            ops: Vec::new(),
            spacers: Spacers {
                top: 0.0,
                bottom: 0.0,
            },
            extent: None,
            viewport,
        }
    }

    pub(crate) fn take_ops(&mut self) -> Vec<Op> {
        core::mem::take(&mut self.ops)
    }
}

impl RowView<f64> for Recording {
    type Row = usize;

    fn insert_row(&mut self, edge: Edge, row: usize) {
        match edge {
            Edge::Head => self.rows.push_front(row),
            Edge::Tail => self.rows.push_back(row),
        }
        self.ops.push(Op::Insert(edge, row));
    }

    fn remove_row(&mut self, edge: Edge) {
        let row = match edge {
            Edge::Head => self.rows.pop_front(),
            Edge::Tail => self.rows.pop_back(),
        };
        let row = row.expect("the scroller only removes attached rows");
        self.ops.push(Op::Remove(edge, row));
    }

    fn apply_extent(&mut self, extent: &Extent<f64>) {
        if let Extent::Pixels(px) = extent {
            self.viewport = *px;
        }
        self.extent = Some(extent.clone());
    }

    fn viewport_extent(&self) -> f64 {
        self.viewport
    }

    fn set_spacers(&mut self, spacers: Spacers<f64>) {
        self.spacers = spacers;
    }
}

pub(crate) type List = VirtualScroller<usize, Recording, Fail>;

/// A finite source of `total` items whose values equal their indices.
///
/// The returned counter tracks how many times the source was called.
pub(crate) fn source(
    total: usize,
) -> (
    impl FnMut(usize) -> Result<Vec<usize>, Fail> + 'static,
    Rc<Cell<usize>>,
) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut next = 0;
    let load = move |page_size: usize| {
        counter.set(counter.get() + 1);
        let end = (next + page_size).min(total);
        let page: Vec<usize> = (next..end).collect();
        next = end;
        Ok::<_, Fail>(page)
    };
    (load, calls)
}

/// A builder with a 600px viewport, 60px rows, and default options.
pub(crate) fn builder(
    load: impl FnMut(usize) -> Result<Vec<usize>, Fail> + 'static,
) -> VirtualScrollerBuilder<usize, Recording, Fail> {
    VirtualScroller::builder()
        .container(Recording::new(VIEWPORT))
        .height(Extent::Pixels(VIEWPORT))
        .row_height(ROW)
        .render_item(|_, item: &usize| Ok(*item))
        .load_more(load)
}

/// A scroller over a source of `total` items, plus its fetch counter.
pub(crate) fn scroller(total: usize) -> (List, Rc<Cell<usize>>) {
    let (load, calls) = source(total);
    let list = builder(load).build().expect("valid configuration");
    (list, calls)
}

/// Metrics for `offset` with the content extent a host would report for
/// `list`: every loaded row, materialized or spaced.
pub(crate) fn metrics(list: &List, offset: f64) -> ScrollMetrics<f64> {
    let spacers = list.spacers();
    let rows = f64::from(u32::try_from(list.view().rows.len()).expect("small test lists"));
    ScrollMetrics::new(offset, VIEWPORT, spacers.top + rows * ROW + spacers.bottom)
}

/// Asserts that the view holds exactly the materialized rows, in order, and
/// that the spacers account for every hidden row.
pub(crate) fn assert_consistent(list: &List) {
    let range = list.materialized();
    assert!(
        list.view().rows.iter().copied().eq(range.clone()),
        "view rows {:?} do not match materialized range {range:?}",
        list.view().rows
    );
    let state = list.state();
    assert_eq!(
        state.top_hidden + range.len() + state.bottom_hidden,
        list.len(),
        "hidden counts and materialized rows must partition the list"
    );
    assert_eq!(list.view().spacers, list.spacers(), "spacers pushed to the view");
    assert_eq!(list.spacers().top, f64::from(u32::try_from(state.top_hidden).unwrap()) * ROW);
    assert_eq!(
        list.spacers().bottom,
        f64::from(u32::try_from(state.bottom_hidden).unwrap()) * ROW
    );
}
