// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll controller: growth, windowing, and reconciliation per notification.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use core::ops::Range;
use core::time::Duration;

use log::debug;
use understory_timing::RateLimited;

use crate::{
    BuildError, ConfigError, ContainerLookup, Diff, Edge, EdgeOps, Extent, Growth, PagedStore,
    RowView, Scalar, ScrollDirection, ScrollMetrics, ScrollerOptions, Spacers, Window,
    WindowState, compute_window, reconcile,
};

type RenderFn<T, R, E> = Box<dyn FnMut(usize, &T) -> Result<R, E>>;
type LoadFn<T, E> = Box<dyn FnMut(usize) -> Result<Vec<T>, E>>;

/// Summary of one scroll pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScrollPass {
    /// Direction the pass was classified as.
    pub direction: ScrollDirection,
    /// Window computed for the pass.
    pub window: Window,
    /// Edge operations issued to the view.
    pub diff: Diff,
    /// Growth requested before windowing.
    pub growth: Growth,
}

/// A lazily-paged, uniformly-sized virtual list bound to a [`RowView`].
///
/// The scroller owns the loaded items, the hidden-row bookkeeping, and the
/// view. Each scroll notification runs one synchronous pass:
///
/// 1. if the viewport bottom is within `growth_threshold` of the content end,
///    one page is requested from `load_more`;
/// 2. the materialization window is recomputed for the new offset;
/// 3. the view is reconciled by inserting and removing rows at its edges;
/// 4. the spacers are updated from the new hidden counts.
///
/// Notifications arrive through [`VirtualScroller::on_scroll`], which applies
/// a leading-edge rate limit with a guaranteed trailing pass; the host must
/// call [`VirtualScroller::poll`] at or after
/// [`VirtualScroller::next_deadline`] to deliver the trailing pass.
/// [`VirtualScroller::scroll_to`] runs a pass immediately.
///
/// Errors from `render_item` or `load_more` abort the pass and are returned
/// unchanged. Rows issued before the failure stay attached while the window
/// state keeps its pre-pass snapshot, so the view and the state can disagree
/// until the host rebuilds the scroller.
pub struct VirtualScroller<T, V, E, S = f64>
where
    S: Scalar,
    V: RowView<S>,
{
    view: V,
    store: PagedStore<T>,
    state: WindowState<S>,
    row_height: S,
    options: ScrollerOptions<S>,
    render_item: RenderFn<T, V::Row, E>,
    load_more: LoadFn<T, E>,
    trigger: RateLimited<ScrollMetrics<S>>,
}

impl<T, V, E, S> fmt::Debug for VirtualScroller<T, V, E, S>
where
    S: Scalar,
    V: RowView<S> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualScroller")
            .field("view", &self.view)
            .field("len", &self.store.len())
            .field("exhausted", &self.store.is_exhausted())
            .field("state", &self.state)
            .field("row_height", &self.row_height)
            .field("options", &self.options)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

impl<T, V, E, S> VirtualScroller<T, V, E, S>
where
    S: Scalar,
    V: RowView<S>,
{
    /// Starts configuring a scroller.
    #[must_use]
    pub fn builder() -> VirtualScrollerBuilder<T, V, E, S> {
        VirtualScrollerBuilder::new()
    }

    /// Reports a scroll notification at host time `now`.
    ///
    /// Runs a pass immediately when the rate limiter's quiet window has
    /// elapsed, and otherwise only schedules the trailing pass. Returns the
    /// pass summary when a pass ran.
    pub fn on_scroll(
        &mut self,
        now: Duration,
        metrics: ScrollMetrics<S>,
    ) -> Result<Option<ScrollPass>, E> {
        match self.trigger.call(now, metrics) {
            Some(invocation) => self.scroll_to(invocation.args).map(Some),
            None => Ok(None),
        }
    }

    /// Runs the trailing pass if it is due at `now`.
    pub fn poll(&mut self, now: Duration) -> Result<Option<ScrollPass>, E> {
        match self.trigger.poll(now) {
            Some(invocation) => self.scroll_to(invocation.args).map(Some),
            None => Ok(None),
        }
    }

    /// Host time at which [`VirtualScroller::poll`] should next be called.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.trigger.deadline()
    }

    /// Runs one pass for `metrics`, bypassing the rate limiter.
    pub fn scroll_to(&mut self, metrics: ScrollMetrics<S>) -> Result<ScrollPass, E> {
        let growth = self.grow_if_needed(&metrics)?;

        let count = self.store.len();
        let snapshot = self.state;
        let direction =
            ScrollDirection::from_offsets(snapshot.last_scroll_offset, metrics.scroll_offset);
        let window = compute_window(
            metrics.scroll_offset,
            metrics.viewport_extent,
            self.row_height,
            self.options.buffer,
            count,
        );
        let next = window.materialized();

        let diff = self.materialize(snapshot.materialized(count), next.clone(), direction)?;
        self.state = snapshot.settle(next, count, metrics.scroll_offset, window.last_visible);
        self.view.set_spacers(self.spacers());

        debug!(
            "scroll pass {direction:?} to {:?}: +{} -{} rows, {} top / {} bottom hidden",
            metrics.scroll_offset,
            diff.inserted(),
            diff.removed(),
            self.state.top_hidden,
            self.state.bottom_hidden
        );
        Ok(ScrollPass {
            direction,
            window,
            diff,
            growth,
        })
    }

    /// Appends items supplied by the host, outside of page fetches.
    ///
    /// The new items are hidden at the bottom until the next pass. A changed
    /// tail re-arms growth after exhaustion.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let appended = self.store.append(items);
        self.state = self.state.with_appended(appended);
        self.view.set_spacers(self.spacers());
        appended
    }

    /// Forgets observed exhaustion so the next growth check fetches again.
    pub fn reset_exhaustion(&mut self) {
        self.store.reset_exhaustion();
    }

    /// Returns `true` if the page source reported exhaustion for the current tail.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.store.is_exhausted()
    }

    /// Number of loaded items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no items are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Loaded items in index order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.store.items()
    }

    /// Current hidden-row bookkeeping.
    #[must_use]
    pub fn state(&self) -> &WindowState<S> {
        &self.state
    }

    /// Indices of the currently materialized rows.
    #[must_use]
    pub fn materialized(&self) -> Range<usize> {
        self.state.materialized(self.store.len())
    }

    /// Total extent of the loaded rows, materialized or spaced.
    ///
    /// Growth checks measure against this rather than the `content_extent`
    /// carried by [`ScrollMetrics`].
    #[must_use]
    pub fn content_extent(&self) -> S {
        S::from_usize(self.store.len()) * self.row_height
    }

    /// Current spacer extents.
    #[must_use]
    pub fn spacers(&self) -> Spacers<S> {
        self.state.spacers(self.row_height)
    }

    /// Uniform row height.
    #[must_use]
    pub fn row_height(&self) -> S {
        self.row_height
    }

    /// Effective options after defaults were applied.
    #[must_use]
    pub fn options(&self) -> &ScrollerOptions<S> {
        &self.options
    }

    /// The rendering surface.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the rendering surface.
    ///
    /// Rows must only be attached or detached by the scroller.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consumes the scroller and returns its rendering surface.
    pub fn into_view(self) -> V {
        self.view
    }

    fn grow_if_needed(&mut self, metrics: &ScrollMetrics<S>) -> Result<Growth, E> {
        // Measure against the loaded content, not the reported extent, which
        // is stale when a trailing pass replays an earlier notification.
        let live = ScrollMetrics {
            content_extent: self.content_extent(),
            ..*metrics
        };
        let load_more = &mut self.load_more;
        let growth = self.store.grow_if_needed(
            live.distance_to_end(),
            self.options.growth_threshold,
            self.options.page_size,
            |page_size| load_more(page_size),
        )?;
        self.state = self.state.with_appended(growth.appended());
        Ok(growth)
    }

    fn materialize(
        &mut self,
        previous: Range<usize>,
        next: Range<usize>,
        direction: ScrollDirection,
    ) -> Result<Diff, E> {
        let len = self.store.len();
        let next = next.start.min(len)..next.end.min(len);
        let mut rows = Materializer {
            store: &self.store,
            render_item: &mut self.render_item,
            view: &mut self.view,
            scalar: PhantomData,
        };
        reconcile(previous, next, direction, &mut rows)
    }
}

/// Bridges reconciliation edge operations to the item store, the
/// `render_item` callback, and the view.
struct Materializer<'a, T, V, E, S>
where
    S: Scalar,
    V: RowView<S>,
{
    store: &'a PagedStore<T>,
    render_item: &'a mut RenderFn<T, V::Row, E>,
    view: &'a mut V,
    scalar: PhantomData<S>,
}

impl<T, V, E, S> EdgeOps for Materializer<'_, T, V, E, S>
where
    S: Scalar,
    V: RowView<S>,
{
    type Error = E;

    fn insert(&mut self, edge: Edge, index: usize) -> Result<(), E> {
        let Some(item) = self.store.get(index) else {
            debug_assert!(
                index < self.store.len(),
                "row {index} requested past the loaded items ({})",
                self.store.len()
            );
            return Ok(());
        };
        let row = (self.render_item)(index, item)?;
        self.view.insert_row(edge, row);
        Ok(())
    }

    fn remove(&mut self, edge: Edge, _index: usize) {
        self.view.remove_row(edge);
    }
}

enum Container<V> {
    View(V),
    Unresolved(String),
}

/// Builder for [`VirtualScroller`].
///
/// `container`, `height`, `row_height`, `render_item`, and `load_more` are
/// required; everything else has a default (see [`ScrollerOptions`]).
///
/// [`VirtualScrollerBuilder::build`] validates the configuration, applies the
/// height to the view, and performs the initial load: enough whole pages to
/// fill the measured viewport, all of them materialized.
pub struct VirtualScrollerBuilder<T, V, E, S = f64>
where
    S: Scalar,
    V: RowView<S>,
{
    container: Option<Container<V>>,
    height: Option<Extent<S>>,
    row_height: Option<S>,
    options: ScrollerOptions<S>,
    render_item: Option<RenderFn<T, V::Row, E>>,
    load_more: Option<LoadFn<T, E>>,
}

impl<T, V, E, S> fmt::Debug for VirtualScrollerBuilder<T, V, E, S>
where
    S: Scalar,
    V: RowView<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualScrollerBuilder")
            .field("has_container", &self.container.is_some())
            .field("height", &self.height)
            .field("row_height", &self.row_height)
            .field("options", &self.options)
            .field("has_render_item", &self.render_item.is_some())
            .field("has_load_more", &self.load_more.is_some())
            .finish()
    }
}

impl<T, V, E, S> Default for VirtualScrollerBuilder<T, V, E, S>
where
    S: Scalar,
    V: RowView<S>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V, E, S> VirtualScrollerBuilder<T, V, E, S>
where
    S: Scalar,
    V: RowView<S>,
{
    /// Creates an empty builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            container: None,
            height: None,
            row_height: None,
            options: ScrollerOptions::default(),
            render_item: None,
            load_more: None,
        }
    }

    /// Uses `view` as the scroll container.
    #[must_use]
    pub fn container(mut self, view: V) -> Self {
        self.container = Some(Container::View(view));
        self
    }

    /// Resolves the scroll container by `name` through `lookup`.
    ///
    /// An unresolvable name is reported by [`VirtualScrollerBuilder::build`].
    #[must_use]
    pub fn container_named(mut self, name: &str, mut lookup: impl ContainerLookup<V>) -> Self {
        self.container = Some(match lookup.lookup(name) {
            Some(view) => Container::View(view),
            None => Container::Unresolved(name.into()),
        });
        self
    }

    /// Sets the container extent along the scroll axis.
    #[must_use]
    pub fn height(mut self, height: Extent<S>) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the uniform row height.
    #[must_use]
    pub fn row_height(mut self, row_height: S) -> Self {
        self.row_height = Some(row_height);
        self
    }

    /// Sets items fetched per growth request (`0` keeps the default).
    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.options.page_size = page_size;
        self
    }

    /// Sets rows materialized beyond each viewport edge.
    #[must_use]
    pub fn buffer(mut self, buffer: usize) -> Self {
        self.options.buffer = buffer;
        self
    }

    /// Sets the distance from the content end that triggers growth.
    #[must_use]
    pub fn growth_threshold(mut self, threshold: S) -> Self {
        self.options.growth_threshold = threshold;
        self
    }

    /// Sets the quiet window of the scroll rate limiter.
    #[must_use]
    pub fn throttle_wait(mut self, wait: Duration) -> Self {
        self.options.throttle_wait = wait;
        self
    }

    /// Replaces all tunable options at once.
    #[must_use]
    pub fn options(mut self, options: ScrollerOptions<S>) -> Self {
        self.options = options;
        self
    }

    /// Sets the callback that renders one item into a row.
    #[must_use]
    pub fn render_item(
        mut self,
        render_item: impl FnMut(usize, &T) -> Result<V::Row, E> + 'static,
    ) -> Self {
        self.render_item = Some(Box::new(render_item));
        self
    }

    /// Sets the callback that produces the next page of items.
    ///
    /// It receives the requested page size; returning fewer items signals that
    /// the source is exhausted.
    #[must_use]
    pub fn load_more(
        mut self,
        load_more: impl FnMut(usize) -> Result<Vec<T>, E> + 'static,
    ) -> Self {
        self.load_more = Some(Box::new(load_more));
        self
    }

    /// Validates the configuration and performs the initial load.
    pub fn build(self) -> Result<VirtualScroller<T, V, E, S>, BuildError<E>> {
        let mut view = match self.container {
            Some(Container::View(view)) => view,
            Some(Container::Unresolved(name)) => {
                return Err(ConfigError::UnresolvedContainer(name).into());
            }
            None => return Err(ConfigError::MissingContainer.into()),
        };
        let height = self.height.ok_or(ConfigError::MissingHeight)?;
        height.validate()?;
        let row_height = self.row_height.ok_or(ConfigError::MissingRowHeight)?;
        if !row_height.is_positive_finite() {
            return Err(ConfigError::InvalidRowHeight.into());
        }
        let render_item = self.render_item.ok_or(ConfigError::MissingRenderItem)?;
        let load_more = self.load_more.ok_or(ConfigError::MissingLoadMore)?;
        let options = self.options.normalized();

        view.apply_extent(&height);
        let viewport = view.viewport_extent();

        let mut scroller = VirtualScroller {
            view,
            store: PagedStore::new(),
            state: WindowState::default(),
            row_height,
            options,
            render_item,
            load_more,
            trigger: RateLimited::new(options.throttle_wait),
        };
        scroller
            .load_initial(viewport)
            .map_err(BuildError::Collaborator)?;
        Ok(scroller)
    }
}

impl<T, V, E, S> VirtualScroller<T, V, E, S>
where
    S: Scalar,
    V: RowView<S>,
{
    /// Fetches enough whole pages to fill `viewport` and materializes all of them.
    fn load_initial(&mut self, viewport: S) -> Result<(), E> {
        let page_size = self.options.page_size;
        let min_rows = (viewport.sanitize() / self.row_height).ceil_to_usize();
        let initial = min_rows.div_ceil(page_size).max(1).saturating_mul(page_size);

        let load_more = &mut self.load_more;
        let growth = self
            .store
            .fetch_page(initial, |n| load_more(n))?;
        let count = self.store.len();
        self.materialize(0..0, 0..count, ScrollDirection::Forward)?;

        let window = compute_window(
            S::zero(),
            viewport,
            self.row_height,
            self.options.buffer,
            count,
        );
        self.state = WindowState::default().settle(0..count, count, S::zero(), window.last_visible);
        self.view.set_spacers(self.spacers());
        debug!(
            "initial load: {count} items for a {viewport:?} viewport ({} rows minimum), {growth:?}",
            min_rows
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::convert::Infallible;

    #[derive(Default)]
    struct Rows(Vec<(Edge, u32)>);

    impl RowView<f32> for Rows {
        type Row = u32;

        fn insert_row(&mut self, edge: Edge, row: u32) {
            self.0.push((edge, row));
        }

        fn remove_row(&mut self, _edge: Edge) {
            self.0.pop();
        }

        fn apply_extent(&mut self, _extent: &Extent<f32>) {}

        fn viewport_extent(&self) -> f32 {
            0.0
        }

        fn set_spacers(&mut self, _spacers: Spacers<f32>) {}
    }

    fn store() -> PagedStore<u32> {
        let mut store = PagedStore::new();
        store.append([1, 2, 3]);
        store
    }

    fn tenfold() -> RenderFn<u32, u32, Infallible> {
        Box::new(|_, item: &u32| Ok(*item * 10))
    }

    #[test]
    fn materializer_renders_the_stored_item() {
        let store = store();
        let mut render = tenfold();
        let mut view = Rows::default();
        {
            let mut rows = Materializer {
                store: &store,
                render_item: &mut render,
                view: &mut view,
                scalar: PhantomData::<f32>,
            };
            rows.insert(Edge::Tail, 2).unwrap();
            rows.insert(Edge::Head, 0).unwrap();
        }
        assert_eq!(view.0, vec![(Edge::Tail, 30), (Edge::Head, 10)]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past the loaded items")]
    fn materializer_rejects_unloaded_rows() {
        let store = store();
        let mut render = tenfold();
        let mut view = Rows::default();
        let mut rows = Materializer {
            store: &store,
            render_item: &mut render,
            view: &mut view,
            scalar: PhantomData::<f32>,
        };
        let _ = rows.insert(Edge::Tail, 3);
    }
}
