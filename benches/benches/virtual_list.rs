// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::convert::Infallible;
use core::ops::Range;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_virtual_list::{
    Edge, EdgeOps, Extent, RowView, ScrollDirection, ScrollMetrics, Spacers, VirtualScroller,
    compute_window, reconcile,
};

const ROW: f64 = 24.0;
const VIEWPORT: f64 = 720.0;

/// Counts edge operations without holding rows.
#[derive(Default)]
struct Counter {
    attached: usize,
    spacers: Option<Spacers<f64>>,
}

impl EdgeOps for Counter {
    type Error = Infallible;

    fn insert(&mut self, _edge: Edge, _index: usize) -> Result<(), Infallible> {
        self.attached += 1;
        Ok(())
    }

    fn remove(&mut self, _edge: Edge, _index: usize) {
        self.attached -= 1;
    }
}

impl RowView<f64> for Counter {
    type Row = usize;

    fn insert_row(&mut self, _edge: Edge, row: usize) {
        self.attached += 1;
        black_box(row);
    }

    fn remove_row(&mut self, _edge: Edge) {
        self.attached -= 1;
    }

    fn apply_extent(&mut self, _extent: &Extent<f64>) {}

    fn viewport_extent(&self) -> f64 {
        VIEWPORT
    }

    fn set_spacers(&mut self, spacers: Spacers<f64>) {
        self.spacers = Some(spacers);
    }
}

fn scroller(items: usize) -> VirtualScroller<usize, Counter, Infallible> {
    let mut next = 0;
    VirtualScroller::builder()
        .container(Counter::default())
        .height(Extent::Pixels(VIEWPORT))
        .row_height(ROW)
        .render_item(|index, _item: &usize| Ok(index))
        .load_more(move |page_size| {
            let end = (next + page_size).min(items);
            let page = (next..end).collect();
            next = end;
            Ok(page)
        })
        .build()
        .unwrap_or_else(|err| panic!("bench scroller must build: {err}"))
}

fn content(items: usize) -> f64 {
    items as f64 * ROW
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_virtual_list/window");

    group.bench_function("compute_window_sweep", |b| {
        b.iter(|| {
            let mut acc = 0_usize;
            for step in 0..1_000_u32 {
                let offset = f64::from(step) * 37.5;
                let window = compute_window(offset, VIEWPORT, ROW, 10, 100_000);
                acc += window.materialized().len();
            }
            black_box(acc)
        });
    });

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_virtual_list/reconcile");

    let cases: [(&str, Range<usize>, Range<usize>, ScrollDirection); 4] = [
        ("step_forward", 100..131, 101..132, ScrollDirection::Forward),
        ("step_backward", 101..132, 100..131, ScrollDirection::Backward),
        ("jump_forward", 0..21, 90..121, ScrollDirection::Forward),
        ("resize", 100..131, 95..150, ScrollDirection::Backward),
    ];
    for (name, previous, next, direction) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, _| {
            b.iter(|| {
                let mut ops = Counter {
                    attached: previous.len(),
                    spacers: None,
                };
                let diff = reconcile(previous.clone(), next.clone(), direction, &mut ops);
                black_box((diff, ops.attached))
            });
        });
    }

    group.finish();
}

fn bench_scroller(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_virtual_list/scroller");
    group.sample_size(50);

    for &items in &[1_000_usize, 100_000] {
        group.bench_function(format!("smooth_scroll(items={items})"), |b| {
            b.iter_batched(
                || {
                    let mut list = scroller(50);
                    list.extend(50..items);
                    list
                },
                |mut list| {
                    for step in 0..500_u32 {
                        let offset = f64::from(step) * 7.0;
                        let metrics = ScrollMetrics::new(offset, VIEWPORT, content(items));
                        let pass = list.scroll_to(metrics);
                        black_box(pass.ok());
                    }
                    black_box(list.view().attached)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.bench_function("grow_to_end(items=20000)", |b| {
        b.iter_batched(
            || scroller(20_000),
            |mut list| {
                while !list.is_exhausted() {
                    let metrics = ScrollMetrics::new(
                        content(list.len()) - VIEWPORT,
                        VIEWPORT,
                        content(list.len()),
                    );
                    black_box(list.scroll_to(metrics).ok());
                }
                black_box(list.len())
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_window, bench_reconcile, bench_scroller);
criterion_main!(benches);
