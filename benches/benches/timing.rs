// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_timing::{RateLimited, RateLimiter};

fn bench_timing(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_timing");
    let wait = Duration::from_millis(150);

    group.bench_function("limiter_burst(calls=10000)", |b| {
        b.iter(|| {
            let mut limiter = RateLimiter::new(wait);
            let mut fired = 0_u32;
            for t in 0..10_000_u64 {
                let now = Duration::from_millis(t * 4);
                fired += u32::from(limiter.on_call(now).is_some());
                fired += u32::from(limiter.poll(now).is_some());
            }
            black_box(fired)
        });
    });

    group.bench_function("rate_limited_burst(calls=10000)", |b| {
        b.iter(|| {
            let mut limited = RateLimited::new(wait);
            let mut last = 0.0_f64;
            for t in 0..10_000_u32 {
                let now = Duration::from_millis(u64::from(t) * 4);
                if let Some(inv) = limited.call(now, f64::from(t)) {
                    last = inv.args;
                }
                if let Some(inv) = limited.poll(now) {
                    last = inv.args;
                }
            }
            black_box(last)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_timing);
criterion_main!(benches);
