// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Burst scenarios for `RateLimited`, driven by a simulated host clock.

use core::time::Duration;

use understory_timing::{Fire, RateLimited};

/// Feeds `events` (timestamps in ms) and polls every `tick` ms until `end`,
/// returning every invocation as `(time, fire, args)`.
fn simulate(wait: u64, events: &[u64], tick: u64, end: u64) -> Vec<(u64, Fire, u64)> {
    let mut limited = RateLimited::new(Duration::from_millis(wait));
    let mut out = Vec::new();
    let mut next_event = 0;
    let mut t = 0;
    while t <= end {
        while next_event < events.len() && events[next_event] == t {
            if let Some(inv) = limited.call(Duration::from_millis(t), t) {
                out.push((t, inv.fire, inv.args));
            }
            next_event += 1;
        }
        if let Some(inv) = limited.poll(Duration::from_millis(t)) {
            out.push((t, inv.fire, inv.args));
        }
        t += tick;
    }
    out
}

#[test]
fn continuous_burst_is_bounded_and_ends_with_trailing_call() {
    // One scroll event every 10 ms for a second.
    let events: Vec<u64> = (1..=100).map(|i| i * 10).collect();
    let fired = simulate(150, &events, 10, 2_000);

    let leading = fired.iter().filter(|(_, f, _)| *f == Fire::Leading).count();
    let trailing: Vec<_> = fired.iter().filter(|(_, f, _)| *f == Fire::Trailing).collect();

    // Leading calls are at least `wait` apart: at most ceil(1000 / 150) + 1.
    assert!((6..=8).contains(&leading), "leading = {leading}");
    // Deadlines keep moving during the burst, so exactly one trailing call fires,
    // `wait` after the final event, with the final event's arguments.
    assert_eq!(trailing.len(), 1);
    assert_eq!(*trailing[0], (1_150, Fire::Trailing, 1_000));
}

#[test]
fn isolated_events_fire_on_both_edges() {
    let fired = simulate(150, &[100, 1_000], 10, 2_000);
    assert_eq!(
        fired,
        vec![
            (100, Fire::Leading, 100),
            (250, Fire::Trailing, 100),
            (1_000, Fire::Leading, 1_000),
            (1_150, Fire::Trailing, 1_000),
        ]
    );
}

#[test]
fn leading_is_suppressed_right_after_a_trailing_call() {
    // Trailing at 250 counts as an invocation, so the event at 300 is collapsed
    // and only delivered by the next trailing call.
    let fired = simulate(150, &[100, 300], 10, 1_000);
    assert_eq!(
        fired,
        vec![
            (100, Fire::Leading, 100),
            (250, Fire::Trailing, 100),
            (450, Fire::Trailing, 300),
        ]
    );
}
