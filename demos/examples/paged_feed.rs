// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paged feed.
//!
//! Fling through a 2,000-item feed on a simulated 60 Hz clock. Scroll
//! notifications go through the scroller's rate limiter, pages are fetched as
//! the viewport nears the end of loaded content, and a frame is printed every
//! half second.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example paged_feed`

use std::error::Error;
use std::time::Duration;

use log::info;
use understory_demos::{FeedSource, feed_scroller};
use understory_virtual_list::Extent;

const ROW_HEIGHT: f32 = 24.0;
const SCREEN: f32 = 480.0;
const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut list = feed_scroller(
        FeedSource::new(2_000),
        SCREEN,
        Extent::Expr("100vh".into()),
        ROW_HEIGHT,
    )?;
    info!(
        "initial load: {} items, rows {:?} attached",
        list.len(),
        list.materialized()
    );

    let mut now = Duration::ZERO;
    let mut offset = 0.0_f32;
    let mut velocity = 900.0_f32;
    let mut passes = 0;

    for frame in 0..360_u32 {
        now += FRAME;
        // Fling down for three seconds, then back up.
        if frame == 180 {
            velocity = -velocity;
        }
        let metrics = list.view().metrics(ROW_HEIGHT, offset);
        let max = (metrics.content_extent - metrics.viewport_extent).max(0.0);
        offset = (offset + velocity * FRAME.as_secs_f32()).clamp(0.0, max);

        let metrics = list.view().metrics(ROW_HEIGHT, offset);
        if list.on_scroll(now, metrics)?.is_some() {
            passes += 1;
        }
        if list.next_deadline().is_some_and(|deadline| deadline <= now) && list.poll(now)?.is_some() {
            passes += 1;
        }

        if frame % 30 == 0 {
            println!("t={:>5}ms offset={offset:.0}", now.as_millis());
            print!("{}", list.view().frame(ROW_HEIGHT, offset));
        }
    }

    // Let the trailing pass land.
    now += list.options().throttle_wait;
    if list.poll(now)?.is_some() {
        passes += 1;
    }

    info!(
        "{passes} passes over 360 frames; {} items loaded, rows {:?} attached, exhausted: {}",
        list.len(),
        list.materialized(),
        list.is_exhausted()
    );
    Ok(())
}
