// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic rate limiting primitives for UI runtimes.
//!
//! UI hosts deliver bursts of high-frequency notifications (scroll, resize,
//! pointer move) that downstream work should not process one by one. This
//! crate provides small state machines that decide *when* such work runs,
//! without owning a clock, a timer queue, or an event loop:
//!
//! - [`RateLimiter`]: a leading-edge rate limit with a guaranteed trailing
//!   call. It answers "should the handler run now?" for every call, and
//!   exposes a deadline the host must poll so the trailing call fires.
//! - [`RateLimited`]: a [`RateLimiter`] that also remembers the arguments of
//!   the most recent call, so the trailing invocation sees the latest state.
//!
//! Time is supplied by the host as a monotonic timestamp expressed as a
//! [`Duration`](core::time::Duration) since an arbitrary origin (for example
//! `Instant::now() - start`, or a frame clock). The crate never reads a clock
//! itself.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_timing::{Fire, RateLimited};
//!
//! let ms = Duration::from_millis;
//! let mut scroll = RateLimited::new(ms(150));
//!
//! // The first call runs immediately.
//! let leading = scroll.call(ms(1_000), 10.0_f64).unwrap();
//! assert_eq!(leading.fire, Fire::Leading);
//!
//! // Calls inside the quiet window are collapsed...
//! assert!(scroll.call(ms(1_050), 20.0).is_none());
//! assert!(scroll.call(ms(1_100), 30.0).is_none());
//!
//! // ...but the latest arguments still run once the host polls the deadline.
//! assert_eq!(scroll.deadline(), Some(ms(1_250)));
//! assert!(scroll.poll(ms(1_200)).is_none());
//! let trailing = scroll.poll(ms(1_250)).unwrap();
//! assert_eq!(trailing.fire, Fire::Trailing);
//! assert_eq!(trailing.args, 30.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod rate_limit;

pub use rate_limit::{Fire, Invocation, RateLimited, RateLimiter};
