// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leading-edge rate limiting with a guaranteed trailing call.
//!
//! Every call:
//!
//! 1. records the call and (re)schedules the trailing deadline to
//!    `now + wait`, and
//! 2. fires immediately when more than `wait` has elapsed since the handler
//!    last actually ran (or when it has never run).
//!
//! Bursts inside the quiet window collapse, and a final invocation is always
//! due `wait` after the most recent call, even if the leading condition never
//! fires again. This is neither a plain throttle (which drops the trailing
//! call) nor a plain debounce (which has no leading call).
//!
//! Superseding calls only move the deadline; nothing cancels it.

use core::time::Duration;

use log::trace;

/// Which edge of the rate limit produced an invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fire {
    /// The call itself ran the handler because the quiet window had elapsed.
    Leading,
    /// A poll at or after the deadline ran the handler.
    Trailing,
}

/// Decision state machine for a leading + trailing rate limit.
///
/// `RateLimiter` holds no handler and no clock. Hosts report calls with
/// [`RateLimiter::on_call`], run their handler when it returns
/// `Some`, and poll [`RateLimiter::poll`] at or after
/// [`RateLimiter::deadline`] to deliver the trailing call.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    wait: Duration,
    last_invoked: Option<Duration>,
    deadline: Option<Duration>,
}

impl RateLimiter {
    /// Creates a rate limiter with the given quiet window.
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            last_invoked: None,
            deadline: None,
        }
    }

    /// Returns the quiet window.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Returns the timestamp of the most recent invocation, if any.
    #[must_use]
    pub fn last_invoked(&self) -> Option<Duration> {
        self.last_invoked
    }

    /// Returns the timestamp at which the trailing call becomes due, if one is
    /// scheduled.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns `true` while a trailing call is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records a call at `now`.
    ///
    /// Always moves the trailing deadline to `now + wait`. Returns
    /// `Some(Fire::Leading)` when the handler should run right away.
    ///
    /// Timestamps are expected to be monotonic; a `now` earlier than the last
    /// invocation is treated as no time having elapsed.
    pub fn on_call(&mut self, now: Duration) -> Option<Fire> {
        self.deadline = Some(now.saturating_add(self.wait));
        let elapsed_enough = match self.last_invoked {
            None => true,
            Some(last) => now.saturating_sub(last) > self.wait,
        };
        if elapsed_enough {
            self.last_invoked = Some(now);
            trace!("rate limiter: leading call at {now:?}");
            Some(Fire::Leading)
        } else {
            trace!(
                "rate limiter: collapsed call at {now:?}, trailing due at {:?}",
                self.deadline
            );
            None
        }
    }

    /// Delivers the trailing call if it is due at `now`.
    ///
    /// Returns `Some(Fire::Trailing)` exactly once per scheduled deadline.
    pub fn poll(&mut self, now: Duration) -> Option<Fire> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.last_invoked = Some(now);
                trace!("rate limiter: trailing call at {now:?}");
                Some(Fire::Trailing)
            }
            _ => None,
        }
    }
}

/// One handler invocation produced by [`RateLimited`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Invocation<A> {
    /// Which edge produced this invocation.
    pub fire: Fire,
    /// Arguments to run the handler with.
    pub args: A,
}

/// A [`RateLimiter`] that carries the arguments of the latest call.
///
/// The leading invocation receives the arguments of the call that produced
/// it; the trailing invocation receives the arguments of the most recent call.
///
/// Instead of owning a handler, `RateLimited` hands invocations back to the
/// caller, so the handler can borrow whatever receiver the caller owns. For
/// self-contained handlers, [`RateLimited::call_with`] and
/// [`RateLimited::poll_with`] run a closure directly.
#[derive(Clone, Debug)]
pub struct RateLimited<A> {
    limiter: RateLimiter,
    pending: Option<A>,
}

impl<A: Clone> RateLimited<A> {
    /// Creates a wrapper with the given quiet window.
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            limiter: RateLimiter::new(wait),
            pending: None,
        }
    }

    /// Returns the underlying decision state.
    #[must_use]
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Returns the timestamp at which the trailing call becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.limiter.deadline()
    }

    /// Returns the arguments the trailing call will run with, if scheduled.
    #[must_use]
    pub fn pending(&self) -> Option<&A> {
        self.pending.as_ref()
    }

    /// Records a call with `args` at `now`.
    ///
    /// Returns an invocation when the handler should run immediately.
    pub fn call(&mut self, now: Duration, args: A) -> Option<Invocation<A>> {
        let fire = self.limiter.on_call(now);
        let invocation = fire.map(|fire| Invocation {
            fire,
            args: args.clone(),
        });
        self.pending = Some(args);
        invocation
    }

    /// Returns the trailing invocation if it is due at `now`.
    pub fn poll(&mut self, now: Duration) -> Option<Invocation<A>> {
        let fire = self.limiter.poll(now)?;
        self.pending.take().map(|args| Invocation { fire, args })
    }

    /// Like [`RateLimited::call`], running `handler` when an invocation fires.
    pub fn call_with<R>(
        &mut self,
        now: Duration,
        args: A,
        handler: impl FnOnce(Invocation<A>) -> R,
    ) -> Option<R> {
        self.call(now, args).map(handler)
    }

    /// Like [`RateLimited::poll`], running `handler` when the trailing call fires.
    pub fn poll_with<R>(
        &mut self,
        now: Duration,
        handler: impl FnOnce(Invocation<A>) -> R,
    ) -> Option<R> {
        self.poll(now).map(handler)
    }
}
