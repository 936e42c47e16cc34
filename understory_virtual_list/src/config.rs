// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroller configuration and construction errors.

use alloc::string::String;
use core::time::Duration;

use crate::Scalar;

/// Default number of items fetched per growth request.
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Default number of rows materialized beyond each viewport edge.
pub const DEFAULT_BUFFER: usize = 10;
/// Default distance from the content end, in pixels, that triggers growth.
pub const DEFAULT_GROWTH_THRESHOLD: usize = 40;
/// Default quiet window of the scroll rate limiter.
pub const DEFAULT_THROTTLE_WAIT: Duration = Duration::from_millis(150);

/// Extent applied to the scroll container along the scroll axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extent<S> {
    /// A fixed pixel extent.
    Pixels(S),
    /// A host sizing expression (for example `"100vh"` or `"fill"`), applied
    /// verbatim by the host.
    Expr(String),
}

impl<S: Scalar> Extent<S> {
    /// Checks that a pixel extent is positive and finite and an expression is
    /// non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = match self {
            Self::Pixels(px) => px.is_positive_finite(),
            Self::Expr(expr) => !expr.trim().is_empty(),
        };
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidHeight)
        }
    }
}

/// Tunable scroller options with defaults.
///
/// `row_height`, the container, its height, and both callbacks are required
/// and passed to the builder separately.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(default, bound(deserialize = "S: Scalar + serde::Deserialize<'de>"))
)]
pub struct ScrollerOptions<S> {
    /// Items fetched per growth request. `0` falls back to
    /// [`DEFAULT_PAGE_SIZE`] when building.
    pub page_size: usize,
    /// Rows materialized beyond each viewport edge.
    pub buffer: usize,
    /// Growth is requested when the distance from the viewport bottom to the
    /// content end drops below this value.
    pub growth_threshold: S,
    /// Quiet window of the scroll rate limiter.
    pub throttle_wait: Duration,
}

impl<S: Scalar> Default for ScrollerOptions<S> {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            buffer: DEFAULT_BUFFER,
            growth_threshold: S::from_usize(DEFAULT_GROWTH_THRESHOLD),
            throttle_wait: DEFAULT_THROTTLE_WAIT,
        }
    }
}

impl<S: Scalar> ScrollerOptions<S> {
    /// Replaces out-of-range values with their defaults.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            page_size: if self.page_size == 0 {
                defaults.page_size
            } else {
                self.page_size
            },
            growth_threshold: if self.growth_threshold.is_finite() {
                self.growth_threshold
            } else {
                defaults.growth_threshold
            },
            ..self
        }
    }
}

/// Invalid or missing configuration detected while building a scroller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No container was supplied.
    #[error("no container was provided")]
    MissingContainer,
    /// A named container could not be resolved.
    #[error("container `{0}` could not be resolved")]
    UnresolvedContainer(String),
    /// No height was supplied.
    #[error("no height was provided")]
    MissingHeight,
    /// The height was non-positive, non-finite, or an empty expression.
    #[error("height must be a positive pixel value or a non-empty sizing expression")]
    InvalidHeight,
    /// No row height was supplied.
    #[error("no row height was provided")]
    MissingRowHeight,
    /// The row height was non-positive or non-finite.
    #[error("row height must be a positive, finite number")]
    InvalidRowHeight,
    /// No `render_item` callback was supplied.
    #[error("no `render_item` callback was provided")]
    MissingRenderItem,
    /// No `load_more` callback was supplied.
    #[error("no `load_more` callback was provided")]
    MissingLoadMore,
}

/// Failure while building a scroller.
#[derive(Debug, thiserror::Error)]
pub enum BuildError<E> {
    /// The configuration was rejected; nothing was fetched or rendered.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A collaborator failed during the initial load.
    #[error("initial materialization failed")]
    Collaborator(#[source] E),
}
