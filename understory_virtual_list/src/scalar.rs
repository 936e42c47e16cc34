// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction used for offsets, extents, and row heights.
//!
//! This trait is intentionally small and only implemented for `f32` and `f64`.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Scalar type used for scroll offsets, viewport extents, and row heights.
///
/// This is currently implemented for `f32` and `f64`. The trait is deliberately
/// minimal and geared toward floating-point pixel coordinates.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity (typically `0.0`).
    fn zero() -> Self;

    /// Returns `true` if the value is finite (not NaN or infinite).
    fn is_finite(self) -> bool;

    /// Returns `true` if the value is negative, including `-0.0`.
    fn is_sign_negative(self) -> bool;

    /// Constructs from a `usize` lossily.
    fn from_usize(value: usize) -> Self;

    /// Floors the value and converts it to `usize`.
    ///
    /// Negative values and NaN map to `0`; values beyond `usize::MAX`
    /// saturate.
    fn floor_to_usize(self) -> usize;

    /// Returns `true` for finite values strictly greater than zero.
    fn is_positive_finite(self) -> bool {
        self.is_finite() && self > Self::zero()
    }

    /// Clamps negative and non-finite values to zero.
    fn sanitize(self) -> Self {
        if !self.is_finite() || self.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// Rounds the value up and converts it to `usize`.
    ///
    /// Negative values and NaN map to `0`.
    fn ceil_to_usize(self) -> usize {
        let floor = self.floor_to_usize();
        if Self::from_usize(floor) < self {
            floor.saturating_add(1)
        } else {
            floor
        }
    }
}

impl Scalar for f32 {
    fn zero() -> Self {
        0.0
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }

    fn floor_to_usize(self) -> usize {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Float-to-int casts saturate and map NaN to zero, which is the intended clamp"
        )]
        {
            self as usize
        }
    }
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }

    fn floor_to_usize(self) -> usize {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Float-to-int casts saturate and map NaN to zero, which is the intended clamp"
        )]
        {
            self as usize
        }
    }
}
