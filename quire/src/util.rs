// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "only used without `std`")]
use core_maths::CoreFloat;

use core::ops::{Bound, Range, RangeBounds};

/// `10^digits` without relying on `powi`.
pub(crate) fn pow10(digits: u8) -> f64 {
    let mut scale = 1.0;
    for _ in 0..digits {
        scale *= 10.0;
    }
    scale
}

/// Truncates `value` towards zero, keeping `digits` decimal digits.
pub(crate) fn truncate(value: f64, digits: u8) -> f64 {
    let scale = pow10(digits);
    (value * scale).trunc() / scale
}

/// The distance below which an emitted move is effectively zero at `digits` decimals.
pub(crate) fn epsilon(digits: u8) -> f64 {
    0.5 / pow10(digits)
}

pub(crate) fn nearly_zero(x: f64, epsilon: f64) -> bool {
    x.abs() < epsilon
}

pub(crate) fn nearly_eq(x: f64, y: f64, epsilon: f64) -> bool {
    nearly_zero(x - y, epsilon)
}

/// Resolves a `RangeBounds` into a range, without clamping so that callers can report
/// out-of-bounds requests.
pub(crate) fn to_range(range: impl RangeBounds<usize>, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(n) => *n,
        Bound::Excluded(n) => n.saturating_add(1),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => len,
        Bound::Included(n) => n.saturating_add(1),
        Bound::Excluded(n) => *n,
    };
    start..end
}
