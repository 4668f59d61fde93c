// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

/// A style value that can be attached to a range of text.
///
/// The [`Default`] value is the "no override" payload. Ranges holding it are removed from a
/// [`StyleRanges`](crate::StyleRanges) list, so a list only ever stores real overrides.
///
/// Equality decides whether two contiguous ranges can be merged. Implementations holding
/// shared handles should compare those handles by identity, and numeric fields by value.
pub trait StylePayload: Clone + PartialEq + Default + Debug {
    /// A single field assignment, e.g. "set the size to 12" or "clear the fill color".
    type Property: Clone + Debug;

    /// Overwrite the field named by `property`, leaving every other field untouched.
    fn apply(&mut self, property: &Self::Property);

    /// Returns `true` if this payload overrides nothing.
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
