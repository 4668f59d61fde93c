// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Trait for types that represent the fill or stroke color of glyphs and decorations.
///
/// Brushes are opaque to the composition core: they are only compared, to avoid emitting
/// redundant color commands, and handed to the [`DrawSink`](crate::DrawSink).
pub trait Brush: Clone + PartialEq + Default + core::fmt::Debug {}

impl<T: Clone + PartialEq + Default + core::fmt::Debug> Brush for T {}
