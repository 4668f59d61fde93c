// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Advance computations shared by the measurer and the renderer.
//!
//! Both sides must agree to the last digit, otherwise aligned lines drift.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "only used without `std`")]
use core_maths::CoreFloat;

use crate::config::{LayoutConfig, TabMode};
use crate::font::{GlyphId, GlyphMetrics};
use crate::style::{RunFont, TextState};
use crate::util::truncate;

/// Glyph metrics and horizontal advance of `ch` in text space.
pub(crate) fn glyph_advance(run: &RunFont, state: &TextState, ch: char) -> (GlyphMetrics, f64) {
    let glyph = run.font.face().glyph(ch);
    let precision = run.metrics.precision;
    let mut advance = truncate(glyph.advance / 1000.0, precision) * run.size + state.char_spacing;
    if ch == ' ' {
        advance += state.word_spacing;
    }
    (glyph, advance * state.horizontal_scale)
}

/// Kerning between two consecutive glyphs in logical order, in text space.
///
/// The provider is always asked in visual order, so operands swap for right-to-left text.
pub(crate) fn kerning(run: &RunFont, state: &TextState, prev: GlyphId, next: GlyphId) -> f64 {
    if !state.kerning {
        return 0.0;
    }
    let face = run.font.face();
    let value = if state.rtl {
        face.kerning(next, prev)
    } else {
        face.kerning(prev, next)
    };
    truncate(value / 1000.0, run.metrics.precision) * run.size * state.horizontal_scale
}

/// Scales a glyph side bearing to text space.
pub(crate) fn bearing(run: &RunFont, state: &TextState, value: f64) -> f64 {
    truncate(value / 1000.0, run.metrics.precision) * run.size * state.horizontal_scale
}

/// Advance of one tab starting at line relative position `x`.
pub(crate) fn tab_advance(run: &RunFont, state: &TextState, config: &LayoutConfig, x: f64) -> f64 {
    match config.tab_mode {
        TabMode::AsSpaces => glyph_advance(run, state, ' ').1,
        TabMode::Stops => {
            let stop = config.tab_stop;
            let eps = crate::util::epsilon(config.precision);
            let next = (((x + eps) / stop).floor() + 1.0) * stop;
            next - x
        }
    }
}

/// Width of an inline block of `width` ems.
pub(crate) fn block_advance(run: &RunFont, state: &TextState, width: f64) -> f64 {
    width * run.size * state.horizontal_scale
}
