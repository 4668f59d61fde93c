// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A monospaced font for unit tests.
//!
//! Every glyph advances 500 units except whitespace (250). Glyphs have 50 unit bearings,
//! rise to 700 and descend to -200 for `g`, `j`, `p`, `q`, `y`. The only kerning pair is
//! `AV` at -100.

use crate::font::{Font, FontFace, FontMetrics, GlyphId, GlyphMetrics};
use crate::style::TextState;

#[derive(Debug)]
pub(crate) struct MonoFace {
    name: &'static str,
    metrics: FontMetrics,
}

impl MonoFace {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            metrics: FontMetrics::default(),
        }
    }

    pub(crate) fn with_line_height(name: &'static str, line_height: f64) -> Self {
        Self {
            name,
            metrics: FontMetrics {
                line_height,
                ..FontMetrics::default()
            },
        }
    }
}

impl FontFace for MonoFace {
    fn name(&self) -> &str {
        self.name
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn glyph(&self, ch: char) -> GlyphMetrics {
        if ch.is_whitespace() {
            return GlyphMetrics {
                id: ch as GlyphId,
                advance: 250.0,
                ..Default::default()
            };
        }
        GlyphMetrics {
            id: ch as GlyphId,
            advance: 500.0,
            lsb: 50.0,
            rsb: 50.0,
            y_min: if "gjpqy".contains(ch) { -200.0 } else { 0.0 },
            y_max: 700.0,
        }
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64 {
        if (left, right) == ('A' as GlyphId, 'V' as GlyphId) {
            -100.0
        } else {
            0.0
        }
    }
}

pub(crate) fn mono_state(size: f64) -> TextState {
    TextState::new(Font::new(MonoFace::new("Mono")), size)
}
