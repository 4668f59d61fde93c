// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph metrics provided by external font collaborators.

use alloc::sync::Arc;
use core::fmt::Debug;

/// Font specific glyph identifier.
pub type GlyphId = u32;

/// Metrics of a single glyph, in thousandths of an em.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// The glyph identifier, used for kerning lookups.
    pub id: GlyphId,
    /// Horizontal advance.
    pub advance: f64,
    /// Left side bearing: blank space between the origin and the ink.
    pub lsb: f64,
    /// Right side bearing: blank space between the ink and the advance.
    pub rsb: f64,
    /// Lowest extent of the ink relative to the baseline.
    pub y_min: f64,
    /// Highest extent of the ink relative to the baseline.
    pub y_max: f64,
}

/// Font wide metrics, in thousandths of an em.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance between consecutive baselines.
    pub line_height: f64,
    /// Height of capital letters.
    pub cap_height: f64,
    /// Typographic ascent.
    pub ascent: f64,
    /// Typographic descent (negative below the baseline).
    pub descent: f64,
    /// Underline offset from the baseline (negative below the baseline).
    pub underline_position: f64,
    /// Underline stroke thickness.
    pub underline_thickness: f64,
    /// Number of decimal digits kept when converting metrics to text space.
    ///
    /// Values are always truncated, never rounded.
    pub precision: u8,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            line_height: 1200.0,
            cap_height: 700.0,
            ascent: 800.0,
            descent: -200.0,
            underline_position: -100.0,
            underline_thickness: 50.0,
            precision: 3,
        }
    }
}

/// The glyph metrics provider for one font.
///
/// Extracting outlines and metrics from font files is the job of the implementor; this crate
/// only consumes the numbers.
pub trait FontFace: Debug {
    /// The resource name the draw sink uses to refer to this font.
    fn name(&self) -> &str;

    /// Font wide metrics.
    fn metrics(&self) -> FontMetrics;

    /// Metrics of the glyph used for `ch`.
    fn glyph(&self, ch: char) -> GlyphMetrics;

    /// Kerning adjustment between two glyphs in visual left-to-right order, in thousandths of an
    /// em. Positive values move the glyphs apart.
    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64 {
        let _ = (left, right);
        0.0
    }
}

/// A shared handle to a [`FontFace`].
///
/// Handles compare by identity: two handles are equal when they point at the same face.
#[derive(Clone)]
pub struct Font(Arc<dyn FontFace>);

impl Font {
    /// Wraps a face in a new handle.
    pub fn new(face: impl FontFace + 'static) -> Self {
        Self(Arc::new(face))
    }

    /// Wraps an already shared face.
    pub fn from_arc(face: Arc<dyn FontFace>) -> Self {
        Self(face)
    }

    /// The glyph metrics provider behind this handle.
    pub fn face(&self) -> &dyn FontFace {
        &*self.0
    }

    /// The resource name of the font.
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Font wide metrics.
    pub fn metrics(&self) -> FontMetrics {
        self.0.metrics()
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Debug for Font {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Font").field(&self.0.name()).finish()
    }
}
