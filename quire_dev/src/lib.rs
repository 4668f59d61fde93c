// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Quire Dev
//!
//! This crate provides utilities for developing Quire: table driven fonts with predictable
//! metrics and a handful of text samples.

use hashbrown::HashMap;
use quire::{Font, FontFace, FontMetrics, GlyphId, GlyphMetrics, TextState};

/// A font whose metrics come from lookup tables.
///
/// Characters without an entry use the default glyph. All values are in 1/1000 em.
#[derive(Clone, Debug)]
pub struct TestFont {
    name: String,
    metrics: FontMetrics,
    default_glyph: GlyphMetrics,
    space_advance: f64,
    glyphs: HashMap<char, GlyphMetrics>,
    kerning: HashMap<(GlyphId, GlyphId), f64>,
}

impl TestFont {
    /// Creates a monospaced font: 500 unit advances, 250 for whitespace, 50 unit bearings.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            metrics: FontMetrics::default(),
            default_glyph: GlyphMetrics {
                id: 0,
                advance: 500.0,
                lsb: 50.0,
                rsb: 50.0,
                y_min: 0.0,
                y_max: 700.0,
            },
            space_advance: 250.0,
            glyphs: HashMap::new(),
            kerning: HashMap::new(),
        }
    }

    /// Replaces the font wide metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Sets the advance and bearings of glyphs without a table entry.
    #[must_use]
    pub fn with_default_glyph(mut self, advance: f64, lsb: f64, rsb: f64) -> Self {
        self.default_glyph.advance = advance;
        self.default_glyph.lsb = lsb;
        self.default_glyph.rsb = rsb;
        self
    }

    /// Sets the advance of whitespace without a table entry.
    #[must_use]
    pub fn with_space_advance(mut self, advance: f64) -> Self {
        self.space_advance = advance;
        self
    }

    /// Sets the metrics of `ch`. The glyph id is derived from the character.
    #[must_use]
    pub fn with_glyph(mut self, ch: char, glyph: GlyphMetrics) -> Self {
        self.glyphs.insert(
            ch,
            GlyphMetrics {
                id: ch as GlyphId,
                ..glyph
            },
        );
        self
    }

    /// Sets the advance of `ch`, keeping the default bearings and extents.
    #[must_use]
    pub fn with_advance(self, ch: char, advance: f64) -> Self {
        let glyph = GlyphMetrics {
            advance,
            ..self.default_glyph
        };
        self.with_glyph(ch, glyph)
    }

    /// Gives `chars` a descender reaching `y_min`.
    #[must_use]
    pub fn with_descenders(mut self, chars: &str, y_min: f64) -> Self {
        for ch in chars.chars() {
            let glyph = GlyphMetrics {
                y_min,
                ..self.glyph(ch)
            };
            self = self.with_glyph(ch, glyph);
        }
        self
    }

    /// Sets the kerning adjustment between `left` and `right`.
    #[must_use]
    pub fn with_kerning(mut self, left: char, right: char, value: f64) -> Self {
        self.kerning
            .insert((left as GlyphId, right as GlyphId), value);
        self
    }

    /// Wraps the font in a shared [`Font`] handle.
    pub fn into_font(self) -> Font {
        Font::new(self)
    }
}

impl FontFace for TestFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn glyph(&self, ch: char) -> GlyphMetrics {
        if let Some(glyph) = self.glyphs.get(&ch) {
            return *glyph;
        }
        if ch.is_whitespace() {
            return GlyphMetrics {
                id: ch as GlyphId,
                advance: self.space_advance,
                ..Default::default()
            };
        }
        GlyphMetrics {
            id: ch as GlyphId,
            ..self.default_glyph
        }
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0.0)
    }
}

/// The monospaced [`TestFont`] with descenders on `gjpqy` and an `AV` kerning pair of -100.
pub fn mono_font() -> Font {
    TestFont::new("Mono")
        .with_descenders("gjpqy", -200.0)
        .with_kerning('A', 'V', -100.0)
        .into_font()
}

/// A text state using [`mono_font`] at `size`.
pub fn mono_state(size: f64) -> TextState {
    TextState::new(mono_font(), size)
}

/// A sample to be used for development.
#[derive(Debug)]
pub struct Sample {
    /// The name of the sample.
    pub name: &'static str,
    /// The text of the sample.
    pub text: &'static str,
}

/// A collection of text samples.
#[derive(Debug)]
pub struct TextSamples {
    /// Latin prose, one paragraph.
    pub latin: Sample,
    /// Hebrew prose, right-to-left.
    pub hebrew: Sample,
    /// Several lines separated by newlines, with tabs.
    pub table: Sample,
}

impl TextSamples {
    /// Creates a new collection of text samples.
    pub const fn new() -> Self {
        Self {
            latin: Sample {
                name: "latin",
                text: "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Integer cursus \
                       interdum dui, in gravida ligula aliquam in. Vivamus vitae metus pharetra, \
                       ultricies metus quis, consectetur augue.",
            },
            hebrew: Sample {
                name: "hebrew",
                text: "שלום עולם, זהו משפט לדוגמה",
            },
            table: Sample {
                name: "table",
                text: "Name\tQty\tPrice\nApples\t3\t1.20\nPears\t12\t0.80",
            },
        }
    }

    /// Returns every sample.
    pub fn all(&self) -> [&Sample; 3] {
        [&self.latin, &self.hebrew, &self.table]
    }
}

impl Default for TextSamples {
    fn default() -> Self {
        Self::new()
    }
}
