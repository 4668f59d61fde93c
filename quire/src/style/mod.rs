// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich styling support.

mod brush;

pub use brush::Brush;

use style_ranges::StylePayload;

use crate::font::{Font, FontMetrics};

/// Sparse font override attached to a span of a [`Line`](crate::Line).
///
/// Unset fields fall back to the [`TextState`] the line is measured and rendered with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontStyle {
    /// Font face override.
    pub font: Option<Font>,
    /// Font size override, in text space units.
    pub size: Option<f64>,
    /// Text rise override: vertical offset of the baseline.
    pub rise: Option<f64>,
}

/// A single field assignment on a [`FontStyle`].
///
/// `None` clears the override.
#[derive(Clone, Debug, PartialEq)]
pub enum FontProperty {
    /// Font face.
    Font(Option<Font>),
    /// Font size.
    Size(Option<f64>),
    /// Text rise.
    Rise(Option<f64>),
}

impl StylePayload for FontStyle {
    type Property = FontProperty;

    fn apply(&mut self, property: &FontProperty) {
        match property {
            FontProperty::Font(font) => self.font = font.clone(),
            FontProperty::Size(size) => self.size = *size,
            FontProperty::Rise(rise) => self.rise = *rise,
        }
    }
}

impl FontStyle {
    /// Resolves this override against the current text state.
    pub fn resolve(&self, state: &TextState) -> RunFont {
        let font = self.font.as_ref().unwrap_or(&state.font).clone();
        let metrics = font.metrics();
        RunFont {
            font,
            size: self.size.unwrap_or(state.size),
            rise: self.rise.unwrap_or(state.rise),
            metrics,
        }
    }
}

/// The font, size and rise in effect for one run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct RunFont {
    /// Font face.
    pub font: Font,
    /// Font size in text space units.
    pub size: f64,
    /// Text rise in text space units.
    pub rise: f64,
    /// Cached metrics of `font`.
    pub metrics: FontMetrics,
}

impl RunFont {
    /// Line height in text space, offset by the rise.
    ///
    /// This is what decides the dominant font of a line.
    pub fn height(&self) -> f64 {
        self.metrics.line_height * self.size / 1000.0 + self.rise
    }

    /// Scales a metric given in thousandths of an em by the font size.
    pub fn scale(&self, value: f64) -> f64 {
        value * self.size / 1000.0
    }
}

/// Text rendering mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Fill glyphs with the fill brush.
    #[default]
    Fill,
    /// Stroke glyph outlines with the stroke brush.
    Stroke,
    /// Fill, then stroke.
    FillStroke,
    /// Neither fill nor stroke; glyphs still advance.
    Invisible,
}

impl RenderMode {
    /// Returns `true` if glyphs are painted with the fill brush.
    pub fn fills(self) -> bool {
        matches!(self, Self::Fill | Self::FillStroke)
    }

    /// Returns `true` if glyphs are painted with the stroke brush.
    pub fn strokes(self) -> bool {
        matches!(self, Self::Stroke | Self::FillStroke)
    }
}

/// Underline thickness selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Underline {
    /// Use the position and thickness declared by the tallest font on the line.
    Font,
    /// Explicit thickness in text space units, at the font's declared position.
    Width(f64),
}

/// Sparse color and decoration override attached to a span of a [`Line`](crate::Line).
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStyle<B: Brush> {
    /// Fill brush override.
    pub fill: Option<B>,
    /// Stroke brush override.
    pub stroke: Option<B>,
    /// Underline override.
    pub underline: Option<Underline>,
    /// Render mode override.
    pub render_mode: Option<RenderMode>,
}

impl<B: Brush> Default for ColorStyle<B> {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            underline: None,
            render_mode: None,
        }
    }
}

/// A single field assignment on a [`ColorStyle`].
#[derive(Clone, Debug, PartialEq)]
pub enum ColorProperty<B: Brush> {
    /// Fill brush.
    Fill(Option<B>),
    /// Stroke brush.
    Stroke(Option<B>),
    /// Underline.
    Underline(Option<Underline>),
    /// Render mode.
    RenderMode(Option<RenderMode>),
}

impl<B: Brush> StylePayload for ColorStyle<B> {
    type Property = ColorProperty<B>;

    fn apply(&mut self, property: &ColorProperty<B>) {
        match property {
            ColorProperty::Fill(fill) => self.fill = fill.clone(),
            ColorProperty::Stroke(stroke) => self.stroke = stroke.clone(),
            ColorProperty::Underline(underline) => self.underline = *underline,
            ColorProperty::RenderMode(mode) => self.render_mode = *mode,
        }
    }
}

impl<B: Brush> ColorStyle<B> {
    /// Resolves this override against the paint state of the surrounding text.
    pub fn resolve(&self, base: &PaintState<B>) -> PaintState<B> {
        PaintState {
            fill: self.fill.clone().unwrap_or_else(|| base.fill.clone()),
            stroke: self.stroke.clone().unwrap_or_else(|| base.stroke.clone()),
            render_mode: self.render_mode.unwrap_or(base.render_mode),
            underline: self.underline.or(base.underline),
        }
    }
}

/// Paint parameters of the text being rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaintState<B: Brush> {
    /// Fill brush.
    pub fill: B,
    /// Stroke brush.
    pub stroke: B,
    /// Render mode.
    pub render_mode: RenderMode,
    /// Active underline, if any.
    pub underline: Option<Underline>,
}

/// The render-state snapshot lines are measured and rendered with.
///
/// Per-span [`FontStyle`] overrides replace `font`, `size` and `rise`; everything else applies
/// to the whole line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextState {
    /// Default font.
    pub font: Font,
    /// Default font size in text space units.
    pub size: f64,
    /// Extra advance added to every glyph (Tc).
    pub char_spacing: f64,
    /// Extra advance added to every ASCII space (Tw).
    pub word_spacing: f64,
    /// Horizontal scale applied to every advance (Th), `1.0` is 100%.
    pub horizontal_scale: f64,
    /// Whether pairwise kerning is applied.
    pub kerning: bool,
    /// Whether text runs right-to-left.
    pub rtl: bool,
    /// Default text rise.
    pub rise: f64,
}

impl TextState {
    /// Creates a left-to-right state with no extra spacing and kerning enabled.
    pub fn new(font: Font, size: f64) -> Self {
        Self {
            font,
            size,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            kerning: true,
            rtl: false,
            rise: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorProperty, ColorStyle, FontProperty, FontStyle, PaintState, RenderMode};
    use crate::testing::{mono_state, MonoFace};
    use crate::Font;
    use style_ranges::StylePayload;

    #[test]
    fn font_style_resolves_against_state() {
        let state = mono_state(10.0);
        let other = Font::new(MonoFace::new("F2"));
        let mut style = FontStyle::default();
        style.apply(&FontProperty::Size(Some(20.0)));
        let run = style.resolve(&state);
        assert_eq!(run.font, state.font);
        assert_eq!(run.size, 20.0);
        assert_eq!(run.rise, 0.0);

        style.apply(&FontProperty::Font(Some(other.clone())));
        style.apply(&FontProperty::Size(None));
        let run = style.resolve(&state);
        assert_eq!(run.font, other);
        assert_eq!(run.size, 10.0);
        assert!(!style.is_default());

        style.apply(&FontProperty::Font(None));
        assert!(style.is_default());
    }

    #[test]
    fn color_style_resolves_against_paint() {
        let base = PaintState::<u32> {
            fill: 1,
            stroke: 2,
            ..Default::default()
        };
        let mut style = ColorStyle::default();
        style.apply(&ColorProperty::Stroke(Some(7)));
        style.apply(&ColorProperty::RenderMode(Some(RenderMode::Stroke)));
        let paint = style.resolve(&base);
        assert_eq!(paint.fill, 1);
        assert_eq!(paint.stroke, 7);
        assert_eq!(paint.render_mode, RenderMode::Stroke);
        assert!(paint.render_mode.strokes());
        assert!(!paint.render_mode.fills());
    }
}
