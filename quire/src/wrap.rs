// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use crate::config::LayoutConfig;
use crate::error::Error;
use crate::line::Line;
use crate::measure::{advance_at, measure, LineMeasure};
use crate::style::{Brush, TextState};

/// Metrics of one visual line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineMetrics {
    /// Characters of the logical line covered by this visual line.
    pub range: Range<usize>,
    /// Advance width, as measured.
    pub width: f64,
    /// Distance from the previous baseline to this one.
    pub height: f64,
    /// Line height of the dominant font, without rise.
    pub font_height: f64,
    /// Cap height of the dominant font.
    pub cap_height: f64,
    /// Ascent of the dominant font.
    pub ascent: f64,
    /// Descent of the dominant font (negative).
    pub descent: f64,
    /// Highest ink extent relative to the baseline.
    pub y_max: f64,
    /// Lowest ink extent relative to the baseline.
    pub y_min: f64,
    /// The full measurement this line was built from.
    pub measure: LineMeasure,
}

impl LineMetrics {
    /// Derives visual line metrics from a measurement.
    pub fn new(measure: LineMeasure) -> Self {
        let font = &measure.font;
        let descent = font.scale(font.metrics.descent);
        let height = font.height().max(measure.y_max - measure.y_min.min(descent));
        Self {
            range: measure.range.clone(),
            width: measure.width,
            height,
            font_height: font.scale(font.metrics.line_height),
            cap_height: font.scale(font.metrics.cap_height),
            ascent: font.scale(font.metrics.ascent),
            descent,
            y_max: measure.y_max,
            y_min: measure.y_min,
            measure,
        }
    }
}

/// Partitions a [`Line`] into visual lines.
///
/// Every call to [`set_line_width`](Self::set_line_width) measures from where the previous
/// visual line ended and records one more [`LineMetrics`].
#[derive(Clone, Debug, Default)]
pub struct LineWrapper {
    lines: Vec<LineMetrics>,
    consumed: usize,
}

impl LineWrapper {
    /// Creates a wrapper with no visual lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// The visual lines produced so far.
    pub fn lines(&self) -> &[LineMetrics] {
        &self.lines
    }

    /// Number of characters covered by the visual lines produced so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Returns `true` once every character of `line` is covered.
    ///
    /// An empty line is done after producing one empty visual line.
    pub fn is_done<B: Brush>(&self, line: &Line<B>) -> bool {
        self.consumed >= line.len() && !self.lines.is_empty()
    }

    /// Breaks the next visual line of `line` at `width`.
    ///
    /// Returns `None` when the line is exhausted. Every produced visual line covers at least
    /// one character, except the single visual line of an empty line.
    pub fn set_line_width<B: Brush>(
        &mut self,
        line: &Line<B>,
        state: &TextState,
        config: &LayoutConfig,
        width: f64,
    ) -> Result<Option<&LineMetrics>, Error> {
        if self.is_done(line) {
            return Ok(None);
        }
        let mut m = measure(line, self.consumed.., state, config, width)?;
        if m.range.end <= self.consumed && self.consumed < line.len() {
            log::warn!("no progress wrapping at {}, taking one character", self.consumed);
            m = measure(line, self.consumed..=self.consumed, state, config, f64::INFINITY)?;
        }
        self.consumed = m.range.end;
        log::trace!(
            "visual line {} covers {:?}, width {}",
            self.lines.len(),
            m.range,
            m.width
        );
        self.lines.push(LineMetrics::new(m));
        Ok(self.lines.last())
    }

    /// Breaks all remaining visual lines of `line` at `width`.
    pub fn wrap_all<B: Brush>(
        &mut self,
        line: &Line<B>,
        state: &TextState,
        config: &LayoutConfig,
        width: f64,
    ) -> Result<&[LineMetrics], Error> {
        while self.set_line_width(line, state, config, width)?.is_some() {}
        Ok(&self.lines)
    }

    /// Measures visual line `index` again, over the same characters and without a width limit.
    ///
    /// Use this after changing parameters that do not affect the break points, such as
    /// character spacing. The line may no longer fit its original width. How the line was
    /// broken is kept: a hanging break character still hangs and an appended hyphen is still
    /// appended.
    pub fn remeasure<B: Brush>(
        &mut self,
        index: usize,
        line: &Line<B>,
        state: &TextState,
        config: &LayoutConfig,
    ) -> Result<(), Error> {
        let Some(current) = self.lines.get(index) else {
            return Err(Error::invalid_position(index, self.lines.len()));
        };
        let previous = &current.measure;
        let range = current.range.clone();
        let (hyphen, broke) = (previous.hyphen, previous.broke);
        let hangs = previous.hanging > 0.0 && !range.is_empty();
        let last = range.end.saturating_sub(1);

        let mut m = if hangs && range.len() > 1 {
            measure(line, range.start..last, state, config, f64::INFINITY)?
        } else {
            measure(line, range.clone(), state, config, f64::INFINITY)?
        };
        if hangs {
            let hanging = advance_at(line, last, line.chars()[last], state);
            if range.len() == 1 {
                m.width -= hanging;
            }
            m.hanging = hanging;
            m.range = range;
        }
        if let Some(ch) = hyphen {
            m.width += advance_at(line, last, ch, state);
            m.hyphen = Some(ch);
        }
        m.broke = broke;
        self.lines[index] = LineMetrics::new(m);
        Ok(())
    }

    /// Drops every visual line.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.consumed = 0;
    }
}
