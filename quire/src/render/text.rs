// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use smallvec::SmallVec;

use super::command::{DrawCommand, DrawSink, TextItem};
use crate::style::{Brush, PaintState, RenderMode, RunFont, Underline};
use crate::util::{epsilon, nearly_eq, nearly_zero, truncate};

#[derive(Clone, Debug)]
struct OpenUnderline<B: Brush> {
    style: Underline,
    color: B,
    start: f64,
    min_length: f64,
    thickness: f64,
    position: f64,
}

/// The text rendering state machine.
///
/// Glyphs are collected into runs and shown with as few commands as possible: moves between
/// glyphs are folded into positioned shows, and font, rise, spacing and color commands are
/// only emitted when the requested value differs from the last emitted one.
///
/// Positions are tracked along the current line, starting at `0.0` on
/// [`begin_line`](Self::begin_line).
pub struct TextRenderer<'a, B: Brush, S: DrawSink<B>> {
    sink: &'a mut S,
    precision: u8,
    eps: f64,
    font: Option<RunFont>,
    rise: f64,
    mode: RenderMode,
    fill: Option<B>,
    stroke: Option<B>,
    char_spacing: f64,
    word_spacing: f64,
    horizontal_scale: f64,
    line_width: Option<f64>,
    run: String,
    items: SmallVec<[TextItem; 4]>,
    pending: f64,
    deferred_bearing: f64,
    x: f64,
    origin: (f64, f64),
    underline: Option<OpenUnderline<B>>,
    tallest: Option<RunFont>,
}

impl<'a, B: Brush, S: DrawSink<B>> TextRenderer<'a, B, S> {
    /// Creates a renderer emitting numbers with `precision` decimal digits into `sink`.
    ///
    /// The emitted state starts at the text object defaults: no font, no rise, fill mode,
    /// no spacing and a 100% horizontal scale.
    pub fn new(sink: &'a mut S, precision: u8) -> Self {
        Self {
            sink,
            precision,
            eps: epsilon(precision),
            font: None,
            rise: 0.0,
            mode: RenderMode::Fill,
            fill: None,
            stroke: None,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            line_width: None,
            run: String::new(),
            items: SmallVec::new(),
            pending: 0.0,
            deferred_bearing: 0.0,
            x: 0.0,
            origin: (0.0, 0.0),
            underline: None,
            tallest: None,
        }
    }

    /// The pen position along the current line, including pending moves.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns `true` if an underline is open.
    pub fn is_underlining(&self) -> bool {
        self.underline.is_some()
    }

    /// Starts a new line at `(x, y)`, relative to the text object origin.
    pub fn begin_line(&mut self, x: f64, y: f64) {
        self.end_line();
        let (dx, dy) = (x - self.origin.0, y - self.origin.1);
        if !nearly_zero(dx, self.eps) || !nearly_zero(dy, self.eps) {
            self.sink.push(DrawCommand::MoveText { x: dx, y: dy });
        }
        self.origin = (x, y);
        self.x = 0.0;
        self.pending = 0.0;
        self.deferred_bearing = 0.0;
    }

    /// Flushes the current run and closes any open underline.
    pub fn end_line(&mut self) {
        self.close();
        self.close_underline();
        self.tallest = None;
    }

    /// Shows `ch`, which advances the pen by `width`.
    pub fn add(&mut self, ch: char, width: f64) {
        if !nearly_zero(self.deferred_bearing, self.eps) {
            let bearing = core::mem::take(&mut self.deferred_bearing);
            self.move_by(bearing);
        }
        self.flush_pending();
        self.run.push(ch);
        self.x += width;
    }

    /// Turns the pending displacement into a position adjustment.
    ///
    /// Adjustments are truncated to the output precision and the remainder stays pending, so
    /// displacements below the precision never produce a command.
    fn flush_pending(&mut self) {
        if nearly_zero(self.pending, self.eps) {
            return;
        }
        let Some(font) = &self.font else {
            return;
        };
        let unit = font.size * self.horizontal_scale;
        let adjust = truncate(-self.pending * 1000.0 / unit, self.precision);
        if adjust == 0.0 {
            return;
        }
        self.append();
        self.items.push(TextItem::Adjust(adjust));
        self.pending += adjust * unit / 1000.0;
    }

    /// Closes the open glyph run into the pending item list.
    pub fn append(&mut self) {
        if !self.run.is_empty() {
            self.items
                .push(TextItem::Text(core::mem::take(&mut self.run)));
        }
    }

    /// Emits the pending items as one show command.
    pub fn close(&mut self) {
        self.append();
        if self.items.is_empty() {
            return;
        }
        let command = match self.items.as_slice() {
            [TextItem::Text(text)] => DrawCommand::ShowText(text.clone()),
            _ => DrawCommand::ShowPositioned(self.items.to_vec()),
        };
        self.items.clear();
        self.sink.push(command);
    }

    /// Selects the font of `run`, flushing the current run if it changes.
    pub fn set_font(&mut self, run: &RunFont) {
        let same = self
            .font
            .as_ref()
            .is_some_and(|f| f.font == run.font && nearly_eq(f.size, run.size, self.eps));
        if !same {
            self.close();
            self.sink.push(DrawCommand::SetFont {
                font: run.font.clone(),
                size: run.size,
            });
            self.font = Some(run.clone());
        }
        self.set_rise(run.rise);
        if self.tallest.as_ref().is_none_or(|t| run.height() > t.height()) {
            self.tallest = Some(run.clone());
        }
        if !nearly_zero(self.deferred_bearing, self.eps) {
            let bearing = core::mem::take(&mut self.deferred_bearing);
            self.move_by(bearing);
        }
    }

    /// Sets the text rise, flushing the current run if it changes.
    pub fn set_rise(&mut self, rise: f64) {
        if !nearly_eq(rise, self.rise, self.eps) {
            self.close();
            self.sink.push(DrawCommand::SetRise(rise));
            self.rise = rise;
        }
    }

    /// Moves the pen by `distance` before the next glyph.
    pub fn move_by(&mut self, distance: f64) {
        self.pending += distance;
        self.x += distance;
    }

    /// Applies a kerning adjustment between two glyphs of the current run.
    pub fn kern(&mut self, distance: f64) {
        self.move_by(distance);
    }

    /// Records a side bearing correction to apply once the next font is selected.
    pub fn defer_bearing(&mut self, distance: f64) {
        self.deferred_bearing += distance;
    }

    /// Sets the character spacing (Tc).
    pub fn set_char_spacing(&mut self, value: f64) {
        if !nearly_eq(value, self.char_spacing, self.eps) {
            self.close();
            self.sink.push(DrawCommand::SetCharSpacing(value));
            self.char_spacing = value;
        }
    }

    /// Sets the word spacing (Tw).
    pub fn set_word_spacing(&mut self, value: f64) {
        if !nearly_eq(value, self.word_spacing, self.eps) {
            self.close();
            self.sink.push(DrawCommand::SetWordSpacing(value));
            self.word_spacing = value;
        }
    }

    /// Sets the horizontal scale (Th).
    pub fn set_horizontal_scale(&mut self, value: f64) {
        if !nearly_eq(value, self.horizontal_scale, self.eps) {
            self.close();
            self.sink.push(DrawCommand::SetHorizontalScale(value));
            self.horizontal_scale = value;
        }
    }

    /// Applies the paint state of the next glyphs.
    ///
    /// An open underline is closed when its style, color or the render mode changes, or when
    /// text becomes invisible. A new underline takes its thickness from the tallest font seen
    /// on the line so far and keeps it until closed.
    pub fn set_state(&mut self, paint: &PaintState<B>) {
        if self.underline.is_some() && !self.continues_underline(paint) {
            self.close_underline();
        }
        if paint.render_mode != self.mode {
            self.close();
            self.sink.push(DrawCommand::SetRenderMode(paint.render_mode));
            self.mode = paint.render_mode;
        }
        if paint.render_mode.fills() && self.fill.as_ref() != Some(&paint.fill) {
            self.close();
            self.sink.push(DrawCommand::SetFillColor(paint.fill.clone()));
            self.fill = Some(paint.fill.clone());
        }
        if paint.render_mode.strokes() && self.stroke.as_ref() != Some(&paint.stroke) {
            self.close();
            self.sink
                .push(DrawCommand::SetStrokeColor(paint.stroke.clone()));
            self.stroke = Some(paint.stroke.clone());
        }
        if let (None, Some(style)) = (&self.underline, paint.underline) {
            if paint.render_mode != RenderMode::Invisible {
                self.open_underline(style, paint.fill.clone());
            }
        }
    }

    /// Returns `true` if glyphs painted with `paint` would continue the open underline.
    pub fn continues_underline(&self, paint: &PaintState<B>) -> bool {
        self.underline.as_ref().is_some_and(|open| {
            paint.underline == Some(open.style)
                && paint.fill == open.color
                && paint.render_mode == self.mode
                && paint.render_mode != RenderMode::Invisible
        })
    }

    fn open_underline(&mut self, style: Underline, color: B) {
        let Some(font) = self.tallest.as_ref().or(self.font.as_ref()) else {
            return;
        };
        let thickness = match style {
            Underline::Font => font.scale(font.metrics.underline_thickness),
            Underline::Width(width) => width,
        };
        log::trace!("open underline at {} with thickness {}", self.x, thickness);
        self.underline = Some(OpenUnderline {
            style,
            color,
            start: self.x,
            min_length: 0.0,
            thickness,
            position: font.scale(font.metrics.underline_position),
        });
    }

    /// Ensures an open underline extends at least `length` past the pen position.
    ///
    /// Used for trailing blanks that are not shown.
    pub fn extend_underline(&mut self, length: f64) {
        let x = self.x;
        if let Some(open) = &mut self.underline {
            open.min_length = open.min_length.max(x + length - open.start);
        }
    }

    /// Strokes the open underline, if any.
    pub fn close_underline(&mut self) {
        let Some(open) = self.underline.take() else {
            return;
        };
        let length = (self.x - open.start).max(open.min_length).max(0.0);
        if nearly_zero(length, self.eps) {
            return;
        }
        self.close();
        if self.line_width.is_none_or(|w| !nearly_eq(w, open.thickness, self.eps)) {
            self.sink.push(DrawCommand::SetLineWidth(open.thickness));
            self.line_width = Some(open.thickness);
        }
        if self.stroke.as_ref() != Some(&open.color) {
            self.sink.push(DrawCommand::SetStrokeColor(open.color.clone()));
            self.stroke = Some(open.color);
        }
        let x = self.origin.0 + open.start;
        let y = self.origin.1 + open.position;
        self.sink.push(DrawCommand::MoveTo { x, y });
        self.sink.push(DrawCommand::LineTo { x: x + length, y });
        self.sink.push(DrawCommand::Stroke);
    }

    /// Draws an inline block at the pen position and advances past it.
    pub fn draw_block(&mut self, id: u64, width: f64, height: f64, y: f64) {
        self.close();
        self.sink.push(DrawCommand::DrawBlock {
            id,
            x: self.origin.0 + self.x,
            y: self.origin.1 + y,
            width,
            height,
        });
        self.move_by(width);
    }
}
