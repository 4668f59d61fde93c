// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal interpreter for draw commands that tracks where each glyph lands.

use peniko::Color;
use quire::{DrawCommand, Font, TextItem};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColorBrush {
    pub(crate) color: Color,
}

impl ColorBrush {
    pub(crate) fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for ColorBrush {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
        }
    }
}

/// A glyph placed by [`replay`], with its pen position before and after.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Placed {
    pub(crate) ch: char,
    pub(crate) x: f64,
    pub(crate) end: f64,
    pub(crate) y: f64,
}

#[derive(Default)]
struct Pen {
    line: (f64, f64),
    x: f64,
    font: Option<(Font, f64)>,
    char_spacing: f64,
    word_spacing: f64,
    horizontal_scale: f64,
}

impl Pen {
    fn show(&mut self, text: &str, out: &mut Vec<Placed>) {
        let Some((font, size)) = &self.font else {
            panic!("text shown without a font");
        };
        for ch in text.chars() {
            let advance = font.face().glyph(ch).advance * size / 1000.0;
            let spacing = if ch == ' ' { self.word_spacing } else { 0.0 };
            let end = self.x + (advance + self.char_spacing + spacing) * self.horizontal_scale;
            out.push(Placed {
                ch,
                x: self.x,
                end,
                y: self.line.1,
            });
            self.x = end;
        }
    }

    fn adjust(&mut self, value: f64) {
        let size = self.font.as_ref().map_or(0.0, |(_, size)| *size);
        self.x -= value * size * self.horizontal_scale / 1000.0;
    }
}

/// Replays text commands and returns every shown glyph in drawing order.
///
/// Kerning is not applied implicitly, so the result matches what a page renderer would draw.
pub(crate) fn replay<B: quire::Brush>(commands: &[DrawCommand<B>]) -> Vec<Placed> {
    let mut pen = Pen {
        horizontal_scale: 1.0,
        ..Default::default()
    };
    let mut out = Vec::new();
    for command in commands {
        match command {
            DrawCommand::MoveText { x, y } => {
                pen.line = (pen.line.0 + x, pen.line.1 + y);
                pen.x = pen.line.0;
            }
            DrawCommand::SetFont { font, size } => pen.font = Some((font.clone(), *size)),
            DrawCommand::SetCharSpacing(v) => pen.char_spacing = *v,
            DrawCommand::SetWordSpacing(v) => pen.word_spacing = *v,
            DrawCommand::SetHorizontalScale(v) => pen.horizontal_scale = *v,
            DrawCommand::ShowText(text) => pen.show(text, &mut out),
            DrawCommand::ShowPositioned(items) => {
                for item in items {
                    match item {
                        TextItem::Text(text) => pen.show(text, &mut out),
                        TextItem::Adjust(value) => pen.adjust(*value),
                    }
                }
            }
            _ => {}
        }
    }
    out
}

/// Concatenates the text of every show command.
pub(crate) fn shown_text<B: quire::Brush>(commands: &[DrawCommand<B>]) -> String {
    let mut text = String::new();
    for command in commands {
        match command {
            DrawCommand::ShowText(s) => text.push_str(s),
            DrawCommand::ShowPositioned(items) => {
                for item in items {
                    if let TextItem::Text(s) = item {
                        text.push_str(s);
                    }
                }
            }
            _ => {}
        }
    }
    text
}
