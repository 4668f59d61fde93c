// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use crate::font::Font;
use crate::style::{Brush, RenderMode};

/// An element of a positioned text show.
#[derive(Clone, Debug, PartialEq)]
pub enum TextItem {
    /// A string of glyphs shown with their natural advances.
    Text(String),
    /// A position adjustment in thousandths of an em, subtracted from the pen position.
    ///
    /// Negative values move the next glyph right.
    Adjust(f64),
}

/// A drawing instruction for the page serializer.
///
/// Text commands follow text-object semantics: [`DrawCommand::MoveText`] moves the start of
/// the current line relative to the start of the previous one and shown text advances the
/// pen. Path and block coordinates are absolute.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand<B: Brush> {
    /// Move to the start of a new line, relative to the start of the previous line.
    MoveText {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
    /// Select a font and size.
    SetFont {
        /// Font handle.
        font: Font,
        /// Font size.
        size: f64,
    },
    /// Set the text rise.
    SetRise(f64),
    /// Set the text render mode.
    SetRenderMode(RenderMode),
    /// Set the fill brush.
    SetFillColor(B),
    /// Set the stroke brush.
    SetStrokeColor(B),
    /// Set the character spacing (Tc).
    SetCharSpacing(f64),
    /// Set the word spacing (Tw).
    SetWordSpacing(f64),
    /// Set the horizontal scale (Th), `1.0` is 100%.
    SetHorizontalScale(f64),
    /// Show a plain string.
    ShowText(String),
    /// Show strings interleaved with position adjustments.
    ShowPositioned(Vec<TextItem>),
    /// Set the stroke width of paths.
    SetLineWidth(f64),
    /// Begin a path.
    MoveTo {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Add a straight segment to the path.
    LineTo {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Stroke the current path.
    Stroke,
    /// Draw an inline block with its bottom left corner at `(x, y)`.
    DrawBlock {
        /// The block's user identifier.
        id: u64,
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
        /// Width in text space.
        width: f64,
        /// Height in text space.
        height: f64,
    },
}

/// Receiver of [`DrawCommand`]s.
pub trait DrawSink<B: Brush> {
    /// Accepts the next command.
    fn push(&mut self, command: DrawCommand<B>);
}

impl<B: Brush> DrawSink<B> for Vec<DrawCommand<B>> {
    fn push(&mut self, command: DrawCommand<B>) {
        Vec::push(self, command);
    }
}
