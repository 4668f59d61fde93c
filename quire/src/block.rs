// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The character standing in for a [`BlockItem`] in a line's text.
pub const BLOCK_PLACEHOLDER: char = '\u{FFFC}';

/// How an inline block sits relative to the text baseline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BlockAlignment {
    /// The bottom of the block rests on the baseline.
    #[default]
    Baseline,
    /// The bottom of the block rests on the font's descent line.
    Bottom,
}

/// A non-text object laid out inline with text
///
/// A block occupies exactly one character slot of its line, filled with
/// [`BLOCK_PLACEHOLDER`]. Its dimensions are in ems and scale with the font size in effect
/// at its position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockItem {
    /// User-specified identifier of the drawable, reported back in
    /// [`DrawCommand::DrawBlock`](crate::DrawCommand::DrawBlock).
    pub id: u64,
    /// The width of the block, in ems.
    pub width: f64,
    /// The height of the block, in ems.
    pub height: f64,
    /// Vertical placement of the block.
    pub alignment: BlockAlignment,
}

impl BlockItem {
    /// Creates a baseline aligned block.
    pub fn new(id: u64, width: f64, height: f64) -> Self {
        Self {
            id,
            width,
            height,
            alignment: BlockAlignment::Baseline,
        }
    }

    /// Returns the vertical extent `(y_min, y_max)` of the block at `size`, given the font
    /// descent in text space.
    pub fn extent(&self, size: f64, descent: f64) -> (f64, f64) {
        let height = self.height * size;
        match self.alignment {
            BlockAlignment::Baseline => (0.0, height),
            BlockAlignment::Bottom => (descent, height + descent),
        }
    }
}
