// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::RangeBounds;

use unicode_bidi::Direction;

use crate::align::Alignment;
use crate::block::BlockItem;
use crate::error::Error;
use crate::line::Line;
use crate::style::{Brush, ColorProperty, FontProperty};

/// The dominant direction of a paragraph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WriteDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
    /// Taken from the first strong directional character of the text, left-to-right if there
    /// is none.
    Auto,
}

/// Describes what a paragraph mutation touched, so that callers can invalidate layouts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParagraphChange {
    /// The text of one line changed.
    Text {
        /// Index of the changed line.
        line: usize,
    },
    /// Only the styles of one line changed.
    Style {
        /// Index of the changed line.
        line: usize,
    },
    /// Lines were added, removed or split; `count` lines from `first` on are new or changed and
    /// every later line moved.
    Lines {
        /// Index of the first affected line.
        first: usize,
        /// Number of lines now in the affected span.
        count: usize,
    },
}

/// An ordered sequence of [`Line`]s with shared alignment settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph<B: Brush> {
    lines: Vec<Line<B>>,
    /// Alignment of every visual line.
    pub alignment: Alignment,
    /// Indentation of the first visual line, on the starting side.
    pub first_line_indent: f64,
    /// Dominant direction.
    pub direction: WriteDirection,
}

impl<B: Brush> Default for Paragraph<B> {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            alignment: Alignment::default(),
            first_line_indent: 0.0,
            direction: WriteDirection::default(),
        }
    }
}

impl<B: Brush> Paragraph<B> {
    /// Creates an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a paragraph with one unstyled line per `\n` separated segment of `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text
                .split('\n')
                .map(|l| Line::new(l.strip_suffix('\r').unwrap_or(l)))
                .collect(),
            ..Default::default()
        }
    }

    /// The lines of the paragraph.
    pub fn lines(&self) -> &[Line<B>] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [Line<B>] {
        &mut self.lines
    }

    /// Line `index`, if it exists.
    pub fn line(&self, index: usize) -> Option<&Line<B>> {
        self.lines.get(index)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the paragraph has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Resolves the write direction.
    pub fn is_rtl(&self) -> bool {
        match self.direction {
            WriteDirection::Ltr => false,
            WriteDirection::Rtl => true,
            WriteDirection::Auto => {
                // Lines without strong characters defer to the next one.
                for line in &self.lines {
                    match unicode_bidi::get_base_direction(line.text().as_str()) {
                        Direction::Ltr => return false,
                        Direction::Rtl => return true,
                        Direction::Mixed => {}
                    }
                }
                false
            }
        }
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut Line<B>, Error> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or_else(|| Error::invalid_position(index, len))
    }

    /// Appends a line.
    pub fn push_line(&mut self, line: Line<B>) -> ParagraphChange {
        self.lines.push(line);
        ParagraphChange::Lines {
            first: self.lines.len() - 1,
            count: 1,
        }
    }

    /// Inserts `text` in line `line` before character `pos`.
    ///
    /// Newlines in `text` split the line.
    pub fn insert_text(
        &mut self,
        line: usize,
        pos: usize,
        text: &str,
    ) -> Result<ParagraphChange, Error> {
        let target = self.line_mut(line)?;
        if pos > target.len() {
            return Err(Error::invalid_position(pos, target.len()));
        }
        if !text.contains('\n') {
            target.insert(pos, text)?;
            return Ok(ParagraphChange::Text { line });
        }
        let tail = target.split_off(pos)?;
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            let end = target.len();
            target.insert(end, first)?;
        }
        let mut new_lines: Vec<Line<B>> = segments.map(Line::new).collect();
        // The split off text keeps its styles.
        if let Some(last) = new_lines.last_mut() {
            last.append(&tail);
        }
        let count = new_lines.len() + 1;
        let at = line + 1;
        self.lines.splice(at..at, new_lines);
        Ok(ParagraphChange::Lines { first: line, count })
    }

    /// Removes the characters in `range` from line `line`.
    pub fn remove_text(
        &mut self,
        line: usize,
        range: impl RangeBounds<usize>,
    ) -> Result<ParagraphChange, Error> {
        self.line_mut(line)?.remove(range)?;
        Ok(ParagraphChange::Text { line })
    }

    /// Inserts an inline block in line `line` before character `pos`.
    pub fn insert_block(
        &mut self,
        line: usize,
        pos: usize,
        block: BlockItem,
    ) -> Result<ParagraphChange, Error> {
        self.line_mut(line)?.insert_block(pos, block)?;
        Ok(ParagraphChange::Text { line })
    }

    /// Overrides font fields on characters of line `line`.
    pub fn set_font_style(
        &mut self,
        line: usize,
        range: impl RangeBounds<usize>,
        properties: &[FontProperty],
    ) -> Result<ParagraphChange, Error> {
        self.line_mut(line)?.set_font_style(range, properties)?;
        Ok(ParagraphChange::Style { line })
    }

    /// Overrides color fields on characters of line `line`.
    pub fn set_color_style(
        &mut self,
        line: usize,
        range: impl RangeBounds<usize>,
        properties: &[ColorProperty<B>],
    ) -> Result<ParagraphChange, Error> {
        self.line_mut(line)?.set_color_style(range, properties)?;
        Ok(ParagraphChange::Style { line })
    }

    /// Splits line `line` at character `pos` into two lines.
    pub fn split_line(&mut self, line: usize, pos: usize) -> Result<ParagraphChange, Error> {
        let tail = self.line_mut(line)?.split_off(pos)?;
        self.lines.insert(line + 1, tail);
        Ok(ParagraphChange::Lines {
            first: line,
            count: 2,
        })
    }

    /// Appends line `line + 1` to line `line`.
    pub fn join_lines(&mut self, line: usize) -> Result<ParagraphChange, Error> {
        if line + 1 >= self.lines.len() {
            return Err(Error::invalid_position(line + 1, self.lines.len()));
        }
        let next = self.lines.remove(line + 1);
        self.lines[line].append(&next);
        Ok(ParagraphChange::Lines {
            first: line,
            count: 1,
        })
    }
}
