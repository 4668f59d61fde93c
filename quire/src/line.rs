// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::cell::OnceCell;
use core::ops::RangeBounds;

use smallvec::SmallVec;
use style_ranges::{Iter, StylePayload, StyleRanges};

use crate::block::{BlockItem, BLOCK_PLACEHOLDER};
use crate::error::Error;
use crate::measure::LineMeasure;
use crate::style::{Brush, ColorProperty, ColorStyle, FontProperty, FontStyle};
use crate::util::to_range;
use crate::word::{segment, Word, WordKind, WordMeta};

/// One logical line of styled text.
///
/// A line owns its characters, two sparse style range lists (fonts and colors) and the
/// inline blocks placed in it. All indices are character indices relative to this line.
///
/// The word list is computed lazily from the text and rebuilt after every text edit.
pub struct Line<B: Brush> {
    text: Vec<char>,
    words: OnceCell<Vec<Word>>,
    fonts: StyleRanges<FontStyle>,
    colors: StyleRanges<ColorStyle<B>>,
    /// Sorted by position.
    blocks: Vec<(usize, BlockItem)>,
}

impl<B: Brush> Clone for Line<B> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            words: self.words.clone(),
            fonts: self.fonts.clone(),
            colors: self.colors.clone(),
            blocks: self.blocks.clone(),
        }
    }
}

impl<B: Brush> PartialEq for Line<B> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.fonts == other.fonts
            && self.colors == other.colors
            && self.blocks == other.blocks
    }
}

impl<B: Brush> core::fmt::Debug for Line<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Line")
            .field("text", &self.text.iter().collect::<alloc::string::String>())
            .field("fonts", &self.fonts)
            .field("colors", &self.colors)
            .field("blocks", &self.blocks)
            .finish()
    }
}

impl<B: Brush> Default for Line<B> {
    fn default() -> Self {
        Self {
            text: Vec::new(),
            words: OnceCell::new(),
            fonts: StyleRanges::new(),
            colors: StyleRanges::new(),
            blocks: Vec::new(),
        }
    }
}

impl<B: Brush> Line<B> {
    /// Creates an unstyled line.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            ..Default::default()
        }
    }

    /// The characters of the line.
    pub fn chars(&self) -> &[char] {
        &self.text
    }

    /// The text of the line.
    pub fn text(&self) -> alloc::string::String {
        self.text.iter().collect()
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the line has no characters.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The words of the line, segmenting the text if needed.
    pub fn words(&self) -> &[Word] {
        self.words.get_or_init(|| segment(&self.text, &self.blocks))
    }

    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        if self.words.get().is_none() {
            self.words = OnceCell::from(segment(&self.text, &self.blocks));
        }
        self.words.get_mut().map_or(&mut [], |words| words.as_mut_slice())
    }

    fn invalidate(&mut self) {
        self.words = OnceCell::new();
    }

    /// The inline blocks of the line with their character positions, in order.
    pub fn blocks(&self) -> &[(usize, BlockItem)] {
        &self.blocks
    }

    /// The block at character `index`, if any.
    pub fn block_at(&self, index: usize) -> Option<&BlockItem> {
        self.blocks
            .binary_search_by_key(&index, |(pos, _)| *pos)
            .ok()
            .map(|i| &self.blocks[i].1)
    }

    /// Overrides font fields on the characters in `range`.
    pub fn set_font_style(
        &mut self,
        range: impl RangeBounds<usize>,
        properties: &[FontProperty],
    ) -> Result<(), Error> {
        let range = to_range(range, self.len());
        self.fonts.apply(range, self.text.len(), properties)?;
        Ok(())
    }

    /// Overrides color fields on the characters in `range`.
    pub fn set_color_style(
        &mut self,
        range: impl RangeBounds<usize>,
        properties: &[ColorProperty<B>],
    ) -> Result<(), Error> {
        let range = to_range(range, self.len());
        self.colors.apply(range, self.text.len(), properties)?;
        Ok(())
    }

    /// The font override at character `index`, if any.
    pub fn font_style_at(&self, index: usize) -> Option<&FontStyle> {
        self.fonts.get(index)
    }

    /// The color override at character `index`, if any.
    pub fn color_style_at(&self, index: usize) -> Option<&ColorStyle<B>> {
        self.colors.get(index)
    }

    /// Iterates over the font overrides.
    pub fn font_styles(&self) -> Iter<'_, FontStyle> {
        self.fonts.iter()
    }

    /// Iterates over the color overrides.
    pub fn color_styles(&self) -> Iter<'_, ColorStyle<B>> {
        self.colors.iter()
    }

    /// Removes every style override.
    pub fn clear_styles(&mut self) {
        self.fonts.clear();
        self.colors.clear();
    }

    /// Inserts `text` before character `pos`.
    ///
    /// Inserted characters take the style of the range they land inside of.
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<(), Error> {
        if pos > self.len() {
            return Err(Error::invalid_position(pos, self.len()));
        }
        let count = text.chars().count();
        self.text.splice(pos..pos, text.chars());
        self.shift(pos, count);
        Ok(())
    }

    /// Inserts an inline block before character `pos`.
    pub fn insert_block(&mut self, pos: usize, block: BlockItem) -> Result<(), Error> {
        if pos > self.len() {
            return Err(Error::invalid_position(pos, self.len()));
        }
        self.text.insert(pos, BLOCK_PLACEHOLDER);
        self.shift(pos, 1);
        let i = self.blocks.partition_point(|(p, _)| *p < pos);
        self.blocks.insert(i, (pos, block));
        Ok(())
    }

    fn shift(&mut self, pos: usize, count: usize) {
        self.fonts.insert_gap(pos, count);
        self.colors.insert_gap(pos, count);
        for (p, _) in &mut self.blocks {
            if *p >= pos {
                *p += count;
            }
        }
        self.invalidate();
    }

    /// Removes the characters in `range`, along with their blocks.
    pub fn remove(&mut self, range: impl RangeBounds<usize>) -> Result<(), Error> {
        let len = self.len();
        let range = to_range(range, len);
        if range.start > range.end {
            return Err(Error::invalid_range(range.start, range.end, len));
        }
        if range.end > len {
            return Err(Error::invalid_bounds(range.start, range.end, len));
        }
        if range.is_empty() {
            return Ok(());
        }
        let count = range.len();
        self.text.drain(range.clone());
        self.fonts.remove(range.start, range.end - 1);
        self.colors.remove(range.start, range.end - 1);
        self.blocks.retain(|(p, _)| !range.contains(p));
        for (p, _) in &mut self.blocks {
            if *p >= range.end {
                *p -= count;
            }
        }
        self.invalidate();
        Ok(())
    }

    /// Splits the line at character `pos`, returning everything from `pos` onwards.
    pub fn split_off(&mut self, pos: usize) -> Result<Self, Error> {
        if pos > self.len() {
            return Err(Error::invalid_position(pos, self.len()));
        }
        let text = self.text.split_off(pos);
        let fonts = self.fonts.split_off(pos);
        let colors = self.colors.split_off(pos);
        let split = self.blocks.partition_point(|(p, _)| *p < pos);
        let blocks = self
            .blocks
            .split_off(split)
            .into_iter()
            .map(|(p, block)| (p - pos, block))
            .collect();
        self.invalidate();
        Ok(Self {
            text,
            words: OnceCell::new(),
            fonts,
            colors,
            blocks,
        })
    }

    /// Appends `other` to the end of this line, merging equal styles at the seam.
    pub fn append(&mut self, other: &Self) {
        let offset = self.len();
        self.text.extend_from_slice(&other.text);
        self.fonts.append(&other.fonts, offset);
        self.colors.append(&other.colors, offset);
        self.blocks
            .extend(other.blocks.iter().map(|(p, block)| (p + offset, *block)));
        self.invalidate();
    }

    /// Stores the tab advances found by `measure` on the tab words they belong to.
    ///
    /// Right-to-left rendering replays these instead of computing tab stops.
    pub fn store_tab_offsets(&mut self, measure: &LineMeasure) {
        let advances = &measure.tab_advances;
        if advances.is_empty() {
            return;
        }
        for word in self.words_mut() {
            if word.kind != WordKind::Tab {
                continue;
            }
            let offsets: SmallVec<[f64; 2]> = advances
                .iter()
                .filter(|(index, _)| word.contains(*index))
                .map(|(_, advance)| *advance)
                .collect();
            if !offsets.is_empty() {
                word.meta = WordMeta::TabOffsets(offsets);
            }
        }
    }

    /// Forgets tab advances stored by [`store_tab_offsets`](Self::store_tab_offsets).
    ///
    /// Stored advances only hold for the width they were measured at.
    pub fn clear_tab_offsets(&mut self) {
        let Some(words) = self.words.get_mut() else {
            return;
        };
        for word in words.iter_mut() {
            if matches!(word.meta, WordMeta::TabOffsets(_)) {
                word.meta = WordMeta::None;
            }
        }
    }

    pub(crate) fn font_runs(&self, start: usize, end: usize) -> Vec<(usize, usize, FontStyle)> {
        runs(&self.fonts, start, end)
    }

    pub(crate) fn color_runs(
        &self,
        start: usize,
        end: usize,
    ) -> Vec<(usize, usize, ColorStyle<B>)> {
        runs(&self.colors, start, end)
    }
}

/// Partitions `start..=end` into runs of constant payload, filling gaps with the default.
fn runs<T: StylePayload>(
    ranges: &StyleRanges<T>,
    start: usize,
    end: usize,
) -> Vec<(usize, usize, T)> {
    let mut out = Vec::new();
    if start > end {
        return out;
    }
    let mut pos = start;
    for span in ranges.iter() {
        if span.end < pos {
            continue;
        }
        if span.start > end {
            break;
        }
        if span.start > pos {
            out.push((pos, span.start - 1, T::default()));
        }
        let run_end = span.end.min(end);
        out.push((pos.max(span.start), run_end, span.payload.clone()));
        pos = run_end + 1;
        if pos > end {
            return out;
        }
    }
    out.push((pos, end, T::default()));
    out
}
