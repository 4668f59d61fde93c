// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::block::BlockItem;

/// The kind of a [`Word`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WordKind {
    /// A maximal run of non-whitespace characters.
    Word,
    /// A run of one repeated whitespace character other than tab.
    Space,
    /// A run of tabs.
    Tab,
    /// A single inline block.
    Block,
}

/// Extra data attached to a [`Word`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum WordMeta {
    /// Nothing attached.
    #[default]
    None,
    /// The block item of a [`WordKind::Block`] word.
    Block(BlockItem),
    /// Precomputed advances for the tabs of a [`WordKind::Tab`] word, one per tab.
    ///
    /// Right-to-left column layout cannot compute tab stops while rendering since the line
    /// is laid out from its far end, so the advances found by the measurer are stored here.
    TabOffsets(SmallVec<[f64; 2]>),
}

/// A span of a line's text.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    /// First character index.
    pub start: usize,
    /// Last character index (inclusive).
    pub end: usize,
    /// Kind of span.
    pub kind: WordKind,
    /// Extra data.
    pub meta: WordMeta,
}

impl Word {
    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Always `false`: words are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` for spaces and tabs.
    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, WordKind::Space | WordKind::Tab)
    }

    /// Returns `true` if `index` lies inside this word.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// Whitespace that separates words.
///
/// No-break spaces glue words together and are measured like any other glyph.
pub(crate) fn is_break_space(ch: char) -> bool {
    ch.is_whitespace() && !matches!(ch, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Splits `text` into an ordered partition of [`Word`]s.
///
/// `blocks` lists the inline blocks of the line by character index, in ascending order.
pub fn segment(text: &[char], blocks: &[(usize, BlockItem)]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut blocks = blocks.iter().peekable();
    let mut i = 0;
    while i < text.len() {
        while blocks.next_if(|(pos, _)| *pos < i).is_some() {}
        if let Some((_, block)) = blocks.next_if(|(pos, _)| *pos == i) {
            words.push(Word {
                start: i,
                end: i,
                kind: WordKind::Block,
                meta: WordMeta::Block(*block),
            });
            i += 1;
            continue;
        }
        let ch = text[i];
        let next_block = blocks.peek().map_or(usize::MAX, |(pos, _)| *pos);
        let (kind, mut end) = if is_break_space(ch) {
            let kind = if ch == '\t' {
                WordKind::Tab
            } else {
                WordKind::Space
            };
            let mut end = i;
            while end + 1 < text.len() && end + 1 < next_block && text[end + 1] == ch {
                end += 1;
            }
            (kind, end)
        } else {
            let mut end = i;
            while end + 1 < text.len() && end + 1 < next_block && !is_break_space(text[end + 1])
            {
                end += 1;
            }
            (WordKind::Word, end)
        };
        end = end.min(text.len() - 1);
        words.push(Word {
            start: i,
            end,
            kind,
            meta: WordMeta::None,
        });
        i = end + 1;
    }
    words
}

/// Returns the index of the word containing `index`.
pub(crate) fn word_at(words: &[Word], index: usize) -> Option<usize> {
    let i = words.partition_point(|w| w.end < index);
    (i < words.len() && words[i].contains(index)).then_some(i)
}
