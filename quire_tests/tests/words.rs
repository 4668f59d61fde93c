// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word segmentation tests.

use quire::{segment, BlockItem, Line, WordKind, WordMeta, BLOCK_PLACEHOLDER};

use crate::util::samples::{TextSamples, HEBREW, LATIN, ROW, SPACED};
use crate::util::ColorBrush;

fn assert_partition(text: &str) {
    let chars: Vec<char> = text.chars().collect();
    let words = segment(&chars, &[]);
    let mut next = 0;
    let mut rebuilt = String::new();
    for word in &words {
        assert_eq!(word.start, next, "{text:?}: gap before {word:?}");
        assert!(word.start <= word.end, "{text:?}: empty word {word:?}");
        let slice = &chars[word.start..=word.end];
        match word.kind {
            WordKind::Space | WordKind::Tab => {
                assert!(
                    slice.iter().all(|c| *c == slice[0]),
                    "{text:?}: mixed whitespace run {word:?}"
                );
            }
            WordKind::Word => {
                assert!(
                    slice.iter().all(|c| *c != ' ' && *c != '\t'),
                    "{text:?}: word with breaking whitespace {word:?}"
                );
            }
            WordKind::Block => unreachable!("no blocks were placed"),
        }
        rebuilt.extend(slice);
        next = word.end + 1;
    }
    assert_eq!(next, chars.len(), "{text:?}: words do not cover the text");
    assert_eq!(rebuilt, text);
}

#[test]
fn words_partition_samples() {
    for text in [LATIN, SPACED, ROW, HEBREW, "", " ", "  a  b\t\tc ", "a \u{3000}b"] {
        assert_partition(text);
    }
    for sample in TextSamples::new().all() {
        for line in sample.text.split('\n') {
            assert_partition(line);
        }
    }
}

#[test]
fn words_whitespace_runs_split_by_character() {
    let line = Line::<ColorBrush>::new("a  \t\tb");
    let kinds: Vec<_> = line
        .words()
        .iter()
        .map(|w| (w.start, w.end, w.kind))
        .collect();
    assert_eq!(
        kinds,
        [
            (0, 0, WordKind::Word),
            (1, 2, WordKind::Space),
            (3, 4, WordKind::Tab),
            (5, 5, WordKind::Word),
        ]
    );
}

#[test]
fn words_no_break_space_joins() {
    let line = Line::<ColorBrush>::new("10\u{A0}kg and 5\u{202F}%");
    let words: Vec<_> = line
        .words()
        .iter()
        .filter(|w| w.kind == WordKind::Word)
        .map(|w| (w.start, w.end))
        .collect();
    assert_eq!(words, [(0, 4), (6, 8), (10, 12)]);
}

#[test]
fn words_blocks_stand_alone() {
    let mut line = Line::<ColorBrush>::new("ab");
    let block = BlockItem::new(7, 1.0, 1.0);
    line.insert_block(1, block).unwrap();
    assert_eq!(line.chars()[1], BLOCK_PLACEHOLDER);
    let words = line.words();
    assert_eq!(words.len(), 3);
    assert_eq!(words[1].kind, WordKind::Block);
    assert_eq!(words[1].meta, WordMeta::Block(block));
    assert_eq!((words[2].start, words[2].end), (2, 2));
}

#[test]
fn words_follow_edits() {
    let mut line = Line::<ColorBrush>::new("one two");
    assert_eq!(line.words().len(), 3);
    line.insert(3, " and").unwrap();
    assert_eq!(line.text(), "one and two");
    assert_eq!(line.words().len(), 5);
    line.remove(3..).unwrap();
    assert_eq!(line.words().len(), 1);
}
