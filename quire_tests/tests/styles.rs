// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style range tests.

use peniko::color::palette::css;
use quire::{ColorProperty, ColorStyle, FontProperty, FontStyle, Line, Underline};
use style_ranges::{StylePayload, StyleRanges};

use crate::util::{ColorBrush, TestEnv};
use crate::test_name;

/// A small deterministic generator, so failures reproduce.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn check_normalized<T: StylePayload>(spans: impl Iterator<Item = (usize, usize, T)>, name: &str) {
    let mut prev: Option<(usize, T)> = None;
    for (start, end, payload) in spans {
        assert!(start <= end, "{name}: inverted range {start}..={end}");
        assert!(!payload.is_default(), "{name}: default range {start}..={end}");
        if let Some((prev_end, prev_payload)) = prev {
            assert!(prev_end < start, "{name}: overlap at {start}");
            assert!(
                prev_end + 1 != start || prev_payload != payload,
                "{name}: unmerged ranges at {start}"
            );
        }
        prev = Some((end, payload));
    }
}

fn font_spans(line: &Line<ColorBrush>) -> impl Iterator<Item = (usize, usize, FontStyle)> + '_ {
    line.font_styles()
        .map(|span| (span.start, span.end, span.payload.clone()))
}

#[test]
fn styles_random_edits_match_dense_model() {
    let env = TestEnv::new(test_name!());
    let mut rng = XorShift(0x5eed_1234_abcd_0001);
    let mut line = Line::<ColorBrush>::new("The quick brown fox jumps over the lazy dog");
    let mut model = vec![FontStyle::default(); line.len()];

    for step in 0..500 {
        let len = line.len();
        match rng.below(4) {
            0 | 1 => {
                let start = rng.below(len + 1);
                let end = start + rng.below(len + 1 - start);
                let property = match rng.below(4) {
                    0 => FontProperty::Size(None),
                    1 => FontProperty::Size(Some(8.0 + rng.below(3) as f64)),
                    2 => FontProperty::Rise(None),
                    _ => FontProperty::Rise(Some(rng.below(2) as f64)),
                };
                line.set_font_style(start..end, &[property.clone()]).unwrap();
                for style in &mut model[start..end] {
                    style.apply(&property);
                }
            }
            2 => {
                let pos = rng.below(len + 1);
                let count = 1 + rng.below(3);
                line.insert(pos, &"x".repeat(count)).unwrap();
                // Insertions inherit the style of a range they land strictly inside of.
                let inherited = match (pos.checked_sub(1).map(|p| &model[p]), model.get(pos)) {
                    (Some(before), Some(after)) if before == after => after.clone(),
                    _ => FontStyle::default(),
                };
                model.splice(pos..pos, std::iter::repeat_n(inherited, count));
            }
            _ => {
                if len < 10 {
                    continue;
                }
                let start = rng.below(len);
                let end = start + rng.below((len - start).min(4));
                line.remove(start..end).unwrap();
                model.drain(start..end);
            }
        }

        let name = format!("{} step {step}", env.name());
        assert_eq!(line.len(), model.len(), "{name}");
        check_normalized(font_spans(&line), &name);
        for (i, expected) in model.iter().enumerate() {
            let actual = line.font_style_at(i).cloned().unwrap_or_default();
            assert_eq!(&actual, expected, "{name}: style at {i}");
        }
    }
}

#[test]
fn styles_color_overrides_are_sparse() {
    let red = ColorBrush::new(css::RED);
    let mut line = Line::<ColorBrush>::new("abcdefgh");
    line.set_color_style(2..6, &[ColorProperty::Fill(Some(red))])
        .unwrap();
    line.set_color_style(4..8, &[ColorProperty::Underline(Some(Underline::Font))])
        .unwrap();
    let spans: Vec<_> = line
        .color_styles()
        .map(|span| (span.start, span.end))
        .collect();
    assert_eq!(spans, [(2, 3), (4, 5), (6, 7)]);
    let overlap = line.color_style_at(5).unwrap();
    assert_eq!(overlap.fill, Some(red));
    assert_eq!(overlap.underline, Some(Underline::Font));

    // Clearing the fill on the first range leaves nothing to store there.
    line.set_color_style(0..4, &[ColorProperty::Fill(None)])
        .unwrap();
    assert_eq!(line.color_style_at(2), None);
    assert_eq!(line.color_style_at(0), None);
    assert_eq!(
        line.color_style_at(4),
        Some(&ColorStyle {
            fill: Some(red),
            underline: Some(Underline::Font),
            ..Default::default()
        })
    );
}

#[test]
fn styles_reapplying_merges_neighbors() {
    let mut ranges = StyleRanges::<FontStyle>::new();
    ranges.set(0, 3, &[FontProperty::Size(Some(12.0))]);
    ranges.set(8, 9, &[FontProperty::Size(Some(12.0))]);
    ranges.set(4, 7, &[FontProperty::Size(Some(12.0))]);
    assert_eq!(ranges.len(), 1);
    assert!(ranges.is_normalized());
    let span = ranges.span_at(5).unwrap();
    assert_eq!((span.start, span.end), (0, 9));
}

#[test]
fn styles_out_of_bounds_is_rejected() {
    let mut line = Line::<ColorBrush>::new("abc");
    let err = line
        .set_font_style(1..4, &[FontProperty::Size(Some(1.0))])
        .unwrap_err();
    assert_eq!(err.kind(), quire::ErrorKind::InvalidBounds);
    assert_eq!(line.font_styles().count(), 0);
}
