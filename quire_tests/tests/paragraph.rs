// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph editing and layout tests.

use quire::{
    BlockItem, ColorProperty, ErrorKind, FontProperty, Paragraph, ParagraphChange, Underline,
};

use crate::util::samples::LATIN;
use crate::util::{ColorBrush, TestEnv};
use crate::{assert_close, test_name};

fn styled() -> Paragraph<ColorBrush> {
    let mut paragraph = Paragraph::from_text("Styled text with a block");
    paragraph
        .set_font_style(0, 2..9, &[FontProperty::Size(Some(14.0))])
        .unwrap();
    paragraph
        .set_color_style(0, 5..14, &[ColorProperty::Underline(Some(Underline::Font))])
        .unwrap();
    paragraph
        .insert_block(0, 17, BlockItem::new(1, 1.0, 1.0))
        .unwrap();
    paragraph
}

#[test]
fn paragraph_split_then_join_restores_line() {
    let env = TestEnv::new(test_name!());
    let original = styled();
    let len = original.lines()[0].len();
    let expected = env.measure(&original.lines()[0], .., 60.0);
    for pos in 0..=len {
        let mut paragraph = original.clone();
        assert_eq!(
            paragraph.split_line(0, pos).unwrap(),
            ParagraphChange::Lines { first: 0, count: 2 }
        );
        assert_eq!(paragraph.len(), 2);
        assert_eq!(paragraph.lines()[0].len(), pos);
        paragraph.join_lines(0).unwrap();
        assert_eq!(paragraph, original, "split at {pos}");
        assert_eq!(env.measure(&paragraph.lines()[0], .., 60.0), expected);
    }
}

#[test]
fn paragraph_insert_text_splits_on_newlines() {
    let mut paragraph = Paragraph::<ColorBrush>::from_text("hello world");
    paragraph
        .set_font_style(0, 6..11, &[FontProperty::Size(Some(20.0))])
        .unwrap();
    let change = paragraph.insert_text(0, 5, ",\nbig").unwrap();
    assert_eq!(change, ParagraphChange::Lines { first: 0, count: 2 });
    let texts: Vec<_> = paragraph.lines().iter().map(|l| l.text()).collect();
    assert_eq!(texts, ["hello,", "big world"]);
    // The split off tail keeps its styles.
    let second = &paragraph.lines()[1];
    assert_eq!(second.font_style_at(4).and_then(|s| s.size), Some(20.0));
    assert_eq!(second.font_style_at(3), None);

    assert_eq!(
        paragraph.insert_text(1, 0, "a ").unwrap(),
        ParagraphChange::Text { line: 1 }
    );
    assert_eq!(paragraph.lines()[1].text(), "a big world");
}

#[test]
fn paragraph_edits_report_bad_positions() {
    let mut paragraph = Paragraph::<ColorBrush>::from_text("one\ntwo");
    assert_eq!(
        paragraph.insert_text(2, 0, "x").unwrap_err().kind(),
        ErrorKind::InvalidBounds
    );
    assert_eq!(
        paragraph.insert_text(0, 9, "x").unwrap_err().kind(),
        ErrorKind::InvalidBounds
    );
    assert_eq!(
        paragraph.join_lines(1).unwrap_err().kind(),
        ErrorKind::InvalidBounds
    );
    assert_eq!(
        paragraph.remove_text(1, 2..1).unwrap_err().kind(),
        ErrorKind::InvalidRange
    );
    paragraph.remove_text(1, 1..).unwrap();
    assert_eq!(paragraph.lines()[1].text(), "t");
}

#[test]
fn paragraph_layout_stacks_lines() {
    let mut env = TestEnv::new(test_name!());
    env.config.align.hang_bearings = false;
    let mut paragraph = Paragraph::<ColorBrush>::from_text(&format!("{LATIN}\n\n{LATIN}"));
    paragraph.first_line_indent = 20.0;
    let layout = env.layout(&mut paragraph, 60.0);

    // The indent only shortens the first visual line of the paragraph.
    assert_eq!(layout.lines[0].metrics.range, 0..4);
    assert_close!(layout.lines[0].x, 20.0);
    assert_close!(layout.lines[1].x, 0.0);
    let lines: Vec<_> = layout.lines.iter().map(|l| l.line).collect();
    assert_eq!(lines, [0, 0, 0, 1, 2, 2, 2]);

    for (i, laid) in layout.lines.iter().enumerate() {
        assert_close!(laid.baseline, -12.0 * (i + 1) as f64);
    }
    assert_close!(layout.height, 12.0 * 7.0);
    assert!(!layout.rtl);
}
