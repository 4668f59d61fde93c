// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal alignment of visual lines.

use crate::config::AlignmentOptions;
use crate::line::Line;
use crate::style::Brush;
use crate::word::WordKind;
use crate::wrap::LineMetrics;

/// Alignment of the lines of a paragraph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Align content to the left edge.
    #[default]
    Left,
    /// Center each line.
    Middle,
    /// Align content to the right edge.
    Right,
    /// Justify each line by widening its spaces, except for the last line.
    ///
    /// Only the text after the last tab of a line is justified.
    Column,
    /// [`Alignment::Left`] for left-to-right text and [`Alignment::Right`] for right-to-left
    /// text.
    WriteDirection,
}

/// How to place one visual line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AlignPlan {
    /// The alignment actually applied, after resolving direction and column fallbacks.
    pub alignment: Alignment,
    /// Horizontal shift of the line origin from the left edge of the box.
    pub offset: f64,
    /// Extra advance added to every justified space character.
    pub word_spacing: f64,
    /// First character index that receives `word_spacing`.
    pub justify_from: usize,
    /// One past the last character index that receives `word_spacing`.
    pub justify_to: usize,
    /// Number of justified space characters.
    pub spaces: usize,
}

/// Computes the placement of visual line `metrics` of `line` in a box of `width`.
///
/// `is_last` marks the last visual line of the logical line, which column alignment leaves
/// start aligned.
pub fn plan<B: Brush>(
    line: &Line<B>,
    metrics: &LineMetrics,
    width: f64,
    alignment: Alignment,
    rtl: bool,
    is_last: bool,
    options: &AlignmentOptions,
) -> AlignPlan {
    let m = &metrics.measure;
    let (first_bearing, last_bearing) = if options.hang_bearings {
        (m.first_bearing, m.last_bearing)
    } else {
        (0.0, 0.0)
    };
    // Leading whitespace is content, trailing whitespace and break characters hang.
    let start_hang = first_bearing;
    let end_hang = m.trailing_whitespace + m.hanging + last_bearing;
    let (left_hang, right_hang) = if rtl {
        (end_hang, start_hang)
    } else {
        (start_hang, end_hang)
    };
    let total = m.width + m.hanging;
    let visible = total - left_hang - right_hang;
    let free = width - visible;
    let start = if rtl {
        Alignment::Right
    } else {
        Alignment::Left
    };

    let mut plan = AlignPlan {
        alignment: match alignment {
            Alignment::WriteDirection => start,
            other => other,
        },
        offset: 0.0,
        word_spacing: 0.0,
        justify_from: metrics.range.end,
        justify_to: metrics.range.end,
        spaces: 0,
    };

    if plan.alignment == Alignment::Column {
        let (from, to, spaces) = justified_spaces(line, metrics);
        if is_last || spaces == 0 || free <= 0.0 {
            plan.alignment = start;
        } else {
            plan.word_spacing = free / spaces as f64;
            plan.justify_from = from;
            plan.justify_to = to;
            plan.spaces = spaces;
        }
    }

    if !options.align_when_overflowing && free < 0.0 {
        plan.offset = -left_hang;
        if rtl {
            // Overflowing right-to-left lines keep their start edge in the box.
            plan.offset = width - total + right_hang;
        }
        log::trace!("line {:?} overflows by {}", metrics.range, -free);
        return plan;
    }

    plan.offset = match plan.alignment {
        Alignment::Right => free - left_hang,
        Alignment::Middle => free * 0.5 - left_hang,
        // Justified lines fill the box.
        Alignment::Left | Alignment::Column | Alignment::WriteDirection => -left_hang,
    };
    log::trace!("aligned {:?}: {:?}", metrics.range, plan);
    plan
}

/// Finds the interior spaces after the last tab of a visual line.
///
/// Returns the justified character range and the number of spaces in it.
fn justified_spaces<B: Brush>(line: &Line<B>, metrics: &LineMetrics) -> (usize, usize, usize) {
    let range = &metrics.range;
    let words = line.words();
    let in_range = words
        .iter()
        .filter(|w| w.end >= range.start && w.start < range.end);

    let mut from = range.start;
    let mut first_content = None;
    let mut last_content = None;
    for word in in_range {
        match word.kind {
            WordKind::Tab => from = word.end.min(range.end - 1) + 1,
            WordKind::Word | WordKind::Block => {
                first_content.get_or_insert(word.start.max(range.start));
                last_content = Some(word.end.min(range.end - 1));
            }
            WordKind::Space => {}
        }
    }
    let (Some(first), Some(last)) = (first_content, last_content) else {
        return (range.end, range.end, 0);
    };
    let from = from.max(first);
    if from > last {
        return (range.end, range.end, 0);
    }
    let spaces = words
        .iter()
        .filter(|w| w.kind == WordKind::Space && w.start >= from && w.end <= last)
        .map(|w| w.len())
        .sum();
    (from, last + 1, spaces)
}
