// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replaying measured lines into draw commands.

mod command;
mod text;

pub use command::{DrawCommand, DrawSink, TextItem};
pub use text::TextRenderer;

use alloc::vec::Vec;

use crate::align::AlignPlan;
use crate::block::BlockItem;
use crate::config::{LayoutConfig, SpaceAdjust};
use crate::error::Error;
use crate::font::GlyphId;
use crate::line::Line;
use crate::measure::{block_advance, glyph_advance, kerning, tab_advance};
use crate::style::{Brush, ColorStyle, PaintState, RunFont, TextState};
use crate::word::{WordKind, WordMeta};
use crate::wrap::LineMetrics;

#[derive(Clone, Copy, Debug)]
enum Unit {
    /// A shown glyph; `word` is the index of its word for kerning.
    Glyph {
        index: usize,
        ch: char,
        word: usize,
        space: bool,
    },
    /// Whitespace outside the visible content, never shown.
    Blank { index: usize, ch: char },
    Tab { index: usize, advance: Option<f64> },
    Block { index: usize, block: BlockItem },
    Hyphen { index: usize, ch: char },
}

impl Unit {
    fn index(&self) -> usize {
        match *self {
            Self::Glyph { index, .. }
            | Self::Blank { index, .. }
            | Self::Tab { index, .. }
            | Self::Block { index, .. }
            | Self::Hyphen { index, .. } => index,
        }
    }
}

/// Lists the units of a visual line in logical order.
fn units<B: Brush>(line: &Line<B>, metrics: &LineMetrics, rtl: bool) -> Vec<Unit> {
    let range = &metrics.range;
    let m = &metrics.measure;
    let text = line.chars();
    let mut out = Vec::with_capacity(range.len() + 1);
    if range.is_empty() {
        return out;
    }
    let words = line.words();
    let content = |kind: WordKind| matches!(kind, WordKind::Word | WordKind::Block);
    let first_content = words
        .iter()
        .find(|w| content(w.kind) && w.end >= range.start && w.start < range.end)
        .map(|w| w.start.max(range.start));
    let last_content = words
        .iter()
        .rev()
        .find(|w| content(w.kind) && w.end >= range.start && w.start < range.end)
        .map(|w| w.end.min(range.end - 1));

    for (word_index, word) in words.iter().enumerate() {
        if word.end < range.start {
            continue;
        }
        if word.start >= range.end {
            break;
        }
        let start = word.start.max(range.start);
        let stop = word.end.min(range.end - 1);
        for index in start..=stop {
            let ch = text[index];
            let unit = match word.kind {
                WordKind::Word => Unit::Glyph {
                    index,
                    ch,
                    word: word_index,
                    space: false,
                },
                WordKind::Space => {
                    let inside = first_content.is_some_and(|f| index > f)
                        && last_content.is_some_and(|l| index < l);
                    if inside {
                        Unit::Glyph {
                            index,
                            ch,
                            word: word_index,
                            space: true,
                        }
                    } else {
                        Unit::Blank { index, ch }
                    }
                }
                WordKind::Tab => {
                    let stored = match &word.meta {
                        WordMeta::TabOffsets(offsets) if rtl && offsets.len() == word.len() => {
                            Some(offsets[index - word.start])
                        }
                        _ => None,
                    };
                    let advance = stored.or_else(|| {
                        m.tab_advances
                            .iter()
                            .find(|(i, _)| *i == index)
                            .map(|(_, advance)| *advance)
                    });
                    Unit::Tab { index, advance }
                }
                WordKind::Block => match &word.meta {
                    WordMeta::Block(block) => Unit::Block {
                        index,
                        block: *block,
                    },
                    _ => Unit::Glyph {
                        index,
                        ch,
                        word: word_index,
                        space: false,
                    },
                },
            };
            out.push(unit);
        }
    }
    if let Some(ch) = m.hyphen {
        out.push(Unit::Hyphen {
            index: range.end - 1,
            ch,
        });
    }
    out
}

fn paint_at<B: Brush>(
    colors: &[(usize, usize, ColorStyle<B>)],
    paint: &PaintState<B>,
    index: usize,
) -> PaintState<B> {
    colors
        .get(colors.partition_point(|(_, end, _)| *end < index))
        .map_or_else(|| paint.clone(), |(_, _, style)| style.resolve(paint))
}

fn run_at(runs: &[(usize, usize, RunFont)], index: usize) -> usize {
    runs.partition_point(|(_, end, _)| *end < index)
        .min(runs.len().saturating_sub(1))
}

/// Renders one visual line of `line` through `renderer`.
///
/// `origin` is the left end of the line's baseline in the box, `plan` its alignment. Glyph
/// advances are computed again from `state`, so spacing changed after measuring is honored.
pub fn render_line<B: Brush, S: DrawSink<B>>(
    renderer: &mut TextRenderer<'_, B, S>,
    line: &Line<B>,
    metrics: &LineMetrics,
    plan: &AlignPlan,
    state: &TextState,
    paint: &PaintState<B>,
    config: &LayoutConfig,
    origin: (f64, f64),
) -> Result<(), Error> {
    config.validate_state(state)?;
    let scale = state.horizontal_scale;
    let justify = plan.spaces > 0 && plan.word_spacing != 0.0;
    if justify && state.rtl && config.space_adjust == SpaceAdjust::Positioned && scale != 1.0 {
        return Err(Error::unsupported(
            "positioned justification of scaled right-to-left text",
            scale,
        ));
    }

    let range = metrics.range.clone();
    let mut units = units(line, metrics, state.rtl);
    if state.rtl {
        units.reverse();
    }
    let fonts: Vec<_> = if range.is_empty() {
        Vec::new()
    } else {
        line.font_runs(range.start, range.end - 1)
            .into_iter()
            .map(|(start, end, style)| (start, end, style.resolve(state)))
            .collect()
    };
    let colors = if range.is_empty() {
        Vec::new()
    } else {
        line.color_runs(range.start, range.end - 1)
    };

    renderer.begin_line(origin.0 + plan.offset, origin.1);
    renderer.set_char_spacing(state.char_spacing);
    renderer.set_horizontal_scale(scale);

    let visible_end = units
        .iter()
        .rposition(|u| !matches!(u, Unit::Blank { .. }))
        .map_or(0, |i| i + 1);
    let mut local = state.clone();
    let mut prev: Option<(GlyphId, usize, usize)> = None;
    let mut tail = 0.0;
    let mut extending = true;
    let mut color = usize::MAX;

    for (position, unit) in units.iter().enumerate() {
        let index = unit.index();
        let run_index = run_at(&fonts, index);
        let Some((_, _, run)) = fonts.get(run_index) else {
            break;
        };
        let in_region = justify && (plan.justify_from..plan.justify_to).contains(&index);
        local.word_spacing = state.word_spacing;
        if in_region && config.space_adjust == SpaceAdjust::WordSpacing {
            local.word_spacing += plan.word_spacing / scale;
        }

        if let Unit::Blank { ch, .. } = *unit {
            prev = None;
            let width = glyph_advance(run, state, ch).1;
            if position < visible_end {
                renderer.move_by(width);
            } else if extending && renderer.continues_underline(&paint_at(&colors, paint, index)) {
                tail += width;
            } else {
                extending = false;
            }
            continue;
        }

        renderer.set_font(run);
        let color_index = colors.partition_point(|(_, end, _)| *end < index);
        if color_index != color {
            color = color_index;
            renderer.set_state(&paint_at(&colors, paint, index));
        }

        match *unit {
            Unit::Tab { advance, .. } => {
                prev = None;
                let advance =
                    advance.unwrap_or_else(|| tab_advance(run, state, config, renderer.x()));
                renderer.move_by(advance);
                continue;
            }
            Unit::Block { block, .. } => {
                prev = None;
                let width = block_advance(run, state, block.width);
                let (y_min, y_max) = block.extent(run.size, run.scale(run.metrics.descent));
                renderer.draw_block(block.id, width, y_max - y_min, y_min);
                continue;
            }
            _ => {}
        }

        renderer.set_word_spacing(local.word_spacing);

        match *unit {
            Unit::Glyph {
                ch, word, space, ..
            } => {
                let (glyph, advance) = glyph_advance(run, &local, ch);
                if let Some((prev_id, prev_word, prev_run)) = prev {
                    if prev_word == word && prev_run == run_index {
                        let k = if state.rtl {
                            kerning(run, state, glyph.id, prev_id)
                        } else {
                            kerning(run, state, prev_id, glyph.id)
                        };
                        renderer.kern(k);
                    }
                }
                renderer.add(ch, advance);
                // Word spacing only widens U+0020, other spaces need explicit moves.
                if in_region
                    && space
                    && (ch != ' ' || config.space_adjust == SpaceAdjust::Positioned)
                {
                    renderer.move_by(plan.word_spacing);
                }
                prev = (!space).then_some((glyph.id, word, run_index));
            }
            Unit::Hyphen { ch, .. } => {
                prev = None;
                let advance = glyph_advance(run, &local, ch).1;
                renderer.add(ch, advance);
            }
            _ => {}
        }
    }
    if tail > 0.0 {
        renderer.extend_underline(tail);
    }
    renderer.end_line();
    log::trace!("rendered {:?} at {:?}", range, origin);
    Ok(())
}
