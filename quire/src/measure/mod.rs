// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line measurement and break point selection.

mod glyph;

pub(crate) use glyph::{bearing, block_advance, glyph_advance, kerning, tab_advance};

use alloc::vec::Vec;
use core::ops::{Range, RangeBounds};

use smallvec::SmallVec;

use crate::config::LayoutConfig;
use crate::error::Error;
use crate::font::GlyphMetrics;
use crate::line::Line;
use crate::style::{Brush, RunFont, TextState};
use crate::util::{epsilon, to_range};
use crate::word::{Word, WordKind, WordMeta};

/// The result of measuring (part of) a line against a maximum width.
#[derive(Clone, Debug, PartialEq)]
pub struct LineMeasure {
    /// The characters that fit, including hanging whitespace and break characters.
    pub range: Range<usize>,
    /// Advance width of the measured characters, in text space.
    ///
    /// Includes leading and trailing whitespace and an appended hyphen, but not
    /// [`hanging`](Self::hanging).
    pub width: f64,
    /// Lowest ink extent relative to the baseline.
    pub y_min: f64,
    /// Highest ink extent relative to the baseline.
    pub y_max: f64,
    /// The font with the largest line height in the measured range.
    pub font: RunFont,
    /// Side bearing of the first glyph on its reading order start side, when the line starts
    /// with text.
    pub first_bearing: f64,
    /// Side bearing of the last visible glyph on its reading order end side.
    pub last_bearing: f64,
    /// Advance of the whitespace before the first visible unit.
    pub leading_whitespace: f64,
    /// Advance of the whitespace after the last visible unit.
    pub trailing_whitespace: f64,
    /// Advance of a break character that hangs past the end of the line.
    pub hanging: f64,
    /// Character to append after the last measured character.
    pub hyphen: Option<char>,
    /// Whether a break policy split a word to end this line.
    pub broke: bool,
    /// Advances of the measured tabs, by character index.
    pub tab_advances: SmallVec<[(usize, f64); 4]>,
}

impl LineMeasure {
    /// Index of the last character included, if any.
    pub fn last(&self) -> Option<usize> {
        (!self.range.is_empty()).then(|| self.range.end - 1)
    }

    /// Width of the visible content, without surrounding whitespace.
    pub fn content_width(&self) -> f64 {
        (self.width - self.leading_whitespace - self.trailing_whitespace).max(0.0)
    }
}

/// Minimum and maximum content widths of a line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContentWidths {
    /// The widest unbreakable unit.
    pub min: f64,
    /// The width of the line laid out without wrapping, trailing whitespace excluded.
    pub max: f64,
}

/// A glyph of a word, with the kerning against its predecessor folded into `advance`.
#[derive(Clone, Copy, Debug)]
struct Step {
    index: usize,
    advance: f64,
    glyph: GlyphMetrics,
    run: usize,
}

type Steps = SmallVec<[Step; 16]>;

enum Overflow {
    /// Keep the first `count` glyphs and end the line.
    Split {
        count: usize,
        hang: bool,
        hyphen: Option<(char, f64)>,
    },
    /// Keep the whole word even though it does not fit.
    Force,
    /// Leave the word for the next line.
    Defer,
}

struct Measurer<'a, B: Brush> {
    line: &'a Line<B>,
    state: &'a TextState,
    config: &'a LayoutConfig,
    runs: Vec<(usize, usize, RunFont)>,
    eps: f64,
}

impl<B: Brush> Measurer<'_, B> {
    fn run_index(&self, index: usize) -> usize {
        self.runs
            .partition_point(|(_, end, _)| *end < index)
            .min(self.runs.len().saturating_sub(1))
    }

    fn run(&self, index: usize) -> &RunFont {
        &self.runs[self.run_index(index)].2
    }

    fn steps(&self, start: usize, end: usize) -> Steps {
        let text = self.line.chars();
        let mut steps = Steps::new();
        let mut prev: Option<(GlyphMetrics, usize)> = None;
        for index in start..=end {
            let run = self.run_index(index);
            let font = &self.runs[run].2;
            let (glyph, mut advance) = glyph_advance(font, self.state, text[index]);
            if let Some((prev_glyph, prev_run)) = prev {
                if prev_run == run {
                    advance += kerning(font, self.state, prev_glyph.id, glyph.id);
                }
            }
            steps.push(Step {
                index,
                advance,
                glyph,
                run,
            });
            prev = Some((glyph, run));
        }
        steps
    }

    fn space_width(&self, start: usize, end: usize) -> f64 {
        let text = self.line.chars();
        let mut width = 0.0;
        let mut index = start;
        // Runs of one character can still straddle a font change.
        while index <= end {
            let run = self.run_index(index);
            let run_end = self.runs[run].1.min(end);
            let advance = glyph_advance(&self.runs[run].2, self.state, text[index]).1;
            width += advance * (run_end + 1 - index) as f64;
            index = run_end + 1;
        }
        width
    }

    fn overflow(&self, word: &Word, steps: &Steps, x: f64, max: f64, first: bool) -> Overflow {
        let limit = max + self.eps;
        let mut prefix = x;
        let mut fit = steps.len();
        for (i, step) in steps.iter().enumerate() {
            prefix += step.advance;
            if prefix > limit {
                fit = i;
                break;
            }
        }
        let breaks = &self.config.breaks;
        let text = self.line.chars();

        if let Some(ch) = breaks.simple_break {
            let last = fit.min(steps.len() - 1);
            if let Some(i) = (0..=last).rev().find(|&i| text[steps[i].index] == ch) {
                log::debug!(
                    "break after {:?} at {} in word {}..={}",
                    ch,
                    steps[i].index,
                    word.start,
                    word.end
                );
                return Overflow::Split {
                    count: i,
                    hang: true,
                    hyphen: None,
                };
            }
        }

        if let Some(wb) = breaks.break_word {
            if steps.len() >= wb.min_length.max(2) {
                let mut split = (steps.len() / 2).min(fit);
                if first {
                    split = split.max(1);
                }
                for count in [split, split.saturating_sub(1)] {
                    if count == 0 || count >= steps.len() {
                        continue;
                    }
                    let hyphen = wb.hyphen.map(|h| {
                        let run = &self.runs[steps[count - 1].run].2;
                        (h, glyph_advance(run, self.state, h).1)
                    });
                    let width: f64 = steps[..count].iter().map(|s| s.advance).sum::<f64>()
                        + hyphen.map_or(0.0, |(_, w)| w);
                    if x + width <= limit {
                        log::debug!(
                            "split word {}..={} after {} characters",
                            word.start,
                            word.end,
                            count
                        );
                        return Overflow::Split {
                            count,
                            hang: false,
                            hyphen,
                        };
                    }
                }
            }
        }

        if first {
            log::trace!("forcing overflowing word {}..={}", word.start, word.end);
            Overflow::Force
        } else {
            log::trace!("deferring word {}..={}", word.start, word.end);
            Overflow::Defer
        }
    }
}

/// Measures the characters of `line` in `range` against `max_length`.
///
/// Measurement stops before the first word that does not fit, unless a break policy of
/// `config` splits it. The first word of the line is never rejected. Whitespace never
/// overflows: it hangs past the end of the line and is reported as trailing whitespace.
///
/// Pass [`f64::INFINITY`] to measure the whole range.
pub fn measure<B: Brush>(
    line: &Line<B>,
    range: impl RangeBounds<usize>,
    state: &TextState,
    config: &LayoutConfig,
    max_length: f64,
) -> Result<LineMeasure, Error> {
    config.validate_state(state)?;
    let len = line.len();
    let range = to_range(range, len);
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, len));
    }
    if range.end > len {
        return Err(Error::invalid_bounds(range.start, range.end, len));
    }

    let mut runs: Vec<(usize, usize, RunFont)> = if range.is_empty() {
        Vec::new()
    } else {
        line.font_runs(range.start, range.end - 1)
            .into_iter()
            .map(|(start, end, style)| (start, end, style.resolve(state)))
            .collect()
    };
    if runs.is_empty() {
        let at = range.start.min(len.saturating_sub(1));
        let style = line.font_style_at(at).cloned().unwrap_or_default();
        runs.push((range.start, range.start, style.resolve(state)));
    }
    let measurer = Measurer {
        line,
        state,
        config,
        runs,
        eps: epsilon(config.precision),
    };

    let mut out = LineMeasure {
        range: range.start..range.start,
        width: 0.0,
        y_min: 0.0,
        y_max: 0.0,
        font: measurer.runs[0].2.clone(),
        first_bearing: 0.0,
        last_bearing: 0.0,
        leading_whitespace: 0.0,
        trailing_whitespace: 0.0,
        hanging: 0.0,
        hyphen: None,
        broke: false,
        tab_advances: SmallVec::new(),
    };

    let words = line.words();
    let first_word = words.partition_point(|w| w.end < range.start);
    let mut x = 0.0;
    let mut content = false;
    let mut extent: Option<(f64, f64)> = None;
    let mut whitespace = 0.0;
    let mut end = range.start;

    'words: for word in &words[first_word..] {
        if word.start >= range.end {
            break;
        }
        let start = word.start.max(range.start);
        let stop = word.end.min(range.end - 1);
        match word.kind {
            WordKind::Space => {
                let w = measurer.space_width(start, stop);
                x += w;
                whitespace += w;
            }
            WordKind::Tab => {
                let offsets = match &word.meta {
                    WordMeta::TabOffsets(offsets)
                        if state.rtl && offsets.len() == word.len() =>
                    {
                        Some(offsets)
                    }
                    _ => None,
                };
                for index in start..=stop {
                    let w = match offsets {
                        Some(offsets) => offsets[index - word.start],
                        None => tab_advance(measurer.run(index), state, config, x),
                    };
                    out.tab_advances.push((index, w));
                    x += w;
                    whitespace += w;
                }
            }
            WordKind::Block => {
                let WordMeta::Block(block) = &word.meta else {
                    continue;
                };
                let run = measurer.run(start);
                let w = block_advance(run, state, block.width);
                if content && x + w > max_length + measurer.eps {
                    log::trace!("deferring block at {start}");
                    break;
                }
                let (lo, hi) = block.extent(run.size, run.scale(run.metrics.descent));
                extent = Some(union(extent, lo, hi));
                if !content {
                    out.leading_whitespace = whitespace;
                    out.first_bearing = 0.0;
                }
                content = true;
                whitespace = 0.0;
                out.last_bearing = 0.0;
                x += w;
            }
            WordKind::Word => {
                let steps = measurer.steps(start, stop);
                let w: f64 = steps.iter().map(|s| s.advance).sum();
                let mut count = steps.len();
                let mut last = false;
                if x + w > max_length + measurer.eps {
                    match measurer.overflow(word, &steps, x, max_length, !content) {
                        Overflow::Force => {}
                        Overflow::Defer => break 'words,
                        Overflow::Split {
                            count: keep,
                            hang,
                            hyphen,
                        } => {
                            count = keep;
                            last = true;
                            out.broke = true;
                            if hang {
                                out.hanging = steps[keep].advance;
                                end = steps[keep].index + 1;
                            }
                            if let Some((ch, w)) = hyphen {
                                out.hyphen = Some(ch);
                                x += w;
                            }
                        }
                    }
                }
                let kept = &steps[..count];
                if let (Some(head), Some(tail)) = (kept.first(), kept.last()) {
                    // Bearings are taken on the reading order edges of the line.
                    let (head_side, tail_side) = if state.rtl {
                        (head.glyph.rsb, tail.glyph.lsb)
                    } else {
                        (head.glyph.lsb, tail.glyph.rsb)
                    };
                    if !content {
                        out.leading_whitespace = whitespace;
                        out.first_bearing = bearing(&measurer.runs[head.run].2, state, head_side);
                    }
                    content = true;
                    whitespace = 0.0;
                    out.last_bearing = bearing(&measurer.runs[tail.run].2, state, tail_side);
                    for step in kept {
                        let run = &measurer.runs[step.run].2;
                        extent = Some(union(
                            extent,
                            run.scale(step.glyph.y_min) + run.rise,
                            run.scale(step.glyph.y_max) + run.rise,
                        ));
                        x += step.advance;
                    }
                    end = end.max(tail.index + 1);
                }
                if last {
                    break;
                }
                continue;
            }
        }
        end = stop + 1;
    }

    if content {
        out.trailing_whitespace = whitespace;
    } else {
        out.leading_whitespace = whitespace;
    }
    out.range = range.start..end.max(range.start);
    out.width = x;
    if let Some((lo, hi)) = extent {
        out.y_min = lo;
        out.y_max = hi;
    }
    if let Some(font) = measurer
        .runs
        .iter()
        .filter(|(start, stop, _)| *start < out.range.end && *stop >= out.range.start)
        .map(|(_, _, font)| font)
        .reduce(|best, font| if font.height() > best.height() { font } else { best })
    {
        out.font = font.clone();
    }
    log::trace!(
        "measured {:?} of {:?}: width {} (max {})",
        out.range,
        range,
        out.width,
        max_length
    );
    Ok(out)
}

fn union(extent: Option<(f64, f64)>, lo: f64, hi: f64) -> (f64, f64) {
    match extent {
        Some((a, b)) => (a.min(lo), b.max(hi)),
        None => (lo, hi),
    }
}

/// Computes the minimum and maximum content widths of `line`.
pub fn content_widths<B: Brush>(
    line: &Line<B>,
    state: &TextState,
    config: &LayoutConfig,
) -> Result<ContentWidths, Error> {
    let full = measure(line, .., state, config, f64::INFINITY)?;
    let mut min: f64 = 0.0;
    for word in line.words() {
        if matches!(word.kind, WordKind::Word | WordKind::Block) {
            let unit = measure(line, word.start..=word.end, state, config, f64::INFINITY)?;
            min = min.max(unit.width);
        }
    }
    Ok(ContentWidths {
        min,
        max: full.width - full.trailing_whitespace,
    })
}

/// Advance of `ch` shown in the font of character `index` of `line`.
pub(crate) fn advance_at<B: Brush>(
    line: &Line<B>,
    index: usize,
    ch: char,
    state: &TextState,
) -> f64 {
    line.font_runs(index, index)
        .first()
        .map_or(0.0, |(_, _, style)| glyph_advance(&style.resolve(state), state, ch).1)
}
