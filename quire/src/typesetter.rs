// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use crate::align::{plan, AlignPlan};
use crate::config::LayoutConfig;
use crate::error::Error;
use crate::paragraph::Paragraph;
use crate::render::{render_line, DrawCommand, TextRenderer};
use crate::style::{Brush, PaintState, TextState};
use crate::wrap::{LineMetrics, LineWrapper};

/// One placed visual line of a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutLine {
    /// Index of the logical line in the paragraph.
    pub line: usize,
    /// Measured metrics of the visual line.
    pub metrics: LineMetrics,
    /// Horizontal placement within the line's box.
    pub plan: AlignPlan,
    /// Left edge of the line's box, relative to the paragraph box.
    pub x: f64,
    /// Baseline position relative to the top of the paragraph box; negative values are below.
    pub baseline: f64,
}

/// The result of laying out a [`Paragraph`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphLayout {
    /// Visual lines in order.
    pub lines: Vec<LaidOutLine>,
    /// Total height of the visual lines.
    pub height: f64,
    /// Whether the paragraph was laid out right-to-left.
    pub rtl: bool,
    /// The box width the paragraph was laid out for.
    pub width: f64,
}

/// Draw commands of one visual line.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedLine<B: Brush> {
    /// Index of the logical line in the paragraph.
    pub line: usize,
    /// Characters of the logical line shown.
    pub range: Range<usize>,
    /// Commands, self contained: text state is emitted from scratch for every line.
    pub commands: Vec<DrawCommand<B>>,
}

/// Lays out and renders whole paragraphs with one [`LayoutConfig`].
#[derive(Clone, Debug, Default)]
pub struct Typesetter {
    config: LayoutConfig,
}

impl Typesetter {
    /// Creates a typesetter, checking `config` once.
    pub fn new(config: LayoutConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Wraps and aligns every line of `paragraph` in a box of `width`.
    ///
    /// The first visual line is shortened by the paragraph's first line indent. For
    /// right-to-left paragraphs the tab advances found while wrapping are stored on the lines,
    /// which is why the paragraph is borrowed mutably.
    pub fn layout<B: Brush>(
        &self,
        paragraph: &mut Paragraph<B>,
        state: &TextState,
        width: f64,
    ) -> Result<ParagraphLayout, Error> {
        let rtl = paragraph.is_rtl();
        let mut state = state.clone();
        state.rtl = rtl;
        self.config.validate_state(&state)?;

        let alignment = paragraph.alignment;
        let indent = paragraph.first_line_indent;
        let mut layout = ParagraphLayout {
            rtl,
            width,
            ..Default::default()
        };
        let mut y = 0.0;
        for (index, line) in paragraph.lines_mut().iter_mut().enumerate() {
            line.clear_tab_offsets();
            let mut wrapper = LineWrapper::new();
            loop {
                let first = index == 0 && wrapper.lines().is_empty();
                let line_width = if first { width - indent } else { width };
                if wrapper
                    .set_line_width(line, &state, &self.config, line_width)?
                    .is_none()
                {
                    break;
                }
            }
            if rtl {
                for metrics in wrapper.lines() {
                    line.store_tab_offsets(&metrics.measure);
                }
            }
            let count = wrapper.lines().len();
            for (visual, metrics) in wrapper.lines().iter().enumerate() {
                let first = index == 0 && visual == 0;
                let (x, box_width) = match (first, rtl) {
                    (true, false) => (indent, width - indent),
                    (true, true) => (0.0, width - indent),
                    (false, _) => (0.0, width),
                };
                let plan = plan(
                    line,
                    metrics,
                    box_width,
                    alignment,
                    rtl,
                    visual + 1 == count,
                    &self.config.align,
                );
                y -= metrics.height;
                layout.lines.push(LaidOutLine {
                    line: index,
                    metrics: metrics.clone(),
                    plan,
                    x,
                    baseline: y,
                });
            }
        }
        layout.height = -y;
        log::debug!(
            "laid out {} lines into {} visual lines, height {}",
            paragraph.len(),
            layout.lines.len(),
            layout.height
        );
        Ok(layout)
    }

    /// Renders a layout of `paragraph` at `origin`, the top left corner of its box.
    pub fn render<B: Brush>(
        &self,
        paragraph: &Paragraph<B>,
        layout: &ParagraphLayout,
        state: &TextState,
        paint: &PaintState<B>,
        origin: (f64, f64),
    ) -> Result<Vec<RenderedLine<B>>, Error> {
        let mut state = state.clone();
        state.rtl = layout.rtl;
        let mut rendered = Vec::with_capacity(layout.lines.len());
        for laid in &layout.lines {
            let Some(line) = paragraph.line(laid.line) else {
                return Err(Error::invalid_position(laid.line, paragraph.len()));
            };
            let mut commands = Vec::new();
            let mut renderer = TextRenderer::new(&mut commands, self.config.precision);
            render_line(
                &mut renderer,
                line,
                &laid.metrics,
                &laid.plan,
                &state,
                paint,
                &self.config,
                (origin.0 + laid.x, origin.1 + laid.baseline),
            )?;
            rendered.push(RenderedLine {
                line: laid.line,
                range: laid.metrics.range.clone(),
                commands,
            });
        }
        Ok(rendered)
    }
}
