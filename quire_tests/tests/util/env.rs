// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::RangeBounds;

use quire::measure::measure;
use quire::{
    LayoutConfig, Line, LineMeasure, LineMetrics, LineWrapper, PaintState, Paragraph,
    ParagraphLayout, RenderedLine, TextState, Typesetter,
};

use super::ColorBrush;

/// Shared state of one test: a text state using the mono test font at size 10, black paint
/// and the default configuration.
///
/// Failures are reported with the test name.
pub(crate) struct TestEnv {
    name: &'static str,
    pub(crate) state: TextState,
    pub(crate) paint: PaintState<ColorBrush>,
    pub(crate) config: LayoutConfig,
}

impl TestEnv {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            state: quire_dev::mono_state(10.0),
            paint: PaintState::default(),
            config: LayoutConfig::default(),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn typesetter(&self) -> Typesetter {
        Typesetter::new(self.config)
            .unwrap_or_else(|e| panic!("{}: invalid configuration: {e}", self.name))
    }

    pub(crate) fn measure(
        &self,
        line: &Line<ColorBrush>,
        range: impl RangeBounds<usize>,
        max_length: f64,
    ) -> LineMeasure {
        measure(line, range, &self.state, &self.config, max_length)
            .unwrap_or_else(|e| panic!("{}: measuring failed: {e}", self.name))
    }

    pub(crate) fn wrap(&self, line: &Line<ColorBrush>, width: f64) -> Vec<LineMetrics> {
        let mut wrapper = LineWrapper::new();
        wrapper
            .wrap_all(line, &self.state, &self.config, width)
            .unwrap_or_else(|e| panic!("{}: wrapping failed: {e}", self.name))
            .to_vec()
    }

    pub(crate) fn layout(
        &self,
        paragraph: &mut Paragraph<ColorBrush>,
        width: f64,
    ) -> ParagraphLayout {
        self.typesetter()
            .layout(paragraph, &self.state, width)
            .unwrap_or_else(|e| panic!("{}: layout failed: {e}", self.name))
    }

    /// Lays out `paragraph` in a box of `width` at the origin and renders it.
    pub(crate) fn render(
        &self,
        paragraph: &mut Paragraph<ColorBrush>,
        width: f64,
    ) -> Vec<RenderedLine<ColorBrush>> {
        let layout = self.layout(paragraph, width);
        self.typesetter()
            .render(paragraph, &layout, &self.state, &self.paint, (0.0, 0.0))
            .unwrap_or_else(|e| panic!("{}: rendering failed: {e}", self.name))
    }
}
