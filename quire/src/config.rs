// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::error::Error;
use crate::style::TextState;

/// How tab characters advance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TabMode {
    /// Advance to the next multiple of [`LayoutConfig::tab_stop`] from the line start.
    #[default]
    Stops,
    /// Advance by the width of one space glyph per tab.
    AsSpaces,
}

/// How column justification widens spaces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SpaceAdjust {
    /// Raise the word spacing (Tw) for the justified part of the line.
    ///
    /// Word spacing only applies to U+0020, other spaces are widened by explicit moves.
    #[default]
    WordSpacing,
    /// Move the text position after every space character.
    Positioned,
}

/// Splitting of words that do not fit on a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WordBreak {
    /// Words shorter than this many characters are never split.
    pub min_length: usize,
    /// Character appended after the first part of a split word.
    pub hyphen: Option<char>,
}

impl Default for WordBreak {
    fn default() -> Self {
        Self {
            min_length: 8,
            hyphen: Some('-'),
        }
    }
}

/// Line breaking policies applied when a word overflows.
///
/// Both policies are off by default, deferring overflowing words to the next line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BreakOptions {
    /// Break after the last occurrence of this character inside an overflowing word.
    pub simple_break: Option<char>,
    /// Split overflowing words near their middle.
    pub break_word: Option<WordBreak>,
}

/// Additional options to fine tune alignment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AlignmentOptions {
    /// If set to `true`, lines wider than the target width are still aligned, which may
    /// move them left of the origin.
    pub align_when_overflowing: bool,
    /// If set to `true`, the side bearings of the first and last glyph hang outside the
    /// alignment box, aligning ink rather than advances.
    pub hang_bearings: bool,
}

impl Default for AlignmentOptions {
    fn default() -> Self {
        Self {
            align_when_overflowing: false,
            hang_bearings: true,
        }
    }
}

/// Configuration shared by measurement, wrapping and rendering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Distance between tab stops in text space units.
    pub tab_stop: f64,
    /// Tab handling.
    pub tab_mode: TabMode,
    /// Space widening strategy for column justification.
    pub space_adjust: SpaceAdjust,
    /// Decimal digits of emitted numbers.
    pub precision: u8,
    /// Line breaking policies.
    pub breaks: BreakOptions,
    /// Alignment options.
    pub align: AlignmentOptions,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tab_stop: 36.0,
            tab_mode: TabMode::Stops,
            space_adjust: SpaceAdjust::WordSpacing,
            precision: 3,
            breaks: BreakOptions::default(),
            align: AlignmentOptions::default(),
        }
    }
}

impl LayoutConfig {
    /// Checks that the configuration can be used.
    ///
    /// Fails with [`ErrorKind::InvalidTabStop`](crate::ErrorKind::InvalidTabStop) if tab stops
    /// are enabled with a tab stop length that is not strictly positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tab_mode == TabMode::Stops && !(self.tab_stop.is_finite() && self.tab_stop > 0.0)
        {
            return Err(Error::invalid_tab_stop(self.tab_stop));
        }
        Ok(())
    }

    /// Checks that `state` can be measured and rendered with this configuration.
    pub fn validate_state(&self, state: &TextState) -> Result<(), Error> {
        self.validate()?;
        let scale = state.horizontal_scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::unsupported("non-positive horizontal scale", scale));
        }
        if !(state.size.is_finite() && state.size > 0.0) {
            return Err(Error::unsupported("non-positive font size", state.size));
        }
        Ok(())
    }
}
