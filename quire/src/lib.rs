// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quire turns styled Unicode lines into positioned glyph-run drawing instructions.
//!
//! The pipeline, leaf first:
//!
//! - a [`Line`] owns its text, sparse [`FontStyle`] and [`ColorStyle`] overrides and inline
//!   [`BlockItem`]s, and lazily splits its text into [`Word`]s;
//! - [`measure`](measure::measure) walks those words against a [`TextState`] and the
//!   glyph metrics of each [`Font`] and decides where the line has to break;
//! - a [`LineWrapper`] measures repeatedly to partition a line into visual lines;
//! - [`plan`](align::plan) computes the alignment of one visual line;
//! - [`render_line`](render::render_line) replays the plan through a [`TextRenderer`] that
//!   emits a minimal sequence of [`DrawCommand`]s.
//!
//! [`Typesetter`] ties these together for a whole [`Paragraph`].
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library.
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("quire requires either the `std` or `libm` feature to be enabled");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use core_maths as _;

extern crate alloc;

mod block;
mod config;
mod error;
mod font;
mod line;
mod paragraph;
mod typesetter;
mod util;
mod word;
mod wrap;

pub mod align;
pub mod measure;
pub mod render;
pub mod style;

#[cfg(test)]
mod testing;

pub use block::{BlockAlignment, BlockItem, BLOCK_PLACEHOLDER};
pub use config::{AlignmentOptions, BreakOptions, LayoutConfig, SpaceAdjust, TabMode, WordBreak};
pub use error::{Error, ErrorKind};
pub use font::{Font, FontFace, FontMetrics, GlyphId, GlyphMetrics};
pub use line::Line;
pub use paragraph::{Paragraph, ParagraphChange, WriteDirection};
pub use typesetter::{LaidOutLine, ParagraphLayout, RenderedLine, Typesetter};
pub use word::{segment, Word, WordKind, WordMeta};
pub use wrap::{LineMetrics, LineWrapper};

pub use align::{AlignPlan, Alignment};
pub use measure::{ContentWidths, LineMeasure};
pub use render::{DrawCommand, DrawSink, TextItem, TextRenderer};
pub use style::{
    Brush, ColorProperty, ColorStyle, FontProperty, FontStyle, PaintState, RenderMode, TextState,
    Underline,
};
