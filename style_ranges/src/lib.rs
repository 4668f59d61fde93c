// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style Ranges is a small crate for attaching sparse style overrides to spans of text.
//!
//! A [`StyleRanges`] list holds sorted, non-overlapping ranges of character indices, each
//! carrying a payload implementing [`StylePayload`]. The list is an override of whatever the
//! caller treats as the default style: ranges whose payload is the default are pruned, and
//! adjacent contiguous ranges with equal payloads are merged after every mutation.
//!
//! Ranges are stored in an arena and linked by index, so cloning a list is a plain copy of
//! its nodes.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use style_ranges::{StylePayload, StyleRanges};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Bold(bool);
//!
//! impl StylePayload for Bold {
//!     type Property = bool;
//!
//!     fn apply(&mut self, property: &bool) {
//!         self.0 = *property;
//!     }
//! }
//!
//! let mut ranges = StyleRanges::<Bold>::new();
//! ranges.set(2, 5, &[true]);
//! ranges.set(6, 8, &[true]);
//! // Contiguous ranges with equal payloads are merged.
//! assert_eq!(ranges.len(), 1);
//! assert_eq!(ranges.get(7), Some(&Bold(true)));
//! assert_eq!(ranges.get(9), None);
//! ```
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
#![no_std]

extern crate alloc;

mod error;
mod payload;
mod ranges;

pub use crate::error::{Error, ErrorKind};
pub use crate::payload::StylePayload;
pub use crate::ranges::{Cut, Iter, NodeId, StyleRanges, StyleSpan};
