// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `quire`.
//!
//! - The `util` module contains shared utility functions that are needed by different
//!   test methods.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests. This makes it easier to define shared utility
//!   functions needed by different tests.
//! - If you want to add new tests, try to follow these guidelines:
//!   - If your test can be classified to a clear "topic" (e.g. measure, wrap, etc.), put
//!     it into the corresponding module, or create a new one in case it doesn't exist yet.
//!   - Tests for bugs should go into `issues.rs`.
//!   - For test naming, put the "topic" of the test at the start of the name instead of
//!     the end. For example, `wrap_watermark` is better than `watermark_wrap`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod paragraph;
mod styles;
mod words;
#[macro_use]
mod util;
