// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Simple Latin text - baseline for most tests
pub(crate) const LATIN: &str = "The quick brown fox jumps.";

/// Text with spaces for word spacing tests
pub(crate) const SPACED: &str = "one two three four five";

/// A tabulated row
pub(crate) const ROW: &str = "Apples\t3\t1.20";

/// Hebrew text for right-to-left tests
pub(crate) const HEBREW: &str = "שלום עולם";

pub(crate) use quire_dev::TextSamples;
