// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

pub(crate) mod env;
mod renderer;
pub(crate) mod samples;

pub(crate) use env::TestEnv;
pub(crate) use renderer::{replay, shown_text, ColorBrush, Placed};

/// Returns the current function name (for use in test naming).
#[macro_export]
macro_rules! test_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = &name[..name.len() - 3];
        let name = &name[name.rfind(':').map(|x| x + 1).unwrap_or(0)..];

        name
    }};
}

/// Asserts that two floats are equal up to the default output precision.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr $(,)?) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < 1e-6,
            "expected {right}, got {left}"
        );
    }};
}
