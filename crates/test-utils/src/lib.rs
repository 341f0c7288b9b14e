//! Shared test utilities for the wind rose workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Wind record fixtures (raw bins/frequencies, JSON documents)
//! - Direction and frequency generators
//! - Temporary output directories
//! - Approximate equality macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for comparing two RGB(A) channel tuples within a per-channel
/// tolerance. Useful for antialiased raster samples.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_rgb_near;
///
/// assert_rgb_near!((165, 0, 38), (164, 1, 38), 2);
/// ```
#[macro_export]
macro_rules! assert_rgb_near {
    (($r1:expr, $g1:expr, $b1:expr), ($r2:expr, $g2:expr, $b2:expr), $tol:expr) => {{
        let pairs = [
            ($r1 as i32, $r2 as i32),
            ($g1 as i32, $g2 as i32),
            ($b1 as i32, $b2 as i32),
        ];
        for (channel, (a, b)) in pairs.iter().enumerate() {
            if (a - b).abs() > $tol as i32 {
                panic!(
                    "assertion failed: channel {} differs: left `{:?}`, right `{:?}`, tolerance {}",
                    channel,
                    ($r1, $g1, $b1),
                    ($r2, $g2, $b2),
                    $tol
                );
            }
        }
    }};
}
