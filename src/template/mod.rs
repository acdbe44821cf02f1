//! # Template Module
//!
//! Parses route declarations such as `/add/{Integer}/{Integer}` into an ordered list
//! of literal and typed-placeholder segments, and answers the two questions the
//! dispatcher asks of every candidate route:
//!
//! - [`PathTemplate::matches_perfectly`]: same segment count, every literal equal
//!   (case-sensitive), every placeholder coercible to its declared type.
//! - [`PathTemplate::how_correct`]: a best-fit score used only when nothing matches
//!   perfectly.
//!
//! ## Scoring
//!
//! | Situation                                 | Score                        |
//! |-------------------------------------------|------------------------------|
//! | catch-all template `*`                    | `1`                          |
//! | segment count differs                     | `0`                          |
//! | any literal differs                       | `0`                          |
//! | otherwise                                 | `1 + Σ segment weights`      |
//!
//! Segment weights: matching literal `3`, coercible placeholder `2`,
//! non-coercible placeholder `0`. A structurally compatible template therefore
//! always outranks the catch-all, literals outrank placeholders, and a failed
//! coercion lowers the score.

mod core;

pub use core::{
    PathTemplate, Segment, CATCH_ALL, CATCH_ALL_SCORE, LITERAL_WEIGHT, PLACEHOLDER_WEIGHT,
};
