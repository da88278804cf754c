//! A rule-agnostic engine for turn-based games on rectangular boards.
//!
//! Figures move by interpreting compact move templates, a pluggable
//! [`Rules`](rules::Rules) implementation decides what the geometry alone
//! cannot, and [`search`] picks moves with alpha-beta pruning over board
//! clones.

pub mod board;
pub mod evaluate;
pub mod figure;
pub mod game;
pub mod prelude;
pub mod rules;
pub mod search;
pub mod setup;

#[cfg(feature = "instrumentation")]
pub mod instrumentation;
