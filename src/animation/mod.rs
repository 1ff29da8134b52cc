//! Time-driven animation primitives
//!
//! - [`EventAnimation`] - fixed start and duration, eased progress
//! - [`PeriodicAnimation`] - looping phase, ends only when interrupted
//! - [`EventAnimationChain`] - links run strictly one after another
//! - [`AnimationSet`] - the active set; `update(t)` reports completions
//!   as [`AnimationEvent`]s instead of running callbacks

pub mod chain;
pub mod easing;
pub mod event;
pub mod set;

#[cfg(test)]
mod tests;

pub use chain::{ChainStep, EventAnimationChain};
pub use easing::Easing;
pub use event::{EventAnimation, PeriodicAnimation};
pub use set::{Animation, AnimationEvent, AnimationId, AnimationSet};
