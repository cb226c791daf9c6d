//! Signal composition
//!
//! Converts the numeric indicators into a discrete bullish/neutral/bearish
//! stance via a fixed threshold tally.

mod composer;
mod types;

pub use composer::SignalComposer;
pub use types::{Condition, Signal, SignalInputs, Stance, Verdict};
