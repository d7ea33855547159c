//! # bc-optimizer
//!
//! Bit-string local search for single-variable real objectives.
//!
//! A [`bc_types::PrecisionSpace`] quantizes `[low, high]` into fixed-length
//! binary genotypes ([`codec`], [`Genotype`]). [`SearchEngine`] explores
//! that space with restarted single-bit-flip hill climbing and records a
//! [`ConvergenceTrace`]. [`runner`] drives runs from settings, including
//! parallel multi-seed batches.

pub mod codec;
mod engine;
mod genotype;
mod report;
pub mod runner;
pub mod selection;
mod trace;

pub use engine::{Objective, SearchEngine, SearchOutcome};
pub use genotype::Genotype;
pub use report::{RunId, SearchReport};
pub use runner::{best_of, run_seeds, search};
pub use trace::{ConvergenceTrace, TraceBuilder};
