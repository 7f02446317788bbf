//! Word-level Markov chain text generation library.
//!
//! This crate provides the pieces of a configurable-order Markov generator:
//! - A lazy whitespace tokenizer over any buffered reader, byte-exact
//! - A prefix window of runtime-configurable length
//! - A state model mapping each observed prefix to its suffixes
//! - A one-pass builder and a randomized, capped generator
//!
//! Building and generating are two strictly sequential phases: a model is
//! filled once by the builder and is read-only afterwards.

/// Error type shared by the whole crate.
pub mod error;

/// Input utilities (lazy whitespace tokenizer).
pub mod io;

/// Markov model, builder and generator.
pub mod model;

pub use error::{MarkovError, Result};
