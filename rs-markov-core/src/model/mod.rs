//! Word-level Markov model and its two phases.
//!
//! - Prefix windows and their lookup keys (`Prefix`, `PrefixKey`)
//! - Suffix storage per prefix (`State`) and the full model (`StateModel`)
//! - One-pass model construction (`Builder`)
//! - Randomized, capped generation (`Generator`)
//! - Run configuration (`GenerationConfig`)

/// Builds a `StateModel` from a token stream in one pass.
pub mod builder;

/// Generation parameters and random source construction.
pub mod generation_config;

/// Random walk over a built model.
pub mod generator;

/// Sliding token window and structural lookup key.
pub mod prefix;

/// Suffixes recorded for a single prefix.
///
/// Supports frequency-weighted random sampling.
pub mod state;

/// Prefix to suffixes mapping.
pub mod state_model;

/// Termination marker recorded after the last window of the input.
///
/// Also the placeholder token filling a fresh window. Real tokens are never
/// empty, so the two uses cannot be confused with input.
pub const TERMINATOR: &[u8] = b"";
