use std::collections::HashMap;
use std::io::BufRead;

use rand::Rng;
use serde::Serialize;

use super::builder::build;
use super::generator::Generator;
use super::prefix::PrefixKey;
use super::state::State;
use crate::io::Tokens;
use crate::Result;

/// A word-level Markov model of order `n`.
///
/// Maps every prefix observed while building (the `n` tokens preceding a
/// position in the input) to the [`State`] holding what followed it.
///
/// # Responsibilities
/// - Hold the prefix to suffixes mapping produced by a [`Builder`](super::builder::Builder)
/// - Serve read-only lookups to the [`Generator`]
///
/// # Invariants
/// - `order` never changes after creation
/// - Every key holds exactly `order` tokens
/// - After a completed build, every state is non-empty and the final window
///   of the input holds the termination marker
#[derive(Serialize, Clone, Debug)]
pub struct StateModel {
	/// Number of tokens in each prefix.
	order: usize,

	/// Mapping from a prefix key to its recorded suffixes.
	states: HashMap<PrefixKey, State>,
}

impl StateModel {
	/// Creates an empty model of the given order.
	///
	/// An empty model is only a starting point for a build; generating from it
	/// fails with [`MarkovError::MissingPrefix`](crate::MarkovError::MissingPrefix).
	pub fn new(order: usize) -> Self {
		Self { order, states: HashMap::new() }
	}

	/// Builds a model of the given order from every token of `reader`.
	///
	/// # Errors
	/// Returns an error if the reader fails. Any byte content is accepted.
	pub fn from_reader<R: BufRead>(reader: R, order: usize) -> Result<Self> {
		build(Tokens::new(reader), order)
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn state(&self, key: &PrefixKey) -> Option<&State> {
		self.states.get(key)
	}

	/// Returns the suffixes recorded for `key`, in insertion order.
	pub fn suffixes(&self, key: &PrefixKey) -> Option<&[Vec<u8>]> {
		self.state(key).map(State::suffixes)
	}

	/// Iterates over all `(prefix, state)` pairs, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&PrefixKey, &State)> {
		self.states.iter()
	}

	/// Starts a random walk over this model.
	///
	/// See [`Generator`] for the stopping rules.
	pub fn generate<R: Rng>(&self, max_tokens: usize, rng: R) -> Generator<'_, R> {
		Generator::new(self, max_tokens, rng)
	}

	/// Appends `suffix` to the state of `key`, creating it if needed.
	pub(crate) fn record(&mut self, key: PrefixKey, suffix: Vec<u8>) {
		self.states.entry(key).or_default().add_suffix(suffix);
	}
}
