use rand::Rng;
use rand::seq::IndexedRandom;

use serde::{Serialize, Serializer};

use super::prefix::Escaped;

/// The suffixes observed after one prefix.
///
/// A `State` is a node of the Markov chain: it stores every token that
/// followed its prefix, in the order they were read. Duplicates are kept, so
/// a suffix seen twice is twice as likely to be drawn as one seen once.
///
/// ## Invariants
/// - Suffixes are only ever appended, never reordered or removed
/// - The termination marker (empty token) may appear among the suffixes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
	suffixes: Vec<Vec<u8>>,
}

impl State {
	/// Creates a state with no suffixes.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `suffix` after this prefix.
	pub fn add_suffix(&mut self, suffix: Vec<u8>) {
		self.suffixes.push(suffix);
	}

	/// All recorded suffixes, in insertion order.
	pub fn suffixes(&self) -> &[Vec<u8>] {
		&self.suffixes
	}

	/// Draws a suffix uniformly at random from the recorded sequence.
	///
	/// Since duplicates are retained, the draw is weighted by observed
	/// frequency without storing explicit counts.
	///
	/// Returns `None` if no suffix was ever recorded.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&[u8]> {
		self.suffixes.choose(rng).map(Vec::as_slice)
	}
}

/// Serialised as the list of escaped suffixes.
impl Serialize for State {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(self.suffixes.iter().map(|suffix| Escaped(suffix)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn empty_state_predicts_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(State::new().predict(&mut rng), None);
	}

	#[test]
	fn keeps_duplicates_in_order() {
		let mut state = State::new();
		for suffix in ["b", "a", "b", ""] {
			state.add_suffix(suffix.into());
		}
		assert_eq!(state.suffixes(), [b"b".to_vec(), b"a".to_vec(), b"b".to_vec(), Vec::new()]);
	}

	#[test]
	fn single_suffix_is_always_drawn() {
		let mut rng = StdRng::seed_from_u64(7);
		let mut state = State::new();
		state.add_suffix(b"\xe9t\xe9".to_vec());
		for _ in 0..100 {
			assert_eq!(state.predict(&mut rng), Some(&b"\xe9t\xe9"[..]));
		}
	}
}
