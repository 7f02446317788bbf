use log::debug;
use rand::Rng;

use super::TERMINATOR;
use super::prefix::Prefix;
use super::state_model::StateModel;
use crate::{MarkovError, Result};

/// Randomized walk over a [`StateModel`].
///
/// The generator starts from the all-placeholder window, exactly like the
/// builder did, and yields one token per step:
/// 1. look up the suffixes of the current window
/// 2. draw one uniformly (duplicates weight the draw)
/// 3. stop on the termination marker, otherwise yield it and advance
///
/// # Stopping rules
/// - The termination marker is drawn
/// - `max_tokens` tokens have been yielded
/// - A lookup misses; the error is yielded once, then the iterator ends
///
/// The cap guards against models whose cycles make the marker unlikely.
///
/// # Notes
/// - The window is sized from the model's own order, so a model produced
///   by a completed build always has the looked-up prefixes.
/// - The random source is owned by the generator; pass `&mut rng` to keep
///   using it afterwards.
pub struct Generator<'m, R> {
	model: &'m StateModel,
	window: Prefix,
	rng: R,
	remaining: usize,
	emitted: usize,
	finished: bool,
}

impl<'m, R: Rng> Generator<'m, R> {
	/// Starts a walk over `model` that yields at most `max_tokens` tokens.
	///
	/// The window starts as `model.order()` placeholders and every draw comes
	/// from `rng`.
	pub fn new(model: &'m StateModel, max_tokens: usize, rng: R) -> Self {
		Self {
			model,
			window: Prefix::new(model.order()),
			rng,
			remaining: max_tokens,
			emitted: 0,
			finished: false,
		}
	}

	/// Number of tokens yielded so far.
	pub fn emitted(&self) -> usize {
		self.emitted
	}

	fn stop(&mut self, reason: &str) {
		self.finished = true;
		debug!("generation stopped after {} tokens: {}", self.emitted, reason);
	}
}

impl<R: Rng> Iterator for Generator<'_, R> {
	type Item = Result<Vec<u8>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}
		if self.remaining == 0 {
			self.stop("token cap reached");
			return None;
		}

		let model = self.model;
		let key = self.window.key();
		let suffix = match model.state(&key).and_then(|state| state.predict(&mut self.rng)) {
			Some(suffix) => suffix,
			None => {
				self.stop("prefix missing from model");
				return Some(Err(MarkovError::MissingPrefix(key)));
			}
		};

		if suffix == TERMINATOR {
			self.stop("end of input reached");
			return None;
		}

		let token = suffix.to_vec();
		self.window.advance(token.clone());
		self.remaining -= 1;
		self.emitted += 1;
		Some(Ok(token))
	}
}
