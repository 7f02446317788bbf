use std::io;

use log::{debug, trace};

use super::TERMINATOR;
use super::prefix::Prefix;
use super::state_model::StateModel;
use crate::Result;

/// Fills a [`StateModel`] in a single linear pass over a token stream.
///
/// For each token, the token is recorded as a suffix of the current window,
/// then the window advances by it. [`Builder::finish`] records the
/// termination marker after the final window, which marks it as an end state.
///
/// ## Example
/// ```
/// use rs_markov_core::model::builder::Builder;
/// use rs_markov_core::model::prefix::PrefixKey;
///
/// let mut builder = Builder::new(1);
/// for token in ["a", "b", "a"] {
/// 	builder.add_token(token);
/// }
/// let model = builder.finish();
/// assert_eq!(model.suffixes(&PrefixKey::new(["a"])), Some(&[b"b".to_vec(), Vec::new()][..]));
/// ```
#[derive(Debug)]
pub struct Builder {
	model: StateModel,
	window: Prefix,
	consumed: usize,
}

impl Builder {
	/// Starts a build with an empty model and a window of `order` placeholders.
	pub fn new(order: usize) -> Self {
		Self {
			model: StateModel::new(order),
			window: Prefix::new(order),
			consumed: 0,
		}
	}

	/// Records `token` after the current window, then advances the window.
	///
	/// Empty tokens are ignored: the empty token is reserved for the
	/// termination marker. Tokens coming from [`Tokens`](crate::io::Tokens)
	/// are never empty.
	pub fn add_token(&mut self, token: impl Into<Vec<u8>>) {
		let token = token.into();
		if token.is_empty() {
			trace!("ignoring empty token at position {}", self.consumed);
			return;
		}

		self.model.record(self.window.key(), token.clone());
		self.window.advance(token);
		self.consumed += 1;
	}

	/// Number of tokens recorded so far.
	pub fn tokens_consumed(&self) -> usize {
		self.consumed
	}

	/// Marks the current window as an end state and returns the model.
	pub fn finish(mut self) -> StateModel {
		self.model.record(self.window.key(), TERMINATOR.to_vec());
		debug!(
			"built order-{} model: {} tokens, {} prefixes",
			self.model.order(),
			self.consumed,
			self.model.len()
		);
		self.model
	}
}

/// Builds a model of the given order from a stream of tokens.
///
/// Stops at the first read error, which is returned as is; no partial model
/// is produced in that case.
pub fn build<I>(tokens: I, order: usize) -> Result<StateModel>
where
	I: IntoIterator<Item = io::Result<Vec<u8>>>,
{
	let mut builder = Builder::new(order);
	for token in tokens {
		builder.add_token(token?);
	}
	Ok(builder.finish())
}
