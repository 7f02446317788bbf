use std::io;

use thiserror::Error;

use crate::model::prefix::PrefixKey;

/// Errors raised while building or walking a model.
///
/// Every variant is terminal for the current run: nothing here is meant to be
/// retried or downgraded to a warning.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// The input stream could not be read.
	#[error("failed to read input: {0}")]
	Io(#[from] io::Error),

	/// The generator reached a prefix the model has no suffixes for.
	///
	/// A model produced by a completed build always covers every prefix the
	/// generator can reach, so this means the model was not built by
	/// [`Builder`](crate::model::builder::Builder) (or not finished).
	#[error("no suffixes recorded for prefix {0}: the model is incomplete or was built with a different order")]
	MissingPrefix(PrefixKey),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
