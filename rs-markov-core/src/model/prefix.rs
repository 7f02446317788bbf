use std::collections::VecDeque;
use std::fmt::{self, Write};

use serde::{Serialize, Serializer};

/// Display form of a raw token.
///
/// Valid UTF-8 is written as is, a backslash as `\\` and every byte that is
/// not part of valid UTF-8 as `\xNN`. The mapping is injective, so distinct
/// tokens never print the same.
#[derive(Clone, Copy, Debug)]
pub struct Escaped<'a>(pub &'a [u8]);

impl fmt::Display for Escaped<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for chunk in self.0.utf8_chunks() {
			for c in chunk.valid().chars() {
				match c {
					'\\' => f.write_str("\\\\")?,
					c => f.write_char(c)?,
				}
			}
			for byte in chunk.invalid() {
				write!(f, "\\x{:02x}", byte)?;
			}
		}
		Ok(())
	}
}

impl Serialize for Escaped<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Canonical lookup key for a prefix.
///
/// The key keeps the ordered token sequence itself, so equality and hashing
/// are structural and byte-exact: two prefixes map to the same key exactly
/// when their token sequences are equal. No flattening into a single string
/// is needed for lookups, hence no quoting scheme can collide.
///
/// A textual form is still available through [`PrefixKey::encode`] (and
/// `Display`), e.g. for logs or JSON maps, where each token is written as
/// `<byte length>:<escaped token>`. Length-prefixing makes that form
/// collision-free too: `["ab", "c"]` encodes to `2:ab1:c` and `["a", "bc"]`
/// to `1:a2:bc`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrefixKey(Vec<Vec<u8>>);

impl PrefixKey {
	/// Creates a key from an ordered token sequence, oldest token first.
	pub fn new<I, T>(tokens: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Vec<u8>>,
	{
		Self(tokens.into_iter().map(Into::into).collect())
	}

	/// The tokens of the key, oldest first.
	pub fn tokens(&self) -> &[Vec<u8>] {
		&self.0
	}

	/// Returns the length-prefixed textual form of the key.
	///
	/// - The empty-order key (N = 0) encodes to `""`
	/// - A placeholder token encodes to `0:`
	pub fn encode(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for PrefixKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for token in &self.0 {
			write!(f, "{}:{}", token.len(), Escaped(token))?;
		}
		Ok(())
	}
}

impl Serialize for PrefixKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Sliding window over the `order` most recently consumed tokens.
///
/// The window starts filled with `order` placeholder (empty) tokens, which is
/// the state both the builder and the generator begin from.
///
/// # Invariants
/// - The window always holds exactly `order` tokens
/// - Tokens are kept oldest first
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
	tokens: VecDeque<Vec<u8>>,
}

impl Prefix {
	/// Creates a window of `order` placeholder tokens.
	pub fn new(order: usize) -> Self {
		Self {
			tokens: std::iter::repeat_n(Vec::new(), order).collect(),
		}
	}

	/// Number of tokens held by the window.
	pub fn order(&self) -> usize {
		self.tokens.len()
	}

	/// Iterates over the tokens of the window, oldest first.
	pub fn tokens(&self) -> impl Iterator<Item = &[u8]> {
		self.tokens.iter().map(Vec::as_slice)
	}

	/// Pushes `token` into the window.
	///
	/// - `order == 0`: no-op, the window stays empty
	/// - `order == 1`: the sole token is replaced
	/// - otherwise: the oldest token is dropped and `token` appended
	pub fn advance(&mut self, token: Vec<u8>) {
		match self.tokens.len() {
			0 => (),
			1 => self.tokens[0] = token,
			_ => {
				self.tokens.pop_front();
				self.tokens.push_back(token);
			}
		}
	}

	/// Returns the lookup key for the current window.
	pub fn key(&self) -> PrefixKey {
		PrefixKey(self.tokens.iter().cloned().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn advance_all(prefix: &mut Prefix, tokens: &[&str]) {
		for token in tokens {
			prefix.advance(token.as_bytes().to_vec());
		}
	}

	#[test]
	fn starts_with_placeholders() {
		let prefix = Prefix::new(3);
		assert_eq!(prefix.order(), 3);
		assert!(prefix.tokens().all(<[u8]>::is_empty));
		assert_eq!(prefix.key(), PrefixKey::new(["", "", ""]));
	}

	#[test]
	fn order_zero_never_changes() {
		let mut prefix = Prefix::new(0);
		advance_all(&mut prefix, &["a", "b"]);
		assert_eq!(prefix.order(), 0);
		assert_eq!(prefix.key(), PrefixKey::new(Vec::<Vec<u8>>::new()));
	}

	#[test]
	fn order_one_replaces() {
		let mut prefix = Prefix::new(1);
		advance_all(&mut prefix, &["a", "b"]);
		assert_eq!(prefix.key(), PrefixKey::new(["b"]));
	}

	#[test]
	fn keeps_most_recent_tokens_oldest_first() {
		let mut prefix = Prefix::new(3);
		advance_all(&mut prefix, &["a", "b"]);
		assert_eq!(prefix.key(), PrefixKey::new(["", "a", "b"]));

		advance_all(&mut prefix, &["c", "d"]);
		assert_eq!(prefix.order(), 3);
		assert_eq!(prefix.key(), PrefixKey::new(["b", "c", "d"]));
	}

	#[test]
	fn keys_do_not_collide_on_concatenation() {
		let left = PrefixKey::new(["ab", "c"]);
		let right = PrefixKey::new(["a", "bc"]);
		assert_ne!(left, right);
		assert_ne!(left.encode(), right.encode());
		assert_eq!(left.encode(), "2:ab1:c");
	}

	#[test]
	fn encoding_handles_separator_characters() {
		// Tokens that look like encoded fragments must not collide either
		let left = PrefixKey::new(["1:a", ""]);
		let right = PrefixKey::new(["", "1:a"]);
		assert_ne!(left.encode(), right.encode());
		assert_eq!(PrefixKey::new(["", ""]).encode(), "0:0:");
		assert_eq!(PrefixKey::new(Vec::<Vec<u8>>::new()).encode(), "");
	}

	#[test]
	fn length_prefix_counts_bytes() {
		assert_eq!(PrefixKey::new(["été"]).encode(), "5:été");
	}

	#[test]
	fn non_utf8_tokens_are_escaped() {
		let key = PrefixKey::new([&b"caf\xe9"[..], &b"a\\b"[..]]);
		assert_eq!(key.encode(), "4:caf\\xe93:a\\\\b");
		// The escaped spelling of a byte is a different token than the byte
		assert_ne!(PrefixKey::new([&b"\xff"[..]]).encode(), PrefixKey::new(["\\xff"]).encode());
	}
}
