//! Line-wrapping formatter for whitespace-delimited token streams.
//!
//! Tokens are re-emitted separated by single spaces, breaking to a new line
//! before a token would push the line past the maximum width.

use std::io::{self, BufRead, Write};

use rs_markov_core::io::Tokens;

/// Default maximum number of characters per line.
pub const DEFAULT_WIDTH: usize = 80;

/// Writes tokens to `out` as lines of at most `max_width` characters.
///
/// # Invariants
/// - A line never exceeds `max_width` characters, unless it holds a single
///   token that is longer than the width on its own
/// - `width` is the character count of the line being written
pub struct LineWrapper<W: Write> {
	out: W,
	max_width: usize,
	width: usize,
}

impl<W: Write> LineWrapper<W> {
	pub fn new(out: W, max_width: usize) -> Self {
		Self { out, max_width, width: 0 }
	}

	/// Appends `token` to the current line, or starts a new line first if it
	/// does not fit.
	pub fn push(&mut self, token: &[u8]) -> io::Result<()> {
		let len = char_count(token);

		if self.width > 0 && self.width + 1 + len > self.max_width {
			writeln!(self.out)?;
			self.width = 0;
		}

		if self.width == 0 {
			self.width = len;
		} else {
			self.out.write_all(b" ")?;
			self.width += 1 + len;
		}
		self.out.write_all(token)
	}

	/// Terminates the last line and returns the writer.
	///
	/// The trailing newline is written even when no token was pushed.
	pub fn finish(mut self) -> io::Result<W> {
		writeln!(self.out)?;
		self.out.flush()?;
		Ok(self.out)
	}
}

/// Width of a token in characters.
///
/// Each byte outside valid UTF-8 counts as one character.
fn char_count(token: &[u8]) -> usize {
	token
		.utf8_chunks()
		.map(|chunk| chunk.valid().chars().count() + chunk.invalid().len())
		.sum()
}

/// Reads every token of `reader` and writes them wrapped to `out`.
///
/// # Errors
/// Stops at the first read or write error.
pub fn wrap<R: BufRead, W: Write>(reader: R, out: W, max_width: usize) -> io::Result<()> {
	let mut wrapper = LineWrapper::new(out, max_width);
	for token in Tokens::new(reader) {
		wrapper.push(&token?)?;
	}
	wrapper.finish()?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn wrapped(input: &str, width: usize) -> String {
		let mut out = Vec::new();
		wrap(input.as_bytes(), &mut out, width).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn joins_short_input_on_one_line() {
		assert_eq!(wrapped("the  cat\nsat\t on", 80), "the cat sat on\n");
	}

	#[test]
	fn breaks_before_overflowing_token() {
		// "aaa bbb" is exactly 7 characters
		assert_eq!(wrapped("aaa bbb ccc", 7), "aaa bbb\nccc\n");
		assert_eq!(wrapped("aaa bbb ccc", 6), "aaa\nbbb\nccc\n");
	}

	#[test]
	fn long_token_sits_alone() {
		assert_eq!(wrapped("a abcdefghij b", 5), "a\nabcdefghij\nb\n");
		assert_eq!(wrapped("abcdefghij", 5), "abcdefghij\n");
	}

	#[test]
	fn lines_never_exceed_width() {
		let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
			eiusmod tempor incididunt ut labore et dolore magna aliqua.";
		for width in 11..40 {
			for line in wrapped(text, width).lines() {
				assert!(line.chars().count() <= width, "{line:?} exceeds {width}");
			}
		}
	}

	#[test]
	fn width_counts_characters_not_bytes() {
		assert_eq!(wrapped("été été", 7), "été été\n");
	}

	#[test]
	fn non_utf8_bytes_pass_through() {
		let mut out = Vec::new();
		wrap(&b"caf\xe9 au\nlait"[..], &mut out, 8).unwrap();
		assert_eq!(out, b"caf\xe9 au\nlait\n");
	}

	#[test]
	fn empty_input_is_a_single_newline() {
		assert_eq!(wrapped("", 80), "\n");
	}
}
