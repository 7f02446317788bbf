use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Lazy sequence of whitespace-delimited tokens read from `reader`.
///
/// - Reads one line at a time, never the whole input
/// - Tokens are raw bytes: input does not have to be UTF-8
/// - Whitespace is any Unicode whitespace found in valid UTF-8 runs; bytes
///   outside such runs always belong to a token
/// - No token is ever empty
/// - Yields at most one error, then stops
pub struct Tokens<R> {
	reader: R,
	line: Vec<u8>,
	pending: VecDeque<Vec<u8>>,
	exhausted: bool,
}

impl<R: BufRead> Tokens<R> {
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			line: Vec::new(),
			pending: VecDeque::new(),
			exhausted: false,
		}
	}

	/// Reads the next line into `pending`.
	///
	/// Returns `Ok(false)` at end of input.
	fn fill(&mut self) -> io::Result<bool> {
		self.line.clear();
		if self.reader.read_until(b'\n', &mut self.line)? == 0 {
			return Ok(false);
		}
		split_fields(&self.line, &mut self.pending);
		Ok(true)
	}
}

/// Appends the whitespace-separated fields of `line` to `out`.
///
/// A multi-byte UTF-8 sequence never contains b'\n', so splitting the input
/// into lines first cannot cut a character or a token in two.
fn split_fields(line: &[u8], out: &mut VecDeque<Vec<u8>>) {
	let mut token = Vec::new();
	for chunk in line.utf8_chunks() {
		for c in chunk.valid().chars() {
			if c.is_whitespace() {
				if !token.is_empty() {
					out.push_back(std::mem::take(&mut token));
				}
			} else {
				let mut buf = [0; 4];
				token.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
			}
		}
		token.extend_from_slice(chunk.invalid());
	}
	if !token.is_empty() {
		out.push_back(token);
	}
}

impl<R: BufRead> Iterator for Tokens<R> {
	type Item = io::Result<Vec<u8>>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(token) = self.pending.pop_front() {
				return Some(Ok(token));
			}
			if self.exhausted {
				return None;
			}
			match self.fill() {
				Ok(true) => continue,
				Ok(false) => self.exhausted = true,
				Err(e) => {
					self.exhausted = true;
					return Some(Err(e));
				}
			}
		}
	}
}
