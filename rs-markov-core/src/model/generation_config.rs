use rand::SeedableRng;
use rand::rngs::StdRng;

/// Default number of tokens in a prefix.
pub const DEFAULT_ORDER: usize = 2;

/// Default cap on generated tokens.
pub const DEFAULT_MAX_TOKENS: usize = 10_000;

/// Parameters of one build-then-generate run.
///
/// # Fields
/// - `order`: prefix length N, fixed for the model's lifetime
/// - `max_tokens`: generation cap
/// - `seed`: optional seed; `None` draws the random source from the OS
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
	pub order: usize,
	pub max_tokens: usize,
	pub seed: Option<u64>,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			order: DEFAULT_ORDER,
			max_tokens: DEFAULT_MAX_TOKENS,
			seed: None,
		}
	}
}

impl GenerationConfig {
	/// Creates the random source for a generator.
	///
	/// Seeded configurations always produce the same sequence of draws.
	pub fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}
