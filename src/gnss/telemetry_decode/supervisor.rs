
/// Counts symbols since the last validated word and fires once per loss episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockLossSupervisor {
	max_symbols_without_valid_frame: u64,
	symbols_since_valid_word: u64,
	notified_failure: bool,
}

impl LockLossSupervisor {

	pub fn new(max_symbols_without_valid_frame:u64) -> Self {
		Self{ max_symbols_without_valid_frame, symbols_since_valid_word: 0, notified_failure: false }
	}

	pub fn symbols_since_valid_word(&self) -> u64 { self.symbols_since_valid_word }
	pub fn notified_failure(&self) -> bool { self.notified_failure }
	pub fn max_symbols_without_valid_frame(&self) -> u64 { self.max_symbols_without_valid_frame }

	pub fn valid_word(&mut self) {
		self.symbols_since_valid_word = 0;
		self.notified_failure = false;
	}

	/// Returns true exactly when a lock-loss notification has to be sent for this symbol
	pub fn missed_word(&mut self) -> bool {
		self.symbols_since_valid_word += 1;

		if self.symbols_since_valid_word > self.max_symbols_without_valid_frame && !self.notified_failure {
			// The latch stays set until a valid word re-arms it
			self.notified_failure = true;
			self.symbols_since_valid_word = 0;
			true
		} else {
			false
		}
	}

	pub fn reset(&mut self) {
		self.symbols_since_valid_word = 0;
		self.notified_failure = false;
	}

}
