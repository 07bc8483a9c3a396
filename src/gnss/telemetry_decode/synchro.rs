
use serde::{Serialize, Deserialize};

use crate::utils::wrap_tow_ms;
use super::DecodedWord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
	Acquiring,
	Locked,
	Lost,
}

impl LockState {

	pub fn code(&self) -> u8 { match self {
		LockState::Acquiring => 0,
		LockState::Locked    => 1,
		LockState::Lost      => 2,
	}}

	pub fn from_code(x:u8) -> Option<Self> { match x {
		0 => Some(LockState::Acquiring),
		1 => Some(LockState::Locked),
		2 => Some(LockState::Lost),
		_ => None,
	}}

}

/// Dead-reckons time of week by symbol count and re-anchors it on every validated word
#[derive(Debug, Clone, PartialEq)]
pub struct TowTracker {
	symbol_period_ms: u32,
	frame_alignment_offset_ms: u32,
	tow_at_current_symbol_ms: u32,
	tow_at_preamble_ms: u32,
	sample_counter: u64,
	inverted: bool,
	state: LockState,
}

impl TowTracker {

	pub fn new(symbol_period_ms:u32, frame_alignment_offset_ms:u32) -> Self {
		Self{ symbol_period_ms, frame_alignment_offset_ms, tow_at_current_symbol_ms: 0, tow_at_preamble_ms: 0,
			sample_counter: 0, inverted: false, state: LockState::Acquiring }
	}

	// Read-only getter methods
	pub fn tow_at_current_symbol_ms(&self) -> u32 { self.tow_at_current_symbol_ms }
	pub fn tow_at_preamble_ms(&self) -> u32 { self.tow_at_preamble_ms }
	pub fn sample_counter(&self) -> u64 { self.sample_counter }
	pub fn is_inverted(&self) -> bool { self.inverted }
	pub fn state(&self) -> LockState { self.state }

	/// Advance by one symbol.  If the symbol completed a word, time is snapped to the word instead of
	/// being incremented, which removes whatever drift accumulated since the last anchor.
	pub fn apply(&mut self, opt_word:Option<&DecodedWord>) {
		self.sample_counter += 1;

		match opt_word {
			Some(word) => {
				self.tow_at_preamble_ms = word.tow_ms;
				self.tow_at_current_symbol_ms = wrap_tow_ms(word.tow_ms as u64 + self.frame_alignment_offset_ms as u64);
				self.inverted = word.inverted;
				self.state = LockState::Locked;
			},
			None => {
				self.tow_at_current_symbol_ms = wrap_tow_ms(self.tow_at_current_symbol_ms as u64 + self.symbol_period_ms as u64);

				// A loss reported on the previous symbol has already cleared the counters
				if self.state == LockState::Lost { self.state = LockState::Acquiring; }
			}
		}
	}

	pub fn declare_lost(&mut self) {
		self.state = LockState::Lost;
		self.inverted = false;
	}

	/// Back to acquisition.  Time and the sample counter survive so output timestamps never go
	/// backwards.
	pub fn reset(&mut self) {
		self.state = LockState::Acquiring;
		self.inverted = false;
	}

}
