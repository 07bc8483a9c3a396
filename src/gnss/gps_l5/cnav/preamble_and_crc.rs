
use std::collections::VecDeque;

use super::{error_detection, MESSAGE_BITS, MESSAGE_BITS_NO_CRC, PREAMBLE};

/// Finds 300-bit CNAV messages in a decoded bit stream.  Before synchronization every bit position
/// is tried, in both polarities; afterwards each consecutive block of 300 bits must pass again or
/// the search starts over.
#[derive(Debug)]
pub struct PreambleAndCrc {
	buffer: VecDeque<bool>,
	state: State
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
	Initial,
	Valid{ is_inverse:bool },
}

fn has_preamble(buffer:&[bool], is_inverse:bool) -> bool {
	buffer.iter().zip(PREAMBLE.iter()).all(|(b, p)| (*b ^ is_inverse) == *p)
}

impl PreambleAndCrc {

	pub fn new() -> Self {
		Self{ buffer: VecDeque::with_capacity(MESSAGE_BITS + 1), state: State::Initial }
	}

	pub fn initialize(&mut self) {
		self.buffer.clear();
		self.state = State::Initial;
	}

	pub fn is_synchronized(&self) -> bool { self.state != State::Initial }

	/// Returns the message without its CRC, corrected for polarity, and whether the stream is inverted
	pub fn apply(&mut self, b:bool) -> Option<(Vec<bool>, bool)> {

		let (opt_next_state, opt_ans) = match self.state {
			State::Initial => {
				self.buffer.push_back(b);
				while self.buffer.len() > MESSAGE_BITS { self.buffer.pop_front(); }

				if self.buffer.len() == MESSAGE_BITS {
					let buffer:&mut [bool] = self.buffer.make_contiguous();
					if has_preamble(buffer, false) && error_detection::is_crc_ok(buffer) {
						(Some(State::Valid{ is_inverse: false }), Some(self.take_message()))
					}
					else if has_preamble(buffer, true) {
						let inverse_buffer:Vec<bool> = buffer.iter().map(|x| !x).collect();
						if error_detection::is_crc_ok(&inverse_buffer) {
							self.buffer.clear();
							(Some(State::Valid{ is_inverse: true }), Some(inverse_buffer[..MESSAGE_BITS_NO_CRC].to_vec()))
						}
						else { (None, None) }
					}
					else { (None, None) }
				} else { (None, None) }
			},
			State::Valid{ is_inverse } => {
				self.buffer.push_back(b ^ is_inverse);
				if self.buffer.len() == MESSAGE_BITS {
					let buffer:&[bool] = self.buffer.make_contiguous();
					if has_preamble(buffer, false) && error_detection::is_crc_ok(buffer) {
						// Still synchronized, so no state transition
						(None, Some(self.take_message()))
					} else {
						// Go back to searching, with the buffer in its raw polarity so the search can
						// continue from these bits
						if is_inverse {
							for x in self.buffer.iter_mut() { *x = !*x; }
						}
						(Some(State::Initial), None)
					}
				} else {
					(None, None)
				}
			}
		};

		// Perform state transition if necessary
		if let Some(next_state) = opt_next_state {
			self.state = next_state;
		}

		opt_ans.map(|msg| (msg, is_inverse_state(self.state)))
	}

	fn take_message(&mut self) -> Vec<bool> {
		self.buffer.drain(..).take(MESSAGE_BITS_NO_CRC).collect()
	}

}

fn is_inverse_state(state:State) -> bool {
	match state {
		State::Valid{ is_inverse } => is_inverse,
		State::Initial => false,
	}
}

impl Default for PreambleAndCrc {
	fn default() -> Self { Self::new() }
}
