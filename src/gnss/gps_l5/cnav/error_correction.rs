
use std::collections::VecDeque;

const NUM_STATES:usize = 64;

/// Number of bits the decoder waits before committing to a decision
pub const TRACEBACK_DEPTH:usize = 35;

// The 7-bit shift register holds the newest input bit in bit 6.  The 6-bit decoder state is the
// register shifted right by one, i.e. the six most recent inputs.
pub fn cnav_fec(x:u8) -> (bool, bool) {

	let bit6:bool = (x & 0x40) != 0;
	let bit5:bool = (x & 0x20) != 0;
	let bit4:bool = (x & 0x10) != 0;
	let bit3:bool = (x & 0x08) != 0;

	// Both G1 and G2 skip bit2

	let bit1:bool = (x & 0x02) != 0;
	let bit0:bool = (x & 0x01) != 0;

	let g1:bool = bit6 ^ bit5 ^ bit4 ^ bit3 ^        bit0;
	let g2:bool = bit6 ^        bit4 ^ bit3 ^ bit1 ^ bit0;

	(g1, g2)

}

/// Streaming hard-decision Viterbi decoder.  Each call consumes one symbol pair and, once enough
/// history is available, returns the bit from `TRACEBACK_DEPTH` pairs ago.
#[derive(Debug, Clone)]
pub struct ViterbiDecoder {
	path_metrics: [u32; NUM_STATES],
	decisions: VecDeque<u64>,
	steps: usize,
}

impl ViterbiDecoder {

	pub fn new() -> Self {
		Self{ path_metrics: [0; NUM_STATES], decisions: VecDeque::with_capacity(TRACEBACK_DEPTH + 1), steps: 0 }
	}

	pub fn initialize(&mut self) {
		self.path_metrics = [0; NUM_STATES];
		self.decisions.clear();
		self.steps = 0;
	}

	pub fn apply(&mut self, g1:bool, g2:bool) -> Option<bool> {
		let mut next_metrics = [0u32; NUM_STATES];
		let mut decision:u64 = 0;

		for next_state in 0..NUM_STATES {
			// Two register contents lead to each state; they differ only in the oldest bit
			let branch = |oldest:usize| -> u32 {
				let reg = ((next_state << 1) | oldest) as u8;
				let (e1, e2) = cnav_fec(reg);
				self.path_metrics[(reg & 0x3F) as usize] + (e1 != g1) as u32 + (e2 != g2) as u32
			};

			let (m0, m1) = (branch(0), branch(1));
			if m1 < m0 {
				next_metrics[next_state] = m1;
				decision |= 1u64 << next_state;
			} else {
				next_metrics[next_state] = m0;
			}
		}

		// Keep metrics bounded
		let min_metric:u32 = next_metrics.iter().cloned().min().unwrap_or(0);
		for m in next_metrics.iter_mut() { *m -= min_metric; }
		self.path_metrics = next_metrics;

		self.decisions.push_back(decision);
		while self.decisions.len() > TRACEBACK_DEPTH { self.decisions.pop_front(); }
		self.steps += 1;

		if self.steps > TRACEBACK_DEPTH {
			let mut state:usize = self.best_state();
			for d in self.decisions.iter().rev() {
				let oldest = ((d >> state) & 1) as usize;
				state = ((state << 1) & 0x3F) | oldest;
			}
			Some(state & 0x20 != 0)
		} else {
			None
		}
	}

	fn best_state(&self) -> usize {
		self.path_metrics.iter().enumerate().min_by_key(|(_, m)| **m).map(|(idx, _)| idx).unwrap_or(0)
	}

}

impl Default for ViterbiDecoder {
	fn default() -> Self { Self::new() }
}
