
use tracing::{debug, trace};

use crate::{DigSigProcErr, Symbol};
use crate::gnss::telemetry_decode::{DecodedWord, FrameDecoder, TelemetryFormat};
use self::error_correction::ViterbiDecoder;
use self::message_header::CnavHeader;
use self::preamble_and_crc::PreambleAndCrc;

pub mod encoder;
pub mod error_correction;
pub mod error_detection;
pub mod message_header;
pub mod preamble_and_crc;

pub const PREAMBLE:[bool; 8] = [true, false, false, false, true, false, true, true];
pub const MESSAGE_BITS:usize = 300;
pub const MESSAGE_BITS_NO_CRC:usize = MESSAGE_BITS - error_detection::CRC_BITS;

/*	CNAV decoding pipeline, per symbol-pairing lane:
	- Pair symbols (which of two symbols starts a pair is unknown, hence two lanes)
	- Viterbi decode
	- Preamble search and CRC-24Q
	- Header decode for TOW
*/

#[derive(Debug)]
struct Lane {
	parity: u64,
	pending: Option<bool>,
	viterbi: ViterbiDecoder,
	framer: PreambleAndCrc,
}

impl Lane {

	fn new(parity:u64) -> Self {
		Self{ parity, pending: None, viterbi: ViterbiDecoder::new(), framer: PreambleAndCrc::new() }
	}

	fn initialize(&mut self) {
		self.pending = None;
		self.viterbi.initialize();
		self.framer.initialize();
	}

	fn apply(&mut self, symbol_idx:u64, b:bool) -> Option<(Vec<bool>, bool)> {
		if symbol_idx % 2 == self.parity {
			self.pending = Some(b);
			None
		} else {
			let first = self.pending.take()?;
			let bit = self.viterbi.apply(first, b)?;
			self.framer.apply(bit)
		}
	}

}

/// Symbol-to-message decoder for GPS L5 CNAV.  Both symbol pairings are decoded until one of them
/// produces a valid message; after that only the winning lane runs until it loses synchronization.
#[derive(Debug)]
pub struct CnavFrameDecoder {
	lanes: [Lane; 2],
	locked_lane: Option<usize>,
	symbol_idx: u64,
}

impl CnavFrameDecoder {

	pub fn new() -> Self {
		Self{ lanes: [Lane::new(0), Lane::new(1)], locked_lane: None, symbol_idx: 0 }
	}

	pub fn locked_lane(&self) -> Option<usize> { self.locked_lane }

}

impl Default for CnavFrameDecoder {
	fn default() -> Self { Self::new() }
}

impl FrameDecoder for CnavFrameDecoder {

	fn apply(&mut self, symbol:Symbol) -> Result<Option<DecodedWord>, DigSigProcErr> {
		let b = symbol.bit();
		let symbol_idx = self.symbol_idx;
		self.symbol_idx += 1;

		let locked_lane = self.locked_lane;
		let mut found:Option<(usize, Vec<bool>, bool)> = None;
		for (lane_idx, lane) in self.lanes.iter_mut().enumerate() {
			if locked_lane.map_or(true, |l| l == lane_idx) {
				if let Some((bits, is_inverse)) = lane.apply(symbol_idx, b) {
					found = Some((lane_idx, bits, is_inverse));
				}
			}
		}

		if let Some(l) = locked_lane {
			if !self.lanes[l].framer.is_synchronized() {
				debug!(lane = l, "CNAV message synchronization lost");
				self.locked_lane = None;
				self.lanes[1 - l].initialize();
			}
		}

		match found {
			Some((lane_idx, bits, inverted)) => {
				if self.locked_lane.is_none() {
					debug!(lane = lane_idx, inverted, "CNAV message synchronization acquired");
					self.locked_lane = Some(lane_idx);
				}

				let header = CnavHeader::new(&bits)?;
				trace!(prn = header.prn, type_id = header.type_id, tow = header.time_of_week_truncated, "CNAV message");

				Ok(Some(DecodedWord{ payload: bits, tow_ms: header.time_of_week_ms(), inverted, header: header.into() }))
			},
			None => Ok(None)
		}
	}

	fn initialize(&mut self) {
		for lane in self.lanes.iter_mut() { lane.initialize(); }
		self.locked_lane = None;
		self.symbol_idx = 0;
	}

	fn format(&self) -> TelemetryFormat { super::CNAV_FORMAT }

}
