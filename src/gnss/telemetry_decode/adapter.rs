
use tracing::debug;

use crate::Symbol;
use super::{DecodedWord, FrameDecoder, TelemetryFormat};

/// Feeds symbols one at a time into a `FrameDecoder` and absorbs its faults, so a corrupt word never
/// escapes as an error
pub struct FrameDecoderAdapter<F: FrameDecoder> {
	inner: F,
	faults: u64,
}

impl<F: FrameDecoder> FrameDecoderAdapter<F> {

	pub fn new(inner:F) -> Self { Self{ inner, faults: 0 } }

	pub fn format(&self) -> TelemetryFormat { self.inner.format() }
	pub fn faults(&self) -> u64 { self.faults }
	pub fn inner(&self) -> &F { &self.inner }

	pub fn submit(&mut self, symbol:Symbol) -> Option<DecodedWord> {
		match self.inner.apply(symbol) {
			Ok(opt_word) => opt_word,
			Err(e) => {
				// Only the word in progress is lost; start looking for the next one right away
				self.faults += 1;
				debug!(error = %e, faults = self.faults, "frame decoder fault, re-initializing");
				self.inner.initialize();
				None
			}
		}
	}

	pub fn initialize(&mut self) { self.inner.initialize(); }

}

#[cfg(test)]
mod tests {

	use super::*;
	use crate::DigSigProcErr;
	use crate::gnss::telemetry_decode::MessageHeader;

	const FORMAT:TelemetryFormat = TelemetryFormat{ name: "mock", symbol_period_ms: 10, frame_alignment_offset_ms: 0, symbols_per_message: 4 };

	// Reports a word on every fourth symbol, faults on negative symbols
	struct Every4th { count: usize, initializations: usize }

	impl FrameDecoder for Every4th {
		fn apply(&mut self, symbol:Symbol) -> Result<Option<DecodedWord>, DigSigProcErr> {
			if symbol.0 < 0.0 { return Err(DigSigProcErr::InvalidTelemetryData("negative")); }
			self.count += 1;
			if self.count % 4 == 0 {
				let header = MessageHeader{ prn: 1, msg_type: 10, alert: false };
				Ok(Some(DecodedWord{ payload: vec![true; 4], tow_ms: self.count as u32, inverted: false, header }))
			} else { Ok(None) }
		}
		fn initialize(&mut self) { self.count = 0; self.initializations += 1; }
		fn format(&self) -> TelemetryFormat { FORMAT }
	}

	#[test]
	fn passes_words_through() {
		let mut adapter = FrameDecoderAdapter::new(Every4th{ count: 0, initializations: 0 });
		let words:Vec<Option<DecodedWord>> = (0..8).map(|_| adapter.submit(Symbol(1.0))).collect();
		assert_eq!(words.iter().filter(|w| w.is_some()).count(), 2);
		assert!(words[3].is_some());
		assert!(words[7].is_some());
		assert_eq!(adapter.format(), FORMAT);
	}

	#[test]
	fn fault_resets_only_the_current_word() {
		let mut adapter = FrameDecoderAdapter::new(Every4th{ count: 0, initializations: 0 });
		for _ in 0..3 { assert!(adapter.submit(Symbol(1.0)).is_none()); }
		assert!(adapter.submit(Symbol(-1.0)).is_none());
		assert_eq!(adapter.faults(), 1);
		assert_eq!(adapter.inner().initializations, 1);

		// Four more good symbols are needed after the fault
		for _ in 0..3 { assert!(adapter.submit(Symbol(1.0)).is_none()); }
		assert!(adapter.submit(Symbol(1.0)).is_some());
	}

}
