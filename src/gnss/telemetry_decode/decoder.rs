
use tracing::{debug, info, warn};

use crate::Symbol;
use crate::gnss::Satellite;
use super::{DecodedWord, FrameDecoder, LockState, TelemetryDecoderConfig, TelemetryFormat};
use super::config::channel_dump_filename;
use super::adapter::FrameDecoderAdapter;
use super::dispatch::{LockLostNotice, NavMessageEvent, TelemetryOutput, TelemetrySink};
use super::dump::{DumpRecord, TelemetryDump};
use super::supervisor::LockLossSupervisor;
use super::synchro::TowTracker;

/// Per-channel telemetry decoder.  Symbols go in one at a time; validated, time-tagged navigation
/// messages and lock-loss notices come out in the same order as the symbols that caused them.
///
/// One instance per channel.  Changing the satellite or channel does not reset anything by itself;
/// call `reset` afterwards.
pub struct TelemetryDecoder<F: FrameDecoder> {
	satellite: Satellite,
	channel: i32,
	max_symbols_per_call: Option<usize>,
	adapter: FrameDecoderAdapter<F>,
	synchro: TowTracker,
	supervisor: LockLossSupervisor,
	/// Configured dump target; the file actually written is suffixed with the channel
	dump_target: Option<String>,
	/// Channel the current dump file was opened for
	dump_channel: Option<i32>,
	dump: TelemetryDump,
}

impl<F: FrameDecoder> TelemetryDecoder<F> {

	pub fn new(frame_decoder:F, satellite:Satellite, config:&TelemetryDecoderConfig) -> Self {
		let format = frame_decoder.format();
		let offset_ms = config.frame_alignment_offset_ms.unwrap_or(format.frame_alignment_offset_ms);
		let dump_target = if config.dump_enabled { Some(config.dump_target.clone()) } else { None };

		debug!(%satellite, format = format.name, offset_ms, max_gap = config.max_symbols_without_valid_frame, "telemetry decoder created");

		Self {
			satellite,
			channel: 0,
			max_symbols_per_call: config.max_symbols_per_call,
			adapter: FrameDecoderAdapter::new(frame_decoder),
			synchro: TowTracker::new(format.symbol_period_ms, offset_ms),
			supervisor: LockLossSupervisor::new(config.max_symbols_without_valid_frame),
			dump_target,
			dump_channel: None,
			dump: TelemetryDump::disabled(),
		}
	}

	/// Replace the diagnostic dump, e.g. with an in-memory writer.  The configured dump target is
	/// no longer used after this.
	pub fn with_dump(mut self, dump:TelemetryDump) -> Self {
		self.dump_target = None;
		self.dump = dump;
		self
	}

	// Read-only getter methods
	pub fn satellite(&self) -> Satellite { self.satellite }
	pub fn channel(&self) -> i32 { self.channel }
	pub fn format(&self) -> TelemetryFormat { self.adapter.format() }
	pub fn lock_state(&self) -> LockState { self.synchro.state() }
	pub fn is_inverted(&self) -> bool { self.synchro.is_inverted() }
	pub fn tow_at_current_symbol_ms(&self) -> u32 { self.synchro.tow_at_current_symbol_ms() }
	pub fn tow_at_preamble_ms(&self) -> u32 { self.synchro.tow_at_preamble_ms() }
	pub fn sample_counter(&self) -> u64 { self.synchro.sample_counter() }
	pub fn symbols_since_valid_word(&self) -> u64 { self.supervisor.symbols_since_valid_word() }
	pub fn dump(&self) -> &TelemetryDump { &self.dump }
	pub fn faults(&self) -> u64 { self.adapter.faults() }

	pub fn set_satellite(&mut self, satellite:Satellite) {
		debug!(channel = self.channel, from = %self.satellite, to = %satellite, "satellite assigned");
		self.satellite = satellite;
	}

	pub fn set_channel(&mut self, channel:i32) {
		debug!(satellite = %self.satellite, from = self.channel, to = channel, "channel assigned");
		self.channel = channel;
	}

	/// Abandon synchronization and start acquiring again.  Time of week and the sample counter are
	/// kept.  Calling this twice in a row is the same as calling it once.
	pub fn reset(&mut self) {
		self.synchro.reset();
		self.supervisor.reset();
		self.adapter.initialize();
		debug!(channel = self.channel, satellite = %self.satellite, "telemetry decoder reset");
	}

	/// Process one symbol
	pub fn apply(&mut self, symbol:Symbol) -> Option<TelemetryOutput> {
		let opt_word:Option<DecodedWord> = self.adapter.submit(symbol);
		self.synchro.apply(opt_word.as_ref());

		let ans = match opt_word {
			Some(word) => {
				if self.supervisor.notified_failure() {
					info!(channel = self.channel, satellite = %self.satellite, tow_ms = word.tow_ms, "telemetry lock recovered");
				}
				self.supervisor.valid_word();

				if word.header.prn != self.satellite.prn {
					warn!(channel = self.channel, satellite = %self.satellite, msg_prn = word.header.prn, "message PRN does not match channel satellite");
				}

				debug!(channel = self.channel, satellite = %self.satellite, tow_ms = word.tow_ms, msg_type = word.header.msg_type,
					inverted = word.inverted, "valid navigation message");

				Some(TelemetryOutput::NavMessage(NavMessageEvent {
					satellite: self.satellite,
					channel: self.channel,
					tow_at_preamble_ms: self.synchro.tow_at_preamble_ms(),
					tow_at_current_symbol_ms: self.synchro.tow_at_current_symbol_ms(),
					sample_counter: self.synchro.sample_counter(),
					inverted: word.inverted,
					header: word.header,
					payload: word.payload,
				}))
			},
			None => {
				let symbols_without_valid_frame = self.supervisor.symbols_since_valid_word() + 1;
				if self.supervisor.missed_word() {
					self.synchro.declare_lost();
					warn!(channel = self.channel, satellite = %self.satellite, symbols_without_valid_frame,
						threshold = self.supervisor.max_symbols_without_valid_frame(), "telemetry lock lost");
					Some(TelemetryOutput::LockLost(LockLostNotice {
						satellite: self.satellite,
						channel: self.channel,
						sample_counter: self.synchro.sample_counter(),
						symbols_without_valid_frame,
					}))
				} else { None }
			}
		};

		self.open_channel_dump();
		self.dump.append(&DumpRecord {
			tow_at_current_symbol_s: self.synchro.tow_at_current_symbol_ms() as f64 / 1000.0,
			sample_counter: self.synchro.sample_counter(),
			tow_at_preamble_s: self.synchro.tow_at_preamble_ms() as f64 / 1000.0,
			lock_state: self.synchro.state(),
			inverted: self.synchro.is_inverted(),
		});

		ans
	}

	// Opened lazily under the channel's own file name, and reopened when the channel changes
	fn open_channel_dump(&mut self) {
		if let Some(target) = &self.dump_target {
			if self.dump_channel != Some(self.channel) {
				self.dump = TelemetryDump::create(channel_dump_filename(target, self.channel));
				self.dump_channel = Some(self.channel);
			}
		}
	}

	/// Consume as many of `symbols` as allowed, sending any outputs to `sink`.  Returns the number of
	/// symbols consumed; the caller offers the rest again on the next call.
	pub fn general_work<S: TelemetrySink>(&mut self, symbols:&[Symbol], sink:&mut S) -> usize {
		let n = match self.max_symbols_per_call {
			Some(max) => symbols.len().min(max),
			None      => symbols.len(),
		};

		for symbol in &symbols[..n] {
			if let Some(output) = self.apply(*symbol) {
				sink.send(output);
			}
		}

		n
	}

}
