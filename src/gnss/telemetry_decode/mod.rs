
use serde::{Serialize, Deserialize};

use crate::{DigSigProcErr, Symbol};

pub mod adapter;
pub mod config;
pub mod control;
pub mod decoder;
pub mod dispatch;
pub mod dump;
pub mod supervisor;
pub mod synchro;


pub use self::config::TelemetryDecoderConfig;
pub use self::control::ControlCommand;
pub use self::decoder::TelemetryDecoder;
pub use self::dispatch::{LockLostNotice, NavMessageEvent, TelemetryOutput, TelemetrySink};
pub use self::synchro::LockState;

/// Timing constants of a particular navigation message format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TelemetryFormat {
	pub name: &'static str,
	pub symbol_period_ms: u32,
	/// Time from the TOW reported with a message to the symbol on which the message is reported
	pub frame_alignment_offset_ms: u32,
	pub symbols_per_message: u32,
}

/// Fields that every navigation message carries in its header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
	pub prn: u8,
	pub msg_type: u8,
	pub alert: bool,
}

/// A message that passed the integrity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWord {
	pub payload: Vec<bool>,
	pub tow_ms: u32,
	pub inverted: bool,
	pub header: MessageHeader,
}

/// Bit-level decoding of one navigation message format.  Implementations own all of their
/// synchronization and integrity checking; the telemetry decoder only sees symbols going in and
/// validated words coming out.
pub trait FrameDecoder {

	/// Consume one symbol.  `Ok(Some(_))` if this symbol completed a valid word.  An `Err` means the
	/// internal state is no longer usable and the decoder will be re-initialized by the caller.
	fn apply(&mut self, symbol:Symbol) -> Result<Option<DecodedWord>, DigSigProcErr>;

	/// Drop any partial word and start searching for synchronization from scratch
	fn initialize(&mut self);

	fn format(&self) -> TelemetryFormat;

}

impl<F: FrameDecoder + ?Sized> FrameDecoder for Box<F> {
	fn apply(&mut self, symbol:Symbol) -> Result<Option<DecodedWord>, DigSigProcErr> { (**self).apply(symbol) }
	fn initialize(&mut self) { (**self).initialize() }
	fn format(&self) -> TelemetryFormat { (**self).format() }
}
