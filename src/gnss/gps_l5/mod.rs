
use crate::gnss::Satellite;
use crate::gnss::telemetry_decode::{TelemetryDecoder, TelemetryDecoderConfig, TelemetryFormat};

pub mod cnav;

pub const GPS_L5_SYMBOL_PERIOD_MS:u32 = 10;
pub const GPS_L5_SYMBOLS_PER_BIT:u32 = 2;
pub const GPS_L5_CNAV_DATA_PAGE_BITS:u32 = 300;

/// CNAV time-of-week counts are in units of one message period
pub const GPS_CNAV_TOW_UNIT_MS:u32 = 6000;

/// Ten message periods without a valid message
pub const DEFAULT_MAX_SYMBOLS_WITHOUT_VALID_FRAME:u64 = (CNAV_FORMAT.symbols_per_message * 10) as u64;

// The TOW in a message refers to the end of its last bit, which leaves the Viterbi decoder one
// traceback depth later
pub const CNAV_FORMAT:TelemetryFormat = TelemetryFormat {
	name: "GPS L5 CNAV",
	symbol_period_ms: GPS_L5_SYMBOL_PERIOD_MS,
	frame_alignment_offset_ms: (cnav::error_correction::TRACEBACK_DEPTH as u32) * GPS_L5_SYMBOLS_PER_BIT * GPS_L5_SYMBOL_PERIOD_MS,
	symbols_per_message: GPS_L5_CNAV_DATA_PAGE_BITS * GPS_L5_SYMBOLS_PER_BIT,
};

pub fn new_telemetry_decoder(prn:u8, config:&TelemetryDecoderConfig) -> TelemetryDecoder<cnav::CnavFrameDecoder> {
	TelemetryDecoder::new(cnav::CnavFrameDecoder::new(), Satellite::gps(prn), config)
}
