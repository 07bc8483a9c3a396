
use crate::{DigSigProcErr, Symbol};
use crate::utils::bools_to_int;
use super::{error_correction, error_detection, MESSAGE_BITS_NO_CRC, PREAMBLE};

pub const HEADER_BITS:usize = 38;
pub const BODY_BITS:usize = MESSAGE_BITS_NO_CRC - HEADER_BITS;

/// Rate 1/2 encoder matching `error_correction::ViterbiDecoder`.  Starts from the all-zero state.
#[derive(Debug, Clone, Default)]
pub struct ConvolutionalEncoder {
	state: u8,
}

impl ConvolutionalEncoder {

	pub fn new() -> Self { Self{ state: 0 } }

	pub fn encode(&mut self, bits:&[bool]) -> Vec<bool> {
		let mut ans:Vec<bool> = Vec::with_capacity(2 * bits.len());
		for b in bits {
			let reg:u8 = self.state | if *b { 0x40 } else { 0x00 };
			let (g1, g2) = error_correction::cnav_fec(reg);
			ans.push(g1);
			ans.push(g2);
			self.state = reg >> 1;
		}
		ans
	}

}

/// A complete 300-bit message: preamble, header, body and CRC-24Q
pub fn build_message(prn:u8, type_id:u8, tow_count:u32, alert:bool, body:&[bool]) -> Result<Vec<bool>, DigSigProcErr> {
	if body.len() != BODY_BITS {
		return Err(DigSigProcErr::InvalidTelemetryData("CNAV message body must be 238 bits"));
	}

	let mut msg:Vec<bool> = PREAMBLE.to_vec();
	msg.extend(bools_to_int::from_u32(prn as u32, 6)?);
	msg.extend(bools_to_int::from_u32(type_id as u32, 6)?);
	msg.extend(bools_to_int::from_u32(tow_count, 17)?);
	msg.push(alert);
	msg.extend_from_slice(body);

	let crc = error_detection::crc24q(&msg);
	msg.extend(crc);
	Ok(msg)
}

/// Deterministic body content that changes from message to message
pub fn filler_body(seed:u32) -> Vec<bool> {
	(0..BODY_BITS as u32).map(|i| (i.wrapping_mul(2_654_435_761) ^ seed.wrapping_mul(40_503)) & 0x100 != 0).collect()
}

/// Map code symbols to the prompt values a tracking loop would report
pub fn to_symbols(code_symbols:&[bool], amplitude:f64) -> Vec<Symbol> {
	code_symbols.iter().map(|s| Symbol(if *s { amplitude } else { -amplitude })).collect()
}

/// Describes a simulated CNAV broadcast for one satellite
#[derive(Debug, Clone)]
pub struct CnavSimulation {
	pub prn: u8,
	pub first_tow_count: u32,
	pub num_messages: u32,
	/// Bits sent before the first message so the decoder starts mid-stream
	pub lead_in_bits: usize,
	pub inverted: bool,
}

impl CnavSimulation {

	pub fn new(prn:u8, first_tow_count:u32, num_messages:u32) -> Self {
		Self{ prn, first_tow_count, num_messages, lead_in_bits: 100, inverted: false }
	}

	/// Data bits of the whole broadcast, lead-in included.  Message types alternate between 10 and 11
	/// like the ephemeris pair, and TOW counts wrap at the end of the week.
	pub fn bits(&self) -> Result<Vec<bool>, DigSigProcErr> {
		let mut ans:Vec<bool> = filler_body(0xFFFF).into_iter().cycle().take(self.lead_in_bits).collect();
		for k in 0..self.num_messages {
			let tow_count = (self.first_tow_count + k + 1) % (super::message_header::MAX_TOW_COUNT + 1);
			let type_id = if k % 2 == 0 { 10 } else { 11 };
			ans.extend(build_message(self.prn, type_id, tow_count, false, &filler_body(tow_count))?);
		}
		Ok(ans)
	}

	pub fn symbols(&self) -> Result<Vec<Symbol>, DigSigProcErr> {
		let code_symbols = ConvolutionalEncoder::new().encode(&self.bits()?);
		let amplitude = if self.inverted { -1.0 } else { 1.0 };
		Ok(to_symbols(&code_symbols, amplitude))
	}

}
