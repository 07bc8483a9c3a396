
use serde::{Serialize, Deserialize};

use crate::DigSigProcErr;
use crate::gnss::gps_l5::GPS_CNAV_TOW_UNIT_MS;
use crate::gnss::telemetry_decode::MessageHeader;
use crate::utils::bools_to_int;
use super::MESSAGE_BITS_NO_CRC;

/// Largest TOW count that still falls inside one week
pub const MAX_TOW_COUNT:u32 = 100_799;

/// Fields common to every CNAV message type (IS-GPS-705, section 20.3.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnavHeader {
	pub prn: u8,
	pub type_id: u8,
	pub time_of_week_truncated: u32,
	pub alert_flag: bool,
}

impl CnavHeader {

	pub fn new(bits:&[bool]) -> Result<Self, DigSigProcErr> {
		if bits.len() == MESSAGE_BITS_NO_CRC {
			let prn                    = bools_to_int::to_u8( &bits[ 8..14])?;
			let type_id                = bools_to_int::to_u8( &bits[14..20])?;
			let time_of_week_truncated = bools_to_int::to_u32(&bits[20..37])?;
			let alert_flag             = bits[37];

			if time_of_week_truncated > MAX_TOW_COUNT {
				return Err(DigSigProcErr::InvalidTelemetryData("CNAV TOW count past the end of the week"));
			}

			Ok(Self{ prn, type_id, time_of_week_truncated, alert_flag })
		} else {
			Err(DigSigProcErr::InvalidTelemetryData("Expected a 276-bit message with CRC removed but got a different size"))
		}
	}

	/// Time of week at the start of the next message [ms]
	pub fn time_of_week_ms(&self) -> u32 { self.time_of_week_truncated * GPS_CNAV_TOW_UNIT_MS }

}

impl From<CnavHeader> for MessageHeader {
	fn from(h:CnavHeader) -> Self {
		MessageHeader{ prn: h.prn, msg_type: h.type_id, alert: h.alert_flag }
	}
}

#[cfg(test)]
mod tests {

	use super::*;
	use super::super::encoder;

	#[test]
	fn parses_common_fields() {
		let msg = encoder::build_message(24, 30, 100_000, true, &encoder::filler_body(0)).unwrap();
		let header = CnavHeader::new(&msg[..MESSAGE_BITS_NO_CRC]).unwrap();
		assert_eq!(header, CnavHeader{ prn: 24, type_id: 30, time_of_week_truncated: 100_000, alert_flag: true });
		assert_eq!(header.time_of_week_ms(), 600_000_000);

		let common:MessageHeader = header.into();
		assert_eq!(common, MessageHeader{ prn: 24, msg_type: 30, alert: true });
	}

	#[test]
	fn rejects_wrong_length_and_bad_tow() {
		assert!(CnavHeader::new(&[false; 300]).is_err());

		let mut bits = vec![false; MESSAGE_BITS_NO_CRC];
		for b in bits[20..37].iter_mut() { *b = true; }
		assert_eq!(CnavHeader::new(&bits), Err(DigSigProcErr::InvalidTelemetryData("CNAV TOW count past the end of the week")));
	}

}
