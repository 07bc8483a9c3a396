
use std::fmt;

use serde::{Serialize, Deserialize};

pub const MS_PER_WEEK:u32 = 604_800_000;

/// Constellation-independent parts of telemetry decoding: the per-channel state machine that turns
/// symbols into time-tagged navigation messages
pub mod telemetry_decode;

pub mod gps_l5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GnssSystem {
	Gps,
	Galileo,
	Glonass,
	Beidou,
}

impl GnssSystem {

	pub fn code(&self) -> char { match self {
		GnssSystem::Gps     => 'G',
		GnssSystem::Galileo => 'E',
		GnssSystem::Glonass => 'R',
		GnssSystem::Beidou  => 'C',
	}}

}

/// Which satellite a channel is currently assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Satellite {
	pub system: GnssSystem,
	pub prn: u8,
}

impl Satellite {

	pub fn gps(prn:u8) -> Self { Self{ system: GnssSystem::Gps, prn } }

}

impl fmt::Display for Satellite {
	fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{:02}", self.system.code(), self.prn)
	}
}

#[cfg(test)]
mod tests {

	use super::*;

	#[test]
	fn satellite_display() {
		assert_eq!(format!("{}", Satellite::gps(7)), "G07");
		assert_eq!(format!("{}", Satellite{ system: GnssSystem::Galileo, prn: 11 }), "E11");
	}

}
