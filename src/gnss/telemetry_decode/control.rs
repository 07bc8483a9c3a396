
use serde::{Serialize, Deserialize};

use crate::Symbol;
use crate::block::{BlockFunctionality, BlockResult};
use crate::gnss::Satellite;
use super::{FrameDecoder, TelemetryDecoder, TelemetryOutput};

/// Control surface of a telemetry decoder running inside a `Block`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlCommand {
	SetSatellite(Satellite),
	SetChannel(i32),
	Reset,
	/// Reassign the channel to another satellite and start over
	Reassign{ satellite:Satellite, channel:i32 },
}

impl<F: FrameDecoder> BlockFunctionality<ControlCommand, (), Symbol, TelemetryOutput> for TelemetryDecoder<F> {

	fn control(&mut self, control:&ControlCommand) -> Result<(), &'static str> {
		match control {
			ControlCommand::SetSatellite(sat) => self.set_satellite(*sat),
			ControlCommand::SetChannel(ch)    => self.set_channel(*ch),
			ControlCommand::Reset             => self.reset(),
			ControlCommand::Reassign{ satellite, channel } => {
				self.set_satellite(*satellite);
				self.set_channel(*channel);
				self.reset();
			}
		}
		Ok(())
	}

	fn apply(&mut self, input:&Symbol) -> BlockResult<TelemetryOutput> {
		match TelemetryDecoder::apply(self, *input) {
			Some(output) => BlockResult::Ready(output),
			None         => BlockResult::NotReady,
		}
	}

}
