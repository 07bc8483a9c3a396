
use serde::{Serialize, Deserialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::gnss::Satellite;
use crate::utils::bools_to_int;
use super::MessageHeader;

/// A validated navigation message on its way to the message accumulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavMessageEvent {
	pub satellite: Satellite,
	pub channel: i32,
	pub tow_at_preamble_ms: u32,
	pub tow_at_current_symbol_ms: u32,
	pub sample_counter: u64,
	pub inverted: bool,
	pub header: MessageHeader,
	pub payload: Vec<bool>,
}

impl NavMessageEvent {

	/// Payload as hex, MSB first; a 276-bit CNAV payload gives 69 digits
	pub fn payload_hex(&self) -> String { bools_to_int::to_hex_string(&self.payload) }

}

/// Sent once when a channel stops producing valid words
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LockLostNotice {
	pub satellite: Satellite,
	pub channel: i32,
	pub sample_counter: u64,
	pub symbols_without_valid_frame: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryOutput {
	NavMessage(NavMessageEvent),
	LockLost(LockLostNotice),
}

/// Downstream side of a telemetry decoder.  Delivery is synchronous and in symbol order.
pub trait TelemetrySink {
	fn send(&mut self, output:TelemetryOutput);
}

impl TelemetrySink for Vec<TelemetryOutput> {
	fn send(&mut self, output:TelemetryOutput) { self.push(output); }
}

impl TelemetrySink for mpsc::UnboundedSender<TelemetryOutput> {
	fn send(&mut self, output:TelemetryOutput) {
		if mpsc::UnboundedSender::send(self, output).is_err() {
			warn!("telemetry receiver dropped, discarding output");
		}
	}
}
