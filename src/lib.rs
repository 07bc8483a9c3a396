
pub mod block;

pub mod io;
pub mod gnss;

pub mod utils;

/// A single demodulated navigation symbol as produced by the tracking stage (the prompt correlator
/// output).  Only the sign carries the bit; positive values are read as `true`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symbol(pub f64);

impl Symbol {

	pub fn bit(&self) -> bool { self.0 > 0.0 }

}

impl From<f64> for Symbol {
	fn from(x:f64) -> Self { Symbol(x) }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
pub enum DigSigProcErr {
	#[error("invalid telemetry data: {0}")]
	InvalidTelemetryData(&'static str),
}
