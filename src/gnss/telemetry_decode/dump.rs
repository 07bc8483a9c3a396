
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use super::LockState;

pub const RECORD_SIZE_BYTES:usize = 26;

/// Per-symbol decoder state as written to the dump file.  Times are in seconds of week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DumpRecord {
	pub tow_at_current_symbol_s: f64,
	pub sample_counter: u64,
	pub tow_at_preamble_s: f64,
	pub lock_state: LockState,
	pub inverted: bool,
}

impl DumpRecord {

	pub fn write_to<W: Write>(&self, w:&mut W) -> io::Result<()> {
		w.write_f64::<LittleEndian>(self.tow_at_current_symbol_s)?;
		w.write_u64::<LittleEndian>(self.sample_counter)?;
		w.write_f64::<LittleEndian>(self.tow_at_preamble_s)?;
		w.write_u8(self.lock_state.code())?;
		w.write_u8(self.inverted as u8)
	}

	/// `Ok(None)` on a clean end of stream
	pub fn read_from<R: Read>(r:&mut R) -> io::Result<Option<Self>> {
		let tow_at_current_symbol_s = match r.read_f64::<LittleEndian>() {
			Ok(x) => x,
			Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
			Err(e) => return Err(e),
		};
		let sample_counter = r.read_u64::<LittleEndian>()?;
		let tow_at_preamble_s = r.read_f64::<LittleEndian>()?;
		let lock_state = LockState::from_code(r.read_u8()?)
			.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "unknown lock state code"))?;
		let inverted = r.read_u8()? != 0;
		Ok(Some(Self{ tow_at_current_symbol_s, sample_counter, tow_at_preamble_s, lock_state, inverted }))
	}

	pub fn read_all<R: Read>(mut r:R) -> io::Result<Vec<Self>> {
		let mut ans:Vec<Self> = vec![];
		while let Some(rec) = Self::read_from(&mut r)? { ans.push(rec); }
		Ok(ans)
	}

}

/// Append-only side channel for decoder state.  Failures are logged and otherwise ignored.
pub struct TelemetryDump {
	writer: Option<Box<dyn Write + Send>>,
	records_written: u64,
	write_failures: u64,
}

impl TelemetryDump {

	pub fn disabled() -> Self { Self{ writer: None, records_written: 0, write_failures: 0 } }

	pub fn from_writer(w:Box<dyn Write + Send>) -> Self { Self{ writer: Some(w), records_written: 0, write_failures: 0 } }

	pub fn create<P: AsRef<Path>>(path:P) -> Self {
		match File::create(path.as_ref()) {
			Ok(f) => {
				info!(path = %path.as_ref().display(), "telemetry dump enabled");
				Self::from_writer(Box::new(BufWriter::new(f)))
			},
			Err(e) => {
				warn!(path = %path.as_ref().display(), error = %e, "unable to open telemetry dump, continuing without it");
				Self::disabled()
			}
		}
	}

	pub fn is_enabled(&self) -> bool { self.writer.is_some() }
	pub fn records_written(&self) -> u64 { self.records_written }
	pub fn write_failures(&self) -> u64 { self.write_failures }

	pub fn append(&mut self, record:&DumpRecord) {
		if let Some(w) = &mut self.writer {
			match record.write_to(w) {
				Ok(()) => self.records_written += 1,
				Err(e) => {
					self.write_failures += 1;
					if self.write_failures == 1 { warn!(error = %e, "telemetry dump write failed"); }
					else { debug!(error = %e, failures = self.write_failures, "telemetry dump write failed"); }
				}
			}
		}
	}

	pub fn flush(&mut self) {
		if let Some(w) = &mut self.writer {
			if let Err(e) = w.flush() { warn!(error = %e, "telemetry dump flush failed"); }
		}
	}

}

impl Drop for TelemetryDump {
	fn drop(&mut self) { self.flush(); }
}
