
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::gnss::gps_l5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error("unable to parse configuration: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("invalid configuration: {0}")]
	Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryDecoderConfig {
	/// Longest run of symbols without a valid word before the channel is declared lost
	pub max_symbols_without_valid_frame: u64,
	pub dump_enabled: bool,
	pub dump_target: String,
	/// Upper bound on symbols consumed per call to `general_work`; `None` consumes everything offered
	pub max_symbols_per_call: Option<usize>,
	/// Overrides the frame alignment offset of the message format
	pub frame_alignment_offset_ms: Option<u32>,
}

impl Default for TelemetryDecoderConfig {
	fn default() -> Self {
		Self {
			max_symbols_without_valid_frame: gps_l5::DEFAULT_MAX_SYMBOLS_WITHOUT_VALID_FRAME,
			dump_enabled: false,
			dump_target: String::from("telemetry.dat"),
			max_symbols_per_call: None,
			frame_alignment_offset_ms: None,
		}
	}
}

impl TelemetryDecoderConfig {

	pub fn from_json_file<P: AsRef<Path>>(path:P) -> Result<Self, ConfigError> {
		let reader = BufReader::new(File::open(path)?);
		let config:Self = serde_json::from_reader(reader)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_json_str(s:&str) -> Result<Self, ConfigError> {
		let config:Self = serde_json::from_str(s)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_symbols_per_call == Some(0) {
			return Err(ConfigError::Invalid("max_symbols_per_call must be at least 1"));
		}
		if self.dump_enabled && self.dump_target.is_empty() {
			return Err(ConfigError::Invalid("dump_enabled requires a dump_target"));
		}
		Ok(())
	}

	/// Dump file name for a given channel, e.g. `telemetry.dat` becomes `telemetry_ch3.dat`
	pub fn dump_filename(&self, channel:i32) -> String { channel_dump_filename(&self.dump_target, channel) }

}

pub fn channel_dump_filename(target:&str, channel:i32) -> String {
	match target.rsplit_once('.') {
		Some((stem, ext)) if !stem.is_empty() => format!("{}_ch{}.{}", stem, channel, ext),
		_ => format!("{}_ch{}", target, channel),
	}
}

#[cfg(test)]
mod tests {

	use super::*;

	#[test]
	fn missing_fields_take_defaults() {
		let config = TelemetryDecoderConfig::from_json_str(r#"{ "max_symbols_without_valid_frame": 5000 }"#).unwrap();
		assert_eq!(config.max_symbols_without_valid_frame, 5000);
		assert!(!config.dump_enabled);
		assert_eq!(config.max_symbols_per_call, None);
		assert_eq!(TelemetryDecoderConfig::from_json_str("{}").unwrap(), TelemetryDecoderConfig::default());
	}

	#[test]
	fn rejects_bad_values() {
		assert!(matches!(TelemetryDecoderConfig::from_json_str(r#"{ "max_symbols_per_call": 0 }"#), Err(ConfigError::Invalid(_))));
		assert!(matches!(TelemetryDecoderConfig::from_json_str(r#"{ "dump_enabled": true, "dump_target": "" }"#), Err(ConfigError::Invalid(_))));
		assert!(matches!(TelemetryDecoderConfig::from_json_str("not json"), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn per_channel_dump_names() {
		let mut config = TelemetryDecoderConfig::default();
		assert_eq!(config.dump_filename(3), "telemetry_ch3.dat");
		config.dump_target = String::from("/tmp/l5_tlm");
		assert_eq!(config.dump_filename(0), "/tmp/l5_tlm_ch0");
	}

	#[test]
	fn reads_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("tlm.json");
		std::fs::write(&path, r#"{ "dump_enabled": true, "dump_target": "x.dat", "frame_alignment_offset_ms": 120 }"#).unwrap();
		let config = TelemetryDecoderConfig::from_json_file(&path).unwrap();
		assert!(config.dump_enabled);
		assert_eq!(config.frame_alignment_offset_ms, Some(120));
		assert!(matches!(TelemetryDecoderConfig::from_json_file(dir.path().join("missing.json")), Err(ConfigError::Io(_))));
	}

}
