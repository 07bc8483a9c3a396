
extern crate clap;
extern crate colored;
extern crate l5_telemetry;
extern crate serde_json;

use std::fs::File;

use clap::{Arg, App};
use colored::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use l5_telemetry::{io, Symbol};
use l5_telemetry::gnss::gps_l5;
use l5_telemetry::gnss::gps_l5::cnav::encoder::CnavSimulation;
use l5_telemetry::gnss::telemetry_decode::{TelemetryDecoderConfig, TelemetryOutput};

const CHUNK_SIZE:usize = 1000;

fn parse_num_messages(s:&str) -> Option<u32> {
	match s.parse::<u32>() {
		Ok(n) if n > 0 => Some(n),
		_ => None,
	}
}

fn main() {

	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let matches = App::new("GPS L5 Telemetry Decoder")
		.version("0.1.0")
		.about("Takes L5 prompt correlator outputs (little-endian f64, one per 10 ms symbol) and produces CNAV messages as JSON lines")
		.arg(Arg::with_name("filename")
			.short("f").long("filename")
			.help("Input filename")
			.takes_value(true).required_unless("simulate"))
		.arg(Arg::with_name("config")
			.short("c").long("config")
			.help("JSON decoder configuration")
			.takes_value(true))
		.arg(Arg::with_name("prn")
			.long("prn")
			.takes_value(true).required(true))
		.arg(Arg::with_name("channel")
			.long("channel")
			.takes_value(true).default_value("0"))
		.arg(Arg::with_name("simulate")
			.long("simulate")
			.help("Decode a simulated broadcast of this many messages instead of a file")
			.takes_value(true).conflicts_with("filename"))
		.arg(Arg::with_name("save_simulation")
			.long("save_simulation")
			.help("Also write the simulated symbols to this file")
			.takes_value(true).requires("simulate"))
		.get_matches();

	let prn:u8 = match matches.value_of("prn").unwrap_or("").parse() {
		Ok(prn) if (1..=63).contains(&prn) => prn,
		_ => {
			eprintln!("{}", "PRN must be an integer from 1 to 63".red());
			std::process::exit(2);
		}
	};
	let channel:i32 = match matches.value_of("channel").unwrap_or("0").parse() {
		Ok(ch) => ch,
		Err(_) => {
			eprintln!("{}", "Channel must be an integer".red());
			std::process::exit(2);
		}
	};

	let config = match matches.value_of("config") {
		Some(path) => match TelemetryDecoderConfig::from_json_file(path) {
			Ok(config) => config,
			Err(e) => {
				error!(path, error = %e, "unable to load configuration");
				std::process::exit(1);
			}
		},
		None => TelemetryDecoderConfig::default(),
	};

	let symbols:Box<dyn Iterator<Item = Symbol>> = match matches.value_of("simulate") {
		Some(n) => {
			let num_messages:u32 = match parse_num_messages(n) {
				Some(num) => num,
				None => {
					eprintln!("{}", "Number of simulated messages must be a positive integer".red());
					std::process::exit(2);
				}
			};
			let sim = CnavSimulation::new(prn, 0, num_messages);
			let symbols = match sim.symbols() {
				Ok(s) => s,
				Err(e) => {
					error!(error = %e, "unable to simulate broadcast");
					std::process::exit(1);
				}
			};
			info!(prn, num_messages, num_symbols = symbols.len(), "simulated CNAV broadcast");

			if let Some(path) = matches.value_of("save_simulation") {
				if let Err(e) = File::create(path).and_then(|f| io::write_symbols(f, &symbols)) {
					error!(path, error = %e, "unable to save simulated symbols");
				}
			}

			Box::new(symbols.into_iter())
		},
		None => {
			let fname = matches.value_of("filename").unwrap_or("");
			match File::open(fname) {
				Ok(f) => {
					info!(filename = fname, "decoding symbol file");
					Box::new(io::SymbolSource::new(f).map(|(s, _)| s))
				},
				Err(e) => {
					error!(filename = fname, error = %e, "unable to open input");
					std::process::exit(1);
				}
			}
		}
	};

	let mut tlm = gps_l5::new_telemetry_decoder(prn, &config);
	tlm.set_channel(channel);

	let mut outputs:Vec<TelemetryOutput> = vec![];
	let mut chunk:Vec<Symbol> = Vec::with_capacity(CHUNK_SIZE);
	let mut num_messages:usize = 0;
	let mut num_lock_lost:usize = 0;

	let mut symbols = symbols.peekable();
	while symbols.peek().is_some() {
		chunk.clear();
		chunk.extend(symbols.by_ref().take(CHUNK_SIZE));

		let mut consumed:usize = 0;
		while consumed < chunk.len() {
			consumed += tlm.general_work(&chunk[consumed..], &mut outputs);
		}

		for output in outputs.drain(..) {
			match &output {
				TelemetryOutput::NavMessage(ev) => {
					num_messages += 1;
					eprintln!("{:8.2} [sec] {} {}", (ev.sample_counter as f64) * 0.01, ev.satellite,
						format!("CNAV type {:2}, TOW {} [ms]{}", ev.header.msg_type, ev.tow_at_preamble_ms, if ev.inverted { " (inverted)" } else { "" }).green());
				},
				TelemetryOutput::LockLost(notice) => {
					num_lock_lost += 1;
					eprintln!("{:8.2} [sec] {} {}", (notice.sample_counter as f64) * 0.01, notice.satellite,
						format!("Lock lost after {} symbols without a valid message", notice.symbols_without_valid_frame).red());
				},
			}

			match serde_json::to_string(&output) {
				Ok(line) => println!("{}", line),
				Err(e) => error!(error = %e, "unable to serialize output"),
			}
		}
	}

	eprintln!("{}", format!("{} symbols, {} messages, {} lock loss notices, {} decoder faults",
		tlm.sample_counter(), num_messages, num_lock_lost, tlm.faults()).yellow());

}
