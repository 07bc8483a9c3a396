use crate::Symbol;
use crate::block::{Block, BlockFunctionality, BlockResult};
use crate::gnss::{gps_l5, Satellite};
use crate::gnss::gps_l5::cnav::encoder::CnavSimulation;
use crate::gnss::telemetry_decode::{ControlCommand, TelemetryDecoderConfig, TelemetryOutput};

// Emits its input whenever it is a multiple of `mod_val`; control replaces `mod_val`
struct MockFilter {
	pub mod_val: u32
}

impl BlockFunctionality<u32, (), u32, u32> for MockFilter {

	fn control(&mut self, control:&u32) -> Result<(), &'static str> {
		if *control == 0 { return Err("mod_val must be nonzero"); }
		self.mod_val = *control;
		Ok(())
	}

	fn apply(&mut self, input:&u32) -> BlockResult<u32> {
		if input % self.mod_val == 0 {
			BlockResult::Ready(*input)
		} else {
			BlockResult::NotReady
		}
	}

}

#[tokio::test]
async fn control_applies_at_next_input() {

	let mut blk = Block::from(MockFilter{ mod_val: 7 });

	for input in 0..29 { blk.tx_input.send(input).await.unwrap(); }
	let mut results:Vec<u32> = vec![];
	while results.last() != Some(&28) {
		results.push(blk.rx_output.recv().await.unwrap());
	}

	blk.tx_control.send(10).await.unwrap();
	for input in 29..55 { blk.tx_input.send(input).await.unwrap(); }

	results.extend(blk.shutdown().await.unwrap());
	assert_eq!(results, vec![0, 7, 14, 21, 28, 30, 40, 50]);

}

#[tokio::test]
async fn control_error_stops_block() {

	let blk = Block::from(MockFilter{ mod_val: 3 });
	blk.tx_control.send(0).await.unwrap();
	blk.tx_input.send(3).await.unwrap();

	assert_eq!(blk.shutdown().await, Err("mod_val must be nonzero"));

}

#[tokio::test]
async fn telemetry_decoder_in_a_block() {

	let sim = CnavSimulation::new(8, 300, 4);
	let config = TelemetryDecoderConfig{ max_symbols_without_valid_frame: 5000, ..TelemetryDecoderConfig::default() };
	let mut blk = Block::from(gps_l5::new_telemetry_decoder(30, &config));

	// Wrong satellite at first; fixed before any symbol goes in
	blk.tx_control.send(ControlCommand::Reassign{ satellite: Satellite::gps(8), channel: 3 }).await.unwrap();

	let mut outputs:Vec<TelemetryOutput> = vec![];
	for s in sim.symbols().unwrap() {
		blk.tx_input.send(s).await.unwrap();
		while let Ok(o) = blk.rx_output.try_recv() { outputs.push(o); }
	}
	blk.tx_input.send(Symbol(1.0)).await.unwrap();
	outputs.extend(blk.shutdown().await.unwrap());

	assert_eq!(outputs.len(), 3);
	for o in &outputs {
		match o {
			TelemetryOutput::NavMessage(ev) => {
				assert_eq!(ev.satellite, Satellite::gps(8));
				assert_eq!(ev.channel, 3);
			},
			other => panic!("unexpected output {:?}", other),
		}
	}

}
