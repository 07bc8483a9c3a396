use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;

use crate::{DigSigProcErr as DSPErr};

#[cfg(test)]
mod tests;

pub enum BlockResult<U> {
	NotReady,
	Ready(U),
	Err(DSPErr)
}

// A type that implements BlockFunctionality consumes instances of T and
// produces either Ready(U) if an output is ready, NotReady if an output
// is not ready, or Err(_) if the operation fails
pub trait BlockFunctionality<C, D, T, U> {

	// Requiring immutable references to the input and control values is the least restrictive
	// thing because if the block needs an owned value, it can clone it
	fn control(&mut self, control:&C) -> Result<D, &'static str>;
	fn apply(&mut self, input:&T) -> BlockResult<U>;

}

/// Runs a `BlockFunctionality` in its own task, fed through channels
pub struct Block<C: 'static + Send, T: 'static + Send, U: 'static + Send> {
	pub tx_control: mpsc::Sender<C>,
	pub tx_input:   mpsc::Sender<T>,
	pub rx_output:  mpsc::Receiver<U>,
	pub handles:    Vec<JoinHandle<Result<(), &'static str>>>,
}

impl<C: 'static + Send, T: 'static + Send, U: 'static + Send> Block<C, T, U> {

	pub fn from<B: 'static + BlockFunctionality<C, (), T, U> + Send>(b:B) -> Self {

		let (tx_control, mut rx_control) = mpsc::channel::<C>(10);
		let (tx_input,   mut rx_input)   = mpsc::channel::<T>(10);
		let (tx_output,      rx_output)  = mpsc::channel::<U>(10);

		let handle:JoinHandle<Result<(), &'static str>> = tokio::spawn(async move {

			let mut owned_b = b;

			'rx: while let Some(t) = rx_input.recv().await {

				// Interleaving control handling with input handling prevents us from having to
				// use a mutex to protect the state; every control value sent before this input
				// takes effect before it
				while let Ok(c) = rx_control.try_recv() {
					owned_b.control(&c)?;
				}

				match owned_b.apply(&t) {
					BlockResult::Ready(u) => tx_output.send(u).await.map_err(|_| "Unable to send output")?,
					BlockResult::NotReady => (),
					BlockResult::Err(e)   => {
						error!(error = %e, "error in block");
						break 'rx;
					}
				}

			}

			Ok(())
		});

		let handles = vec![handle];

		Block{ tx_control, tx_input, rx_output, handles }
	}

	/// Close the inputs, wait for the task to drain them and return whatever output nobody has
	/// received yet
	pub async fn shutdown(self) -> Result<Vec<U>, &'static str> {

		let Block{ tx_control, tx_input, mut rx_output, handles } = self;

		drop(tx_control);
		drop(tx_input);

		// The output channel closes when the task exits
		let mut remaining:Vec<U> = vec![];
		while let Some(u) = rx_output.recv().await {
			remaining.push(u);
		}

		for handle in handles {
			handle.await.map_err(|_| "Block task panicked")??;
		}

		Ok(remaining)
	}

}
