
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::warn;

use crate::Symbol;

pub const BUFFER_SIZE:usize = 2048;

/// Reads a stream of little-endian `f64` soft symbols, yielding each one with its index
pub struct SymbolSource<S: Read> {
	src: BufReader<S>,
	idx: usize,
	done: bool,
}

impl<S: Read> SymbolSource<S> {

	pub fn new(src:S) -> Self {
		Self { src: BufReader::with_capacity(BUFFER_SIZE * 8, src), idx: 0, done: false }
	}

	/// Number of symbols yielded so far
	pub fn symbols_read(&self) -> usize { self.idx }

}

impl<S: Read> Iterator for SymbolSource<S> {
	type Item = (Symbol, usize);

	fn next(&mut self) -> Option<(Symbol, usize)> {
		if self.done { return None; }

		match self.src.read_f64::<LittleEndian>() {
			Ok(x) => {
				let ans = (Symbol(x), self.idx);
				self.idx += 1;
				Some(ans)
			},
			Err(e) => {
				// A trailing partial symbol also ends up here
				if e.kind() != ErrorKind::UnexpectedEof {
					warn!(error = %e, symbols_read = self.idx, "unable to read symbol source");
				}
				self.done = true;
				None
			}
		}
	}
}

/// Writes symbols in the format `SymbolSource` reads
pub fn write_symbols<W: Write>(dest:W, symbols:&[Symbol]) -> std::io::Result<()> {
	let mut dest = BufWriter::new(dest);
	for s in symbols {
		dest.write_f64::<LittleEndian>(s.0)?;
	}
	dest.flush()
}
