
use crate::DigSigProcErr;

// All conversions are MSB first, which is the bit order of GPS navigation messages

fn fold_bits(bools:&[bool]) -> u64 {
	bools.iter().fold(0u64, |acc, b| (acc << 1) | (*b as u64))
}

/// One hex digit per four bits; a trailing partial nibble is padded with zeros on the right
pub fn to_hex_string(x:&[bool]) -> String {
	x.chunks(4)
		.map(|nibble| format!("{:X}", fold_bits(nibble) << (4 - nibble.len())))
		.collect()
}

pub fn to_u8(bools:&[bool]) -> Result<u8, DigSigProcErr> {
	if bools.len() <= 8 { Ok(fold_bits(bools) as u8) }
	else { Err(DigSigProcErr::InvalidTelemetryData("x.len() > 8 in bools_to_int::to_u8")) }
}

pub fn to_u32(bools:&[bool]) -> Result<u32, DigSigProcErr> {
	if bools.len() <= 32 { Ok(fold_bits(bools) as u32) }
	else { Err(DigSigProcErr::InvalidTelemetryData("x.len() > 32 in bools_to_int::to_u32")) }
}

/// Inverse of `to_u32`: the `n` least significant bits of `x`, MSB first.
pub fn from_u32(x:u32, n:usize) -> Result<Vec<bool>, DigSigProcErr> {
	if n <= 32 { Ok((0..n).rev().map(|i| (x >> i) & 1 == 1).collect()) }
	else { Err(DigSigProcErr::InvalidTelemetryData("n > 32 in bools_to_int::from_u32")) }
}
