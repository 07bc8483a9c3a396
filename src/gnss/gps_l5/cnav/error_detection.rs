
pub const CRC_24Q_POLYNOMIAL:[bool; 25] = [true, true, false, false, false, false, true, true, false, false, true, false,
	false, true, true, false, false, true, true, true, true, true, false, true, true];

pub const CRC_BITS:usize = 24;

// Polynomial long division; what is left in the last 24 positions is the remainder
fn remainder(mut m:Vec<bool>) -> Vec<bool> {
	if m.len() < CRC_24Q_POLYNOMIAL.len() { return m; }

	for i in 0..(m.len() - CRC_24Q_POLYNOMIAL.len() + 1) {
		if m[i] {
			for j in 0..CRC_24Q_POLYNOMIAL.len() {
				m[i+j] ^= CRC_24Q_POLYNOMIAL[j];
			}
		}
	}

	m.split_off(m.len() - CRC_BITS)
}

/// CRC-24Q parity bits for a message
pub fn crc24q(message:&[bool]) -> Vec<bool> {
	let mut m:Vec<bool> = message.to_vec();
	m.extend_from_slice(&[false; CRC_BITS]);
	remainder(m)
}

/// True if a message with its parity bits appended divides evenly by the CRC-24Q polynomial
pub fn is_crc_ok(message_w_crc:&[bool]) -> bool {
	if message_w_crc.len() <= CRC_BITS { return false; }
	remainder(message_w_crc.to_vec()).iter().all(|b| !*b)
}
