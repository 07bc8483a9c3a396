
pub mod bools_to_int;

/// Wrap a millisecond time-of-week value into [0, one week).
pub fn wrap_tow_ms(tow_ms:u64) -> u32 {
	(tow_ms % (crate::gnss::MS_PER_WEEK as u64)) as u32
}
