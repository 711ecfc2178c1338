/// Width of the zero-padded plan position that prefixes every output key.
pub const POSITION_WIDTH: usize = 8;

/// `zero_pad(position, 8) + "_" + base_name`.
pub fn allocate_key(position: u64, base_name: &str) -> String {
    format!("{:0width$}_{}", position, base_name, width = POSITION_WIDTH)
}

/// Byte-level form of [`allocate_key`] for keys read back from a store.
pub fn allocate_key_bytes(position: u64, base_name: &[u8]) -> Vec<u8> {
    let mut key = format!("{:0width$}_", position, width = POSITION_WIDTH).into_bytes();
    key.extend_from_slice(base_name);
    key
}

/// Drops one leading `<digits>_` position prefix. Keys without one are
/// returned unchanged.
pub fn strip_position_prefix(key: &[u8]) -> &[u8] {
    match key.iter().position(|b| *b == b'_') {
        Some(idx) if idx > 0 && key[..idx].iter().all(u8::is_ascii_digit) => &key[idx + 1..],
        _ => key,
    }
}

/// Re-keys a record copied from an existing store under its new plan position.
pub fn rekey_existing(position: u64, original_key: &[u8]) -> Vec<u8> {
    allocate_key_bytes(position, strip_position_prefix(original_key))
}
