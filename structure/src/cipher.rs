//! XOR cipher over the encrypted payload

/// Derive the 4-byte repeating key from the two header words
pub fn derive_key(identity: u32, secondary_key: u32) -> [u8; 4] {
    (identity ^ secondary_key).to_le_bytes()
}

/// XOR every byte with `key[i % 4]`.
///
/// The transform is its own inverse: applying it twice with the same key
/// returns the original bytes, so it serves for both encryption and
/// decryption.
pub fn apply(payload: &mut [u8], key: [u8; 4]) {
    for (i, byte) in payload.iter_mut().enumerate() {
        *byte ^= key[i % 4];
    }
}

/// Wrapping sum of the little-endian u16 words of a decrypted payload
pub fn checksum(payload: &[u8]) -> u16 {
    payload
        .chunks_exact(2)
        .fold(0u16, |sum, word| {
            sum.wrapping_add(u16::from_le_bytes([word[0], word[1]]))
        })
}
