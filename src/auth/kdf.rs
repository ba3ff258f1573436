/// PBKDF2-HMAC-SHA256 key derivation
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Output length: one SHA-256 block
pub const KEY_LEN: usize = 32;

/// Derive a 32-byte key from `password` and `salt`.
///
/// Single-block PBKDF2 (RFC 8018 section 5.2): `T1 = U1 ^ U2 ^ ... ^ Uc`.
pub fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let prf = HmacSha256::new_from_slice(password).expect("HMAC can take key of any size");

    let mut mac = prf.clone();
    mac.update(salt);
    mac.update(&1u32.to_be_bytes());
    let mut u = [0u8; KEY_LEN];
    u.copy_from_slice(&mac.finalize().into_bytes());
    let mut block = u;

    for _ in 1..iterations.max(1) {
        let mut mac = prf.clone();
        mac.update(&u);
        u.copy_from_slice(&mac.finalize().into_bytes());
        for (acc, x) in block.iter_mut().zip(u.iter()) {
            *acc ^= x;
        }
    }

    block
}
