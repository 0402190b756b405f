//! Key exchange.

use super::GUID;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha1::{Digest, Sha1};

/// Encode an 8-byte nonce as a `sec-websocket-key` value.
#[inline]
pub fn encode_sec_key(nonce: [u8; 8]) -> [u8; 12] {
    let mut output = [0_u8; 12];
    Engine::encode_slice(&STANDARD, nonce, &mut output).unwrap();
    output
}

/// Generate a new `sec-websocket-key`.
#[inline]
pub fn new_sec_key() -> [u8; 12] { encode_sec_key(rand::random()) }

/// Derive `sec-websocket-accept` from `sec-websocket-key`.
#[inline]
pub fn derive_accept_key(sec_key: &[u8]) -> [u8; 28] {
    let mut sha1 = Sha1::default();
    sha1.update(sec_key);
    sha1.update(GUID);
    let input = sha1.finalize();
    let mut output = [0_u8; 28];
    Engine::encode_slice(&STANDARD, input, &mut output).unwrap();
    output
}
