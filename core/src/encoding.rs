//! Base64 transport for binary bodies.
//!
//! The boundary only carries text, so `arrayBuffer` bodies are encoded with
//! the standard padded alphabet by the executor and decoded by the adapter.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn encode_body(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_body(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded)
}
