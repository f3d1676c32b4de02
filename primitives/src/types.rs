//! Core type aliases and wire constants for the gateway.
//!
//! These are shared by the codec, the dispatch pipeline, and the WASM
//! guest boundary.

/// The tag identifying which kind of request a buffer encodes.
pub type Discriminant = u8;

/// 32-byte digest produced by the hash handlers.
pub type Digest = [u8; 32];

/// Wire header size: 1-byte discriminant (or status) + 4-byte payload length.
pub const WIRE_HEADER_LEN: usize = 5;

/// Reserved discriminant value. `0x00` is the response success status
/// byte and is never valid as a request discriminant on the wire.
pub const RESERVED_DISCRIMINANT: Discriminant = 0x00;

/// Maximum payload length accepted on the wire.
///
/// Bounds memory growth per exchange: a declared length above this is
/// rejected at decode time, before any payload allocation.
pub const MAX_PAYLOAD_LEN: usize = 1024 * 1024; // 1 MiB

/// Encode a u32 as big-endian bytes (the wire byte order).
pub fn u32_to_be_bytes(v: u32) -> [u8; 4] {
    v.to_be_bytes()
}

/// Decode a u32 from big-endian bytes.
pub fn u32_from_be_bytes(bytes: &[u8]) -> Option<u32> {
    if bytes.len() < 4 {
        return None;
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    Some(u32::from_be_bytes(buf))
}
