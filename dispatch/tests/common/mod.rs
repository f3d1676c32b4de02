//! Shared helpers for the integration tests.

use gateway_dispatch::handler::{DISC_DIGEST, DISC_ECHO, DISC_RELAY, DISC_VERIFY};
use gateway_dispatch::{Dispatcher, Handler, Router};

/// Build a dispatcher with the full handler set registered.
pub fn build_gateway() -> Dispatcher {
    let mut router = Router::new();
    router.register(DISC_ECHO, Handler::Echo).unwrap();
    router.register(DISC_DIGEST, Handler::Digest).unwrap();
    router
        .register(DISC_VERIFY, Handler::VerifySignature)
        .unwrap();
    router.register(DISC_RELAY, Handler::Relay).unwrap();
    Dispatcher::new(router)
}

/// Build a raw request frame: `[discriminant][len: u32 BE][payload]`.
#[allow(dead_code)]
pub fn frame(discriminant: u8, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(5 + payload.len());
    buf.push(discriminant);
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Decode a hex string into bytes. Panics on malformed input (test data).
#[allow(dead_code)]
pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    assert!(hex.len() % 2 == 0, "hex string must have even length");
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .unwrap_or_else(|_| panic!("invalid hex at position {}", i))
        })
        .collect()
}
