//! End-to-end tests for the full dispatch pipeline:
//! raw request bytes → codec → router → handler → codec → raw response bytes.

mod common;

use common::*;
use gateway_dispatch::handler::{
    encode_relay_payload, DISC_DIGEST, DISC_ECHO, DISC_RELAY, DISC_VERIFY,
};
use gateway_dispatch::DispatchState;
use gateway_primitives::codec::decode_response;
use gateway_primitives::crypto::{digest_blake3, generate_keypair, sign_ed25519};
use gateway_primitives::ResponseStatus;

// ── Test: echo round-trip, byte-exact ──

#[test]
fn test_echo_exchange_exact_bytes() {
    let mut gateway = build_gateway();

    let input = [0x01, 0x00, 0x00, 0x00, 0x02, 0xAA, 0xBB];
    let output = gateway.dispatch(&input).unwrap();

    assert_eq!(output, vec![0x00, 0x00, 0x00, 0x00, 0x02, 0xAA, 0xBB]);
}

// ── Test: unregistered discriminant ──

#[test]
fn test_unsupported_discriminant_exchange() {
    let mut gateway = build_gateway();

    let input = [0x09, 0x00, 0x00, 0x00, 0x00];
    let output = gateway.dispatch(&input).unwrap();

    let (status, payload) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Fault);
    assert_eq!(payload, b"unsupported discriminant 9");
}

// ── Test: declared length past end of buffer ──

#[test]
fn test_truncated_payload_exchange() {
    let mut gateway = build_gateway();

    // Declared length 255, buffer ends after the header.
    let input = [0x01, 0x00, 0x00, 0x00, 0xFF];
    let output = gateway.dispatch(&input).unwrap();

    let (status, payload) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Fault);
    let text = std::str::from_utf8(&payload).unwrap();
    assert!(text.contains("invalid payload length"));
    assert!(text.contains("255"));
}

// ── Test: digest exchange ──

#[test]
fn test_digest_exchange() {
    let mut gateway = build_gateway();

    let mut payload = vec![0u8]; // BLAKE3
    payload.extend_from_slice(b"gateway");
    let output = gateway.dispatch(&frame(DISC_DIGEST, &payload)).unwrap();

    let (status, digest) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Success);
    assert_eq!(digest, digest_blake3(b"gateway").to_vec());
}

// ── Test: signature verification exchange ──

#[test]
fn test_verify_exchange() {
    let mut gateway = build_gateway();
    let (vk, sk) = generate_keypair();
    let message = b"signed envelope";
    let signature = sign_ed25519(message, &sk);

    let mut payload = Vec::new();
    payload.extend_from_slice(vk.as_bytes());
    payload.extend_from_slice(&signature);
    payload.extend_from_slice(message);

    let output = gateway.dispatch(&frame(DISC_VERIFY, &payload)).unwrap();
    let (status, result) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Success);
    assert_eq!(result, vec![1]);

    // Tampered message verifies false, still a success response.
    let mut tampered = Vec::new();
    tampered.extend_from_slice(vk.as_bytes());
    tampered.extend_from_slice(&signature);
    tampered.extend_from_slice(b"altered envelope");

    let output = gateway.dispatch(&frame(DISC_VERIFY, &tampered)).unwrap();
    let (status, result) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Success);
    assert_eq!(result, vec![0]);
}

// ── Test: relay exchange ──

#[test]
fn test_relay_exchange() {
    let mut gateway = build_gateway();
    let payload = encode_relay_payload("bridge.main", "transfer", &[0x01, 0x02, 0x03]);

    let output = gateway.dispatch(&frame(DISC_RELAY, &payload)).unwrap();

    let (status, envelope) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Success);
    assert_eq!(envelope, payload);
}

#[test]
fn test_relay_malformed_envelope_faults() {
    let mut gateway = build_gateway();
    let payload = encode_relay_payload("", "transfer", &[]);

    let output = gateway.dispatch(&frame(DISC_RELAY, &payload)).unwrap();

    let (status, message) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Fault);
    let text = std::str::from_utf8(&message).unwrap();
    assert!(text.contains("relay"));
    assert!(text.contains("receiver must not be empty"));
}

// ── Test: strictly sequential exchanges ──

#[test]
fn test_sequential_exchanges_independent() {
    let mut gateway = build_gateway();

    for i in 0..16u8 {
        let payload = vec![i; i as usize];
        let output = gateway.dispatch(&frame(DISC_ECHO, &payload)).unwrap();
        let (status, echoed) = decode_response(&output).unwrap();
        assert_eq!(status, ResponseStatus::Success);
        assert_eq!(echoed, payload);
        assert_eq!(gateway.state(), DispatchState::Idle);
    }
    assert_eq!(gateway.exchanges(), 16);
}

// ── Test: a faulted exchange does not poison the next one ──

#[test]
fn test_fault_then_success() {
    let mut gateway = build_gateway();

    let output = gateway.dispatch(&[]).unwrap();
    let (status, _) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Fault);

    let output = gateway.dispatch(&frame(DISC_ECHO, &[0x42])).unwrap();
    let (status, payload) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Success);
    assert_eq!(payload, vec![0x42]);
}

// ── Test: embedded zero bytes survive the pipeline ──

#[test]
fn test_binary_payload_with_zeros() {
    let mut gateway = build_gateway();
    let payload = vec![0x00, 0x00, 0xFF, 0x00];

    let output = gateway.dispatch(&frame(DISC_ECHO, &payload)).unwrap();

    let (status, echoed) = decode_response(&output).unwrap();
    assert_eq!(status, ResponseStatus::Success);
    assert_eq!(echoed, payload);
}
