//! The handler set — the closed collection of request kinds the
//! gateway can process.
//!
//! Each handler consumes one decoded [`Request`] and produces a
//! [`Response`]. Business-logic failures are returned as
//! `HandlerFault` responses; handlers never panic, never block, and
//! never allocate unboundedly relative to the input.
//!
//! ## Payload formats (all integers big-endian)
//!
//! - `Echo` (0x01): any bytes → the same bytes.
//! - `Digest` (0x02): `[algorithm: 1 byte][data]` → 32-byte digest.
//!   Algorithm `0` = BLAKE3, `1` = SHA-256.
//! - `VerifySignature` (0x03): `[pubkey: 32][signature: 64][message]`
//!   → 1 byte (`1` = valid, `0` = invalid).
//! - `Relay` (0x04): `[receiver_len: u32][receiver][method_len: u32]
//!   [method][args_len: u32][args]` → the canonical re-encoding of the
//!   validated envelope.

use alloc::format;
use alloc::vec::Vec;

use gateway_primitives::crypto::{digest_blake3, digest_sha256, verify_ed25519};
use gateway_primitives::types::{u32_from_be_bytes, u32_to_be_bytes, Discriminant};
use gateway_primitives::{HandlerFault, Request, Response};

/// Discriminant for the echo handler.
pub const DISC_ECHO: Discriminant = 0x01;
/// Discriminant for the digest handler.
pub const DISC_DIGEST: Discriminant = 0x02;
/// Discriminant for the signature verification handler.
pub const DISC_VERIFY: Discriminant = 0x03;
/// Discriminant for the relay envelope handler.
pub const DISC_RELAY: Discriminant = 0x04;

/// Digest algorithm tag for BLAKE3.
const ALGO_BLAKE3: u8 = 0;
/// Digest algorithm tag for SHA-256.
const ALGO_SHA256: u8 = 1;

/// VerifySignature payload: pubkey(32) + signature(64).
const VERIFY_PREFIX_LEN: usize = 32 + 64;

/// Maximum length of a relay receiver or method name.
const MAX_RELAY_NAME_LEN: usize = 256;

/// A registered handler — one variant per supported request kind.
///
/// The set is closed: routing data stays data-driven (the router maps
/// discriminants to these values) without any runtime reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Return the payload unchanged.
    Echo,
    /// Hash the payload with a selectable algorithm.
    Digest,
    /// Verify an Ed25519 signature over a framed payload.
    VerifySignature,
    /// Validate and canonically re-encode a forward envelope.
    Relay,
}

impl Handler {
    /// Process one request. Consumes the request; a handler never
    /// retains payload references past the call.
    pub fn handle(&self, request: Request) -> Response {
        match self {
            Self::Echo => Response::success(request.payload),
            Self::Digest => handle_digest(&request.payload),
            Self::VerifySignature => handle_verify(&request.payload),
            Self::Relay => handle_relay(&request.payload),
        }
    }
}

fn handle_digest(payload: &[u8]) -> Response {
    let Some((&algorithm, data)) = payload.split_first() else {
        return Response::fault(HandlerFault::new("digest", "missing algorithm byte"));
    };

    let digest = match algorithm {
        ALGO_BLAKE3 => digest_blake3(data),
        ALGO_SHA256 => digest_sha256(data),
        other => {
            return Response::fault(HandlerFault::new(
                "digest",
                format!("unknown algorithm {}", other),
            ))
        }
    };

    Response::success(digest.to_vec())
}

fn handle_verify(payload: &[u8]) -> Response {
    if payload.len() < VERIFY_PREFIX_LEN {
        return Response::fault(HandlerFault::new(
            "verify",
            format!(
                "payload too short: need at least {} bytes, have {}",
                VERIFY_PREFIX_LEN,
                payload.len()
            ),
        ));
    }

    let mut public_key = [0u8; 32];
    public_key.copy_from_slice(&payload[..32]);
    let mut signature = [0u8; 64];
    signature.copy_from_slice(&payload[32..VERIFY_PREFIX_LEN]);
    let message = &payload[VERIFY_PREFIX_LEN..];

    // An invalid signature is a business result, not a fault.
    let valid = verify_ed25519(message, &signature, &public_key);
    Response::success(alloc::vec![u8::from(valid)])
}

/// A validated relay envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RelayEnvelope<'a> {
    receiver: &'a str,
    method: &'a str,
    args: &'a [u8],
}

fn handle_relay(payload: &[u8]) -> Response {
    let envelope = match parse_relay(payload) {
        Ok(envelope) => envelope,
        Err(fault) => return Response::fault(fault),
    };

    // Canonical re-encoding: same frame layout, rebuilt from the
    // validated fields. The host submits this envelope onward.
    let mut out = Vec::with_capacity(payload.len());
    write_section(&mut out, envelope.receiver.as_bytes());
    write_section(&mut out, envelope.method.as_bytes());
    write_section(&mut out, envelope.args);
    Response::success(out)
}

fn parse_relay(payload: &[u8]) -> Result<RelayEnvelope<'_>, HandlerFault> {
    let mut pos = 0;

    let receiver = read_section(payload, &mut pos, "receiver")?;
    let method = read_section(payload, &mut pos, "method")?;
    let args = read_section(payload, &mut pos, "args")?;

    if pos != payload.len() {
        return Err(HandlerFault::new(
            "relay",
            format!("{} trailing bytes after envelope", payload.len() - pos),
        ));
    }

    let receiver = validate_name(receiver, "receiver")?;
    let method = validate_name(method, "method")?;

    Ok(RelayEnvelope {
        receiver,
        method,
        args,
    })
}

/// Read one `[len: u32 BE][bytes]` section starting at `*pos`.
fn read_section<'a>(
    payload: &'a [u8],
    pos: &mut usize,
    field: &'static str,
) -> Result<&'a [u8], HandlerFault> {
    let len = u32_from_be_bytes(payload.get(*pos..).unwrap_or(&[]))
        .ok_or_else(|| HandlerFault::new("relay", format!("truncated {} length", field)))?
        as usize;
    *pos += 4;

    let end = pos
        .checked_add(len)
        .filter(|&end| end <= payload.len())
        .ok_or_else(|| HandlerFault::new("relay", format!("truncated {} bytes", field)))?;
    let section = &payload[*pos..end];
    *pos = end;
    Ok(section)
}

/// Receiver and method names must be non-empty, bounded UTF-8.
fn validate_name<'a>(bytes: &'a [u8], field: &'static str) -> Result<&'a str, HandlerFault> {
    if bytes.is_empty() {
        return Err(HandlerFault::new(
            "relay",
            format!("{} must not be empty", field),
        ));
    }
    if bytes.len() > MAX_RELAY_NAME_LEN {
        return Err(HandlerFault::new(
            "relay",
            format!("{} exceeds {} bytes", field, MAX_RELAY_NAME_LEN),
        ));
    }
    core::str::from_utf8(bytes)
        .map_err(|_| HandlerFault::new("relay", format!("{} must be valid UTF-8", field)))
}

fn write_section(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&u32_to_be_bytes(bytes.len() as u32));
    out.extend_from_slice(bytes);
}

/// Encode a relay envelope payload. Host/test-side helper.
pub fn encode_relay_payload(receiver: &str, method: &str, args: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + receiver.len() + method.len() + args.len());
    write_section(&mut out, receiver.as_bytes());
    write_section(&mut out, method.as_bytes());
    write_section(&mut out, args);
    out
}
