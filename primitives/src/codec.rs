//! Wire codec for the host boundary.
//!
//! All multi-byte integers are big-endian. Frames are self-describing:
//! payload lengths are explicit, so payloads may contain arbitrary
//! binary content including embedded zero bytes.
//!
//! Frame layout:
//! - Request:  `[discriminant: 1 byte][payload_len: u32 BE][payload]`
//! - Response: `[status: 1 byte, 0=success 1=fault][len: u32 BE][payload or fault message]`
//!
//! `decode_request` is total over arbitrary byte buffers — every input
//! yields either a `Request` or a `DecodeFault`, never a panic.
//! `encode_response` is total over well-formed `Response` values.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::DecodeFault;
use crate::frame::{Request, Response, ResponseStatus};
use crate::types::{
    u32_from_be_bytes, u32_to_be_bytes, Discriminant, MAX_PAYLOAD_LEN,
    RESERVED_DISCRIMINANT, WIRE_HEADER_LEN,
};

/// Decode a request frame from raw bytes.
///
/// Rejection rules, in order:
/// 1. fewer than `WIRE_HEADER_LEN` bytes → `Truncated`
/// 2. reserved discriminant `0x00` → `UnknownDiscriminant`
/// 3. declared length above `MAX_PAYLOAD_LEN`, or not exactly equal to
///    the bytes following the header → `InvalidPayloadLength`
///
/// Trailing bytes are rejected: a self-describing frame must account
/// for every byte in the buffer.
pub fn decode_request(bytes: &[u8]) -> Result<Request, DecodeFault> {
    if bytes.len() < WIRE_HEADER_LEN {
        return Err(DecodeFault::Truncated {
            needed: WIRE_HEADER_LEN,
            have: bytes.len(),
        });
    }

    let discriminant = bytes[0];
    if discriminant == RESERVED_DISCRIMINANT {
        return Err(DecodeFault::UnknownDiscriminant(discriminant));
    }

    // Header is known present, so the length read cannot fail.
    let declared = match u32_from_be_bytes(&bytes[1..WIRE_HEADER_LEN]) {
        Some(len) => len,
        None => {
            return Err(DecodeFault::Truncated {
                needed: WIRE_HEADER_LEN,
                have: bytes.len(),
            })
        }
    };

    let available = bytes.len() - WIRE_HEADER_LEN;
    if declared as usize > MAX_PAYLOAD_LEN || declared as usize != available {
        return Err(DecodeFault::InvalidPayloadLength {
            declared,
            available,
        });
    }

    Ok(Request {
        discriminant,
        payload: bytes[WIRE_HEADER_LEN..].to_vec(),
    })
}

/// Encode a response frame to bytes.
///
/// Total: every `Response` has exactly one encoding. Fault responses
/// carry the rendered fault descriptor as the payload, so the host
/// receives kind and message without loss.
pub fn encode_response(response: &Response) -> Vec<u8> {
    match response {
        Response::Success(payload) => encode_frame(ResponseStatus::Success as u8, payload),
        Response::Fault(fault) => {
            let message = fault.to_string();
            encode_frame(ResponseStatus::Fault as u8, message.as_bytes())
        }
    }
}

/// Encode a request frame to bytes.
///
/// The inverse of `decode_request`. Used by a conforming host to build
/// request buffers, and by tests to exercise round-trips.
pub fn encode_request(request: &Request) -> Vec<u8> {
    encode_frame(request.discriminant, &request.payload)
}

/// Decode a response frame into its status and payload bytes.
///
/// Host-side helper: the guest only ever encodes responses, but a
/// conforming host (and the test suite) needs to read them back.
pub fn decode_response(bytes: &[u8]) -> Result<(ResponseStatus, Vec<u8>), DecodeFault> {
    if bytes.len() < WIRE_HEADER_LEN {
        return Err(DecodeFault::Truncated {
            needed: WIRE_HEADER_LEN,
            have: bytes.len(),
        });
    }

    let status = ResponseStatus::from_u8(bytes[0])
        .ok_or(DecodeFault::UnknownDiscriminant(bytes[0]))?;

    let declared = u32_from_be_bytes(&bytes[1..WIRE_HEADER_LEN]).unwrap_or(0);
    let available = bytes.len() - WIRE_HEADER_LEN;
    if declared as usize != available {
        return Err(DecodeFault::InvalidPayloadLength {
            declared,
            available,
        });
    }

    Ok((status, bytes[WIRE_HEADER_LEN..].to_vec()))
}

/// Write a `[tag][len: u32 BE][body]` frame.
fn encode_frame(tag: u8, body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(WIRE_HEADER_LEN + body.len());
    buf.push(tag);
    buf.extend_from_slice(&u32_to_be_bytes(body.len() as u32));
    buf.extend_from_slice(body);
    buf
}

/// Check whether a discriminant is valid on the wire.
pub fn is_wire_discriminant(discriminant: Discriminant) -> bool {
    discriminant != RESERVED_DISCRIMINANT
}
