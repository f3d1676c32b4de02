//! `gateway-primitives` — foundational types for the WASM protocol gateway.
//!
//! This crate provides the canonical boundary types, the fault taxonomy,
//! the wire codec, and the deterministic crypto helpers shared by the
//! dispatch crate and the WASM guest.
//!
//! Supports `#![no_std]` for WASM guest compatibility (use `default-features = false`).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod types;
pub mod error;
pub mod frame;
pub mod codec;
pub mod crypto;

// Re-export commonly used items at the crate root for convenience.
pub use types::{
    Digest, Discriminant, MAX_PAYLOAD_LEN, RESERVED_DISCRIMINANT, WIRE_HEADER_LEN,
};
pub use error::{
    DecodeFault, ErrorCode, ExchangeFault, FatalFault, HandlerFault, MisuseFault,
    UnsupportedFault,
};
pub use frame::{Request, Response, ResponseStatus};
pub use codec::{decode_request, decode_response, encode_request, encode_response};
