//! `gateway-wasm-guest` — WASM cdylib for the protocol gateway.
//!
//! This crate compiles to a `.wasm` artifact exporting the two entry
//! points of the host boundary:
//!
//! - `gateway_dispatch` — run one request/response exchange
//! - `gateway_release` — release a response buffer previously returned
//!
//! Host functions are imported under the `gateway_host` WASM module.
//!
//! **Determinism:** the guest uses no OS randomness, filesystem,
//! networking, or system time. On `wasm32-unknown-unknown` the standard
//! library exposes no OS services, so the only effects are the two
//! exports and the `gateway_host` log import. All entry points return
//! `i32` error codes (0 = OK) and never panic across the boundary.
//!
//! The `rlib` crate type exists so the adapter can be exercised by the
//! native test build; the host-facing artifact is the `cdylib`.

mod imports;
mod runtime;
mod exports;

pub use exports::{gateway_dispatch, gateway_release};
