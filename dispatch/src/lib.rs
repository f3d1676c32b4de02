//! `gateway-dispatch` — the message-dispatch core of the WASM gateway.
//!
//! One exchange flows: raw bytes → codec decode → router resolve →
//! handler → codec encode → raw bytes. The pieces:
//!
//! - [`handler::Handler`] — closed set of request handlers
//! - [`router::Router`] — write-once discriminant → handler registry
//! - [`dispatch::Dispatcher`] — the exchange state machine
//! - [`boundary::BufferLedger`] — exactly-once release tracking for
//!   buffers handed to the host
//!
//! Everything here is pure and host-agnostic; the `cdylib` guest crate
//! wires it to the linear-memory calling convention.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod handler;
pub mod router;
pub mod dispatch;
pub mod boundary;

// Re-export key types for convenience
pub use boundary::BufferLedger;
pub use dispatch::{DispatchState, Dispatcher};
pub use handler::Handler;
pub use router::Router;
