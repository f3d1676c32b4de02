//! Exchange boundary types — request and response frames.
//!
//! These types define what crosses the host boundary in either
//! direction. A [`Request`] is created by the codec on ingress and
//! consumed exactly once by a single handler; a [`Response`] is created
//! by a handler (or by the dispatch core on fault containment) and
//! consumed by the codec on egress. Both are immutable once constructed.

use alloc::vec::Vec;

use crate::error::ExchangeFault;
use crate::types::Discriminant;

/// A decoded request: discriminant plus opaque payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The tag identifying the request kind.
    pub discriminant: Discriminant,
    /// Opaque payload. May contain arbitrary binary content, including
    /// embedded zero bytes.
    pub payload: Vec<u8>,
}

impl Request {
    /// Build a request from a discriminant and payload.
    pub fn new(discriminant: Discriminant, payload: Vec<u8>) -> Self {
        Self {
            discriminant,
            payload,
        }
    }
}

/// Wire status byte of a response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResponseStatus {
    /// The exchange succeeded; the payload is the handler result.
    Success = 0,
    /// The exchange faulted; the payload is the rendered fault message.
    Fault = 1,
}

impl ResponseStatus {
    /// Convert from a wire status byte.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Success),
            1 => Some(Self::Fault),
            _ => None,
        }
    }

    /// Returns true if this is the success status.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl core::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Fault => write!(f, "FAULT"),
        }
    }
}

/// The outcome of one exchange: a success payload or a fault descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Success payload bytes.
    Success(Vec<u8>),
    /// Structured fault, preserved with full diagnostic detail.
    Fault(ExchangeFault),
}

impl Response {
    /// Build a success response.
    pub fn success(payload: Vec<u8>) -> Self {
        Self::Success(payload)
    }

    /// Build a fault response from any recoverable fault.
    pub fn fault(fault: impl Into<ExchangeFault>) -> Self {
        Self::Fault(fault.into())
    }

    /// Returns true if this is a success response.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The wire status byte this response encodes to.
    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::Success(_) => ResponseStatus::Success,
            Self::Fault(_) => ResponseStatus::Fault,
        }
    }
}
