//! Fault taxonomy for the gateway dispatch pipeline.
//!
//! Three fault families are recoverable and always surface to the host
//! as encoded status=1 responses: [`DecodeFault`], [`UnsupportedFault`],
//! and [`HandlerFault`] (united as [`ExchangeFault`]).
//!
//! [`MisuseFault`] marks a wiring or usage defect (host or init code)
//! and fails loudly at the point of misuse. [`FatalFault`] is
//! unrecoverable: the boundary adapter returns an error code and does
//! not fabricate a response.

use alloc::string::String;
use core::fmt;

use crate::types::Discriminant;

/// Boundary error codes returned by the exported entry points.
///
/// All exported functions return `i32` codes. `0` = OK, non-zero = error.
/// These repr values are part of the host contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    BadPointer = 1,
    InvalidRelease = 2,
    DuplicateRegistration = 3,
    RegistrationAfterInit = 4,
    AllocationExhausted = 5,
    InvariantViolation = 6,
}

impl ErrorCode {
    /// Convert from an i32 code crossing the boundary.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::BadPointer),
            2 => Some(Self::InvalidRelease),
            3 => Some(Self::DuplicateRegistration),
            4 => Some(Self::RegistrationAfterInit),
            5 => Some(Self::AllocationExhausted),
            6 => Some(Self::InvariantViolation),
            _ => None,
        }
    }

    /// Return the i32 representation of this code.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns true if this is the `Ok` variant.
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::BadPointer => write!(f, "ERR_BAD_POINTER"),
            Self::InvalidRelease => write!(f, "ERR_INVALID_RELEASE"),
            Self::DuplicateRegistration => write!(f, "ERR_DUPLICATE_REGISTRATION"),
            Self::RegistrationAfterInit => write!(f, "ERR_REGISTRATION_AFTER_INIT"),
            Self::AllocationExhausted => write!(f, "ERR_ALLOCATION_EXHAUSTED"),
            Self::InvariantViolation => write!(f, "ERR_INVARIANT_VIOLATION"),
        }
    }
}

/// A malformed or truncated request buffer.
///
/// Produced by the wire codec on ingress. Every variant carries the
/// machine-checkable reason plus enough context to diagnose the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFault {
    /// Buffer too short to contain the fixed header.
    Truncated {
        /// Minimum bytes required.
        needed: usize,
        /// Bytes actually present.
        have: usize,
    },

    /// The discriminant value is not valid on the wire (reserved).
    UnknownDiscriminant(Discriminant),

    /// Declared payload length disagrees with the bytes present, or
    /// exceeds the payload bound.
    InvalidPayloadLength {
        /// Length declared in the header.
        declared: u32,
        /// Payload bytes actually available after the header.
        available: usize,
    },
}

impl fmt::Display for DecodeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, have } => {
                write!(f, "truncated frame: need {} bytes, have {}", needed, have)
            }
            Self::UnknownDiscriminant(d) => {
                write!(f, "unknown discriminant {}", d)
            }
            Self::InvalidPayloadLength { declared, available } => {
                write!(
                    f,
                    "invalid payload length: declared {}, available {}",
                    declared, available
                )
            }
        }
    }
}

/// A well-formed request whose discriminant has no registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedFault {
    /// The unregistered discriminant.
    pub discriminant: Discriminant,
}

impl fmt::Display for UnsupportedFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported discriminant {}", self.discriminant)
    }
}

/// A business-logic failure signaled by a handler.
///
/// Kind and message are preserved verbatim through the dispatch
/// pipeline and into the encoded fault response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFault {
    /// Handler-defined fault category.
    pub kind: String,
    /// Human-readable detail.
    pub message: String,
}

impl HandlerFault {
    /// Build a fault from a kind and message.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for HandlerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A recoverable exchange fault — what a status=1 response carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeFault {
    /// The request buffer could not be decoded.
    Decode(DecodeFault),
    /// No handler is registered for the discriminant.
    Unsupported(UnsupportedFault),
    /// The resolved handler signaled a failure.
    Handler(HandlerFault),
}

impl fmt::Display for ExchangeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(fault) => write!(f, "{}", fault),
            Self::Unsupported(fault) => write!(f, "{}", fault),
            Self::Handler(fault) => write!(f, "{}", fault),
        }
    }
}

impl From<DecodeFault> for ExchangeFault {
    fn from(fault: DecodeFault) -> Self {
        Self::Decode(fault)
    }
}

impl From<UnsupportedFault> for ExchangeFault {
    fn from(fault: UnsupportedFault) -> Self {
        Self::Unsupported(fault)
    }
}

impl From<HandlerFault> for ExchangeFault {
    fn from(fault: HandlerFault) -> Self {
        Self::Handler(fault)
    }
}

/// A wiring or usage defect in the host or initialization code.
///
/// Misuse is detectable, never silently ignored, and never memory
/// corruption. It does not produce a response buffer; it surfaces as a
/// non-zero boundary code at the point of misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MisuseFault {
    /// `release` was called with a pointer/length pair that was never
    /// issued, or was already released.
    InvalidRelease,
    /// `register` was called after the registry was sealed.
    RegistrationAfterInit(Discriminant),
    /// A second handler was registered for an occupied discriminant
    /// (first registration wins).
    DuplicateRegistration(Discriminant),
}

impl MisuseFault {
    /// Map to the boundary error code reported to the host.
    pub fn error_code(self) -> ErrorCode {
        match self {
            Self::InvalidRelease => ErrorCode::InvalidRelease,
            Self::RegistrationAfterInit(_) => ErrorCode::RegistrationAfterInit,
            Self::DuplicateRegistration(_) => ErrorCode::DuplicateRegistration,
        }
    }
}

impl fmt::Display for MisuseFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRelease => {
                write!(f, "release of unrecognized or already-released buffer")
            }
            Self::RegistrationAfterInit(d) => {
                write!(f, "registration of discriminant {} after init", d)
            }
            Self::DuplicateRegistration(d) => {
                write!(f, "duplicate registration of discriminant {}", d)
            }
        }
    }
}

/// An unrecoverable failure. The module cannot safely continue; the
/// boundary adapter must not fabricate a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalFault {
    /// Memory could not be allocated for the exchange.
    AllocationExhausted,
    /// A dispatch invariant was broken (e.g. overlapping exchanges).
    InvariantViolation(&'static str),
}

impl FatalFault {
    /// Map to the boundary error code reported to the host.
    pub fn error_code(self) -> ErrorCode {
        match self {
            Self::AllocationExhausted => ErrorCode::AllocationExhausted,
            Self::InvariantViolation(_) => ErrorCode::InvariantViolation,
        }
    }
}

impl fmt::Display for FatalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationExhausted => write!(f, "allocation exhausted"),
            Self::InvariantViolation(detail) => {
                write!(f, "invariant violation: {}", detail)
            }
        }
    }
}
