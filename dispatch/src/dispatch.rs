//! Dispatch core — the exchange state machine.
//!
//! One exchange walks `Idle → Decoding → Routing → Handling → Encoding
//! → Idle`. Any fault in `Decoding`, `Routing`, or `Handling` moves to
//! `Faulted`, which always continues to `Encoding`: faults become
//! status=1 responses, never dropped calls.
//!
//! Invariant: every entry into `Decoding` terminates in exactly one
//! `Encoding`, so the host always receives a response buffer — except
//! for fatal conditions, where no response is fabricated and the caller
//! reports a boundary error code instead.

use alloc::vec::Vec;

use gateway_primitives::codec::{decode_request, encode_response};
use gateway_primitives::{ExchangeFault, FatalFault, Response};

use crate::router::Router;

/// Observable phase of the dispatch core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Waiting for the boundary adapter to deliver a buffer.
    Idle,
    /// Decoding the request frame.
    Decoding,
    /// Resolving the discriminant to a handler.
    Routing,
    /// Running the resolved handler.
    Handling,
    /// Encoding the outgoing response frame.
    Encoding,
    /// A recoverable fault occurred; next stop is `Encoding`.
    Faulted,
}

/// The dispatch core. Owns the sealed router and drives exchanges
/// strictly one at a time.
#[derive(Debug)]
pub struct Dispatcher {
    router: Router,
    state: DispatchState,
    exchanges: u64,
}

impl Dispatcher {
    /// Build a dispatcher, sealing the router. No registration is
    /// possible once a dispatcher owns the table.
    pub fn new(mut router: Router) -> Self {
        router.seal();
        Self {
            router,
            state: DispatchState::Idle,
            exchanges: 0,
        }
    }

    /// Drive one complete exchange: raw request bytes in, encoded
    /// response bytes out.
    ///
    /// `Ok` always carries a well-formed response frame, even for
    /// malformed input. `Err` is fatal: the exchange could not be
    /// completed and no response exists.
    pub fn dispatch(&mut self, input: &[u8]) -> Result<Vec<u8>, FatalFault> {
        if self.state != DispatchState::Idle {
            // Exchanges must not overlap within one instance.
            return Err(FatalFault::InvariantViolation(
                "dispatch entered while an exchange is in flight",
            ));
        }

        let response = self.run_exchange(input);

        self.state = DispatchState::Encoding;
        let encoded = encode_response(&response);
        self.state = DispatchState::Idle;
        self.exchanges += 1;

        Ok(encoded)
    }

    /// Decode, route, and handle. Any fault short-circuits through
    /// `Faulted` and comes back as a fault response for encoding.
    fn run_exchange(&mut self, input: &[u8]) -> Response {
        self.state = DispatchState::Decoding;
        let request = match decode_request(input) {
            Ok(request) => request,
            Err(fault) => return self.contain(fault.into()),
        };

        self.state = DispatchState::Routing;
        let handler = match self.router.resolve(request.discriminant) {
            Ok(handler) => handler,
            Err(fault) => return self.contain(fault.into()),
        };

        self.state = DispatchState::Handling;
        match handler.handle(request) {
            // A handler-signaled fault is contained like any other:
            // descriptor preserved verbatim.
            Response::Fault(fault) => self.contain(fault),
            response => response,
        }
    }

    fn contain(&mut self, fault: ExchangeFault) -> Response {
        self.state = DispatchState::Faulted;
        Response::Fault(fault)
    }

    /// Current state. `Idle` between exchanges.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Number of completed exchanges.
    pub fn exchanges(&self) -> u64 {
        self.exchanges
    }

    /// The sealed routing table.
    pub fn router(&self) -> &Router {
        &self.router
    }
}
