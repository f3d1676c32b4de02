//! Process-wide guest runtime: the sealed dispatcher plus the buffer
//! ledger.
//!
//! The runtime is built lazily on the first entry-point call. Handler
//! registration happens exactly once, inside that build, and the router
//! is sealed before the first exchange — there is no window in which
//! registration and dispatch can interleave.

use gateway_dispatch::handler::{DISC_DIGEST, DISC_ECHO, DISC_RELAY, DISC_VERIFY};
use gateway_dispatch::{BufferLedger, Dispatcher, Handler, Router};
use gateway_primitives::{ErrorCode, MisuseFault};

/// The module's only mutable state.
pub struct Runtime {
    pub dispatcher: Dispatcher,
    pub ledger: BufferLedger,
}

impl Runtime {
    /// Wire the handler set and seal the router.
    ///
    /// A registration failure here is a build defect; it surfaces as a
    /// misuse error code from the entry point rather than being
    /// papered over.
    fn build() -> Result<Self, MisuseFault> {
        let mut router = Router::new();
        router.register(DISC_ECHO, Handler::Echo)?;
        router.register(DISC_DIGEST, Handler::Digest)?;
        router.register(DISC_VERIFY, Handler::VerifySignature)?;
        router.register(DISC_RELAY, Handler::Relay)?;

        Ok(Self {
            dispatcher: Dispatcher::new(router),
            ledger: BufferLedger::new(),
        })
    }
}

/// Run a closure against the runtime, building it on first use.
///
/// Returns the closure's result, or the error code of a failed build.
pub fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> Result<R, ErrorCode> {
    cell::with(|slot| {
        if slot.is_none() {
            match Runtime::build() {
                Ok(runtime) => *slot = Some(runtime),
                Err(misuse) => return Err(misuse.error_code()),
            }
        }
        // Just populated above if it was empty.
        match slot.as_mut() {
            Some(runtime) => Ok(f(runtime)),
            None => Err(ErrorCode::InvariantViolation),
        }
    })
}

#[cfg(target_arch = "wasm32")]
mod cell {
    use super::Runtime;
    use core::cell::UnsafeCell;

    /// Single-threaded runtime slot.
    ///
    /// Sound only because the sandbox provides no threads and the host
    /// must serialize calls into one instance; exchanges never overlap.
    struct RuntimeCell(UnsafeCell<Option<Runtime>>);

    unsafe impl Sync for RuntimeCell {}

    static RUNTIME: RuntimeCell = RuntimeCell(UnsafeCell::new(None));

    pub fn with<R>(f: impl FnOnce(&mut Option<Runtime>) -> R) -> R {
        // No reentrancy: entry points never call back into `with`.
        unsafe { f(&mut *RUNTIME.0.get()) }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cell {
    use super::Runtime;
    use std::sync::Mutex;

    /// Native test builds run under a threaded test harness, so the
    /// slot takes a real lock instead of the single-threaded cell.
    static RUNTIME: Mutex<Option<Runtime>> = Mutex::new(None);

    pub fn with<R>(f: impl FnOnce(&mut Option<Runtime>) -> R) -> R {
        let mut guard = match RUNTIME.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}
