//! Host function imports.
//!
//! All host functions are imported under the `gateway_host` WASM
//! module. Logging is the only import: it is diagnostic-only, never
//! result-affecting, and the guest never branches on its outcome.

/// Log level: informational.
#[allow(dead_code)]
pub const LOG_INFO: i32 = 2;
/// Log level: error.
pub const LOG_ERROR: i32 = 4;

#[cfg(target_arch = "wasm32")]
#[link(wasm_import_module = "gateway_host")]
extern "C" {
    /// Write a diagnostic log line. Not result-affecting; the host may
    /// drop it.
    fn log(level: i32, msg_ptr: i32, msg_len: i32);
}

/// Safe logging wrapper. Diagnostic only — callers must not branch on
/// whether the host recorded the line.
#[cfg(target_arch = "wasm32")]
pub fn host_log(level: i32, message: &str) {
    unsafe {
        log(level, message.as_ptr() as i32, message.len() as i32);
    }
}

/// Native builds have no host to log to; the wrapper is a no-op so the
/// adapter can be built and tested off-target.
#[cfg(not(target_arch = "wasm32"))]
pub fn host_log(_level: i32, _message: &str) {}
