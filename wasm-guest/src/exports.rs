//! Guest exported functions — the host boundary.
//!
//! Two entry points, operating on linear-memory pointer/length pairs:
//!
//! - `gateway_dispatch` — drive one exchange and hand back a response
//!   buffer through the two out-pointers
//! - `gateway_release` — free a response buffer, exactly once
//!
//! The host's input region is copied on ingress and never retained past
//! the call. The response is handed off as an exactly-sized allocation
//! recorded in the buffer ledger; `gateway_release` consults the ledger
//! before freeing, so a stale or repeated release is an error code, not
//! memory corruption.
//!
//! All entry points return `i32` error codes (0 = OK). On a fatal
//! fault no response is fabricated — the non-zero code is the host's
//! only signal, and it must treat the call as failed.

use gateway_primitives::ErrorCode;

use crate::imports::{host_log, LOG_ERROR};
use crate::runtime;

/// Drive one request/response exchange.
///
/// # Arguments
/// - `req_ptr`/`req_len`: the host-written request frame
/// - `resp_ptr_ptr`/`resp_len_ptr`: out-pointers receiving the response
///   buffer reference
///
/// # Returns
/// 0 on success; the host then owns the response buffer and must pass
/// it to `gateway_release` exactly once. Non-zero on bad pointers or
/// fatal faults, in which case no buffer is issued.
#[no_mangle]
pub extern "C" fn gateway_dispatch(
    req_ptr: *const u8,
    req_len: usize,
    resp_ptr_ptr: *mut *mut u8,
    resp_len_ptr: *mut usize,
) -> i32 {
    if req_ptr.is_null() || resp_ptr_ptr.is_null() || resp_len_ptr.is_null() {
        return ErrorCode::BadPointer.as_i32();
    }

    // Copy on ingress: the host's region is only viewed inside this
    // call, never aliased by the exchange.
    let input = unsafe { core::slice::from_raw_parts(req_ptr, req_len) }.to_vec();

    let outcome = runtime::with_runtime(|rt| {
        let encoded = match rt.dispatcher.dispatch(&input) {
            Ok(bytes) => bytes,
            Err(fatal) => {
                host_log(LOG_ERROR, &format!("dispatch aborted: {}", fatal));
                return fatal.error_code();
            }
        };

        // Boxed slice: allocation size equals length, so release can
        // reconstruct the exact layout from the (ptr, len) pair.
        let boxed = encoded.into_boxed_slice();
        let len = boxed.len();
        let ptr = Box::into_raw(boxed) as *mut u8;

        if let Err(fatal) = rt.ledger.issue(ptr as usize, len) {
            unsafe {
                drop(Box::from_raw(core::ptr::slice_from_raw_parts_mut(ptr, len)));
            }
            host_log(LOG_ERROR, &format!("dispatch aborted: {}", fatal));
            return fatal.error_code();
        }

        unsafe {
            *resp_ptr_ptr = ptr;
            *resp_len_ptr = len;
        }
        ErrorCode::Ok
    });

    match outcome {
        Ok(code) => code.as_i32(),
        Err(code) => code.as_i32(),
    }
}

/// Release a response buffer previously issued by `gateway_dispatch`.
///
/// Each issued buffer is accepted exactly once. An unrecognized or
/// already-released reference returns `ERR_INVALID_RELEASE` and frees
/// nothing.
#[no_mangle]
pub extern "C" fn gateway_release(ptr: *mut u8, len: usize) -> i32 {
    if ptr.is_null() {
        return ErrorCode::BadPointer.as_i32();
    }

    let outcome = runtime::with_runtime(|rt| match rt.ledger.reclaim(ptr as usize, len) {
        Ok(()) => {
            unsafe {
                drop(Box::from_raw(core::ptr::slice_from_raw_parts_mut(ptr, len)));
            }
            ErrorCode::Ok
        }
        Err(misuse) => {
            host_log(LOG_ERROR, &format!("release rejected: {}", misuse));
            misuse.error_code()
        }
    });

    match outcome {
        Ok(code) => code.as_i32(),
        Err(code) => code.as_i32(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Call `gateway_dispatch` the way a host would, returning the code
    /// and, on success, the issued buffer reference and a copy of it.
    fn host_dispatch(input: &[u8]) -> (i32, *mut u8, usize, Vec<u8>) {
        let mut resp_ptr: *mut u8 = core::ptr::null_mut();
        let mut resp_len: usize = 0;

        let code = gateway_dispatch(
            input.as_ptr(),
            input.len(),
            &mut resp_ptr as *mut *mut u8,
            &mut resp_len as *mut usize,
        );

        let copy = if code == 0 {
            unsafe { core::slice::from_raw_parts(resp_ptr, resp_len) }.to_vec()
        } else {
            Vec::new()
        };
        (code, resp_ptr, resp_len, copy)
    }

    // ── Test: full exchange and exactly-once release ──

    #[test]
    fn test_dispatch_echo_and_release_once() {
        let input = [0x01, 0x00, 0x00, 0x00, 0x02, 0xAA, 0xBB];
        let (code, ptr, len, response) = host_dispatch(&input);

        assert_eq!(code, 0);
        assert_eq!(response, vec![0x00, 0x00, 0x00, 0x00, 0x02, 0xAA, 0xBB]);

        assert_eq!(gateway_release(ptr, len), 0);
        assert_eq!(
            gateway_release(ptr, len),
            ErrorCode::InvalidRelease.as_i32()
        );
    }

    // ── Test: malformed input still yields a response buffer ──

    #[test]
    fn test_malformed_input_yields_fault_buffer() {
        let input = [0x01, 0x00, 0x00, 0x00, 0xFF];
        let (code, ptr, len, response) = host_dispatch(&input);

        assert_eq!(code, 0);
        assert_eq!(response[0], 0x01); // fault status
        let text = std::str::from_utf8(&response[5..]).unwrap();
        assert!(text.contains("invalid payload length"));

        assert_eq!(gateway_release(ptr, len), 0);
    }

    // ── Test: pointer validation ──

    #[test]
    fn test_null_pointers_rejected() {
        let mut resp_ptr: *mut u8 = core::ptr::null_mut();
        let mut resp_len: usize = 0;

        let code = gateway_dispatch(
            core::ptr::null(),
            0,
            &mut resp_ptr as *mut *mut u8,
            &mut resp_len as *mut usize,
        );
        assert_eq!(code, ErrorCode::BadPointer.as_i32());

        let input = [0x01u8];
        let code = gateway_dispatch(
            input.as_ptr(),
            input.len(),
            core::ptr::null_mut(),
            &mut resp_len as *mut usize,
        );
        assert_eq!(code, ErrorCode::BadPointer.as_i32());

        assert_eq!(
            gateway_release(core::ptr::null_mut(), 0),
            ErrorCode::BadPointer.as_i32()
        );
    }

    // ── Test: releasing a never-issued reference is misuse ──

    #[test]
    fn test_release_unknown_reference() {
        // Arbitrary non-null address; the ledger rejects it before any
        // memory is touched.
        let bogus = 0x10usize as *mut u8;
        assert_eq!(
            gateway_release(bogus, 8),
            ErrorCode::InvalidRelease.as_i32()
        );
    }

    // ── Test: several buffers may be outstanding at once ──

    #[test]
    fn test_outstanding_buffers_release_in_any_order() {
        let (code_a, ptr_a, len_a, _) = host_dispatch(&[0x01, 0, 0, 0, 1, 0x11]);
        let (code_b, ptr_b, len_b, _) = host_dispatch(&[0x01, 0, 0, 0, 1, 0x22]);
        assert_eq!(code_a, 0);
        assert_eq!(code_b, 0);

        assert_eq!(gateway_release(ptr_b, len_b), 0);
        assert_eq!(gateway_release(ptr_a, len_a), 0);
    }

    // ── Test: length mismatch on release is rejected without freeing ──

    #[test]
    fn test_release_with_wrong_length_rejected() {
        let (code, ptr, len, _) = host_dispatch(&[0x01, 0, 0, 0, 0]);
        assert_eq!(code, 0);

        assert_eq!(
            gateway_release(ptr, len + 1),
            ErrorCode::InvalidRelease.as_i32()
        );
        // The correct release still succeeds afterwards.
        assert_eq!(gateway_release(ptr, len), 0);
    }
}
