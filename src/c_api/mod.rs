//! C API for fast_browser
//!
//! This module provides a stable C ABI for language bindings.
//!
//! # Ownership rules
//!
//! * `parse_user_agent` returns an owning handle. Release it exactly once
//!   with `free_user_agent`.
//! * Functions documented as returning an *owned* string hand a fresh
//!   allocation to the caller on every call. Release each one with
//!   `free_string`, independently of the handle it came from.
//! * `get_user_agent` returns a *borrowed* view into the handle. Do not
//!   free it and do not use it after the handle is released.
//! * Every function accepts NULL and answers with NULL/false/0. `free_*`
//!   on NULL is a no-op.
//!
//! # Example
//! ```c
//! char *version = get_version();
//! if (strcmp(version, FAST_BROWSER_VERSION) != 0) abort();
//! free_string(version);
//!
//! user_agent_t *ua = parse_user_agent(header);
//! if (is_chrome(ua) && get_browser_major_version(ua) < 50) {
//!     char *family = get_browser_family(ua);
//!     printf("outdated %s from %s\n", family, get_user_agent(ua));
//!     free_string(family);
//! }
//! free_user_agent(ua);
//! ```

pub mod user_agent;

pub use self::user_agent::*;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Copy `s` into a caller-owned C string, NULL if it contains a NUL byte.
pub(crate) fn into_owned_c_string(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a string returned by fast_browser
///
/// # Parameters
/// * `string` - Owned string returned by this library (may be NULL)
///
/// # Safety
/// * `string` must be NULL or a pointer returned by a function documented
///   as returning an owned string
/// * Must not be called twice on the same pointer
/// * Must not be called on the borrowed pointer from `get_user_agent`
#[no_mangle]
pub unsafe extern "C" fn free_string(string: *mut c_char) {
    if !string.is_null() {
        let _ = CString::from_raw(string);
    }
}

/// Get library version string
///
/// # Returns
/// * Owned version string (e.g., "0.1.0"); free with `free_string`
#[no_mangle]
pub extern "C" fn get_version() -> *mut c_char {
    into_owned_c_string(crate::VERSION)
}

/// Check a binding's declared version against this library
///
/// Bindings call this once at load time and must refuse to operate when it
/// returns false.
///
/// # Parameters
/// * `expected` - Version the binding was written against (may be NULL)
///
/// # Returns
/// * true if `expected` equals this library's version
/// * false otherwise, or if `expected` is NULL or not UTF-8
///
/// # Safety
/// * `expected` must be NULL or a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn check_version(expected: *const c_char) -> bool {
    if expected.is_null() {
        return false;
    }

    match CStr::from_ptr(expected).to_str() {
        Ok(expected) => crate::error::check_version(expected).is_ok(),
        Err(_) => false,
    }
}
