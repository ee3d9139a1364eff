//! Parsed user agent handles for the C API.

use super::into_owned_c_string;
use crate::browser::BrowserFamily;
use crate::user_agent::{Classification, Parser};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
#[cfg(debug_assertions)]
use std::collections::HashSet;
#[cfg(debug_assertions)]
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

/// Opaque parsed user agent handle
#[repr(C)]
pub struct user_agent_t {
    _private: [u8; 0],
}

/// Addresses of handles that have been parsed and not yet freed.
///
/// Debug builds only. Lookups compare addresses and never touch the handle's
/// memory, so a stale pointer is caught without reading freed memory. An
/// address reused by a later parse counts as live again.
#[cfg(debug_assertions)]
static LIVE_HANDLES: LazyLock<Mutex<HashSet<usize>>> = LazyLock::new(Mutex::default);

#[cfg(debug_assertions)]
fn live_handles() -> MutexGuard<'static, HashSet<usize>> {
    // A panicking accessor must not disable detection for everyone else
    LIVE_HANDLES.lock().unwrap_or_else(PoisonError::into_inner)
}

struct UserAgentInternal {
    /// Verbatim input, backs the borrowed `get_user_agent` view
    source: CString,
    info: Classification,
}

// Conversion helpers for opaque types
impl user_agent_t {
    fn from_internal(internal: Box<UserAgentInternal>) -> *mut Self {
        let ptr = Box::into_raw(internal) as *mut Self;
        #[cfg(debug_assertions)]
        live_handles().insert(ptr as usize);
        ptr
    }

    unsafe fn into_internal(ptr: *mut Self) -> Box<UserAgentInternal> {
        #[cfg(debug_assertions)]
        assert!(
            live_handles().remove(&(ptr as usize)),
            "free_user_agent called on a released or foreign handle"
        );
        Box::from_raw(ptr as *mut UserAgentInternal)
    }

    /// Borrow the internal structure, `None` for NULL
    unsafe fn as_internal<'a>(ptr: *const Self) -> Option<&'a UserAgentInternal> {
        if ptr.is_null() {
            return None;
        }
        #[cfg(debug_assertions)]
        assert!(
            Self::is_live(ptr),
            "user agent handle used after free_user_agent"
        );
        Some(&*(ptr as *const UserAgentInternal))
    }

    #[cfg(debug_assertions)]
    fn is_live(ptr: *const Self) -> bool {
        live_handles().contains(&(ptr as usize))
    }
}

unsafe fn classification(ua: *const user_agent_t) -> Option<Classification> {
    user_agent_t::as_internal(ua).map(|internal| internal.info)
}

/// Parse a user agent string
///
/// Never fails: unrecognized input yields family "Other", version 0.0,
/// not a bot, not mobile. The input is copied, so the caller may free it
/// right after this returns.
///
/// # Parameters
/// * `user_agent` - User agent, null-terminated (NULL is treated as "")
///
/// # Returns
/// * Owning handle; release exactly once with `free_user_agent`
///
/// # Safety
/// * `user_agent` must be NULL or a valid null-terminated C string
///
/// # Example
/// ```c
/// user_agent_t *ua = parse_user_agent("Mozilla/5.0 (compatible; Googlebot/2.1)");
/// if (is_bot(ua)) { ... }
/// free_user_agent(ua);
/// ```
#[no_mangle]
pub unsafe extern "C" fn parse_user_agent(user_agent: *const c_char) -> *mut user_agent_t {
    let source = if user_agent.is_null() {
        CString::default()
    } else {
        CStr::from_ptr(user_agent).to_owned()
    };
    let info = Parser::new().classify(source.as_bytes());

    user_agent_t::from_internal(Box::new(UserAgentInternal {
        source,
        info,
    }))
}

/// Release a handle returned by `parse_user_agent`
///
/// After this call the handle and any view obtained from `get_user_agent`
/// are invalid. Owned strings obtained from the handle stay valid until
/// freed with `free_string`.
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
/// * Must not be called twice on the same handle
#[no_mangle]
pub unsafe extern "C" fn free_user_agent(ua: *mut user_agent_t) {
    if !ua.is_null() {
        let _internal = user_agent_t::into_internal(ua);
        // _internal is dropped here
    }
}

macro_rules! is_family {
    ($function:ident, $family:path) => {
        #[doc = concat!("True if the resolved family is `", stringify!($family), "`")]
        ///
        /// # Safety
        /// * `ua` must be NULL or a live handle from `parse_user_agent`
        #[no_mangle]
        pub unsafe extern "C" fn $function(ua: *const user_agent_t) -> bool {
            classification(ua).is_some_and(|info| info.family == $family)
        }
    };
}

is_family!(is_chrome, BrowserFamily::Chrome);
is_family!(is_edge, BrowserFamily::Edge);
is_family!(is_firefox, BrowserFamily::Firefox);
is_family!(is_opera, BrowserFamily::Opera);

/// True for desktop Safari and Mobile Safari
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn is_safari(ua: *const user_agent_t) -> bool {
    classification(ua).is_some_and(|info| info.family.is_safari())
}

/// True if a bot signature matched
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn is_bot(ua: *const user_agent_t) -> bool {
    classification(ua).is_some_and(|info| info.is_bot())
}

/// True if the user agent carries a phone, tablet or mobile-OS marker
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn is_mobile(ua: *const user_agent_t) -> bool {
    classification(ua).is_some_and(|info| info.mobile)
}

/// Major browser version, 0 when unknown or `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn get_browser_major_version(ua: *const user_agent_t) -> u32 {
    classification(ua).map_or(0, |info| info.version.major)
}

/// Minor browser version, 0 when unknown or `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn get_browser_minor_version(ua: *const user_agent_t) -> u32 {
    classification(ua).map_or(0, |info| info.version.minor)
}

/// Browser family name ("Chrome", "Mobile Safari", ..., "Other")
///
/// # Returns
/// * Owned string; free with `free_string`
/// * NULL if `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn get_browser_family(ua: *const user_agent_t) -> *mut c_char {
    match classification(ua) {
        Some(info) => into_owned_c_string(info.family.as_str()),
        None => ptr::null_mut(),
    }
}

/// Bot name, empty string when not a bot
///
/// # Returns
/// * Owned string; free with `free_string`
/// * NULL if `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn get_bot_name(ua: *const user_agent_t) -> *mut c_char {
    match classification(ua) {
        Some(info) => into_owned_c_string(info.bot_name()),
        None => ptr::null_mut(),
    }
}

/// The original user agent, byte for byte
///
/// # Returns
/// * Borrowed string owned by `ua`; do NOT free it, do not use it after
///   `free_user_agent(ua)`
/// * NULL if `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn get_user_agent(ua: *const user_agent_t) -> *const c_char {
    match user_agent_t::as_internal(ua) {
        Some(internal) => internal.source.as_ptr(),
        None => ptr::null(),
    }
}

/// Operating system name ("Windows", "iOS", ..., "Other")
///
/// # Returns
/// * Owned string; free with `free_string`
/// * NULL if `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn get_platform_name(ua: *const user_agent_t) -> *mut c_char {
    match classification(ua) {
        Some(info) => into_owned_c_string(info.platform.name.as_str()),
        None => ptr::null_mut(),
    }
}

/// Major OS version, 0 when unknown or `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn get_platform_major_version(ua: *const user_agent_t) -> u32 {
    classification(ua).map_or(0, |info| info.platform.version.major)
}

/// Minor OS version, 0 when unknown or `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
#[no_mangle]
pub unsafe extern "C" fn get_platform_minor_version(ua: *const user_agent_t) -> u32 {
    classification(ua).map_or(0, |info| info.platform.version.minor)
}

/// Full classification as a JSON object
///
/// The `user_agent` field is the input decoded as UTF-8, with invalid
/// sequences replaced by U+FFFD.
///
/// # Returns
/// * Owned JSON string; free with `free_string`
/// * NULL if `ua` is NULL
///
/// # Safety
/// * `ua` must be NULL or a live handle from `parse_user_agent`
///
/// # Example
/// ```c
/// char *json = get_user_agent_json(ua);
/// if (json) {
///     puts(json);
///     free_string(json);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn get_user_agent_json(ua: *const user_agent_t) -> *mut c_char {
    let Some(internal) = user_agent_t::as_internal(ua) else {
        return ptr::null_mut();
    };

    #[derive(serde::Serialize)]
    struct JsonView<'a> {
        user_agent: &'a str,
        #[serde(flatten)]
        info: &'a Classification,
    }

    let source = internal.source.to_string_lossy();
    let view = JsonView {
        user_agent: &source,
        info: &internal.info,
    };

    match serde_json::to_string(&view) {
        Ok(json) => into_owned_c_string(&json),
        Err(_) => ptr::null_mut(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::c_api::free_string;

    const FIREFOX: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1";

    unsafe fn owned(s: *mut c_char) -> String {
        assert!(!s.is_null());
        let copy = CStr::from_ptr(s).to_str().unwrap().to_string();
        free_string(s);
        copy
    }

    #[test]
    fn test_handle_lifecycle() {
        let input = CString::new(FIREFOX).unwrap();
        unsafe {
            let ua = parse_user_agent(input.as_ptr());
            assert!(!ua.is_null());
            assert!(is_firefox(ua));
            assert!(!is_chrome(ua));
            assert_eq!(get_browser_major_version(ua), 40);
            assert_eq!(get_browser_minor_version(ua), 1);
            assert_eq!(owned(get_browser_family(ua)), "Firefox");
            assert_eq!(owned(get_bot_name(ua)), "");
            assert_eq!(owned(get_platform_name(ua)), "Windows");
            assert_eq!(get_platform_major_version(ua), 7);
            free_user_agent(ua);
        }
    }

    #[test]
    fn test_input_is_copied() {
        let input = CString::new(FIREFOX).unwrap();
        unsafe {
            let ua = parse_user_agent(input.as_ptr());
            drop(input);
            assert_eq!(CStr::from_ptr(get_user_agent(ua)).to_str().unwrap(), FIREFOX);
            free_user_agent(ua);
        }
    }

    #[test]
    fn test_non_utf8_input_round_trips() {
        let input = CString::new(vec![b'F', 0xff, b'x']).unwrap();
        unsafe {
            let ua = parse_user_agent(input.as_ptr());
            assert_eq!(CStr::from_ptr(get_user_agent(ua)).to_bytes(), &[b'F', 0xff, b'x']);
            assert_eq!(owned(get_browser_family(ua)), "Other");
            let json = owned(get_user_agent_json(ua));
            assert!(json.contains("\"family\":\"Other\""));
            free_user_agent(ua);
        }
    }

    #[test]
    fn test_null_handling() {
        unsafe {
            let ua = parse_user_agent(ptr::null());
            assert!(!ua.is_null());
            assert_eq!(CStr::from_ptr(get_user_agent(ua)).to_bytes(), b"");
            assert_eq!(owned(get_browser_family(ua)), "Other");
            free_user_agent(ua);

            let null = ptr::null::<user_agent_t>();
            assert!(!is_chrome(null));
            assert!(!is_safari(null));
            assert!(!is_bot(null));
            assert!(!is_mobile(null));
            assert_eq!(get_browser_major_version(null), 0);
            assert!(get_browser_family(null).is_null());
            assert!(get_bot_name(null).is_null());
            assert!(get_user_agent(null).is_null());
            assert!(get_user_agent_json(null).is_null());
            free_user_agent(ptr::null_mut());
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_released_handle_is_no_longer_live() {
        let input = CString::new(FIREFOX).unwrap();
        unsafe {
            let first = parse_user_agent(input.as_ptr());
            let second = parse_user_agent(input.as_ptr());
            assert!(user_agent_t::is_live(first));
            assert!(user_agent_t::is_live(second));

            free_user_agent(first);
            assert!(!user_agent_t::is_live(first));
            assert!(user_agent_t::is_live(second));
            assert!(is_firefox(second));

            free_user_agent(second);
            assert!(!user_agent_t::is_live(second));
        }
    }

    #[test]
    fn test_json() {
        let input = CString::new(FIREFOX).unwrap();
        unsafe {
            let ua = parse_user_agent(input.as_ptr());
            let json = owned(get_user_agent_json(ua));
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["user_agent"], FIREFOX);
            assert_eq!(value["family"], "Firefox");
            assert_eq!(value["version"]["minor"], 1);
            free_user_agent(ua);
        }
    }
}
