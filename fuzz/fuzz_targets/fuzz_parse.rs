#![no_main]
use fast_browser::c_api::*;
use fast_browser::{Parser, UserAgent};
use libfuzzer_sys::fuzz_target;
use std::ffi::{CStr, CString};

fuzz_target!(|data: &[u8]| {
    // Test 1: Raw bytes (non-UTF8 handling)
    let info = Parser::new().classify(data);
    assert_eq!(info.is_bot(), info.bot.is_some());

    // Test 2: Owned parse of UTF-8 input keeps the source verbatim
    if let Ok(raw) = std::str::from_utf8(data) {
        let ua = UserAgent::parse(raw);
        assert_eq!(ua.source(), raw);
        assert_eq!(ua.classification(), info);
        let _ = ua.to_json();
    }

    // Test 3: Tiny scan windows cut markers and version tokens mid-way
    if let Some(&first) = data.first() {
        let parser = Parser::builder().max_scan_length(first as usize).build();
        let _ = parser.classify(&data[1..]);
    }

    // Test 4: C handle lifecycle up to the first NUL
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    if let Ok(input) = CString::new(&data[..end]) {
        unsafe {
            let ua = parse_user_agent(input.as_ptr());
            assert_eq!(CStr::from_ptr(get_user_agent(ua)).to_bytes(), &data[..end]);

            for owned in [get_browser_family(ua), get_bot_name(ua), get_platform_name(ua), get_user_agent_json(ua)] {
                free_string(owned);
            }
            free_user_agent(ua);
        }
    }
});
