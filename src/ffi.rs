//! FFI bindings for the senwell scoring engine
//!
//! This module provides C-compatible functions for calling the engine from
//! other languages. All functions use C strings (null-terminated) and return
//! allocated memory that must be freed by the caller using
//! `senwell_free_string`. The engine is stateless, so there are no handles.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::pipeline::ScoreEngine;
use crate::schema::ProfileAdapter;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Score a wellness.profile.v1 JSON record and return assessment report JSON.
///
/// # Safety
/// - `profile_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `senwell_free_string`.
/// - Returns NULL on error; call `senwell_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn senwell_assess_json(profile_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json = match cstr_to_string(profile_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid profile JSON string pointer");
            return ptr::null_mut();
        }
    };

    let engine = ScoreEngine::new();
    match engine.assess_json(&json) {
        Ok(report_json) => string_to_cstr(&report_json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Validate a wellness.profile.v1 JSON record.
///
/// # Safety
/// - `profile_json` must be a valid null-terminated C string.
/// - Returns 0 when the record is valid, non-zero otherwise.
/// - On error, call `senwell_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn senwell_validate_json(profile_json: *const c_char) -> i32 {
    clear_last_error();

    let json = match cstr_to_string(profile_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid profile JSON string pointer");
            return -1;
        }
    };

    let raw = match serde_json::from_str::<crate::schema::RawProfile>(&json) {
        Ok(raw) => raw,
        Err(e) => {
            set_last_error(&e.to_string());
            return -1;
        }
    };

    match ProfileAdapter::to_canonical(&raw) {
        Ok(_) => 0,
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

/// Free a string returned by senwell functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a senwell function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn senwell_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next senwell function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn senwell_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the engine library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn senwell_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn sample_profile_json() -> CString {
        CString::new(
            r#"{
            "schema_version": "wellness.profile.v1",
            "profile_id": "ffi-test",
            "age": 68,
            "gender": "male",
            "height": {"value": 165.0, "unit": "cm"},
            "weight": {"value": 70.0, "unit": "kg"},
            "good_sleep_quality": true,
            "exercise_minutes": 150,
            "smoking_status": "never",
            "alcohol_units": 0,
            "stress_level": "none"
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_assess_json() {
        let json = sample_profile_json();

        unsafe {
            let result = senwell_assess_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("wellness.assessment.v1"));
            assert!(result_str.contains("ffi-test"));

            senwell_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let invalid_json = CString::new("not json").unwrap();

        unsafe {
            let result = senwell_assess_json(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = senwell_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(!error_str.is_empty());
        }
    }

    #[test]
    fn test_ffi_validate_json() {
        let valid = sample_profile_json();
        let invalid = CString::new(
            r#"{"schema_version": "wellness.profile.v1", "exercise_minutes": -10}"#,
        )
        .unwrap();

        unsafe {
            assert_eq!(senwell_validate_json(valid.as_ptr()), 0);
            assert_eq!(senwell_validate_json(invalid.as_ptr()), -1);

            let error = senwell_last_error();
            assert!(!error.is_null());
        }
    }

    #[test]
    fn test_ffi_null_pointer() {
        unsafe {
            let result = senwell_assess_json(ptr::null());
            assert!(result.is_null());
            assert!(!senwell_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = senwell_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
