use doom_fire_core::FireError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code passed across the FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait DoomFireError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> DoomFireErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `DoomFireError` for common FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultDoomFireError {
    code: DoomFireErrorCode,
    msg: String,
}

impl DefaultDoomFireError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"colors"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: DoomFireErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"Mutex"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: DoomFireErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }
}

impl From<FireError> for DefaultDoomFireError {
    fn from(error: FireError) -> Self {
        let code = match error {
            FireError::ZeroSide | FireError::SideTooLarge { .. } | FireError::SideMismatch { .. } => {
                DoomFireErrorCode::InvalidGrid
            }
            FireError::IntensityLength { .. }
            | FireError::ColorLength { .. }
            | FireError::IntensityOutOfRange { .. } => DoomFireErrorCode::InvalidBuffer,
            FireError::InvalidParameter { .. } => DoomFireErrorCode::InvalidParameter,
        };

        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl DoomFireError for DefaultDoomFireError {
    fn code(&self) -> DoomFireErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by fire simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoomFireErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid grid: side length is zero, too large, or differs from the instance's.
    InvalidGrid = 3,

    /// Invalid buffer: wrong length, or an intensity outside `[0, 36]`.
    InvalidBuffer = 4,

    /// Invalid parameter passed to function.
    InvalidParameter = 5,
}

impl From<DefaultDoomFireError> for DoomFireErrorCode {
    fn from(error: DefaultDoomFireError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored to keep the pointer handed out by `doom_fire_get_last_error` alive.
    static LAST_ERROR: RefCell<(Option<CString>, DoomFireErrorCode)> = const { RefCell::new((None, DoomFireErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, DoomFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, DoomFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred since the last successful tick.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error. **DO NOT FREE THIS POINTER**.
///
/// Example:
/// ```cpp
/// DoomFireErrorCode err = doom_fire_update(fire, colors, colors_len, intensity, intensity_len, side);
/// if (err != DoomFireErrorCode::Ok) {
///     const char* error = doom_fire_get_last_error();
///     if (error) {
///         printf("Fire tick rejected: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn doom_fire_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `DoomFireErrorCode::Ok` (0) if no error has occurred on this thread.
#[no_mangle]
pub extern "C" fn doom_fire_get_last_error_code() -> DoomFireErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
