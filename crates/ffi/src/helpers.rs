use crate::error::{with_last_error_mut, DefaultDoomFireError, DoomFireError, DoomFireErrorCode};
use crate::instance::DoomFireInstance;
use doom_fire_core::FireSimulation;
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Accepts any type implementing `DoomFireError` trait.
pub(crate) fn set_last_error(error: &impl DoomFireError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl DoomFireError) -> DoomFireErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result and hand back its code.
pub(crate) fn track_result<T>(result: Result<T, DefaultDoomFireError>) -> Result<T, DoomFireErrorCode> {
    result.map_err(|error| track_error(&error))
}

/// Clear the thread-local error message and code.
/// Called after a successful tick so stale messages don't outlive their frame.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = DoomFireErrorCode::Ok;
    });
}

/// Run an FFI body and collapse its result into an error code.
pub(crate) fn handle_ffi_result_error<F>(body: F) -> DoomFireErrorCode
where
    F: FnOnce() -> Result<(), DefaultDoomFireError>,
{
    match track_result(body()) {
        Ok(()) => DoomFireErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow an instance from a raw handle.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `doom_fire_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const DoomFireInstance,
) -> Result<&'a DoomFireInstance, DefaultDoomFireError> {
    // SAFETY: non-null handles come from `Box::into_raw` in `doom_fire_new`
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultDoomFireError::null_pointer("instance"))
}

/// Lock the instance's simulation and run `func` on it.
pub(crate) fn with_simulation_mut<F, T>(
    instance: &DoomFireInstance,
    func: F,
) -> Result<T, DefaultDoomFireError>
where
    F: FnOnce(&mut FireSimulation) -> T,
{
    let mut sim = instance
        .sim
        .lock()
        .map_err(|_| DefaultDoomFireError::lock_poisoned("Mutex"))?;
    Ok(func(&mut sim))
}
