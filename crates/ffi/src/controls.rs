//! Host control hooks: intensity buttons, reseed, reset and parameter access.

use doom_fire_core::{FireParams, FireSimulation};

use crate::error::{DefaultDoomFireError, DoomFireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_simulation_mut};
use crate::instance::{DoomFireInstance, DoomFireParams};

/// "Increase fire intensity": raise the injection strength by one step.
///
/// The next `doom_fire_update` also heats every floor cell once before
/// injecting. The seed is kept.
///
/// # Safety
/// `instance` must be null or a live pointer returned by `doom_fire_new`.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_increase_intensity(
    instance: *const DoomFireInstance,
) -> DoomFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(instance)? };
        with_simulation_mut(instance, FireSimulation::increase_intensity)
    })
}

/// "Decrease fire intensity": lower the injection strength by one step.
///
/// The next `doom_fire_update` also cools every floor cell once before
/// injecting, so a saturated fire dies down. The seed is kept.
///
/// # Safety
/// `instance` must be null or a live pointer returned by `doom_fire_new`.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_decrease_intensity(
    instance: *const DoomFireInstance,
) -> DoomFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(instance)? };
        with_simulation_mut(instance, FireSimulation::decrease_intensity)
    })
}

/// Restart the random sequence from `seed`.
///
/// # Safety
/// `instance` must be null or a live pointer returned by `doom_fire_new`.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_seed(
    instance: *const DoomFireInstance,
    seed: u32,
) -> DoomFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(instance)? };
        with_simulation_mut(instance, |sim| sim.reseed(seed))
    })
}

/// Restart the random sequence from the current seed.
///
/// Buffers belong to the host; zero them for a cold start.
///
/// # Safety
/// `instance` must be null or a live pointer returned by `doom_fire_new`.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_reset(instance: *const DoomFireInstance) -> DoomFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(instance)? };
        with_simulation_mut(instance, FireSimulation::reset)
    })
}

/// Copy the current parameters into `out_params`.
///
/// # Safety
/// - `instance` must be null or a live pointer returned by `doom_fire_new`.
/// - `out_params` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_get_params(
    instance: *const DoomFireInstance,
    out_params: *mut DoomFireParams,
) -> DoomFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(instance)? };
        // SAFETY: caller guarantees `out_params` is null or writable
        let out = unsafe { out_params.as_mut() }
            .ok_or_else(|| DefaultDoomFireError::null_pointer("out_params"))?;
        *out = with_simulation_mut(instance, |sim| DoomFireParams::from(*sim.params()))?;
        Ok(())
    })
}

/// Replace the parameters. Invalid values are rejected and the old ones kept.
///
/// # Safety
/// - `instance` must be null or a live pointer returned by `doom_fire_new`.
/// - `params` must be null or point to a valid `DoomFireParams`.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_set_params(
    instance: *const DoomFireInstance,
    params: *const DoomFireParams,
) -> DoomFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(instance)? };
        // SAFETY: caller guarantees `params` is null or valid
        let params = unsafe { params.as_ref() }
            .ok_or_else(|| DefaultDoomFireError::null_pointer("params"))?;
        with_simulation_mut(instance, |sim| sim.set_params(FireParams::from(*params)))??;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{doom_fire_destroy, doom_fire_new};
    use std::ptr;

    fn create() -> *mut DoomFireInstance {
        let mut fire: *mut DoomFireInstance = ptr::null_mut();
        let code = unsafe { doom_fire_new(4, true, 0xFEA4_BEE5, &mut fire) };
        assert_eq!(code, DoomFireErrorCode::Ok);
        fire
    }

    fn params(fire: *const DoomFireInstance) -> DoomFireParams {
        let mut out = DoomFireParams::from(FireParams::calm());
        let code = unsafe { doom_fire_get_params(fire, &mut out) };
        assert_eq!(code, DoomFireErrorCode::Ok);
        out
    }

    #[test]
    fn test_intensity_hooks() {
        let fire = create();
        assert_eq!(params(fire).injection_strength, 7.0);

        unsafe {
            assert_eq!(doom_fire_increase_intensity(fire), DoomFireErrorCode::Ok);
            assert_eq!(doom_fire_increase_intensity(fire), DoomFireErrorCode::Ok);
        }
        assert_eq!(params(fire).injection_strength, 9.0);

        unsafe {
            assert_eq!(doom_fire_decrease_intensity(fire), DoomFireErrorCode::Ok);
        }
        assert_eq!(params(fire).injection_strength, 8.0);

        unsafe { doom_fire_destroy(fire) };
    }

    #[test]
    fn test_hooks_reject_null_instance() {
        unsafe {
            assert_eq!(
                doom_fire_increase_intensity(ptr::null()),
                DoomFireErrorCode::NullPointer
            );
            assert_eq!(
                doom_fire_decrease_intensity(ptr::null()),
                DoomFireErrorCode::NullPointer
            );
            assert_eq!(doom_fire_seed(ptr::null(), 1), DoomFireErrorCode::NullPointer);
            assert_eq!(doom_fire_reset(ptr::null()), DoomFireErrorCode::NullPointer);
        }
    }

    #[test]
    fn test_set_params_validates() {
        let fire = create();
        let bad = DoomFireParams {
            injection_strength: 7.0,
            decay_span: f32::NAN,
            symmetric_drift: true,
        };
        assert_eq!(
            unsafe { doom_fire_set_params(fire, &bad) },
            DoomFireErrorCode::InvalidParameter
        );
        assert!(!params(fire).symmetric_drift);

        let good = DoomFireParams {
            decay_span: 3.0,
            ..bad
        };
        assert_eq!(unsafe { doom_fire_set_params(fire, &good) }, DoomFireErrorCode::Ok);
        assert_eq!(params(fire), good);

        assert_eq!(
            unsafe { doom_fire_get_params(fire, ptr::null_mut()) },
            DoomFireErrorCode::NullPointer
        );

        unsafe { doom_fire_destroy(fire) };
    }

    #[test]
    fn test_seed_and_reset() {
        let fire = create();
        unsafe {
            assert_eq!(doom_fire_seed(fire, 42), DoomFireErrorCode::Ok);
            assert_eq!(doom_fire_reset(fire), DoomFireErrorCode::Ok);
            let sim = (*fire).sim.lock().unwrap();
            assert_eq!(sim.seed(), 42);
            assert_eq!(sim.ticks(), 0);
        }

        unsafe { doom_fire_destroy(fire) };
    }
}
