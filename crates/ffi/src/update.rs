use std::slice;

use crate::error::{DefaultDoomFireError, DoomFireErrorCode};
use crate::helpers::{
    clear_last_error, handle_ffi_result_error, instance_from_ptr, with_simulation_mut,
};
use crate::instance::DoomFireInstance;

/// Run one fire tick over host-owned buffers.
///
/// Injects fresh intensity at the floor, propagates it upward and writes the
/// resolved RGBA colors, all in place. This is the per-frame entry point the
/// host calls before rendering.
///
/// Parameters
/// - `colors`/`colors_len`: RGBA float buffer, `doom_fire_color_len(side)` floats.
/// - `intensity`/`intensity_len`: intensity buffer, `doom_fire_intensity_len(side, overscan)` cells,
///   every value in `[0, 36]`.
/// - `side`: grid side length; must match the one the instance was created with.
///
/// Returns
/// - `DoomFireErrorCode::Ok` on success (last error cleared)
/// - `DoomFireErrorCode::NullPointer` if any pointer is null
/// - `DoomFireErrorCode::InvalidGrid` if `side` differs from the instance's
/// - `DoomFireErrorCode::InvalidBuffer` if a length is wrong or an intensity is out of range;
///   neither buffer is modified
/// - `DoomFireErrorCode::LockPoisoned` if a previous call panicked mid-tick
///
/// # Safety
/// - `instance` must be a live pointer returned by `doom_fire_new`.
/// - `colors` must be valid for `colors_len` writes and `intensity` for
///   `intensity_len` reads and writes, and the two must not overlap.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_update(
    instance: *const DoomFireInstance,
    colors: *mut f32,
    colors_len: usize,
    intensity: *mut i32,
    intensity_len: usize,
    side: usize,
) -> DoomFireErrorCode {
    let code = handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(instance)? };
        if colors.is_null() {
            return Err(DefaultDoomFireError::null_pointer("colors"));
        }
        if intensity.is_null() {
            return Err(DefaultDoomFireError::null_pointer("intensity"));
        }

        // SAFETY: non-null, lengths and aliasing guaranteed by the caller
        let colors = unsafe { slice::from_raw_parts_mut(colors, colors_len) };
        let intensity = unsafe { slice::from_raw_parts_mut(intensity, intensity_len) };

        with_simulation_mut(instance, |sim| sim.tick_with_side(side, intensity, colors))??;
        Ok(())
    });

    if code == DoomFireErrorCode::Ok {
        clear_last_error();
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{doom_fire_get_last_error, doom_fire_get_last_error_code};
    use crate::instance::{
        doom_fire_color_len, doom_fire_destroy, doom_fire_intensity_len, doom_fire_new,
    };
    use std::ffi::CStr;
    use std::ptr;

    fn create(side: usize) -> *mut DoomFireInstance {
        let mut fire: *mut DoomFireInstance = ptr::null_mut();
        let code = unsafe { doom_fire_new(side, true, 0xFEA4_BEE5, &mut fire) };
        assert_eq!(code, DoomFireErrorCode::Ok);
        fire
    }

    #[test]
    fn test_update_matches_reference_floor() {
        let fire = create(4);
        let mut intensity = vec![0_i32; doom_fire_intensity_len(4, true)];
        let mut colors = vec![0.0_f32; doom_fire_color_len(4)];

        let code = unsafe {
            doom_fire_update(
                fire,
                colors.as_mut_ptr(),
                colors.len(),
                intensity.as_mut_ptr(),
                intensity.len(),
                4,
            )
        };
        assert_eq!(code, DoomFireErrorCode::Ok);
        assert_eq!(
            &intensity[48..64],
            &[3, 4, 6, 1, 2, 2, 0, 3, 8, 4, 6, 0, 7, 6, 4, 1]
        );
        assert!(colors.iter().all(|c| (0.0..=1.0).contains(c)));
        assert!(doom_fire_get_last_error().is_null());

        unsafe { doom_fire_destroy(fire) };
    }

    #[test]
    fn test_update_rejects_short_intensity() {
        let fire = create(4);
        let mut intensity = vec![0_i32; 64];
        let mut colors = vec![0.25_f32; doom_fire_color_len(4)];

        let code = unsafe {
            doom_fire_update(
                fire,
                colors.as_mut_ptr(),
                colors.len(),
                intensity.as_mut_ptr(),
                intensity.len(),
                4,
            )
        };
        assert_eq!(code, DoomFireErrorCode::InvalidBuffer);
        assert_eq!(doom_fire_get_last_error_code(), DoomFireErrorCode::InvalidBuffer);
        let msg = unsafe { CStr::from_ptr(doom_fire_get_last_error()) };
        assert_eq!(msg.to_str().unwrap(), "intensity buffer needs 69 cells, got 64");
        assert!(colors.iter().all(|&c| c == 0.25));

        unsafe { doom_fire_destroy(fire) };
    }

    #[test]
    fn test_update_rejects_side_mismatch() {
        let fire = create(4);
        let mut intensity = vec![0_i32; doom_fire_intensity_len(4, true)];
        let mut colors = vec![0.0_f32; doom_fire_color_len(4)];

        let code = unsafe {
            doom_fire_update(
                fire,
                colors.as_mut_ptr(),
                colors.len(),
                intensity.as_mut_ptr(),
                intensity.len(),
                5,
            )
        };
        assert_eq!(code, DoomFireErrorCode::InvalidGrid);

        unsafe { doom_fire_destroy(fire) };
    }

    #[test]
    fn test_update_null_pointers() {
        let fire = create(2);
        let mut intensity = vec![0_i32; doom_fire_intensity_len(2, true)];
        let mut colors = vec![0.0_f32; doom_fire_color_len(2)];

        let code = unsafe {
            doom_fire_update(
                ptr::null(),
                colors.as_mut_ptr(),
                colors.len(),
                intensity.as_mut_ptr(),
                intensity.len(),
                2,
            )
        };
        assert_eq!(code, DoomFireErrorCode::NullPointer);

        let code = unsafe {
            doom_fire_update(
                fire,
                ptr::null_mut(),
                colors.len(),
                intensity.as_mut_ptr(),
                intensity.len(),
                2,
            )
        };
        assert_eq!(code, DoomFireErrorCode::NullPointer);

        let code = unsafe {
            doom_fire_update(
                fire,
                colors.as_mut_ptr(),
                colors.len(),
                ptr::null_mut(),
                intensity.len(),
                2,
            )
        };
        assert_eq!(code, DoomFireErrorCode::NullPointer);

        unsafe { doom_fire_destroy(fire) };
    }
}
