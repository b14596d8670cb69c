use doom_fire_core::{DriftMode, FireParams, FireSimulation, GridShape, SourceOverscan};
use std::ptr;
use std::sync::Mutex;

use crate::error::{DefaultDoomFireError, DoomFireErrorCode};
use crate::helpers::{track_error, track_result};

/// The fire simulation context handed to the host as an opaque pointer.
///
/// # Thread Safety
/// The simulation sits behind a `Mutex`. The render loop ticks it once per
/// frame; UI hooks (`doom_fire_increase_intensity`, ...) may arrive from any
/// thread and are serialized with ticks. The host's buffers are only borrowed
/// for the duration of `doom_fire_update`.
///
/// # Usage
/// ```cpp
/// DoomFireInstance* fire = nullptr;
/// if (doom_fire_new(100, true, 0xFEA4BEE5, &fire) != DoomFireErrorCode::Ok) {
///     return;
/// }
///
/// std::vector<int32_t> intensity(doom_fire_intensity_len(100, true));
/// std::vector<float> colors(doom_fire_color_len(100));
///
/// // Every frame, before the camera renders
/// doom_fire_update(fire, colors.data(), colors.size(),
///                  intensity.data(), intensity.size(), 100);
///
/// doom_fire_destroy(fire);
/// ```
pub struct DoomFireInstance {
    pub(crate) sim: Mutex<FireSimulation>,
}

impl DoomFireInstance {
    /// Creates a new instance for a cube of side `side`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrid` for a zero or oversized side and
    /// `InvalidParameter` if `params` fail validation.
    pub(crate) fn new(
        side: usize,
        overscan: bool,
        seed: u32,
        params: FireParams,
    ) -> Result<Box<Self>, DefaultDoomFireError> {
        let overscan = if overscan {
            SourceOverscan::Replicate
        } else {
            SourceOverscan::Clamp
        };
        let shape = GridShape::new(side, overscan)?;
        let sim = FireSimulation::with_params(shape, seed, params)?;

        Ok(Box::new(Self {
            sim: Mutex::new(sim),
        }))
    }
}

/// C-compatible fire parameters.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoomFireParams {
    /// Injection adds `floor(u * injection_strength)` per floor cell (reference: 7.0).
    pub injection_strength: f32,
    /// Propagation decays by `trunc(u * decay_span)` (reference: 2.0).
    pub decay_span: f32,
    /// `false` keeps the reference rightward lean, `true` drifts both ways.
    pub symmetric_drift: bool,
}

impl From<FireParams> for DoomFireParams {
    fn from(params: FireParams) -> Self {
        Self {
            injection_strength: params.injection_strength,
            decay_span: params.decay_span,
            symmetric_drift: params.drift == DriftMode::Symmetric,
        }
    }
}

impl From<DoomFireParams> for FireParams {
    fn from(params: DoomFireParams) -> Self {
        Self {
            injection_strength: params.injection_strength,
            decay_span: params.decay_span,
            drift: if params.symmetric_drift {
                DriftMode::Symmetric
            } else {
                DriftMode::Rightward
            },
        }
    }
}

/// Write a freshly created instance (or null on error) to `out_instance`.
unsafe fn emit_instance(
    result: Result<Box<DoomFireInstance>, DefaultDoomFireError>,
    out_instance: *mut *mut DoomFireInstance,
) -> DoomFireErrorCode {
    match track_result(result) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            DoomFireErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Create a reference fire and return it via out-parameter.
///
/// Parameters
/// - `side`: grid side length `N` (cube of `N³` cells).
/// - `overscan`: `true` replicates the reference floor injection, which walks one
///   cell past `N` and needs `N + 1` extra intensity cells (see `doom_fire_intensity_len`).
/// - `seed`: random seed; `0xFEA4BEE5` is the reference seed.
/// - `out_instance`: receives the instance on success, null on failure.
///
/// Returns
/// - `DoomFireErrorCode::Ok` on success
/// - `DoomFireErrorCode::NullPointer` if `out_instance` is null
/// - `DoomFireErrorCode::InvalidGrid` if `side` is zero or too large
///
/// # Safety
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `doom_fire_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_new(
    side: usize,
    overscan: bool,
    seed: u32,
    out_instance: *mut *mut DoomFireInstance,
) -> DoomFireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultDoomFireError::null_pointer("out_instance"));
    }

    unsafe {
        emit_instance(
            DoomFireInstance::new(side, overscan, seed, FireParams::reference()),
            out_instance,
        )
    }
}

/// Like `doom_fire_new` with custom parameters.
///
/// Returns `DoomFireErrorCode::InvalidParameter` if a parameter is non-finite
/// or out of range.
///
/// # Safety
/// - `params` must point to a valid `DoomFireParams`.
/// - `out_instance` as for `doom_fire_new`.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_new_with_params(
    side: usize,
    overscan: bool,
    seed: u32,
    params: *const DoomFireParams,
    out_instance: *mut *mut DoomFireInstance,
) -> DoomFireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultDoomFireError::null_pointer("out_instance"));
    }
    // SAFETY: caller guarantees `params` is null or valid
    let Some(params) = (unsafe { params.as_ref() }) else {
        unsafe {
            *out_instance = ptr::null_mut();
        }
        return track_error(&DefaultDoomFireError::null_pointer("params"));
    };

    unsafe {
        emit_instance(
            DoomFireInstance::new(side, overscan, seed, (*params).into()),
            out_instance,
        )
    }
}

/// Destroys an instance previously created by `doom_fire_new`.
///
/// If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `doom_fire_new` or `doom_fire_new_with_params`.
/// - The pointer MUST NOT be used after this call.
#[no_mangle]
pub unsafe extern "C" fn doom_fire_destroy(ptr: *mut DoomFireInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` and not freed yet per the contract above
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

/// Required intensity buffer length for a grid of side `side`.
///
/// Includes the `side + 1` overscan tail when `overscan` is true.
/// Returns 0 if `side` is zero or too large.
#[no_mangle]
pub extern "C" fn doom_fire_intensity_len(side: usize, overscan: bool) -> usize {
    let overscan = if overscan {
        SourceOverscan::Replicate
    } else {
        SourceOverscan::Clamp
    };
    GridShape::new(side, overscan).map_or(0, |shape| shape.intensity_len())
}

/// Required color buffer length (floats) for a grid of side `side`.
///
/// Returns 0 if `side` is zero or too large.
#[no_mangle]
pub extern "C" fn doom_fire_color_len(side: usize) -> usize {
    GridShape::new(side, SourceOverscan::Clamp).map_or(0, |shape| shape.color_len())
}
