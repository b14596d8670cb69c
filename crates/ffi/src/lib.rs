//! C ABI for the doom fire simulation.
//!
//! The host creates one opaque `DoomFireInstance`, allocates the intensity
//! and color buffers itself (sized with `doom_fire_intensity_len` and
//! `doom_fire_color_len`), and calls `doom_fire_update` once per frame.
//! Every fallible call returns a `DoomFireErrorCode`; the message of the
//! last failure on the calling thread is available from
//! `doom_fire_get_last_error`.

mod controls;
mod error;
mod helpers;
mod instance;
mod update;

pub use controls::{
    doom_fire_decrease_intensity, doom_fire_get_params, doom_fire_increase_intensity,
    doom_fire_reset, doom_fire_seed, doom_fire_set_params,
};
pub use error::{doom_fire_get_last_error, doom_fire_get_last_error_code, DoomFireErrorCode};
pub use instance::{
    doom_fire_color_len, doom_fire_destroy, doom_fire_intensity_len, doom_fire_new,
    doom_fire_new_with_params, DoomFireInstance, DoomFireParams,
};
pub use update::doom_fire_update;
