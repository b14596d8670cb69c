//! Tunable fire parameters and host control hooks.
//!
//! The reference look comes from [`FireParams::reference`]: injection adds
//! `floor(u * 7)` per floor cell, propagation decays by `floor(u * 2)` and
//! drifts every decayed write one cell towards lower indices. Host hooks
//! ([`FireControl`]) step the injection strength and, on the next tick,
//! heat or cool the floor itself; they never reseed the random source.

use serde::{Deserialize, Serialize};

use crate::error::FireError;
use crate::palette::PALETTE_LEN;

/// Injection strength of the reference fire.
pub const DEFAULT_INJECTION_STRENGTH: f32 = 7.0;

/// Decay span of the reference fire.
pub const DEFAULT_DECAY_SPAN: f32 = 2.0;

/// Amount a single control hook moves the injection strength.
pub const INTENSITY_STEP: f32 = 1.0;

/// Span of the per-cell floor change a control hook applies on the next tick.
pub const SOURCE_NUDGE_SPAN: f32 = 7.0;

/// Strongest injection: a single floor draw can then reach the top palette index.
pub const MAX_INJECTION_STRENGTH: f32 = PALETTE_LEN as f32;

/// Largest decay span. Keeps the decayed write at most a few cells from its source.
pub const MAX_DECAY_SPAN: f32 = 8.0;

/// Lateral drift applied to decayed writes during propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftMode {
    /// The drawn direction is clamped up to 1, so every decayed write moves
    /// towards lower indices. This is the reference fire's signature lean.
    #[default]
    Rightward,
    /// A drawn 0 becomes 1, so decayed writes move either way.
    Symmetric,
}

impl DriftMode {
    /// Map a raw direction draw in `{-1, 0}` to the applied direction.
    #[inline]
    #[must_use]
    pub fn resolve(self, raw: i32) -> i32 {
        match self {
            Self::Rightward => raw.max(1),
            Self::Symmetric => {
                if raw == 0 {
                    1
                } else {
                    raw
                }
            }
        }
    }
}

/// Runtime-adjustable parameters of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireParams {
    /// Injection adds `floor(u * injection_strength)` per floor cell, `u` in `[0, 1)`.
    pub injection_strength: f32,
    /// Propagation decays by `trunc(u * decay_span)`, `u` in `[0, 1)`.
    pub decay_span: f32,
    /// Lateral drift rule.
    pub drift: DriftMode,
}

impl Default for FireParams {
    fn default() -> Self {
        Self::reference()
    }
}

impl FireParams {
    /// The reference fire.
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            injection_strength: DEFAULT_INJECTION_STRENGTH,
            decay_span: DEFAULT_DECAY_SPAN,
            drift: DriftMode::Rightward,
        }
    }

    /// Low, flickering flames.
    #[must_use]
    pub const fn calm() -> Self {
        Self {
            injection_strength: 4.0,
            decay_span: 3.0,
            drift: DriftMode::Rightward,
        }
    }

    /// Tall, bright flames that sway both ways.
    #[must_use]
    pub const fn blaze() -> Self {
        Self {
            injection_strength: 12.0,
            decay_span: 2.0,
            drift: DriftMode::Symmetric,
        }
    }

    /// Check every field is finite and inside its range.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), FireError> {
        check_range(
            "injection_strength",
            self.injection_strength,
            MAX_INJECTION_STRENGTH,
        )?;
        check_range("decay_span", self.decay_span, MAX_DECAY_SPAN)
    }

    /// Apply a host control hook. Strength saturates at its bounds.
    pub fn apply(&mut self, control: FireControl) {
        self.injection_strength = match control {
            FireControl::Increase => self.injection_strength + INTENSITY_STEP,
            FireControl::Decrease => self.injection_strength - INTENSITY_STEP,
        }
        .clamp(0.0, MAX_INJECTION_STRENGTH);
    }
}

fn check_range(name: &'static str, value: f32, max: f32) -> Result<(), FireError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(FireError::InvalidParameter { name, value })
    }
}

/// Host-invokable control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireControl {
    /// "Increase fire intensity".
    Increase,
    /// "Decrease fire intensity".
    Decrease,
}
