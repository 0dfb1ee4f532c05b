//! Default values shared by `Default` impls and the lenient decoder.
//!
//! Every documented field default lives here as a named function so the
//! decoder's reset-on-invalid paths and the seeded first-run state cannot
//! drift apart.

use crate::scaling_mode::{ScalingEffect, ScalingMode};
use crate::shortcut::{SHORTCUT_ACTION_COUNT, Shortcut, ShortcutAction};
use crate::types::ScalingType;

/// Tolerance applied at the boundaries of float validity bands, so values
/// that sit exactly on a boundary survive a serialize/parse round trip.
pub const FLOAT_EPSILON: f32 = 1e-5;

/// Languages with bundled translations, as canonical lowercase tags.
///
/// The persisted `language` field holds one of these tags (or the empty
/// string for "follow the system"); in memory the field is an index into
/// this table, -1 for system.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "de", "en", "es", "fr", "it", "ja", "ko", "pl", "pt-br", "ru", "tr", "uk", "zh-hans", "zh-hant",
];

// ── Scalar field defaults ──────────────────────────────────────────────────

pub fn countdown_seconds() -> u32 {
    3
}

pub fn max_frame_rate() -> f32 {
    60.0
}

pub fn min_frame_rate() -> f32 {
    0.0
}

pub fn auto_hide_cursor_delay() -> f32 {
    3.0
}

pub fn custom_cursor_scaling() -> f32 {
    1.0
}

pub fn custom_initial_windowed_scale_factor() -> f32 {
    1.0
}

// ── Built-in shortcuts ─────────────────────────────────────────────────────

/// The three default shortcuts, in [`ShortcutAction`] table order.
pub fn default_shortcuts() -> [Shortcut; SHORTCUT_ACTION_COUNT] {
    let base = Shortcut {
        alt: true,
        shift: true,
        ..Shortcut::default()
    };
    [
        Shortcut { code: b'A', ..base },
        Shortcut { code: b'Q', ..base },
        Shortcut { code: b'D', ..base },
    ]
}

/// Fill in the default binding for every action whose shortcut is empty.
/// Returns true when anything changed.
pub fn fill_default_shortcuts(shortcuts: &mut [Shortcut; SHORTCUT_ACTION_COUNT]) -> bool {
    let defaults = default_shortcuts();
    let mut changed = false;
    for action in ShortcutAction::all() {
        let slot = &mut shortcuts[*action as usize];
        if slot.is_empty() {
            *slot = defaults[*action as usize];
            changed = true;
        }
    }
    changed
}

// ── Built-in scaling modes ─────────────────────────────────────────────────

/// The seven scaling modes seeded on first run.
pub fn default_scaling_modes() -> Vec<ScalingMode> {
    vec![
        ScalingMode::new("Lanczos")
            .effect(ScalingEffect::new("Lanczos").scaling_type(ScalingType::Fit)),
        ScalingMode::new("FSR")
            .effect(ScalingEffect::new("FSR\\FSR_EASU").scaling_type(ScalingType::Fit))
            .effect(ScalingEffect::new("FSR\\FSR_RCAS").parameter("sharpness", 0.87)),
        ScalingMode::new("FSRCNNX").effect(ScalingEffect::new("FSRCNNX\\FSRCNNX")),
        ScalingMode::new("CuNNy")
            .effect(ScalingEffect::new("CuNNy\\CuNNy").scaling_type(ScalingType::Fit)),
        ScalingMode::new("CuNNy2")
            .effect(ScalingEffect::new("CuNNy2\\CuNNy2").scaling_type(ScalingType::Fit)),
        ScalingMode::new("CRT").effect(ScalingEffect::new("CRT\\CRT").scaling_type(ScalingType::Fit)),
        ScalingMode::new("xBRZ").effect(ScalingEffect::new("xBRZ\\xBRZ").scaling_type(ScalingType::Fit)),
    ]
}
