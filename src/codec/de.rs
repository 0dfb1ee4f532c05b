//! Lenient settings decoder.
//!
//! [`decode`] never fails: every field is read independently and falls back
//! to its documented default on absence, wrong type, or out-of-range value.
//! Schema evolution is handled by alias chains (current key first, legacy
//! keys only when the current one is wholly absent) declared once in the
//! tables below and walked uniformly, and by shape-level fallbacks for the
//! window placement and graphics-card fields.
//!
//! Order matters in one place: scaling modes are imported before profiles so
//! each profile's mode index can be bounds-checked against the real list.

use crate::codec::json::{self, JsonMap};
use crate::codec::{BASE_DPI, DpiProbe};
use crate::defaults::{self, FLOAT_EPSILON, SUPPORTED_LANGUAGES};
use crate::profile::Profile;
use crate::scaling_mode::{ScalingEffect, ScalingMode};
use crate::settings::SettingsData;
use crate::shortcut::{self, ShortcutAction};
use crate::types::{
    AutoScale, CaptureMethod, Cropping, CursorInterpolationMode, CursorScaling,
    DuplicateFrameDetectionMode, InitialWindowedScaleFactor, MultiMonitorUsage, OverlayOptions,
    ScalingType, Theme, ToolbarState, WindowPlacement, scaling_flags,
};
use chrono::DateTime;
use serde_json::Value;
use std::path::PathBuf;

/// One top-level boolean field: alias chain plus accessor.
struct BoolField {
    keys: &'static [&'static str],
    field: fn(&mut SettingsData) -> &mut bool,
}

/// Top-level boolean fields, walked uniformly. Legacy names follow the
/// current name in each chain.
const BOOL_FIELDS: &[BoolField] = &[
    BoolField {
        keys: &["developerMode"],
        field: |s| &mut s.developer_mode,
    },
    BoolField {
        keys: &["debugMode"],
        field: |s| &mut s.debug_mode,
    },
    BoolField {
        keys: &["benchmarkMode"],
        field: |s| &mut s.benchmark_mode,
    },
    BoolField {
        keys: &["disableEffectCache"],
        field: |s| &mut s.effect_cache_disabled,
    },
    BoolField {
        keys: &["disableFontCache"],
        field: |s| &mut s.font_cache_disabled,
    },
    BoolField {
        keys: &["saveEffectSources"],
        field: |s| &mut s.save_effect_sources,
    },
    BoolField {
        keys: &["warningsAreErrors"],
        field: |s| &mut s.warnings_are_errors,
    },
    BoolField {
        keys: &["allowScalingMaximized"],
        field: |s| &mut s.allow_scaling_maximized,
    },
    BoolField {
        keys: &["simulateExclusiveFullscreen"],
        field: |s| &mut s.simulate_exclusive_fullscreen,
    },
    BoolField {
        keys: &["alwaysRunAsAdmin", "alwaysRunAsElevated"],
        field: |s| &mut s.always_run_as_admin,
    },
    BoolField {
        keys: &["showNotifyIcon", "showTrayIcon"],
        field: |s| &mut s.show_notify_icon,
    },
    BoolField {
        keys: &["inlineParams"],
        field: |s| &mut s.inline_params,
    },
    BoolField {
        keys: &["autoCheckForUpdates"],
        field: |s| &mut s.auto_check_for_updates,
    },
    BoolField {
        keys: &["checkForPreviewUpdates"],
        field: |s| &mut s.check_for_preview_updates,
    },
    BoolField {
        keys: &["enableStatisticsForDynamicDetection"],
        field: |s| &mut s.statistics_for_dynamic_detection,
    },
    BoolField {
        keys: &["disableFP16"],
        field: |s| &mut s.fp16_disabled,
    },
    BoolField {
        keys: &["simpleMode"],
        field: |s| &mut s.simple_mode,
    },
];

/// One per-profile scaling-flag bit: alias chain plus mask.
struct FlagField {
    keys: &'static [&'static str],
    mask: u32,
}

const FLAG_FIELDS: &[FlagField] = &[
    FlagField {
        keys: &["3DGameMode"],
        mask: scaling_flags::THREE_D_GAME_MODE,
    },
    FlagField {
        keys: &["captureTitleBar", "reserveTitleBar"],
        mask: scaling_flags::CAPTURE_TITLE_BAR,
    },
    FlagField {
        keys: &["adjustCursorSpeed"],
        mask: scaling_flags::ADJUST_CURSOR_SPEED,
    },
    FlagField {
        keys: &["disableDirectFlip"],
        mask: scaling_flags::DISABLE_DIRECT_FLIP,
    },
];

/// Decode a parsed document object into settings. Never fails; malformed
/// fields degrade to defaults one at a time.
pub fn decode(root: &JsonMap, dpi: &dyn DpiProbe) -> SettingsData {
    let mut settings = SettingsData::default();

    {
        let mut language = String::new();
        json::read_string(root, &["language"], &mut language);
        if language.is_empty() {
            settings.language = -1;
        } else {
            let language = language.to_lowercase();
            settings.language = SUPPORTED_LANGUAGES
                .iter()
                .position(|tag| *tag == language)
                .map_or(-1, |index| index as i32);
        }
    }

    {
        let mut theme = Theme::default().index();
        json::read_u32(root, &["theme"], &mut theme);
        settings.theme = Theme::from_index(theme).unwrap_or_default();
    }

    if let Some(window_pos) = json::object(root, &["windowPos"]) {
        decode_window_placement(window_pos, dpi, &mut settings.window);
    }

    if let Some(shortcuts) = json::object(root, &["shortcuts", "hotkeys"]) {
        for action in ShortcutAction::all() {
            let keys: &[&str] = match action {
                ShortcutAction::Scale => &["scale"],
                ShortcutAction::WindowedModeScale => &["windowedModeScale"],
                ShortcutAction::Toolbar => &["toolbar", "overlay"],
            };
            let mut packed = 0u32;
            if json::read_u32(shortcuts, keys, &mut packed) {
                shortcut::decode(packed, &mut settings.shortcuts[*action as usize]);
            }
        }
    }

    json::read_u32(
        root,
        &["countdownSeconds", "downCount"],
        &mut settings.countdown_seconds,
    );
    if settings.countdown_seconds == 0 || settings.countdown_seconds > 5 {
        settings.countdown_seconds = defaults::countdown_seconds();
    }

    for field in BOOL_FIELDS {
        json::read_bool(root, field.keys, (field.field)(&mut settings));
    }

    {
        let mut millis = settings.update_check_date.timestamp_millis();
        json::read_i64(root, &["updateCheckDate"], &mut millis);
        if let Some(date) = DateTime::from_timestamp_millis(millis) {
            settings.update_check_date = date;
        }
    }

    {
        let mut mode = DuplicateFrameDetectionMode::default().index();
        json::read_u32(root, &["duplicateFrameDetectionMode"], &mut mode);
        settings.duplicate_frame_detection_mode =
            DuplicateFrameDetectionMode::from_index(mode).unwrap_or_default();
    }

    json::read_f32(root, &["minFrameRate"], &mut settings.min_frame_rate);
    if settings.min_frame_rate < -FLOAT_EPSILON
        || settings.min_frame_rate > 1000.0 + FLOAT_EPSILON
    {
        settings.min_frame_rate = defaults::min_frame_rate();
    }

    settings.scaling_modes = decode_scaling_modes(root);

    if let Some(entries) = json::array(root, &["profiles", "scalingProfiles"]) {
        if let Some(first) = entries.first().and_then(Value::as_object) {
            decode_profile(
                first,
                &mut settings.default_profile,
                true,
                settings.scaling_modes.len(),
            );
        }
        for entry in entries.iter().skip(1) {
            let Some(obj) = entry.as_object() else {
                continue;
            };
            let mut profile = Profile::default();
            if decode_profile(obj, &mut profile, false, settings.scaling_modes.len()) {
                settings.profiles.push(profile);
            }
        }
    }

    if let Some(overlay) = json::object(root, &["overlay"]) {
        decode_overlay(overlay, &mut settings.overlay);
    }

    settings
}

/// Prefer the modern center+DIP-size shape; fall back to the legacy
/// top-left pixel rectangle, reconstructing device-independent size from the
/// DPI of the monitor under the computed center.
fn decode_window_placement(obj: &JsonMap, dpi: &dyn DpiProbe, out: &mut WindowPlacement) {
    let mut center_x = 0.0f32;
    let mut center_y = 0.0f32;
    let mut width = 0.0f32;
    let mut height = 0.0f32;
    if json::read_f32(obj, &["centerX"], &mut center_x)
        && json::read_f32(obj, &["centerY"], &mut center_y)
        && json::read_f32(obj, &["width"], &mut width)
        && json::read_f32(obj, &["height"], &mut height)
    {
        out.center_x = center_x;
        out.center_y = center_y;
        out.width = width;
        out.height = height;
    } else {
        let mut x = 0i32;
        let mut y = 0i32;
        let mut pixel_width = 0u32;
        let mut pixel_height = 0u32;
        if json::read_i32(obj, &["x"], &mut x)
            && json::read_i32(obj, &["y"], &mut y)
            && json::read_u32(obj, &["width"], &mut pixel_width)
            && json::read_u32(obj, &["height"], &mut pixel_height)
        {
            out.center_x = x as f32 + pixel_width as f32 / 2.0;
            out.center_y = y as f32 + pixel_height as f32 / 2.0;

            let dpi_value = dpi.dpi_at(out.center_x, out.center_y).max(1);
            let dpi_factor = dpi_value as f32 / BASE_DPI;
            out.width = pixel_width as f32 / dpi_factor;
            out.height = pixel_height as f32 / dpi_factor;
        }
    }

    json::read_bool(obj, &["maximized"], &mut out.maximized);
}

/// Decode one profiles-array entry. For non-default entries the identity
/// fields are mandatory and well-typed or the whole entry is rejected
/// (returns false); everything else defaults and clamps.
fn decode_profile(
    obj: &JsonMap,
    profile: &mut Profile,
    is_default: bool,
    scaling_mode_count: usize,
) -> bool {
    if !is_default {
        if !json::read_string(obj, &["name"], &mut profile.name) {
            return false;
        }
        if profile.name.trim().is_empty() {
            return false;
        }

        if !json::read_bool(obj, &["packaged"], &mut profile.is_packaged) {
            return false;
        }

        if !json::read_string(obj, &["pathRule"], &mut profile.path_rule)
            || profile.path_rule.is_empty()
        {
            return false;
        }

        if !json::read_string(obj, &["classNameRule"], &mut profile.class_name_rule)
            || profile.class_name_rule.is_empty()
        {
            return false;
        }

        let mut launcher = String::new();
        json::read_string(obj, &["launcherPath"], &mut launcher);
        profile.launcher_path = PathBuf::from(launcher);
        profile.resolve_launcher_path();

        // Modern configs store an enum; very old ones stored a boolean.
        if let Some(value) = json::entry(obj, &["autoScale"]) {
            if let Some(index) = value.as_u64().and_then(|v| u32::try_from(v).ok()) {
                profile.auto_scale = AutoScale::from_index(index).unwrap_or(AutoScale::Disabled);
            } else if let Some(enabled) = value.as_bool() {
                profile.auto_scale = if enabled {
                    AutoScale::Fullscreen
                } else {
                    AutoScale::Disabled
                };
            }
        }

        json::read_string(obj, &["launchParameters"], &mut profile.launch_parameters);
    }

    json::read_i32(obj, &["scalingMode"], &mut profile.scaling_mode);
    if profile.scaling_mode < -1 || profile.scaling_mode >= scaling_mode_count as i32 {
        profile.scaling_mode = -1;
    }

    {
        let mut method = CaptureMethod::default().index();
        json::read_u32(obj, &["captureMethod", "captureMode"], &mut method);
        profile.capture_method = CaptureMethod::from_index(method).unwrap_or_default();
    }

    {
        let mut usage = MultiMonitorUsage::default().index();
        json::read_u32(obj, &["multiMonitorUsage"], &mut usage);
        profile.multi_monitor_usage = MultiMonitorUsage::from_index(usage).unwrap_or_default();
    }

    {
        let mut factor = InitialWindowedScaleFactor::default().index();
        json::read_u32(obj, &["initialWindowedScaleFactor"], &mut factor);
        profile.initial_windowed_scale_factor =
            InitialWindowedScaleFactor::from_index(factor).unwrap_or_default();
    }

    json::read_f32(
        obj,
        &["customInitialWindowedScaleFactor"],
        &mut profile.custom_initial_windowed_scale_factor,
    );
    if profile.custom_initial_windowed_scale_factor < 1.0 {
        profile.custom_initial_windowed_scale_factor =
            defaults::custom_initial_windowed_scale_factor();
    }

    match json::entry(obj, &["graphicsCardId"]) {
        Some(value) => {
            if let Some(card) = value.as_object() {
                json::read_i32(card, &["idx"], &mut profile.graphics_card.idx);
                json::read_u32(card, &["vendorId"], &mut profile.graphics_card.vendor_id);
                json::read_u32(card, &["deviceId"], &mut profile.graphics_card.device_id);
            }
        }
        None => {
            // Legacy shapes: a 0-based index, or an even older 1-based one.
            if !json::read_i32(obj, &["graphicsCard"], &mut profile.graphics_card.idx) {
                let mut adapter = 0u32;
                if json::read_u32(obj, &["graphicsAdapter"], &mut adapter) {
                    profile.graphics_card.idx = adapter as i32 - 1;
                }
            }
        }
    }

    json::read_bool(
        obj,
        &["frameRateLimiterEnabled"],
        &mut profile.frame_rate_limiter_enabled,
    );
    json::read_f32(obj, &["maxFrameRate"], &mut profile.max_frame_rate);
    if profile.max_frame_rate <= 10.0 - FLOAT_EPSILON
        || profile.max_frame_rate >= 1000.0 + FLOAT_EPSILON
    {
        profile.max_frame_rate = defaults::max_frame_rate();
    }

    for flag in FLAG_FIELDS {
        let mut enabled = profile.scaling_flags & flag.mask != 0;
        if json::read_bool(obj, flag.keys, &mut enabled) {
            profile.set_scaling_flag(flag.mask, enabled);
        }
    }

    {
        let mut scaling = CursorScaling::default().index();
        json::read_u32(obj, &["cursorScaling"], &mut scaling);
        profile.cursor_scaling = CursorScaling::from_index(scaling).unwrap_or_default();
    }

    json::read_f32(
        obj,
        &["customCursorScaling"],
        &mut profile.custom_cursor_scaling,
    );
    if profile.custom_cursor_scaling < 0.0 {
        profile.custom_cursor_scaling = defaults::custom_cursor_scaling();
    }

    {
        let mut mode = CursorInterpolationMode::default().index();
        json::read_u32(obj, &["cursorInterpolationMode"], &mut mode);
        profile.cursor_interpolation_mode =
            CursorInterpolationMode::from_index(mode).unwrap_or_default();
    }

    json::read_bool(
        obj,
        &["autoHideCursorEnabled"],
        &mut profile.auto_hide_cursor_enabled,
    );
    json::read_f32(
        obj,
        &["autoHideCursorDelay"],
        &mut profile.auto_hide_cursor_delay,
    );
    if profile.auto_hide_cursor_delay <= 0.1 - FLOAT_EPSILON
        || profile.auto_hide_cursor_delay >= 5.0 + FLOAT_EPSILON
    {
        profile.auto_hide_cursor_delay = defaults::auto_hide_cursor_delay();
    }

    json::read_bool(obj, &["croppingEnabled"], &mut profile.cropping_enabled);

    if let Some(cropping) = json::object(obj, &["cropping"]) {
        let mut value = Cropping::default();
        let complete = json::read_f32(cropping, &["left"], &mut value.left)
            && json::read_f32(cropping, &["top"], &mut value.top)
            && json::read_f32(cropping, &["right"], &mut value.right)
            && json::read_f32(cropping, &["bottom"], &mut value.bottom);
        profile.cropping = if complete && value.is_valid() {
            value
        } else {
            Cropping::default()
        };
    }

    true
}

fn decode_scaling_modes(root: &JsonMap) -> Vec<ScalingMode> {
    let Some(entries) = json::array(root, &["scalingModes"]) else {
        return Vec::new();
    };

    let mut modes = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(obj) = entry.as_object() else {
            continue;
        };
        let mut name = String::new();
        if !json::read_string(obj, &["name"], &mut name) || name.is_empty() {
            continue;
        }

        let mut mode = ScalingMode::new(name);
        if let Some(effects) = json::array(obj, &["effects"]) {
            for effect_value in effects {
                let Some(effect_obj) = effect_value.as_object() else {
                    continue;
                };
                let mut effect_name = String::new();
                if !json::read_string(effect_obj, &["name"], &mut effect_name)
                    || effect_name.is_empty()
                {
                    continue;
                }

                let mut effect = ScalingEffect::new(effect_name);
                let mut scaling_type = ScalingType::default().index();
                json::read_u32(effect_obj, &["scalingType"], &mut scaling_type);
                effect.scaling_type = ScalingType::from_index(scaling_type).unwrap_or_default();

                if let Some(parameters) = json::object(effect_obj, &["parameters"]) {
                    for (key, value) in parameters {
                        if let Some(number) = value.as_f64() {
                            effect.parameters.insert(key.clone(), number as f32);
                        }
                    }
                }
                mode.effects.push(effect);
            }
        }
        modes.push(mode);
    }
    modes
}

fn decode_overlay(obj: &JsonMap, out: &mut OverlayOptions) {
    let mut state = ToolbarState::default().index();
    if json::read_u32(obj, &["fullscreenInitialToolbarState"], &mut state) {
        out.fullscreen_initial_toolbar_state = ToolbarState::from_index(state).unwrap_or_default();

        let mut windowed = ToolbarState::default().index();
        json::read_u32(obj, &["windowedInitialToolbarState"], &mut windowed);
        out.windowed_initial_toolbar_state =
            ToolbarState::from_index(windowed).unwrap_or_default();
    } else {
        // One legacy state applied to both contexts.
        let mut legacy = ToolbarState::default().index();
        json::read_u32(obj, &["initialToolbarState"], &mut legacy);
        let state = ToolbarState::from_index(legacy).unwrap_or_default();
        out.fullscreen_initial_toolbar_state = state;
        out.windowed_initial_toolbar_state = state;
    }

    let mut dir = String::new();
    json::read_string(obj, &["screenshotsDir"], &mut dir);
    out.screenshots_dir = PathBuf::from(dir);

    if let Some(windows) = json::object(obj, &["windows"]) {
        for (name, value) in windows {
            let Some(window_obj) = value.as_object() else {
                continue;
            };
            let option = out.windows.entry(name.clone()).or_default();
            json::read_u16(window_obj, &["hArea"], &mut option.h_area);
            json::read_u16(window_obj, &["vArea"], &mut option.v_area);
            json::read_f32(window_obj, &["hPos"], &mut option.h_pos);
            json::read_f32(window_obj, &["vPos"], &mut option.v_pos);
        }
    }
}
