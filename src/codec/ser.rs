//! Fixed-order settings serializer.
//!
//! The on-disk document is written with a stable key order so repeated saves
//! of equal state produce byte-identical files and diffs stay readable.
//! Every field is emitted unconditionally (optional groups still write their
//! container) with one exception: the default profile is schema-anonymous,
//! so its identity keys are omitted.
//!
//! Derived `Serialize` impls cover the leaf structs whose wire shape matches
//! their fields; the document root and `Profile` need manual impls for key
//! ordering and the conditional identity block.

use crate::profile::Profile;
use crate::settings::SettingsData;
use crate::shortcut::{self, SHORTCUT_ACTION_COUNT, Shortcut, ShortcutAction};
use crate::types::{ScalingType, ToolbarState};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// `serialize_with` helper: write a [`ToolbarState`] as its integer index.
pub fn toolbar_state_as_index<S: Serializer>(
    value: &ToolbarState,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(value.index())
}

/// `serialize_with` helper: write a [`ScalingType`] as its integer index.
pub fn scaling_type_as_index<S: Serializer>(
    value: &ScalingType,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(value.index())
}

/// The shortcut table in its wire shape: one packed integer per action.
struct ShortcutTable<'a>(&'a [Shortcut; SHORTCUT_ACTION_COUNT]);

impl Serialize for ShortcutTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SHORTCUT_ACTION_COUNT))?;
        for action in ShortcutAction::all() {
            map.serialize_entry(action.name(), &shortcut::encode(&self.0[*action as usize]))?;
        }
        map.end()
    }
}

/// The profiles array: default profile first, named profiles in stored order.
struct ProfileList<'a> {
    default: &'a Profile,
    named: &'a [Profile],
}

impl Serialize for ProfileList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.named.len() + 1))?;
        seq.serialize_element(self.default)?;
        for profile in self.named {
            seq.serialize_element(profile)?;
        }
        seq.end()
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        if !self.name.is_empty() {
            map.serialize_entry("name", &self.name)?;
            map.serialize_entry("packaged", &self.is_packaged)?;
            map.serialize_entry("pathRule", &self.path_rule)?;
            map.serialize_entry("classNameRule", &self.class_name_rule)?;
            map.serialize_entry("launcherPath", &self.launcher_path)?;
            map.serialize_entry("autoScale", &self.auto_scale.index())?;
            map.serialize_entry("launchParameters", &self.launch_parameters)?;
        }

        map.serialize_entry("scalingMode", &self.scaling_mode)?;
        map.serialize_entry("captureMethod", &self.capture_method.index())?;
        map.serialize_entry("multiMonitorUsage", &self.multi_monitor_usage.index())?;

        map.serialize_entry(
            "initialWindowedScaleFactor",
            &self.initial_windowed_scale_factor.index(),
        )?;
        map.serialize_entry(
            "customInitialWindowedScaleFactor",
            &self.custom_initial_windowed_scale_factor,
        )?;

        map.serialize_entry("graphicsCardId", &self.graphics_card)?;
        map.serialize_entry("frameRateLimiterEnabled", &self.frame_rate_limiter_enabled)?;
        map.serialize_entry("maxFrameRate", &self.max_frame_rate)?;

        map.serialize_entry("3DGameMode", &self.is_3d_game_mode())?;
        map.serialize_entry("captureTitleBar", &self.is_capture_title_bar())?;
        map.serialize_entry("adjustCursorSpeed", &self.is_adjust_cursor_speed())?;
        map.serialize_entry("disableDirectFlip", &self.is_direct_flip_disabled())?;

        map.serialize_entry("cursorScaling", &self.cursor_scaling.index())?;
        map.serialize_entry("customCursorScaling", &self.custom_cursor_scaling)?;
        map.serialize_entry(
            "cursorInterpolationMode",
            &self.cursor_interpolation_mode.index(),
        )?;
        map.serialize_entry("autoHideCursorEnabled", &self.auto_hide_cursor_enabled)?;
        map.serialize_entry("autoHideCursorDelay", &self.auto_hide_cursor_delay)?;

        map.serialize_entry("croppingEnabled", &self.cropping_enabled)?;
        map.serialize_entry("cropping", &self.cropping)?;

        map.end()
    }
}

impl Serialize for SettingsData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        let language_tag = usize::try_from(self.language)
            .ok()
            .and_then(|index| crate::defaults::SUPPORTED_LANGUAGES.get(index))
            .copied()
            .unwrap_or("");
        map.serialize_entry("language", language_tag)?;

        map.serialize_entry("theme", &self.theme.index())?;
        map.serialize_entry("windowPos", &self.window)?;
        map.serialize_entry("shortcuts", &ShortcutTable(&self.shortcuts))?;

        map.serialize_entry("countdownSeconds", &self.countdown_seconds)?;
        map.serialize_entry("developerMode", &self.developer_mode)?;
        map.serialize_entry("debugMode", &self.debug_mode)?;
        map.serialize_entry("benchmarkMode", &self.benchmark_mode)?;
        map.serialize_entry("disableEffectCache", &self.effect_cache_disabled)?;
        map.serialize_entry("disableFontCache", &self.font_cache_disabled)?;
        map.serialize_entry("saveEffectSources", &self.save_effect_sources)?;
        map.serialize_entry("warningsAreErrors", &self.warnings_are_errors)?;
        map.serialize_entry("allowScalingMaximized", &self.allow_scaling_maximized)?;
        map.serialize_entry(
            "simulateExclusiveFullscreen",
            &self.simulate_exclusive_fullscreen,
        )?;
        map.serialize_entry("alwaysRunAsAdmin", &self.always_run_as_admin)?;
        map.serialize_entry("showNotifyIcon", &self.show_notify_icon)?;
        map.serialize_entry("inlineParams", &self.inline_params)?;
        map.serialize_entry("autoCheckForUpdates", &self.auto_check_for_updates)?;
        map.serialize_entry("checkForPreviewUpdates", &self.check_for_preview_updates)?;
        map.serialize_entry("updateCheckDate", &self.update_check_date.timestamp_millis())?;
        map.serialize_entry(
            "duplicateFrameDetectionMode",
            &self.duplicate_frame_detection_mode.index(),
        )?;
        map.serialize_entry(
            "enableStatisticsForDynamicDetection",
            &self.statistics_for_dynamic_detection,
        )?;
        map.serialize_entry("minFrameRate", &self.min_frame_rate)?;
        map.serialize_entry("disableFP16", &self.fp16_disabled)?;
        map.serialize_entry("simpleMode", &self.simple_mode)?;

        map.serialize_entry("scalingModes", &self.scaling_modes)?;
        map.serialize_entry(
            "profiles",
            &ProfileList {
                default: &self.default_profile,
                named: &self.profiles,
            },
        )?;

        map.serialize_entry("overlay", &self.overlay)?;

        map.end()
    }
}
