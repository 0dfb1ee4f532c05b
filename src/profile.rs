//! Application scaling profiles.
//!
//! A profile bundles the scaling and capture settings applied to one external
//! application. The distinguished *default profile* has no identity fields
//! and applies when nothing more specific matches; named profiles are
//! identified by a non-empty trimmed name and matched to running windows by
//! their path and class-name rules.

use crate::types::{
    AutoScale, CaptureMethod, Cropping, CursorInterpolationMode, CursorScaling, GraphicsCardId,
    InitialWindowedScaleFactor, MultiMonitorUsage, scaling_flags,
};
use std::path::{Path, PathBuf};

/// Scaling and capture settings for one matched application.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Display name. Empty on the default profile only.
    pub name: String,
    /// Whether the matched application is a packaged (store) app.
    pub is_packaged: bool,
    /// Rule matched against the window's executable path.
    pub path_rule: String,
    /// Rule matched against the window's class name.
    pub class_name_rule: String,
    /// Optional launcher executable; a relative value is resolved against the
    /// directory of the matched executable on load.
    pub launcher_path: PathBuf,
    pub auto_scale: AutoScale,
    /// Extra command-line parameters passed when launching.
    pub launch_parameters: String,

    /// Index into the scaling-mode list; -1 = use the default mode.
    pub scaling_mode: i32,
    pub capture_method: CaptureMethod,
    pub multi_monitor_usage: MultiMonitorUsage,
    pub initial_windowed_scale_factor: InitialWindowedScaleFactor,
    pub custom_initial_windowed_scale_factor: f32,
    pub graphics_card: GraphicsCardId,
    pub frame_rate_limiter_enabled: bool,
    pub max_frame_rate: f32,
    /// Bitset of [`scaling_flags`] masks.
    pub scaling_flags: u32,
    pub cursor_scaling: CursorScaling,
    pub custom_cursor_scaling: f32,
    pub cursor_interpolation_mode: CursorInterpolationMode,
    pub auto_hide_cursor_enabled: bool,
    pub auto_hide_cursor_delay: f32,
    pub cropping_enabled: bool,
    pub cropping: Cropping,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_packaged: false,
            path_rule: String::new(),
            class_name_rule: String::new(),
            launcher_path: PathBuf::new(),
            auto_scale: AutoScale::default(),
            launch_parameters: String::new(),
            scaling_mode: -1,
            capture_method: CaptureMethod::default(),
            multi_monitor_usage: MultiMonitorUsage::default(),
            initial_windowed_scale_factor: InitialWindowedScaleFactor::default(),
            custom_initial_windowed_scale_factor:
                crate::defaults::custom_initial_windowed_scale_factor(),
            graphics_card: GraphicsCardId::default(),
            frame_rate_limiter_enabled: false,
            max_frame_rate: crate::defaults::max_frame_rate(),
            scaling_flags: scaling_flags::ADJUST_CURSOR_SPEED,
            cursor_scaling: CursorScaling::default(),
            custom_cursor_scaling: crate::defaults::custom_cursor_scaling(),
            cursor_interpolation_mode: CursorInterpolationMode::default(),
            auto_hide_cursor_enabled: false,
            auto_hide_cursor_delay: crate::defaults::auto_hide_cursor_delay(),
            cropping_enabled: false,
            cropping: Cropping::default(),
        }
    }
}

impl Profile {
    /// True for the distinguished default profile.
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_3d_game_mode(&self) -> bool {
        self.scaling_flags & scaling_flags::THREE_D_GAME_MODE != 0
    }

    pub fn is_capture_title_bar(&self) -> bool {
        self.scaling_flags & scaling_flags::CAPTURE_TITLE_BAR != 0
    }

    pub fn is_adjust_cursor_speed(&self) -> bool {
        self.scaling_flags & scaling_flags::ADJUST_CURSOR_SPEED != 0
    }

    pub fn is_direct_flip_disabled(&self) -> bool {
        self.scaling_flags & scaling_flags::DISABLE_DIRECT_FLIP != 0
    }

    /// Set or clear one [`scaling_flags`] bit.
    pub fn set_scaling_flag(&mut self, mask: u32, value: bool) {
        if value {
            self.scaling_flags |= mask;
        } else {
            self.scaling_flags &= !mask;
        }
    }

    /// Resolve a relative launcher path against the matched executable's
    /// directory. Absolute and empty launcher paths are left as-is.
    pub fn resolve_launcher_path(&mut self) {
        if self.launcher_path.as_os_str().is_empty() || self.launcher_path.is_absolute() {
            return;
        }
        if let Some(exe_dir) = Path::new(&self.path_rule).parent() {
            self.launcher_path = exe_dir.join(&self.launcher_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_has_no_identity() {
        let profile = Profile::default();
        assert!(profile.is_default());
        assert_eq!(profile.scaling_mode, -1);
        assert_eq!(profile.max_frame_rate, 60.0);
        assert!(profile.is_adjust_cursor_speed());
    }

    #[test]
    fn test_scaling_flag_set_and_clear() {
        let mut profile = Profile::default();
        profile.set_scaling_flag(scaling_flags::THREE_D_GAME_MODE, true);
        assert!(profile.is_3d_game_mode());
        profile.set_scaling_flag(scaling_flags::THREE_D_GAME_MODE, false);
        assert!(!profile.is_3d_game_mode());
    }

    #[test]
    fn test_relative_launcher_path_resolves_against_executable_dir() {
        let mut profile = Profile {
            path_rule: "/games/emu/emu.exe".into(),
            launcher_path: PathBuf::from("launcher.exe"),
            ..Profile::default()
        };
        profile.resolve_launcher_path();
        assert_eq!(profile.launcher_path, PathBuf::from("/games/emu/launcher.exe"));
    }

    #[test]
    fn test_absolute_launcher_path_untouched() {
        let mut profile = Profile {
            path_rule: "/games/emu/emu.exe".into(),
            launcher_path: PathBuf::from("/opt/launcher"),
            ..Profile::default()
        };
        profile.resolve_launcher_path();
        assert_eq!(profile.launcher_path, PathBuf::from("/opt/launcher"));
    }
}
