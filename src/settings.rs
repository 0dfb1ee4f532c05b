//! The settings object graph and its mutation surface.
//!
//! [`SettingsData`] is the plain persisted state: cheap to clone, comparable,
//! and exactly what the codec reads and writes. [`Settings`] wraps it with
//! everything runtime: the resolved config paths, the injected folder
//! capability, registered change listeners, and the background save worker.
//!
//! Every named setter follows the same shape: short-circuit when the value
//! is unchanged, mutate, notify listeners synchronously on the calling
//! thread, then enqueue an asynchronous save of a full snapshot.

use crate::paths::{self, ConfigPaths, KnownFolders};
use crate::persistence::{SaveTask, SaveWorker, write_settings};
use crate::profile::Profile;
use crate::scaling_mode::ScalingMode;
use crate::shortcut::{SHORTCUT_ACTION_COUNT, Shortcut, ShortcutAction};
use crate::types::{DuplicateFrameDetectionMode, OverlayOptions, Theme, WindowPlacement};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The complete persisted configuration state.
///
/// This is the snapshot type handed to the save worker; mutate it only
/// through [`Settings`] so changes notify listeners and reach disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsData {
    /// Index into [`crate::defaults::SUPPORTED_LANGUAGES`]; -1 = system.
    pub language: i32,
    pub theme: Theme,
    pub window: WindowPlacement,
    pub shortcuts: [Shortcut; SHORTCUT_ACTION_COUNT],
    /// Seconds counted down before scaling starts, 1-5.
    pub countdown_seconds: u32,

    pub developer_mode: bool,
    pub debug_mode: bool,
    pub benchmark_mode: bool,
    pub effect_cache_disabled: bool,
    pub font_cache_disabled: bool,
    pub save_effect_sources: bool,
    pub warnings_are_errors: bool,
    pub allow_scaling_maximized: bool,
    pub simulate_exclusive_fullscreen: bool,
    pub always_run_as_admin: bool,
    pub show_notify_icon: bool,
    pub inline_params: bool,
    pub auto_check_for_updates: bool,
    pub check_for_preview_updates: bool,
    pub statistics_for_dynamic_detection: bool,
    pub fp16_disabled: bool,
    pub simple_mode: bool,

    pub update_check_date: DateTime<Utc>,
    pub duplicate_frame_detection_mode: DuplicateFrameDetectionMode,
    /// Lower frame-rate bound for dynamic detection; 0 = uncapped.
    pub min_frame_rate: f32,

    pub scaling_modes: Vec<ScalingMode>,
    pub default_profile: Profile,
    pub profiles: Vec<Profile>,
    pub overlay: OverlayOptions,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            language: -1,
            theme: Theme::default(),
            window: WindowPlacement::default(),
            shortcuts: [Shortcut::default(); SHORTCUT_ACTION_COUNT],
            countdown_seconds: crate::defaults::countdown_seconds(),
            developer_mode: false,
            debug_mode: false,
            benchmark_mode: false,
            effect_cache_disabled: false,
            font_cache_disabled: false,
            save_effect_sources: false,
            warnings_are_errors: false,
            allow_scaling_maximized: false,
            simulate_exclusive_fullscreen: false,
            always_run_as_admin: false,
            show_notify_icon: true,
            inline_params: false,
            auto_check_for_updates: true,
            check_for_preview_updates: false,
            statistics_for_dynamic_detection: false,
            fp16_disabled: false,
            simple_mode: false,
            update_check_date: DateTime::UNIX_EPOCH,
            duplicate_frame_detection_mode: DuplicateFrameDetectionMode::default(),
            min_frame_rate: crate::defaults::min_frame_rate(),
            scaling_modes: Vec::new(),
            default_profile: Profile::default(),
            profiles: Vec::new(),
            overlay: OverlayOptions::default(),
        }
    }
}

impl SettingsData {
    /// Shortcut bound to `action`.
    pub fn shortcut(&self, action: ShortcutAction) -> Shortcut {
        self.shortcuts[action as usize]
    }
}

/// Change notification fired synchronously from a setter, before the
/// asynchronous save completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsEvent {
    Theme(Theme),
    Shortcut(ShortcutAction),
    CountdownSeconds(u32),
    ShowNotifyIcon(bool),
}

type Listener = Box<dyn Fn(&SettingsEvent)>;

/// The live settings object: owned by the UI thread for the application
/// lifetime, constructed once via [`Settings::load`].
pub struct Settings {
    data: SettingsData,
    paths: ConfigPaths,
    working_dir: PathBuf,
    folders: Box<dyn KnownFolders>,
    listeners: Vec<Listener>,
    worker: SaveWorker,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("data", &self.data)
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl Settings {
    pub(crate) fn new(
        data: SettingsData,
        paths: ConfigPaths,
        working_dir: PathBuf,
        folders: Box<dyn KnownFolders>,
    ) -> Self {
        Self {
            data,
            paths,
            working_dir,
            folders,
            listeners: Vec::new(),
            worker: SaveWorker::spawn(),
        }
    }

    /// The current persisted state.
    pub fn data(&self) -> &SettingsData {
        &self.data
    }

    /// The active config directory and file.
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn is_portable_mode(&self) -> bool {
        self.paths.portable
    }

    /// Register a change listener. Listeners run synchronously on the
    /// mutating thread, in registration order.
    pub fn on_change(&mut self, listener: impl Fn(&SettingsEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, event: SettingsEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// Enqueue an asynchronous save of the current state. Returns
    /// immediately; the write happens on the worker thread.
    pub fn request_save(&self) {
        self.worker.request(SaveTask {
            paths: self.paths.clone(),
            data: self.data.clone(),
        });
    }

    /// Save synchronously on the calling thread.
    pub fn save(&self) -> Result<()> {
        write_settings(&self.paths, &self.data)?;
        Ok(())
    }

    /// Block until every save enqueued so far has hit the disk.
    pub fn flush(&self) {
        self.worker.flush();
    }

    // ── Setters ────────────────────────────────────────────────────────────

    pub fn set_language(&mut self, index: i32) {
        if self.data.language == index {
            return;
        }
        self.data.language = index;
        self.request_save();
    }

    pub fn set_theme(&mut self, value: Theme) {
        if self.data.theme == value {
            return;
        }
        self.data.theme = value;
        self.notify(SettingsEvent::Theme(value));
        self.request_save();
    }

    pub fn set_shortcut(&mut self, action: ShortcutAction, value: Shortcut) {
        if self.data.shortcuts[action as usize] == value {
            return;
        }
        self.data.shortcuts[action as usize] = value;
        log::info!("shortcut {} changed to {}", action.name(), value);
        self.notify(SettingsEvent::Shortcut(action));
        self.request_save();
    }

    pub fn set_countdown_seconds(&mut self, value: u32) {
        if self.data.countdown_seconds == value {
            return;
        }
        self.data.countdown_seconds = value;
        self.notify(SettingsEvent::CountdownSeconds(value));
        self.request_save();
    }

    /// Developer mode gates the debug-oriented flags; disabling it resets
    /// all of them so a plain restart never keeps diagnostic behavior on.
    pub fn set_developer_mode(&mut self, value: bool) {
        self.data.developer_mode = value;
        if !value {
            self.data.debug_mode = false;
            self.data.benchmark_mode = false;
            self.data.effect_cache_disabled = false;
            self.data.font_cache_disabled = false;
            self.data.save_effect_sources = false;
            self.data.warnings_are_errors = false;
            self.data.duplicate_frame_detection_mode = DuplicateFrameDetectionMode::default();
            self.data.statistics_for_dynamic_detection = false;
            self.data.fp16_disabled = false;
        }
        self.request_save();
    }

    pub fn set_always_run_as_admin(&mut self, value: bool) {
        if self.data.always_run_as_admin == value {
            return;
        }
        self.data.always_run_as_admin = value;
        self.request_save();
    }

    pub fn set_show_notify_icon(&mut self, value: bool) {
        if self.data.show_notify_icon == value {
            return;
        }
        self.data.show_notify_icon = value;
        self.notify(SettingsEvent::ShowNotifyIcon(value));
        self.request_save();
    }

    pub fn set_simple_mode(&mut self, value: bool) {
        if self.data.simple_mode == value {
            return;
        }
        self.data.simple_mode = value;
        self.request_save();
    }

    pub fn set_window_placement(&mut self, value: WindowPlacement) {
        if self.data.window == value {
            return;
        }
        self.data.window = value;
        self.request_save();
    }

    pub fn set_update_check_date(&mut self, value: DateTime<Utc>) {
        if self.data.update_check_date == value {
            return;
        }
        self.data.update_check_date = value;
        self.request_save();
    }

    // ── Screenshots directory ─────────────────────────────────────────────

    /// The effective screenshots directory. Empty stored value = the system
    /// default; a stored relative value is resolved against the working
    /// directory. `None` only when no system folder could be resolved.
    pub fn screenshots_dir(&self) -> Option<PathBuf> {
        let stored = &self.data.overlay.screenshots_dir;
        if stored.as_os_str().is_empty() {
            return paths::system_screenshots_dir(self.folders.as_ref());
        }
        if stored.is_relative() {
            if stored == Path::new(".") {
                return Some(self.working_dir.clone());
            }
            return Some(self.working_dir.join(stored));
        }
        Some(stored.clone())
    }

    /// Store a screenshots directory. The system default is stored as the
    /// empty value; paths under the working directory are stored relative so
    /// a portable install keeps working when moved.
    pub fn set_screenshots_dir(&mut self, value: &Path) {
        let stored = if Some(value.to_path_buf()) == paths::system_screenshots_dir(self.folders.as_ref())
        {
            PathBuf::new()
        } else if let Ok(relative) = value.strip_prefix(&self.working_dir) {
            if relative.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                Path::new(".").join(relative)
            }
        } else {
            value.to_path_buf()
        };

        if self.data.overlay.screenshots_dir == stored {
            return;
        }
        self.data.overlay.screenshots_dir = stored;
        self.request_save();
    }

    // ── Portable mode ─────────────────────────────────────────────────────

    /// Switch deployment modes at runtime.
    ///
    /// Turning portable mode off deletes the local portable file (an already
    /// absent file is fine) before re-resolving. If path re-resolution fails
    /// the flag is left unchanged and the failure is logged.
    pub fn set_portable_mode(&mut self, value: bool) {
        if self.paths.portable == value {
            return;
        }

        if !value {
            if let Err(e) = fs::remove_file(&self.paths.file) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::error!("failed to delete portable config file: {e}");
                    return;
                }
            }
        }

        match paths::paths_for_mode(value, &self.working_dir, self.folders.as_ref()) {
            Ok(paths) => {
                self.paths = paths;
                log::info!(
                    "portable mode {}",
                    if value { "enabled" } else { "disabled" }
                );
                self.request_save();
            }
            Err(e) => {
                log::error!(
                    "failed to {} portable mode: {e}",
                    if value { "enable" } else { "disable" }
                );
            }
        }
    }
}
