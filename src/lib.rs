//! Configuration persistence and migration engine for the Loupe window
//! scaler.
//!
//! This crate owns the whole lifecycle of the application's settings:
//!
//! - Locating the active config file across portable and installed
//!   deployments, including the versioned-directory upgrade path
//! - Lenient, never-failing decoding with per-field defaulting, clamping,
//!   and legacy-key aliases (the schema-evolution mechanism)
//! - Per-profile validation during load
//! - Deterministic fixed-order serialization
//! - Change notifications and asynchronous, coalescing saves behind an
//!   exclusive write lock
//!
//! The only hard failures are structural: an unreadable file, text that is
//! not JSON, or a root element that is not an object. Everything below that
//! degrades one field at a time.

pub mod codec;
pub mod defaults;
pub mod error;
pub mod paths;
mod persistence;
pub mod profile;
pub mod scaling_mode;
pub mod settings;
pub mod shortcut;
pub mod types;

// Re-export the main types for convenience
pub use codec::{BASE_DPI, DpiProbe, FlatDpi, decode};
pub use error::ConfigError;
pub use paths::{
    APP_DIR_NAME, CONFIG_DIR_NAME, CONFIG_FILENAME, CONFIG_VERSION, ConfigPaths, KnownFolders,
    ResolvedConfig, SystemFolders, resolve_config, system_screenshots_dir,
};
pub use profile::Profile;
pub use scaling_mode::{ScalingEffect, ScalingMode};
pub use settings::{Settings, SettingsData, SettingsEvent};
pub use shortcut::{SHORTCUT_ACTION_COUNT, Shortcut, ShortcutAction};
pub use types::{
    AutoScale, CaptureMethod, Cropping, CursorInterpolationMode, CursorScaling,
    DuplicateFrameDetectionMode, GraphicsCardId, InitialWindowedScaleFactor, MultiMonitorUsage,
    OverlayOptions, OverlayWindowOption, ScalingType, Theme, ToolbarState, WindowPlacement,
    scaling_flags,
};
