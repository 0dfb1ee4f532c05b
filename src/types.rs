//! Persisted configuration types and enums.
//!
//! Every enum here is written to disk as its underlying integer. Decoding is
//! range-checked through `from_index`: an out-of-range value resets the field
//! to the enum's default rather than being carried partially decoded.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Application-level enums
// ============================================================================

/// UI theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Follow the OS light/dark preference
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(Theme::System),
            1 => Some(Theme::Light),
            2 => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// How duplicate frames are detected during scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateFrameDetectionMode {
    /// Compare every frame
    Always,
    /// Heuristic detection, enabled and disabled on the fly
    #[default]
    Dynamic,
    /// No detection
    Never,
}

impl DuplicateFrameDetectionMode {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(DuplicateFrameDetectionMode::Always),
            1 => Some(DuplicateFrameDetectionMode::Dynamic),
            2 => Some(DuplicateFrameDetectionMode::Never),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Initial visibility of the in-scaling toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolbarState {
    /// Shown briefly, then hidden until hovered
    #[default]
    AutoHide,
    AlwaysShow,
    AlwaysHide,
}

impl ToolbarState {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(ToolbarState::AutoHide),
            1 => Some(ToolbarState::AlwaysShow),
            2 => Some(ToolbarState::AlwaysHide),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

// ============================================================================
// Profile enums
// ============================================================================

/// How a window is captured for scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMethod {
    #[default]
    GraphicsCapture,
    DesktopDuplication,
    Gdi,
    DwmSharedSurface,
}

impl CaptureMethod {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(CaptureMethod::GraphicsCapture),
            1 => Some(CaptureMethod::DesktopDuplication),
            2 => Some(CaptureMethod::Gdi),
            3 => Some(CaptureMethod::DwmSharedSurface),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Which monitors participate when the source window spans several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiMonitorUsage {
    /// Only the monitor nearest the source window
    #[default]
    Closest,
    /// Every monitor the source window intersects
    Intersected,
    /// All monitors
    All,
}

impl MultiMonitorUsage {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(MultiMonitorUsage::Closest),
            1 => Some(MultiMonitorUsage::Intersected),
            2 => Some(MultiMonitorUsage::All),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Automatic scaling trigger for a matched window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoScale {
    #[default]
    Disabled,
    Fullscreen,
    Windowed,
}

impl AutoScale {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(AutoScale::Disabled),
            1 => Some(AutoScale::Fullscreen),
            2 => Some(AutoScale::Windowed),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Initial size of the windowed scaling output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialWindowedScaleFactor {
    #[default]
    Auto,
    X1_25,
    X1_5,
    X2,
    Custom,
}

impl InitialWindowedScaleFactor {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(InitialWindowedScaleFactor::Auto),
            1 => Some(InitialWindowedScaleFactor::X1_25),
            2 => Some(InitialWindowedScaleFactor::X1_5),
            3 => Some(InitialWindowedScaleFactor::X2),
            4 => Some(InitialWindowedScaleFactor::Custom),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Cursor size adjustment while scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorScaling {
    #[default]
    NoScaling,
    X0_5,
    X0_75,
    X1_25,
    X1_5,
    X2,
    /// Match the source-to-output scale ratio
    Source,
    Custom,
}

impl CursorScaling {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(CursorScaling::NoScaling),
            1 => Some(CursorScaling::X0_5),
            2 => Some(CursorScaling::X0_75),
            3 => Some(CursorScaling::X1_25),
            4 => Some(CursorScaling::X1_5),
            5 => Some(CursorScaling::X2),
            6 => Some(CursorScaling::Source),
            7 => Some(CursorScaling::Custom),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Interpolation used when drawing the scaled cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorInterpolationMode {
    #[default]
    NearestNeighbor,
    Bilinear,
}

impl CursorInterpolationMode {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(CursorInterpolationMode::NearestNeighbor),
            1 => Some(CursorInterpolationMode::Bilinear),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// How a scaling effect maps its output into the target area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalingType {
    /// Scale by a fixed factor
    #[default]
    Normal,
    /// Fit inside the target, preserving aspect ratio
    Fit,
    /// Scale to an absolute size
    Absolute,
    /// Fill the target, cropping as needed
    Fill,
}

impl ScalingType {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(ScalingType::Normal),
            1 => Some(ScalingType::Fit),
            2 => Some(ScalingType::Absolute),
            3 => Some(ScalingType::Fill),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }
}

// ============================================================================
// Per-profile boolean scaling flags (bitset)
// ============================================================================

/// Bit masks for [`crate::profile::Profile::scaling_flags`].
pub mod scaling_flags {
    /// Optimizations for 3D games (cursor confinement, focus tracking)
    pub const THREE_D_GAME_MODE: u32 = 1;
    /// Include the title bar in the captured region
    pub const CAPTURE_TITLE_BAR: u32 = 1 << 1;
    /// Compensate pointer speed for the scale factor
    pub const ADJUST_CURSOR_SPEED: u32 = 1 << 2;
    /// Work around flickering by disabling direct flip presentation
    pub const DISABLE_DIRECT_FLIP: u32 = 1 << 3;
}

// ============================================================================
// Small persisted structs
// ============================================================================

/// Main-window placement in device-independent units.
///
/// The center point plus DIP size survives monitor and DPI changes better
/// than a pixel rectangle; a legacy pixel shape is converted on load.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPlacement {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub maximized: bool,
}

/// Margins cropped off the captured window, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Cropping {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Cropping {
    /// True when every component is non-negative.
    pub fn is_valid(&self) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.right >= 0.0 && self.bottom >= 0.0
    }
}

/// Identity of the graphics adapter a profile renders on.
///
/// The index alone is ambiguous across driver updates, so vendor and device
/// ids are stored alongside it. Legacy configs carried only an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicsCardId {
    pub idx: i32,
    pub vendor_id: u32,
    pub device_id: u32,
}

impl Default for GraphicsCardId {
    fn default() -> Self {
        Self {
            idx: -1,
            vendor_id: 0,
            device_id: 0,
        }
    }
}

/// Persisted position of one overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayWindowOption {
    pub h_area: u16,
    pub v_area: u16,
    pub h_pos: f32,
    pub v_pos: f32,
}

/// Overlay (in-scaling UI) options.
///
/// `windows` maps overlay window names to their stored positions. Names not
/// known to the current build are preserved so that newer configs survive a
/// round trip through an older release.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayOptions {
    #[serde(serialize_with = "crate::codec::ser::toolbar_state_as_index")]
    pub fullscreen_initial_toolbar_state: ToolbarState,
    #[serde(serialize_with = "crate::codec::ser::toolbar_state_as_index")]
    pub windowed_initial_toolbar_state: ToolbarState,
    /// Empty = use the system screenshots folder.
    pub screenshots_dir: PathBuf,
    pub windows: BTreeMap<String, OverlayWindowOption>,
}
