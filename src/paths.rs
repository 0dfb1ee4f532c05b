//! Configuration file location across deployment modes.
//!
//! Two deployments exist: *portable* (config lives next to the working
//! directory of the executable) and *installed* (config lives under the
//! per-user local app data folder, inside a schema-versioned directory).
//! Resolution also covers the unversioned legacy directory written by
//! releases that predate schema versioning.
//!
//! OS folder lookup goes through the [`KnownFolders`] capability so the
//! resolution rules stay testable without touching the real profile dirs.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Bumped only when a schema change is not safely interpretable by older
/// readers. Older directories are still read (see [`resolve_config`]).
pub const CONFIG_VERSION: u32 = 4;

/// Application directory name under local app data.
pub const APP_DIR_NAME: &str = "Loupe";

/// Name of the configuration directory in both deployment modes.
pub const CONFIG_DIR_NAME: &str = "config";

/// Name of the configuration file.
pub const CONFIG_FILENAME: &str = "config.json";

/// Capability to resolve OS known folders.
///
/// A `None` from any method means the folder does not exist or cannot be
/// determined on this system; callers fall through to the next tier.
pub trait KnownFolders {
    /// Per-user local application data folder.
    fn local_app_data(&self) -> Option<PathBuf>;
    /// OS-managed screenshots folder, where one exists.
    fn screenshots(&self) -> Option<PathBuf>;
    /// Per-user pictures folder.
    fn pictures(&self) -> Option<PathBuf>;
    /// The user profile (home) folder.
    fn user_profile(&self) -> Option<PathBuf>;
}

/// [`KnownFolders`] backed by the `dirs` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFolders;

impl KnownFolders for SystemFolders {
    fn local_app_data(&self) -> Option<PathBuf> {
        dirs::data_local_dir()
    }

    fn screenshots(&self) -> Option<PathBuf> {
        // No cross-platform screenshots folder; callers fall through to the
        // pictures tier.
        None
    }

    fn pictures(&self) -> Option<PathBuf> {
        dirs::picture_dir()
    }

    fn user_profile(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// The resolved configuration directory and file, plus the deployment mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Directory the config file lives in (created lazily on first save).
    pub dir: PathBuf,
    /// Write target for saves.
    pub file: PathBuf,
    /// True when running in portable mode.
    pub portable: bool,
}

/// Result of startup path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub paths: ConfigPaths,
    /// The existing readable config file, when one was found. `None` tells
    /// the caller to seed defaults instead of reading. Normally identical to
    /// `paths.file`; differs when an unversioned legacy file is picked up.
    pub existing_file: Option<PathBuf>,
}

fn portable_paths(working_dir: &Path) -> ConfigPaths {
    let dir = working_dir.join(CONFIG_DIR_NAME);
    let file = dir.join(CONFIG_FILENAME);
    ConfigPaths {
        dir,
        file,
        portable: true,
    }
}

fn installed_base(folders: &dyn KnownFolders) -> Result<PathBuf, ConfigError> {
    folders
        .local_app_data()
        .map(|p| p.join(APP_DIR_NAME).join(CONFIG_DIR_NAME))
        .ok_or_else(|| ConfigError::FolderResolution("local app data".into()))
}

/// Resolve the active configuration paths at startup.
///
/// Checked in order, first match wins:
/// 1. `<working dir>/config/config.json`: forces portable mode on.
/// 2. `<local app data>/Loupe/config/v<CONFIG_VERSION>/config.json`.
/// 3. `<local app data>/Loupe/config/config.json` (legacy, pre-versioning).
/// 4. Neither exists: default to the versioned installed path and report
///    no existing file so the caller seeds defaults.
pub fn resolve_config(
    working_dir: &Path,
    folders: &dyn KnownFolders,
) -> Result<ResolvedConfig, ConfigError> {
    let portable = portable_paths(working_dir);
    if portable.file.is_file() {
        let existing = portable.file.clone();
        return Ok(ResolvedConfig {
            paths: portable,
            existing_file: Some(existing),
        });
    }

    let base = installed_base(folders)?;

    let versioned_dir = base.join(format!("v{CONFIG_VERSION}"));
    let versioned_file = versioned_dir.join(CONFIG_FILENAME);
    if versioned_file.is_file() {
        return Ok(ResolvedConfig {
            paths: ConfigPaths {
                dir: versioned_dir,
                file: versioned_file.clone(),
                portable: false,
            },
            existing_file: Some(versioned_file),
        });
    }

    let legacy_file = base.join(CONFIG_FILENAME);
    if legacy_file.is_file() {
        return Ok(ResolvedConfig {
            paths: ConfigPaths {
                dir: base,
                file: legacy_file.clone(),
                portable: false,
            },
            existing_file: Some(legacy_file),
        });
    }

    Ok(ResolvedConfig {
        paths: ConfigPaths {
            file: versioned_file,
            dir: versioned_dir,
            portable: false,
        },
        existing_file: None,
    })
}

/// Paths for an explicitly chosen deployment mode, used when toggling
/// portable mode at runtime. Unlike [`resolve_config`] this honors the
/// requested mode even when no portable file exists yet; the next save
/// creates it.
pub fn paths_for_mode(
    portable: bool,
    working_dir: &Path,
    folders: &dyn KnownFolders,
) -> Result<ConfigPaths, ConfigError> {
    if portable {
        return Ok(portable_paths(working_dir));
    }

    let base = installed_base(folders)?;
    let legacy_file = base.join(CONFIG_FILENAME);
    if legacy_file.is_file() {
        return Ok(ConfigPaths {
            dir: base,
            file: legacy_file,
            portable: false,
        });
    }

    let dir = base.join(format!("v{CONFIG_VERSION}"));
    let file = dir.join(CONFIG_FILENAME);
    Ok(ConfigPaths {
        dir,
        file,
        portable: false,
    })
}

/// The system screenshots directory, resolved through three tiers:
/// the OS screenshots folder, then `<pictures>/Screenshots`, then
/// `<user profile>/Pictures/Screenshots`. `None` when even the user
/// profile cannot be resolved.
pub fn system_screenshots_dir(folders: &dyn KnownFolders) -> Option<PathBuf> {
    if let Some(dir) = folders.screenshots() {
        return Some(dir);
    }
    if let Some(pictures) = folders.pictures() {
        return Some(pictures.join("Screenshots"));
    }
    if let Some(profile) = folders.user_profile() {
        return Some(profile.join("Pictures").join("Screenshots"));
    }
    log::error!("failed to resolve a screenshots directory from any known folder");
    None
}
