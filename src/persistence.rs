//! Startup load and background save.
//!
//! Loading happens exactly once, before any writer exists, so it takes no
//! lock. Saving is asynchronous: setters enqueue full snapshots to a single
//! worker thread, which coalesces bursts into the latest snapshot and writes
//! it under a process-wide lock. Because each snapshot is captured
//! synchronously in the setter, queued snapshots are causally ordered and
//! last-write-wins is the correct outcome of coalescing.
//!
//! Error split: a missing file, an empty file, and any malformed *field* are
//! normal (defaults are seeded or substituted); an unreadable file, a parse
//! error, or a non-object root is structural and fails the load. Write
//! failures are logged and reported but never fatal: in-memory state stays
//! authoritative and the next mutation retries.

use crate::codec::{self, DpiProbe, FlatDpi};
use crate::error::ConfigError;
use crate::paths::{self, ConfigPaths, KnownFolders, SystemFolders};
use crate::settings::{Settings, SettingsData};
use anyhow::Result;
use parking_lot::Mutex;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Serializes writes to the config file across the process. Guards only the
/// write itself; the startup read happens before any writer exists.
static SAVE_LOCK: Mutex<()> = Mutex::new(());

/// Serialize `data` and write it to `paths.file`, creating the directory if
/// needed. The write goes to a temp file first and is renamed into place so
/// a crash mid-write cannot leave a torn config.
pub(crate) fn write_settings(paths: &ConfigPaths, data: &SettingsData) -> Result<(), ConfigError> {
    fs::create_dir_all(&paths.dir)?;

    let json = serde_json::to_string_pretty(data)?;

    let temp_path = paths.file.with_extension("json.tmp");
    let _guard = SAVE_LOCK.lock();
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, &paths.file)?;
    Ok(())
}

/// A queued save: the snapshot plus the paths it targets (the target can
/// change under a portable-mode toggle, so it rides along).
pub(crate) struct SaveTask {
    pub paths: ConfigPaths,
    pub data: SettingsData,
}

enum WorkerMsg {
    Save(SaveTask),
    Flush(mpsc::SyncSender<()>),
}

/// Single consuming save worker.
///
/// Dropping the worker drains whatever is still queued (the channel buffers
/// messages ahead of the disconnect), so a pending save still reaches disk
/// on a clean exit.
pub(crate) struct SaveWorker {
    tx: Option<mpsc::Sender<WorkerMsg>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SaveWorker {
    pub(crate) fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<WorkerMsg>();
        match thread::Builder::new()
            .name("settings-save".into())
            .spawn(move || Self::run(rx))
        {
            Ok(handle) => Self {
                tx: Some(tx),
                handle: Some(handle),
            },
            Err(e) => {
                // Asynchronous saves degrade to no-ops; the synchronous
                // save path still works.
                log::error!("failed to spawn settings save worker: {e}");
                Self {
                    tx: None,
                    handle: None,
                }
            }
        }
    }

    fn run(rx: mpsc::Receiver<WorkerMsg>) {
        while let Ok(first) = rx.recv() {
            let mut latest: Option<SaveTask> = None;
            let mut flush_acks: Vec<mpsc::SyncSender<()>> = Vec::new();

            let mut accept = |msg: WorkerMsg| match msg {
                WorkerMsg::Save(task) => latest = Some(task),
                WorkerMsg::Flush(ack) => flush_acks.push(ack),
            };
            accept(first);
            // Coalesce a burst of saves into the newest snapshot.
            while let Ok(msg) = rx.try_recv() {
                accept(msg);
            }
            drop(accept);

            if let Some(task) = latest {
                if let Err(e) = write_settings(&task.paths, &task.data) {
                    log::error!("failed to save settings: {e}");
                }
            }
            for ack in flush_acks {
                let _ = ack.send(());
            }
        }
    }

    pub(crate) fn request(&self, task: SaveTask) {
        if let Some(tx) = &self.tx {
            if tx.send(WorkerMsg::Save(task)).is_err() {
                log::error!("settings save worker is gone; save dropped");
            }
        }
    }

    /// Block until everything enqueued before this call has been written.
    pub(crate) fn flush(&self) {
        if let Some(tx) = &self.tx {
            let (ack_tx, ack_rx) = mpsc::sync_channel(1);
            if tx.send(WorkerMsg::Flush(ack_tx)).is_ok() {
                let _ = ack_rx.recv();
            }
        }
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        // Disconnect, then wait for the worker to drain the queue.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Settings {
    /// Load settings using the real working directory, system folders, and
    /// no DPI information.
    pub fn load() -> Result<Self> {
        let working_dir = std::env::current_dir().map_err(ConfigError::Io)?;
        Self::load_with(working_dir, Box::new(SystemFolders), &FlatDpi)
    }

    /// Load settings with injected capabilities.
    ///
    /// Seeds built-in defaults when no config file exists or the file is
    /// empty, and schedules one save so the file materializes. Structural
    /// problems (unreadable file, invalid JSON, non-object root) fail the
    /// load; anything below that degrades per field.
    pub fn load_with(
        working_dir: PathBuf,
        folders: Box<dyn KnownFolders>,
        dpi: &dyn DpiProbe,
    ) -> Result<Self> {
        let resolved = paths::resolve_config(&working_dir, folders.as_ref())?;
        log::info!(
            "config path: {:?} (portable: {})",
            resolved.paths.file,
            resolved.paths.portable
        );

        let Some(existing) = resolved.existing_file.clone() else {
            log::info!("no config file found, seeding defaults");
            return Ok(Self::seeded(resolved.paths, working_dir, folders));
        };

        let text = match fs::read_to_string(&existing) {
            Ok(text) => text,
            Err(e) => {
                log::error!("failed to read config file {:?}: {e}", existing);
                return Err(ConfigError::Io(e).into());
            }
        };

        if text.is_empty() {
            log::info!("config file is empty, seeding defaults");
            return Ok(Self::seeded(resolved.paths, working_dir, folders));
        }

        let document: Value = match serde_json::from_str(&text) {
            Ok(document) => document,
            Err(e) => {
                log::error!("failed to parse config file {:?}: {e}", existing);
                return Err(ConfigError::Parse(e).into());
            }
        };
        let Some(root) = document.as_object() else {
            log::error!("config root element is not an object: {:?}", existing);
            return Err(ConfigError::InvalidDocument.into());
        };

        let mut data = codec::decode(root, dpi);
        let shortcuts_changed = crate::defaults::fill_default_shortcuts(&mut data.shortcuts);
        let target_missing = !resolved.paths.file.is_file();

        let settings = Settings::new(data, resolved.paths, working_dir, folders);
        if shortcuts_changed || target_missing {
            settings.request_save();
        }
        Ok(settings)
    }

    fn seeded(paths: ConfigPaths, working_dir: PathBuf, folders: Box<dyn KnownFolders>) -> Self {
        let mut data = SettingsData::default();
        data.scaling_modes = crate::defaults::default_scaling_modes();
        crate::defaults::fill_default_shortcuts(&mut data.shortcuts);

        let settings = Settings::new(data, paths, working_dir, folders);
        settings.request_save();
        settings
    }
}
