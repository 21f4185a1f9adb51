// License: MIT

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::history::HISTORY_CAPACITY;
use crate::{tinfo, twarn};

pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30;

/// On-disk settings, one typed record with explicit defaults per field.
///
/// Loading never fails outward: a malformed file or field is replaced by
/// its default and the corrected file is written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub idle_timeout_secs: u64,

    /// 0 disables the goal alert.
    pub goal_secs: u64,

    /// Live-total checkpoint; the accumulator restarts from this.
    pub previous_secs: u64,

    pub play_sound_on_idle: bool,
    pub show_border_when_not_working: bool,

    /// Shell command for the alert sound. None silences alerts.
    pub alert_command: Option<String>,

    /// Shell commands the border collaborator is driven with.
    pub border_show_command: Option<String>,
    pub border_hide_command: Option<String>,

    /// Exe path -> display name.
    pub tracked_programs: BTreeMap<String, String>,

    /// Past session totals, oldest first, at most five.
    pub time_history: Vec<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            goal_secs: 0,
            previous_secs: 0,
            play_sound_on_idle: true,
            show_border_when_not_working: true,
            alert_command: Some("canberra-gtk-play -i bell".to_string()),
            border_show_command: None,
            border_hide_command: None,
            tracked_programs: BTreeMap::new(),
            time_history: Vec::new(),
        }
    }
}

impl Settings {
    /// Repair out-of-range fields in place. Returns whether anything had
    /// to change.
    fn sanitize(&mut self) -> bool {
        let mut changed = false;

        if self.idle_timeout_secs == 0 {
            self.idle_timeout_secs = DEFAULT_IDLE_TIMEOUT_SECS;
            changed = true;
        }

        let before = self.time_history.len();
        self.time_history.retain(|&secs| secs > 0);
        if self.time_history.len() > HISTORY_CAPACITY {
            let overflow = self.time_history.len() - HISTORY_CAPACITY;
            self.time_history.drain(..overflow);
        }
        changed |= self.time_history.len() != before;

        changed
    }
}

pub fn default_settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("stint");
    path.push("settings.json");
    path
}

/// Load settings, substituting defaults for anything unreadable and
/// persisting the corrected file so the next run starts clean.
pub fn load(path: &Path) -> Settings {
    let mut settings = match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings,
            Err(e) => {
                twarn!("Config", "{} is malformed ({}); using defaults", path.display(), e);
                let defaults = Settings::default();
                persist_corrected(path, &defaults);
                return defaults;
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tinfo!("Config", "no settings at {}; writing defaults", path.display());
            let defaults = Settings::default();
            persist_corrected(path, &defaults);
            return defaults;
        }
        Err(e) => {
            twarn!("Config", "failed to read {} ({}); using defaults", path.display(), e);
            return Settings::default();
        }
    };

    if settings.sanitize() {
        twarn!("Config", "repaired out-of-range values in {}", path.display());
        persist_corrected(path, &settings);
    }

    settings
}

pub fn save(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_vec_pretty(settings)?;

    // Write-then-rename so a crash never leaves a truncated file.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn persist_corrected(path: &Path, settings: &Settings) {
    if let Err(e) = save(path, settings) {
        twarn!("Config", "failed to write {}: {}", path.display(), e);
    }
}
