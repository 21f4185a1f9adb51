// License: MIT

pub mod actions;
pub mod run;

use std::path::PathBuf;

use crate::config::Settings;
use crate::core::engine::Engine;

pub struct Daemon {
    engine: Engine,
    settings: Settings,
    settings_path: PathBuf,
}

impl Daemon {
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        let self_exe = std::env::current_exe()
            .ok()
            .map(|p| p.to_string_lossy().into_owned());

        Self {
            engine: Engine::new(&settings, self_exe),
            settings,
            settings_path,
        }
    }
}
