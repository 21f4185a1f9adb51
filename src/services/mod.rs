// License: MIT

pub mod activity;
pub mod autosave;

#[cfg(target_os = "linux")]
pub mod x11;
