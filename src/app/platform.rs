// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;

// ---------------- single-instance lock ----------------

fn runtime_dir() -> Result<PathBuf, String> {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| "XDG_RUNTIME_DIR is not set (cannot create instance lock)".to_string())
}

fn lock_path() -> Result<PathBuf, String> {
    Ok(runtime_dir()?.join("stint").join("stint.lock"))
}

pub fn acquire_single_instance_lock() -> Result<UnixListener, String> {
    let path = lock_path()?;
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match UnixListener::bind(&path) {
        Ok(l) => Ok(l),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            match UnixStream::connect(&path) {
                Ok(_) => Err(format!(
                    "stint is already running (another instance holds {})",
                    path.display()
                )),
                Err(_) => {
                    let _ = std::fs::remove_file(&path);
                    UnixListener::bind(&path).map_err(|e| {
                        format!("failed to bind instance lock {}: {e}", path.display())
                    })
                }
            }
        }
        Err(e) => Err(format!("failed to bind instance lock {}: {e}", path.display())),
    }
}

// ---------------- display check ----------------

/// The activity provider needs an X session; fail early with a readable
/// message instead of a connect error ten frames deep.
#[cfg(target_os = "linux")]
pub fn ensure_x11_session() -> Result<(), String> {
    match std::env::var("DISPLAY") {
        Ok(display) if !display.is_empty() => Ok(()),
        _ => Err("DISPLAY is not set; stint needs an X11 session to watch the foreground window"
            .to_string()),
    }
}
