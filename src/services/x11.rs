// License: MIT

use eyre::{Result, WrapErr};
use x11rb::connection::Connection;
use x11rb::protocol::screensaver;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt, Window};
use x11rb::rust_connection::RustConnection;

use super::activity::ActivityProvider;

/// X11-backed activity lookup: `_NET_ACTIVE_WINDOW` -> `_NET_WM_PID` ->
/// `/proc/<pid>/exe` for the foreground program, MIT-SCREEN-SAVER for the
/// idle time.
pub struct X11Activity {
    conn: RustConnection,
    root: Window,
    net_active_window: Atom,
    net_wm_pid: Atom,
}

impl X11Activity {
    pub fn new() -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(None).wrap_err("failed to connect to the X server")?;
        let root = conn.setup().roots[screen_num].root;

        let net_active_window = intern_atom(&conn, b"_NET_ACTIVE_WINDOW")?;
        let net_wm_pid = intern_atom(&conn, b"_NET_WM_PID")?;

        Ok(Self {
            conn,
            root,
            net_active_window,
            net_wm_pid,
        })
    }

    fn active_window(&self) -> Option<Window> {
        let reply = self
            .conn
            .get_property(
                false,
                self.root,
                self.net_active_window,
                AtomEnum::WINDOW,
                0,
                1,
            )
            .ok()?
            .reply()
            .ok()?;

        let window = reply.value32()?.next()?;
        if window == 0 { None } else { Some(window) }
    }

    fn pid_of(&self, window: Window) -> Option<u32> {
        let reply = self
            .conn
            .get_property(false, window, self.net_wm_pid, AtomEnum::CARDINAL, 0, 1)
            .ok()?
            .reply()
            .ok()?;

        let pid = reply.value32()?.next()?;
        if pid == 0 { None } else { Some(pid) }
    }
}

impl ActivityProvider for X11Activity {
    fn foreground_program(&mut self) -> Option<String> {
        let window = self.active_window()?;
        let pid = self.pid_of(window)?;
        exe_of_pid(pid)
    }

    fn idle_ms(&mut self) -> u64 {
        screensaver::query_info(&self.conn, self.root)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .map(|info| u64::from(info.ms_since_user_input))
            .unwrap_or(0)
    }
}

fn intern_atom(conn: &RustConnection, name: &[u8]) -> Result<Atom> {
    let atom = conn
        .intern_atom(false, name)
        .wrap_err("intern_atom request failed")?
        .reply()
        .wrap_err("intern_atom reply failed")?
        .atom;
    Ok(atom)
}

fn exe_of_pid(pid: u32) -> Option<String> {
    let process = procfs::process::Process::new(pid as i32).ok()?;
    let exe = process.exe().ok()?;
    Some(exe.to_string_lossy().into_owned())
}
