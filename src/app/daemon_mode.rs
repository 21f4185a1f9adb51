// License: MIT

use std::io;
use std::path::PathBuf;

use crate::cli::Args;
use crate::daemon::Daemon;
use crate::tinfo;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| {
        eprintln!("{e}");
        io::Error::new(io::ErrorKind::AlreadyExists, e)
    })?;

    crate::log::set_verbose(args.verbose);
    if args.no_console {
        crate::log::set_console(false);
    }

    tinfo!("Stint", "stint {} starting", env!("CARGO_PKG_VERSION"));

    let settings_path: PathBuf = args
        .config
        .unwrap_or_else(crate::config::default_settings_path);
    let settings = crate::config::load(&settings_path);

    let provider = build_provider()?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let mut daemon = Daemon::new(settings, settings_path);

    let mut daemon_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move { daemon.run(provider, shutdown_rx, shutdown_tx).await }
    });

    tokio::select! {
        res = &mut daemon_task => {
            match res {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tinfo!("Stint", "received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);

            match daemon_task.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn build_provider() -> Result<crate::services::x11::X11Activity, AnyError> {
    crate::app::platform::ensure_x11_session().map_err(|e| {
        eprintln!("stint: {e}");
        Box::new(io::Error::other(e)) as AnyError
    })?;

    crate::services::x11::X11Activity::new().map_err(|e| {
        eprintln!("stint: {e:#}");
        Box::new(io::Error::other(format!("{e:#}"))) as AnyError
    })
}

#[cfg(not(target_os = "linux"))]
fn build_provider() -> Result<crate::services::activity::NullActivity, AnyError> {
    Ok(crate::services::activity::NullActivity)
}
