// License: MIT

use eyre::{Result, WrapErr, eyre};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc::Sender,
    time::{Duration, timeout},
};

use crate::core::manager_msg::ManagerMsg;
use crate::{tdebug, terror, tinfo};

use super::router::route_command;

/// Bind the control socket and start accepting commands. A bind failure
/// is returned to the caller; without the socket no gesture can ever
/// reach the engine.
pub async fn spawn_ipc_server(tx: Sender<ManagerMsg>) -> Result<()> {
    let path = super::socket_path().map_err(|e| eyre!(e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }

    // Stale socket from a crashed run; the instance lock already ensures
    // no other daemon is alive.
    if path.exists() {
        let _ = std::fs::remove_file(&path);
    }

    let listener = UnixListener::bind(&path)
        .wrap_err_with(|| format!("failed to bind control socket {}", path.display()))?;

    tinfo!("Ipc", "listening on {}", path.display());

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut stream, _addr)) => {
                    let tx = tx.clone();

                    tokio::spawn(async move {
                        let result = timeout(Duration::from_secs(10), async {
                            if let Err(e) = handle_connection(&mut stream, &tx).await {
                                terror!("Ipc", "error handling connection: {}", e);
                            }
                        })
                        .await;

                        if result.is_err() {
                            terror!("Ipc", "connection timed out after 10 seconds");
                        }

                        let _ = stream.shutdown().await;
                    });
                }
                Err(e) => terror!("Ipc", "failed to accept connection: {}", e),
            }
        }
    });

    Ok(())
}

async fn handle_connection(stream: &mut UnixStream, tx: &Sender<ManagerMsg>) -> std::io::Result<()> {
    let mut buf = vec![0u8; 256];
    let n = stream.read(&mut buf).await?;

    if n == 0 {
        return Ok(());
    }

    let cmd = String::from_utf8_lossy(&buf[..n]).trim().to_string();

    if !cmd.contains("--json") {
        tdebug!("Ipc", "received command: {}", cmd);
    }

    let response = route_command(&cmd, tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
