// License: MIT

use tokio::sync::{mpsc::Sender, oneshot};

use crate::core::{info::InfoSnapshot, manager_msg::ManagerMsg, utils::format_hms};

pub async fn handle_info(tx: &Sender<ManagerMsg>, as_json: bool) -> Result<String, String> {
    let snap = fetch_snapshot(tx).await?;

    if as_json {
        Ok(render_json(&snap))
    } else {
        Ok(render_text(&snap))
    }
}

pub async fn handle_history(tx: &Sender<ManagerMsg>) -> Result<String, String> {
    let snap = fetch_snapshot(tx).await?;

    if snap.history.is_empty() {
        return Ok("History is empty".to_string());
    }

    let mut out = String::new();
    for (i, secs) in snap.history.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i, format_hms(*secs)));
    }
    Ok(out)
}

async fn fetch_snapshot(tx: &Sender<ManagerMsg>) -> Result<InfoSnapshot, String> {
    let (reply_tx, reply_rx) = oneshot::channel();

    tx.send(ManagerMsg::GetInfo { reply: reply_tx })
        .await
        .map_err(|_| "daemon is shutting down".to_string())?;

    reply_rx
        .await
        .map_err(|_| "daemon dropped the request".to_string())
}

/// Status-bar JSON (Waybar custom module format plus the raw fields).
fn render_json(snap: &InfoSnapshot) -> String {
    let percentage = if snap.goal_secs > 0 {
        Some((snap.total_secs * 100 / snap.goal_secs).min(100))
    } else {
        None
    };

    let tooltip = match snap.goal_secs {
        0 => format!("stint: {} ({})", snap.display, snap.state.label()),
        goal => format!(
            "stint: {} of {} ({})",
            snap.display,
            format_hms(goal),
            snap.state.label()
        ),
    };

    serde_json::json!({
        "text": snap.display,
        "alt": snap.state.label(),
        "class": snap.state.label(),
        "tooltip": tooltip,
        "percentage": percentage,
        "snapshot": snap,
    })
    .to_string()
}

fn render_text(snap: &InfoSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!("state:          {}\n", snap.state.label()));
    out.push_str(&format!("total:          {}\n", snap.display));

    match snap.goal_secs {
        0 => out.push_str("goal:           none\n"),
        goal => out.push_str(&format!(
            "goal:           {}{}\n",
            format_hms(goal),
            if snap.goal_reached { " (reached)" } else { "" }
        )),
    }

    out.push_str(&format!("idle timeout:   {} s\n", snap.idle_timeout_secs));
    out.push_str(&format!(
        "idle sound:     {}\n",
        if snap.play_sound_on_idle { "on" } else { "off" }
    ));
    out.push_str(&format!(
        "border:         {}\n",
        if snap.show_border_when_not_working { "on" } else { "off" }
    ));

    if let Some(gesture) = snap.pending_gesture {
        out.push_str(&format!("pending:        {} program\n", gesture));
    }

    if let Some(fg) = &snap.foreground {
        out.push_str(&format!("foreground:     {}\n", fg));
    }

    if snap.tracked_programs.is_empty() {
        out.push_str("tracked:        none (run `stint add-program`)\n");
    } else {
        out.push_str("tracked:\n");
        for program in &snap.tracked_programs {
            out.push_str(&format!("  {:<16} {}\n", program.name, program.path));
        }
    }

    if !snap.history.is_empty() {
        out.push_str("history:\n");
        for (i, secs) in snap.history.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i, format_hms(*secs)));
        }
    }

    out
}
