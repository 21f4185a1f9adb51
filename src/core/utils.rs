// License: MIT

/// Largest total the clock face can show: 99:59:59.
pub const MAX_DISPLAY_SECS: u64 = 99 * 3600 + 59 * 60 + 59;

pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    d.as_millis() as u64
}

/// Render a total as HH:MM:SS, clamped to the display cap.
pub fn format_hms(secs: u64) -> String {
    let secs = secs.min(MAX_DISPLAY_SECS);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Parse "HH:MM:SS", "MM:SS" or a bare seconds count.
pub fn parse_hms(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut total: u64 = 0;
    for part in &parts {
        let field: u64 = part.trim().parse().ok()?;
        total = total.checked_mul(60)?.checked_add(field)?;
    }

    Some(total)
}
