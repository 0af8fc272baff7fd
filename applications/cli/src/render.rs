/// Terminal rendering of transport state
use tune_transport::{Notification, NotificationKind, PlaybackState};

/// Progress bar width in characters
pub const BAR_WIDTH: usize = 30;

/// `1:05 / 3:33 [#####-------] ▶`
pub fn progress_line(state: &PlaybackState, width: usize) -> String {
    let filled = ((state.progress_percent() / 100.0) * width as f64).floor() as usize;
    let filled = filled.min(width);

    format!(
        "{} / {} [{}{}] {}",
        state.position_label(),
        state.duration_label(),
        "#".repeat(filled),
        "-".repeat(width - filled),
        if state.is_playing { "▶" } else { "⏸" },
    )
}

/// `[info] Shuffle ON`
pub fn notice_line(notice: &Notification) -> String {
    let tag = match notice.kind {
        NotificationKind::Info => "info",
        NotificationKind::Success => "success",
    };
    format!("[{}] {}", tag, notice.message)
}

/// Whether the visible line would change between two states
pub fn needs_redraw(previous: &PlaybackState, current: &PlaybackState) -> bool {
    previous.is_playing != current.is_playing
        || previous.position_label() != current.position_label()
}
