//! Desktop notifications for streak and day events
//! Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

#[cfg(target_os = "macos")]
fn display(title: &str, message: &str) {
    let script = format!(
        r#"display notification "{}" with title "{}""#,
        message.replace('"', "\\\""),
        title.replace('"', "\\\"")
    );

    if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
        log::debug!("osascript notification failed: {}", e);
    }
}

fn streak_message(streak: u32) -> String {
    format!(
        "🔥 Every task done today. Streak: {} day{}",
        streak,
        if streak == 1 { "" } else { "s" }
    )
}

fn new_day_message(archived: usize) -> String {
    match archived {
        0 => "A fresh board is ready.".to_string(),
        1 => "1 completed task moved to history.".to_string(),
        n => format!("{} completed tasks moved to history.", n),
    }
}

/// Send a notification when today's streak is earned
pub fn notify_streak_earned(streak: u32) {
    #[cfg(target_os = "macos")]
    display("Zen Focus - Streak", &streak_message(streak));

    // No desktop notifications on other platforms
    #[cfg(not(target_os = "macos"))]
    log::debug!("Streak notification skipped: {}", streak_message(streak));
}

/// Send a notification when the board rolls over to a new day
pub fn notify_new_day(archived: usize) {
    #[cfg(target_os = "macos")]
    display("Zen Focus - New Day", &new_day_message(archived));

    #[cfg(not(target_os = "macos"))]
    log::debug!("New-day notification skipped: {}", new_day_message(archived));
}
