use relaychat::{ChatEvent, Role};
use std::io::Write;
use tokio::sync::mpsc;

const DIVIDER: &str = "────────────────────────────────────────";

/// Text for one event, or `None` when the terminal has nothing to show
pub fn format_event(event: &ChatEvent) -> Option<String> {
    match event {
        ChatEvent::Cleared => Some(DIVIDER.to_string()),
        ChatEvent::Turn { turn } => {
            let speaker = match turn.role {
                Role::User => "You",
                Role::Assistant => "Assistant",
            };
            Some(format!("{}: {}", speaker, turn.content))
        }
        ChatEvent::Thinking {
            active: true,
            label,
        } => label.as_ref().map(|l| format!("  {}", l)),
        ChatEvent::Thinking { active: false, .. } => None,
        ChatEvent::Notice { message } => Some(format!("! {}", message)),
        ChatEvent::ConfigBanner { message } => {
            Some(format!("[setup] {} (type /dismiss to hide)", message))
        }
        // The question is already on screen as the user's own line
        ChatEvent::LatestQuestion { .. } => None,
        ChatEvent::InputEnabled { .. } => None,
    }
}

/// Drain the controller's events to stdout until every sender is gone
pub async fn print_events(mut events: mpsc::UnboundedReceiver<ChatEvent>) {
    let mut stdout = std::io::stdout();

    while let Some(event) = events.recv().await {
        if let Some(line) = format_event(&event) {
            let _ = writeln!(stdout, "{}", line);
        }
        if let ChatEvent::InputEnabled { enabled: true } = event {
            let _ = write!(stdout, "> ");
        }
        let _ = stdout.flush();
    }
}
