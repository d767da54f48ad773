use relaychat_types::ChatEvent;
use tokio::sync::mpsc;

/// Where rendering instructions go. Emitting never fails from the controller's point of view.
pub trait OutputSink: Send + Sync {
    fn emit(&self, event: ChatEvent);
}

impl OutputSink for mpsc::UnboundedSender<ChatEvent> {
    fn emit(&self, event: ChatEvent) {
        if self.send(event).is_err() {
            tracing::debug!("Output sink receiver dropped");
        }
    }
}
