use std::sync::Arc;

use relaychat_llm::{ChatClient, ChatError, ChatRequest, ConfigurationError, Message};
use relaychat_persist::{PersistError, SessionStore};
use relaychat_types::{ChatEvent, Role, Session, Turn, TurnPhase};
use thiserror::Error;
use tokio::sync::{watch, Mutex};

use crate::config::SessionConfig;
use crate::extract::NameExtractor;
use crate::prompt::build_messages;
use crate::sink::OutputSink;

const GENERIC_FAILURE_NOTICE: &str =
    "Error: Unable to get a response. Check the logs for details.";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("a turn is already in flight")]
    Busy,

    #[error("storage error: {0}")]
    Persist(#[from] PersistError),
}

/// How a submitted turn ended
#[derive(Debug)]
pub enum TurnOutcome {
    /// Input was empty after trimming; nothing happened
    Ignored,
    /// An assistant turn was appended. `degraded` means the fallback reply was used.
    Settled { reply: String, degraded: bool },
    /// No assistant turn was appended; the user turn stays in history
    Failed { error: ChatError },
}

/// Owns one conversation and drives each turn from user input to persisted output.
///
/// At most one turn is in flight at a time: `submit` while another turn is
/// composing or awaiting its response returns [`SessionError::Busy`].
pub struct SessionController {
    client: Arc<dyn ChatClient>,
    store: SessionStore,
    extractor: Arc<dyn NameExtractor>,
    sink: Arc<dyn OutputSink>,
    config: SessionConfig,
    session: Mutex<Session>,
    phase: watch::Sender<TurnPhase>,
}

impl SessionController {
    pub(crate) fn new(
        client: Arc<dyn ChatClient>,
        store: SessionStore,
        extractor: Arc<dyn NameExtractor>,
        sink: Arc<dyn OutputSink>,
        config: SessionConfig,
    ) -> Self {
        let (phase, _) = watch::channel(TurnPhase::Idle);
        let session = Mutex::new(Session::seeded(config.greeting.clone()));
        Self {
            client,
            store,
            extractor,
            sink,
            config,
            session,
            phase,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> crate::builder::SessionControllerBuilder {
        crate::builder::SessionControllerBuilder::new()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the in-memory session
    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub fn phase(&self) -> TurnPhase {
        *self.phase.borrow()
    }

    /// Watch phase transitions
    pub fn subscribe(&self) -> watch::Receiver<TurnPhase> {
        self.phase.subscribe()
    }

    /// Load the persisted session (or seed a fresh one) and render it.
    /// Calling again discards in-memory state and reloads from storage.
    pub async fn initialize(&self) -> Result<(), SessionError> {
        // Held across the load so no turn can be appended to a session that is
        // about to be replaced
        let mut session = self.session.lock().await;
        self.ensure_idle()?;

        let stored = self.store.load_history().await?;
        let display_name = self.store.load_display_name().await?;

        *session = match stored {
            Some(turns) if !turns.is_empty() => Session {
                turns,
                display_name,
            },
            _ => {
                let mut fresh = Session::seeded(self.config.greeting.clone());
                fresh.display_name = display_name;
                self.store.save_session(&fresh).await?;
                fresh
            }
        };
        tracing::info!(turns = session.len(), "Session initialized");
        self.render(&session);
        drop(session);

        if !self.client.is_configured() && !self.store.banner_dismissed().await? {
            self.sink.emit(ChatEvent::ConfigBanner {
                message: self.config.banner_message.clone(),
            });
        }
        self.sink.emit(ChatEvent::InputEnabled { enabled: true });
        Ok(())
    }

    /// Run one chat turn
    pub async fn submit(&self, user_text: &str) -> Result<TurnOutcome, SessionError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Ok(TurnOutcome::Ignored);
        }

        let mut turn = self.begin_turn()?;

        let messages = match self.compose(text).await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist user turn");
                self.sink.emit(ChatEvent::notice(GENERIC_FAILURE_NOTICE));
                return Err(e.into());
            }
        };

        self.sink.emit(ChatEvent::InputEnabled { enabled: false });
        turn.start_thinking(&self.config.thinking_label);
        turn.advance(TurnPhase::AwaitingResponse);

        let result = self.client.chat(ChatRequest::new(messages)).await;
        turn.stop_thinking();

        match result {
            Ok(response) => {
                let degraded = response.content.is_none();
                let reply = response.content.unwrap_or_else(|| {
                    tracing::warn!(raw = %response.raw, "Reply had no assistant text, using fallback");
                    self.config.fallback_reply.clone()
                });

                if let Err(e) = self.append(Turn::assistant(reply.clone())).await {
                    tracing::error!(error = %e, "Failed to persist assistant turn");
                    self.sink.emit(ChatEvent::notice(GENERIC_FAILURE_NOTICE));
                    return Err(e.into());
                }

                turn.settle();
                Ok(TurnOutcome::Settled { reply, degraded })
            }
            Err(error) => {
                tracing::warn!(error = %error, "Turn failed");
                self.sink.emit(ChatEvent::notice(failure_notice(&error)));
                Ok(TurnOutcome::Failed { error })
            }
        }
    }

    /// Back to the single greeting turn. The display name is kept.
    pub async fn clear(&self) -> Result<(), SessionError> {
        let mut session = self.session.lock().await;
        self.ensure_idle()?;

        let mut next = session.clone();
        next.clear_to(self.config.greeting.clone());
        self.commit(&mut session, next).await
    }

    /// Forget history and display name, then reseed
    pub async fn reset(&self) -> Result<(), SessionError> {
        let mut session = self.session.lock().await;
        self.ensure_idle()?;

        self.store.clear_all().await?;
        tracing::info!("Session reset");
        let next = Session::seeded(self.config.greeting.clone());
        self.commit(&mut session, next).await
    }

    pub async fn dismiss_config_banner(&self) -> Result<(), SessionError> {
        self.store.dismiss_banner().await?;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.phase.borrow().is_in_flight() {
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    /// IDLE → COMPOSING, atomically
    fn begin_turn(&self) -> Result<TurnGuard<'_>, SessionError> {
        let acquired = self.phase.send_if_modified(|phase| {
            if phase.is_in_flight() {
                return false;
            }
            *phase = TurnPhase::Composing;
            true
        });

        if !acquired {
            tracing::debug!("Rejected submit while a turn is in flight");
            return Err(SessionError::Busy);
        }

        Ok(TurnGuard {
            phase: &self.phase,
            sink: self.sink.as_ref(),
            terminal: TurnPhase::Failed,
            thinking: false,
        })
    }

    /// Append the user turn, capture a display name, persist, and build the request.
    /// The in-memory session only changes once storage has accepted the write.
    async fn compose(&self, text: &str) -> Result<Vec<Message>, PersistError> {
        let mut session = self.session.lock().await;

        let user_turn = Turn::user(text);
        let mut next = session.clone();
        next.push(user_turn.clone());

        if next.display_name.is_none() {
            if let Some(name) = self.extractor.extract(text) {
                tracing::debug!("Captured display name");
                next.set_display_name_if_unset(name);
            }
        }

        self.store.save_session(&next).await?;
        *session = next;

        self.sink.emit(ChatEvent::turn(user_turn));
        self.sink.emit(ChatEvent::LatestQuestion {
            text: Some(text.to_string()),
        });
        Ok(build_messages(&session, &self.config))
    }

    async fn append(&self, turn: Turn) -> Result<(), PersistError> {
        let mut session = self.session.lock().await;

        let mut turns = session.turns.clone();
        turns.push(turn.clone());
        self.store.save_history(&turns).await?;

        session.turns = turns;
        self.sink.emit(ChatEvent::turn(turn));
        Ok(())
    }

    /// Persist `next`, then make it the live session and render it
    async fn commit(&self, session: &mut Session, next: Session) -> Result<(), SessionError> {
        self.store.save_session(&next).await?;
        *session = next;
        self.render(session);
        Ok(())
    }

    fn render(&self, session: &Session) {
        self.sink.emit(ChatEvent::Cleared);
        for turn in &session.turns {
            self.sink.emit(ChatEvent::turn(turn.clone()));
        }

        let latest = session
            .turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.clone());
        self.sink.emit(ChatEvent::LatestQuestion { text: latest });
    }
}

/// Holds the controller in a turn. Dropping it, on any exit path, removes the
/// indicator, returns the phase to IDLE, and re-enables input.
struct TurnGuard<'a> {
    phase: &'a watch::Sender<TurnPhase>,
    sink: &'a dyn OutputSink,
    terminal: TurnPhase,
    thinking: bool,
}

impl TurnGuard<'_> {
    fn advance(&self, next: TurnPhase) {
        self.phase.send_replace(next);
    }

    fn start_thinking(&mut self, label: &str) {
        self.thinking = true;
        self.sink.emit(ChatEvent::Thinking {
            active: true,
            label: Some(label.to_string()),
        });
    }

    fn stop_thinking(&mut self) {
        if self.thinking {
            self.thinking = false;
            self.sink.emit(ChatEvent::Thinking {
                active: false,
                label: None,
            });
        }
    }

    fn settle(mut self) {
        self.terminal = TurnPhase::Settled;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.stop_thinking();
        self.phase.send_replace(self.terminal);
        self.phase.send_replace(TurnPhase::Idle);
        self.sink.emit(ChatEvent::InputEnabled { enabled: true });
    }
}

fn failure_notice(error: &ChatError) -> String {
    match error {
        ChatError::Configuration(ConfigurationError::Unset) => {
            "The chat service is not configured. Set a relay URL or an API key and try again."
                .to_string()
        }
        ChatError::Configuration(ConfigurationError::Unreachable { url, .. }) => format!(
            "Could not reach the chat relay at {}. Check that it is deployed and try again.",
            url
        ),
        ChatError::Transport(_) => GENERIC_FAILURE_NOTICE.to_string(),
    }
}
