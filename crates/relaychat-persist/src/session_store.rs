use std::sync::Arc;

use relaychat_types::{Session, Turn};

use crate::error::Result;
use crate::stores::MemoryStore;
use crate::trait_client::KeyValueStore;

pub const HISTORY_KEY: &str = "history";
pub const USER_NAME_KEY: &str = "userName";
pub const BANNER_DISMISSED_KEY: &str = "configBannerDismissed";

/// Typed access to the persisted session layout.
///
/// `history` and `userName` live in the durable store; the banner flag lives in
/// a session-scoped store that is forgotten when the process ends.
#[derive(Clone)]
pub struct SessionStore {
    durable: Arc<dyn KeyValueStore>,
    scoped: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(durable: Arc<dyn KeyValueStore>) -> Self {
        Self {
            durable,
            scoped: Arc::new(MemoryStore::new()),
        }
    }

    pub fn with_scoped(mut self, scoped: Arc<dyn KeyValueStore>) -> Self {
        self.scoped = scoped;
        self
    }

    /// Stored history, or `None` if absent. A value that fails to parse is removed.
    pub async fn load_history(&self) -> Result<Option<Vec<Turn>>> {
        let Some(raw) = self.durable.get(HISTORY_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Turn>>(&raw) {
            Ok(turns) => Ok(Some(turns)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored history");
                self.durable.remove(HISTORY_KEY).await?;
                Ok(None)
            }
        }
    }

    pub async fn save_history(&self, turns: &[Turn]) -> Result<()> {
        let raw = serde_json::to_string(turns)?;
        self.durable.set(HISTORY_KEY, raw).await
    }

    pub async fn load_display_name(&self) -> Result<Option<String>> {
        Ok(self
            .durable
            .get(USER_NAME_KEY)
            .await?
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()))
    }

    /// Persist history and, when known, the display name
    pub async fn save_session(&self, session: &Session) -> Result<()> {
        self.save_history(&session.turns).await?;
        match &session.display_name {
            Some(name) => self.durable.set(USER_NAME_KEY, name.clone()).await,
            None => self.durable.remove(USER_NAME_KEY).await,
        }
    }

    /// Forget history and display name
    pub async fn clear_all(&self) -> Result<()> {
        self.durable.remove(HISTORY_KEY).await?;
        self.durable.remove(USER_NAME_KEY).await
    }

    pub async fn banner_dismissed(&self) -> Result<bool> {
        Ok(self.scoped.get(BANNER_DISMISSED_KEY).await?.as_deref() == Some("1"))
    }

    pub async fn dismiss_banner(&self) -> Result<()> {
        self.scoped.set(BANNER_DISMISSED_KEY, "1".to_string()).await
    }
}
