use async_trait::async_trait;
use crate::error::Result;

/// String-keyed durable storage
///
/// Implementations provide last-write-wins semantics; there are no transactions.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Delete a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
