pub mod error;
pub mod session_store;
pub mod stores;
pub mod trait_client;

pub use error::PersistError;
pub use session_store::{SessionStore, BANNER_DISMISSED_KEY, HISTORY_KEY, USER_NAME_KEY};
pub use stores::{FileStore, MemoryStore};
pub use trait_client::KeyValueStore;
