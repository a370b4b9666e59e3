// Service exports
pub mod accounts;
pub mod repository;
pub mod session;
pub mod store;

pub use accounts::{AccountError, AccountStore};
pub use repository::{GroupRepository, InMemoryGroupRepository, NewGroup, RepositoryError};
pub use session::{
    AuthSession, Clock, ManualClock, SessionError, SessionExpiry, SessionManager, SessionPolicy,
    SessionQuery, SessionState, SystemClock,
};
pub use store::{InMemoryStore, KeyValueStore, StoreError, StoreKey};
