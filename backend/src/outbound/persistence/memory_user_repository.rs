//! In-memory implementation of the user repository port.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    usernames: HashSet<String>,
}

/// User store kept in process memory.
///
/// Identifiers come from a monotonically increasing sequence starting at 1
/// and are never reused.
///
/// # Examples
/// ```
/// use users_api::domain::ports::UserRepository;
/// use users_api::domain::{FirstName, NewUser, Username};
/// use users_api::outbound::persistence::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::new();
/// let user = repo
///     .create(NewUser::new(
///         Username::new("joan").unwrap(),
///         FirstName::new("Joan").unwrap(),
///     ))
///     .await
///     .unwrap();
/// assert_eq!(user.id().get(), 1);
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryUserRepository {
    tables: RwLock<Tables>,
    sequence: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            sequence: AtomicI64::new(0),
        }
    }

    fn next_id(&self) -> Result<UserId, UserPersistenceError> {
        let raw = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        UserId::new(raw).map_err(|err| UserPersistenceError::unavailable(err.to_string()))
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.tables.write().await;
        let username = user.username().as_ref().to_owned();
        if tables.usernames.contains(&username) {
            return Err(UserPersistenceError::duplicate_username(username));
        }

        let id = self.next_id()?;
        let stored = user.into_user(id);
        tables.usernames.insert(username);
        tables.users.insert(id, stored.clone());
        debug!(user_id = %id, "user stored");
        Ok(stored)
    }
}
