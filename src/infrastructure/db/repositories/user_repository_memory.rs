use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::user_repository::{DuplicateEmail, UserRepository};
use crate::domain::accounts::account::Account;

/// Process-local store keyed by email. Enforces the same uniqueness rule as
/// the `users.email` constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, Account>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<Account> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| anyhow::anyhow!("user store poisoned"))?;
        if users.contains_key(email) {
            return Err(DuplicateEmail {
                email: email.to_string(),
            }
            .into());
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: chrono::Utc::now(),
        };
        users.insert(email.to_string(), account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        let users = self
            .users
            .lock()
            .map_err(|_| anyhow::anyhow!("user store poisoned"))?;
        Ok(users.get(email).cloned())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
