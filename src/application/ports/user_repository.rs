use async_trait::async_trait;

use crate::domain::accounts::account::Account;

/// Returned (inside `anyhow::Error`) by `create_user` when the store already
/// holds the email, so callers can tell a lost insert race apart from an outage.
#[derive(Debug, thiserror::Error)]
#[error("email already registered: {email}")]
pub struct DuplicateEmail {
    pub email: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<Account>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>>;
    async fn ping(&self) -> anyhow::Result<()>;
}
