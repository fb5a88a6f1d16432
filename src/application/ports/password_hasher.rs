use async_trait::async_trait;

/// One-way, salted credential hashing. The cost factor belongs to the
/// implementation, not to each call.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> anyhow::Result<String>;
    async fn verify(&self, plaintext: &str, encoded: &str) -> anyhow::Result<bool>;
}
