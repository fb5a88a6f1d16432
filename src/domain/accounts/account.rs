use uuid::Uuid;

/// A registered identity. `password_hash` is always the encoded hash string,
/// never the submitted secret.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
