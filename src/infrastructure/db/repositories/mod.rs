pub mod user_repository_memory;
pub mod user_repository_sqlx;
