use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use async_trait::async_trait;
use password_hash::rand_core::OsRng;

use crate::application::ports::password_hasher::PasswordHasher;

pub const DEFAULT_HASH_COST: u32 = 10;

/// Argon2id hasher. `cost` is the iteration count (time cost); memory and
/// parallelism stay at the argon2 crate defaults.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new(cost: u32) -> anyhow::Result<Self> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| anyhow::anyhow!("invalid argon2 params: {e}"))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
        let argon2 = self.argon2.clone();
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| anyhow::anyhow!(e.to_string()))
        })
        .await?
    }

    async fn verify(&self, plaintext: &str, encoded: &str) -> anyhow::Result<bool> {
        let argon2 = self.argon2.clone();
        let plaintext = plaintext.to_owned();
        let encoded = encoded.to_owned();
        tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
            let parsed = PasswordHash::new(&encoded).map_err(|e| anyhow::anyhow!(e.to_string()))?;
            Ok(argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok())
        })
        .await?
    }
}
