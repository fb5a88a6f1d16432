use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::user_repository::{DuplicateEmail, UserRepository};
use crate::domain::accounts::account::Account;
use crate::domain::accounts::policy;
use serde_json::Value;

pub struct Register<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub repo: &'a R,
    pub hasher: &'a H,
}

/// Raw body fields as submitted. Absent fields are `Value::Null`; non-string
/// values are coerced the way a JSON-native client would see them.
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub email: Value,
    pub password: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Email and password are required")]
    MissingField,
    #[error("Invalid email format")]
    InvalidFormat,
    #[error("Password must be at least {} characters long", policy::MIN_PASSWORD_LEN)]
    PolicyViolation,
    #[error("User already exists")]
    Conflict,
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for RegisterError {
    fn from(e: anyhow::Error) -> Self {
        RegisterError::Internal(e)
    }
}

/// Input that passed validation. `password` is `None` when the submitted
/// value was not a string: it clears the length rule but cannot be hashed.
#[derive(Debug)]
pub struct ValidRegistration<'a> {
    pub email: String,
    pub password: Option<&'a str>,
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn coerce_to_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(coerce_to_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Checks run before any I/O, in order; the first failure wins.
pub fn validate(req: &RegisterRequest) -> Result<ValidRegistration<'_>, RegisterError> {
    if is_blank(&req.email) || is_blank(&req.password) {
        return Err(RegisterError::MissingField);
    }
    let email = coerce_to_text(&req.email);
    if !policy::is_valid_email(&email) {
        return Err(RegisterError::InvalidFormat);
    }
    let password = match &req.password {
        Value::String(s) => {
            if !policy::meets_password_policy(s) {
                return Err(RegisterError::PolicyViolation);
            }
            Some(s.as_str())
        }
        Value::Array(items) if items.len() < policy::MIN_PASSWORD_LEN => {
            return Err(RegisterError::PolicyViolation);
        }
        _ => None,
    };
    Ok(ValidRegistration { email, password })
}

impl<'a, R, H> Register<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub async fn execute(&self, req: &RegisterRequest) -> Result<Account, RegisterError> {
        let ValidRegistration { email, password } = validate(req)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(RegisterError::Conflict);
        }

        let Some(password) = password else {
            return Err(anyhow::anyhow!("password is not a string").into());
        };
        let hash = self.hasher.hash(password).await?;

        // The lookup above and this insert are not atomic; the store's unique
        // constraint decides a concurrent race.
        match self.repo.create_user(&email, &hash).await {
            Ok(account) => Ok(account),
            Err(e) if e.downcast_ref::<DuplicateEmail>().is_some() => Err(RegisterError::Conflict),
            Err(e) => Err(RegisterError::Internal(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::Argon2PasswordHasher;
    use crate::infrastructure::db::repositories::user_repository_memory::InMemoryUserRepository;
    use async_trait::async_trait;
    use serde_json::json;

    fn req(email: Value, password: Value) -> RegisterRequest {
        RegisterRequest { email, password }
    }

    fn text(email: &str, password: &str) -> RegisterRequest {
        req(json!(email), json!(password))
    }

    struct UnreachableStore;

    #[async_trait]
    impl UserRepository for UnreachableStore {
        async fn create_user(&self, _: &str, _: &str) -> anyhow::Result<Account> {
            anyhow::bail!("connection refused")
        }
        async fn find_by_email(&self, _: &str) -> anyhow::Result<Option<Account>> {
            anyhow::bail!("connection refused")
        }
        async fn ping(&self) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    /// Lets the existence check pass but reports the insert as a duplicate,
    /// as happens when a concurrent request wins the race.
    struct RacingStore;

    #[async_trait]
    impl UserRepository for RacingStore {
        async fn create_user(&self, email: &str, _: &str) -> anyhow::Result<Account> {
            Err(DuplicateEmail {
                email: email.to_string(),
            }
            .into())
        }
        async fn find_by_email(&self, _: &str) -> anyhow::Result<Option<Account>> {
            Ok(None)
        }
        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct FailingHasher;

    #[async_trait]
    impl PasswordHasher for FailingHasher {
        async fn hash(&self, _: &str) -> anyhow::Result<String> {
            anyhow::bail!("blocking pool shut down")
        }
        async fn verify(&self, _: &str, _: &str) -> anyhow::Result<bool> {
            anyhow::bail!("blocking pool shut down")
        }
    }

    #[test]
    fn validation_order() {
        let missing = req(Value::Null, json!("x"));
        assert!(matches!(validate(&missing), Err(RegisterError::MissingField)));
        assert!(matches!(validate(&text("", "secret1")), Err(RegisterError::MissingField)));
        // format is checked before length
        assert!(matches!(validate(&text("foo", "abc")), Err(RegisterError::InvalidFormat)));
        assert!(matches!(
            validate(&text("a@b.co", "abc")),
            Err(RegisterError::PolicyViolation)
        ));
        let binding = text("a@b.co", "abcdef");
        let ok = validate(&binding).unwrap();
        assert_eq!(ok.email, "a@b.co");
        assert_eq!(ok.password, Some("abcdef"));
    }

    #[test]
    fn falsy_values_count_as_missing() {
        for blank in [json!(0), json!(false), json!(null), json!("")] {
            assert!(matches!(
                validate(&req(json!("a@b.co"), blank.clone())),
                Err(RegisterError::MissingField)
            ));
            assert!(matches!(
                validate(&req(blank, json!("secret1"))),
                Err(RegisterError::MissingField)
            ));
        }
    }

    #[test]
    fn non_string_email_is_coerced_then_checked() {
        for email in [json!(123), json!(true), json!({"a": 1})] {
            assert!(matches!(
                validate(&req(email, json!("secret1"))),
                Err(RegisterError::InvalidFormat)
            ));
        }
    }

    #[test]
    fn non_string_password_skips_length_rule() {
        let binding = req(json!("a@b.co"), json!(1234567));
        let ok = validate(&binding).unwrap();
        assert_eq!(ok.password, None);
        assert!(matches!(
            validate(&req(json!("a@b.co"), json!(["x"]))),
            Err(RegisterError::PolicyViolation)
        ));
    }

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(
            RegisterError::PolicyViolation.to_string(),
            "Password must be at least 6 characters long"
        );
        assert_eq!(
            RegisterError::Internal(anyhow::anyhow!("db down")).to_string(),
            "Internal server error"
        );
    }

    #[tokio::test]
    async fn creates_account_with_hashed_password() {
        let repo = InMemoryUserRepository::new();
        let hasher = Argon2PasswordHasher::new(1).unwrap();
        let uc = Register {
            repo: &repo,
            hasher: &hasher,
        };
        let account = uc.execute(&text("new@test.com", "secret1")).await.unwrap();
        assert_eq!(account.email, "new@test.com");
        assert_ne!(account.password_hash, "secret1");

        let stored = repo.find_by_email("new@test.com").await.unwrap().unwrap();
        assert_eq!(stored.id, account.id);
        assert!(hasher.verify("secret1", &stored.password_hash).await.unwrap());
    }

    #[tokio::test]
    async fn rejects_existing_email() {
        let repo = InMemoryUserRepository::new();
        let hasher = Argon2PasswordHasher::new(1).unwrap();
        let uc = Register {
            repo: &repo,
            hasher: &hasher,
        };
        uc.execute(&text("dup@test.com", "secret1")).await.unwrap();
        let err = uc.execute(&text("dup@test.com", "other12")).await.unwrap_err();
        assert!(matches!(err, RegisterError::Conflict));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn unhashable_password_fails_after_existence_check() {
        let repo = InMemoryUserRepository::new();
        let hasher = Argon2PasswordHasher::new(1).unwrap();
        let uc = Register {
            repo: &repo,
            hasher: &hasher,
        };
        let numeric = req(json!("num@test.com"), json!(1234567));
        let err = uc.execute(&numeric).await.unwrap_err();
        assert!(matches!(err, RegisterError::Internal(_)));
        assert!(repo.is_empty());

        uc.execute(&text("num@test.com", "secret1")).await.unwrap();
        let err = uc.execute(&numeric).await.unwrap_err();
        assert!(matches!(err, RegisterError::Conflict));
    }

    #[tokio::test]
    async fn lost_insert_race_is_a_conflict() {
        let hasher = Argon2PasswordHasher::new(1).unwrap();
        let uc = Register {
            repo: &RacingStore,
            hasher: &hasher,
        };
        let err = uc.execute(&text("race@test.com", "secret1")).await.unwrap_err();
        assert!(matches!(err, RegisterError::Conflict));
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let hasher = Argon2PasswordHasher::new(1).unwrap();
        let uc = Register {
            repo: &UnreachableStore,
            hasher: &hasher,
        };
        let err = uc.execute(&text("new@test.com", "secret1")).await.unwrap_err();
        assert!(matches!(err, RegisterError::Internal(_)));
    }

    #[tokio::test]
    async fn hasher_failure_is_internal_and_nothing_is_stored() {
        let repo = InMemoryUserRepository::new();
        let uc = Register {
            repo: &repo,
            hasher: &FailingHasher,
        };
        let err = uc.execute(&text("new@test.com", "secret1")).await.unwrap_err();
        assert!(matches!(err, RegisterError::Internal(_)));
        assert!(repo.is_empty());
    }
}
